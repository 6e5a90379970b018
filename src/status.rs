//! Bitfield views of the STATUS and ERROR_ID registers

/// STATUS register (0x00)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    const ERROR: u8 = 0x01;
    const DATA_READY: u8 = 0x08;
    const APP_VALID: u8 = 0x10;
    const FW_MODE: u8 = 0x80;

    /// ERROR_ID holds the cause of a failure
    pub fn error(&self) -> bool {
        self.0 & Self::ERROR != 0
    }

    /// A new sample is waiting in ALG_RESULT_DATA
    pub fn data_ready(&self) -> bool {
        self.0 & Self::DATA_READY != 0
    }

    /// Valid application firmware is loaded
    pub fn app_valid(&self) -> bool {
        self.0 & Self::APP_VALID != 0
    }

    /// Set once the application firmware is running, clear while in boot mode
    pub fn fw_mode(&self) -> bool {
        self.0 & Self::FW_MODE != 0
    }
}

/// ERROR_ID register (0xE0)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ErrorId(pub u8);

impl ErrorId {
    const WRITE_REG_INVALID: u8 = 0x01;
    const READ_REG_INVALID: u8 = 0x02;
    const MEASMODE_INVALID: u8 = 0x04;
    const MAX_RESISTANCE: u8 = 0x08;
    const HEATER_FAULT: u8 = 0x10;
    const HEATER_SUPPLY: u8 = 0x20;

    pub fn write_reg_invalid(&self) -> bool {
        self.0 & Self::WRITE_REG_INVALID != 0
    }

    pub fn read_reg_invalid(&self) -> bool {
        self.0 & Self::READ_REG_INVALID != 0
    }

    pub fn measmode_invalid(&self) -> bool {
        self.0 & Self::MEASMODE_INVALID != 0
    }

    /// Sensor resistance reached or exceeded its maximum range
    pub fn max_resistance(&self) -> bool {
        self.0 & Self::MAX_RESISTANCE != 0
    }

    pub fn heater_fault(&self) -> bool {
        self.0 & Self::HEATER_FAULT != 0
    }

    pub fn heater_supply(&self) -> bool {
        self.0 & Self::HEATER_SUPPLY != 0
    }
}
