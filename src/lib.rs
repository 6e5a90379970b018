/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

#![cfg_attr(not(test), no_std)]

use embedded_hal as hal;
use hal::delay::DelayNs;
use log::{debug, info, warn};

mod config;
mod interface;
mod status;

pub use config::{encode_environment, DriveMode, MeasurementConfig};
pub use interface::{I2cInterface, SensorInterface};
pub use status::{ErrorId, Status};

/// Address when the ADDR pin is held low
pub const DEFAULT_ADDRESS: u8 = 0x5A;
/// Address when the ADDR pin is held high
pub const ALTERNATE_ADDRESS: u8 = 0x5B;

/// Errors in this crate
#[derive(Debug)]
pub enum Error<CommE> {
    /// Sensor communication error
    Comm(CommE),

    /// Unrecognized hardware ID
    UnknownChipId(u8),
    /// STATUS reported an error after the application was started
    DeviceError,
    /// Still running the boot loader after the application start command
    NotInApplicationMode,
    /// Register payload longer than any register accepts
    PayloadTooLong(usize),
}

pub struct Builder {}

impl Builder {
    /// Create a new driver using I2C interface
    pub fn new_i2c<I2C, CommE>(i2c: I2C, address: u8) -> CCS811<I2cInterface<I2C>>
    where
        I2C: hal::i2c::I2c<Error = CommE>,
        CommE: core::fmt::Debug,
    {
        let iface = interface::I2cInterface::new(i2c, address);
        CCS811::new_with_interface(iface)
    }
}

/// One eCO2/TVOC sample
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Measurement {
    /// Equivalent CO2, ppm
    pub eco2: u16,
    /// Total volatile organic compounds, ppb
    pub tvoc: u16,
    /// DATA_READY was set when the sample was taken
    pub valid: bool,
}

/// Major.minor.trivial firmware version
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub trivial: u8,
}

impl From<[u8; 2]> for FirmwareVersion {
    fn from(block: [u8; 2]) -> Self {
        Self {
            major: block[0] >> 4,
            minor: block[0] & 0x0F,
            trivial: block[1],
        }
    }
}

/// Sensor current and voltage behind the last sample (RAW_DATA)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawData {
    /// Current through the sensor, µA (0..63)
    pub current_ua: u8,
    /// ADC reading of the sensor voltage, 1023 = 1.65 V
    pub voltage: u16,
}

pub struct CCS811<SI> {
    pub(crate) si: SI,

    pub(crate) config: MeasurementConfig,
}

impl<SI, CommE> CCS811<SI>
where
    SI: SensorInterface<InterfaceError = Error<CommE>>,
    CommE: core::fmt::Debug,
{
    pub(crate) fn new_with_interface(sensor_interface: SI) -> Self {
        Self {
            si: sensor_interface,
            config: MeasurementConfig::default(),
        }
    }

    /// Give back the sensor interface
    pub fn release(self) -> SI {
        self.si
    }

    /// Measurement configuration last written (or to be written by `setup`)
    pub fn config(&self) -> MeasurementConfig {
        self.config
    }

    /// Reset the sensor, start its application firmware and write the
    /// measurement configuration. Returns false if any step failed.
    pub fn begin(&mut self, delay_source: &mut impl DelayNs) -> bool {
        match self.setup(delay_source) {
            Ok(()) => true,
            Err(e) => {
                warn!("CCS811 setup failed: {:?}", e);
                false
            }
        }
    }

    /// Reset the sensor, verify it, start the application firmware and
    /// write the measurement configuration.
    ///
    /// A STATUS without FW_MODE after the start command is treated as a
    /// failure: the sensor is still sitting in its boot loader.
    pub fn setup(&mut self, delay_source: &mut impl DelayNs) -> Result<(), SI::InterfaceError> {
        self.soft_reset()?;
        delay_source.delay_ms(STARTUP_DELAY_MS);

        let hw_id = self.hardware_id()?;
        if hw_id != HW_ID_CODE {
            return Err(Error::UnknownChipId(hw_id));
        }
        info!("found CCS811 (hw id 0x{:02x})", hw_id);

        self.start_application()?;
        delay_source.delay_ms(STARTUP_DELAY_MS);

        let status = self.status()?;
        if status.error() {
            return Err(Error::DeviceError);
        }
        if !status.fw_mode() {
            return Err(Error::NotInApplicationMode);
        }

        self.configure(self.config)
    }

    /// Trigger a software reset; the sensor comes back up in boot mode
    pub fn soft_reset(&mut self) -> Result<(), SI::InterfaceError> {
        self.si.register_write(REG_SW_RESET, &SW_RESET_SEQUENCE)
    }

    /// Read the HW_ID register
    pub fn hardware_id(&mut self) -> Result<u8, SI::InterfaceError> {
        let mut block = [0u8; 1];
        self.si.register_read(REG_HW_ID, &mut block)?;
        Ok(block[0])
    }

    /// Move from boot loader to application firmware
    pub fn start_application(&mut self) -> Result<(), SI::InterfaceError> {
        self.si.command(BOOTLOADER_APP_START)
    }

    pub fn status(&mut self) -> Result<Status, SI::InterfaceError> {
        let mut block = [0u8; 1];
        self.si.register_read(REG_STATUS, &mut block)?;
        Ok(Status(block[0]))
    }

    /// Read the cause of the last STATUS error; reading clears it
    pub fn error_id(&mut self) -> Result<ErrorId, SI::InterfaceError> {
        let mut block = [0u8; 1];
        self.si.register_read(REG_ERROR_ID, &mut block)?;
        Ok(ErrorId(block[0]))
    }

    /// Write the measurement configuration to MEAS_MODE
    pub fn configure(&mut self, config: MeasurementConfig) -> Result<(), SI::InterfaceError> {
        self.config = config;
        self.si
            .register_write(REG_MEAS_MODE, &[config.meas_mode_byte()])
    }

    /// Change the drive mode, keeping the interrupt settings
    pub fn set_drive_mode(&mut self, drive_mode: DriveMode) -> Result<(), SI::InterfaceError> {
        let config = MeasurementConfig {
            drive_mode,
            ..self.config
        };
        self.configure(config)
    }

    /// Feed ambient temperature (°C) and relative humidity (%) to the
    /// compensation algorithm
    pub fn set_environment(
        &mut self,
        temperature: f32,
        humidity: u8,
    ) -> Result<(), SI::InterfaceError> {
        let payload = encode_environment(temperature, humidity);
        self.si.register_write(REG_ENV_DATA, &payload)
    }

    /// True if a new sample is waiting. Bus errors read as "not ready".
    pub fn is_data_ready(&mut self) -> bool {
        match self.status() {
            Ok(status) => status.data_ready(),
            Err(e) => {
                warn!("CCS811 data ready check failed: {:?}", e);
                false
            }
        }
    }

    /// Read eCO2 (ppm) and TVOC (ppb) from ALG_RESULT_DATA
    pub fn read_algorithm_result(&mut self) -> Result<(u16, u16), SI::InterfaceError> {
        let mut block = [0u8; 8];
        self.si.register_read(REG_ALG_RESULT_DATA, &mut block)?;
        let eco2 = u16::from_be_bytes([block[0], block[1]]);
        let tvoc = u16::from_be_bytes([block[2], block[3]]);
        Ok((eco2, tvoc))
    }

    /// Read the latest sample.
    ///
    /// The result registers are read whether or not DATA_READY is set;
    /// `valid` reports the flag. A failed result read yields zeros and
    /// `valid == false`.
    pub fn read_data(&mut self) -> Measurement {
        let valid = self.is_data_ready();
        match self.read_algorithm_result() {
            Ok((eco2, tvoc)) => {
                debug!("eco2 {} ppm tvoc {} ppb valid {}", eco2, tvoc, valid);
                Measurement { eco2, tvoc, valid }
            }
            Err(e) => {
                warn!("CCS811 result read failed: {:?}", e);
                Measurement::default()
            }
        }
    }

    pub fn raw_data(&mut self) -> Result<RawData, SI::InterfaceError> {
        let mut block = [0u8; 2];
        self.si.register_read(REG_RAW_DATA, &mut block)?;
        Ok(RawData {
            current_ua: block[0] >> 2,
            voltage: ((block[0] as u16 & 0x03) << 8) | block[1] as u16,
        })
    }

    /// Opaque algorithm baseline, for saving across power cycles
    pub fn baseline(&mut self) -> Result<[u8; 2], SI::InterfaceError> {
        let mut block = [0u8; 2];
        self.si.register_read(REG_BASELINE, &mut block)?;
        Ok(block)
    }

    /// Restore a baseline previously read with `baseline`
    pub fn set_baseline(&mut self, baseline: [u8; 2]) -> Result<(), SI::InterfaceError> {
        self.si.register_write(REG_BASELINE, &baseline)
    }

    pub fn hardware_version(&mut self) -> Result<u8, SI::InterfaceError> {
        let mut block = [0u8; 1];
        self.si.register_read(REG_HW_VERSION, &mut block)?;
        Ok(block[0])
    }

    pub fn firmware_boot_version(&mut self) -> Result<FirmwareVersion, SI::InterfaceError> {
        let mut block = [0u8; 2];
        self.si.register_read(REG_FW_BOOT_VERSION, &mut block)?;
        Ok(FirmwareVersion::from(block))
    }

    pub fn firmware_app_version(&mut self) -> Result<FirmwareVersion, SI::InterfaceError> {
        let mut block = [0u8; 2];
        self.si.register_read(REG_FW_APP_VERSION, &mut block)?;
        Ok(FirmwareVersion::from(block))
    }
}

/// Registers
///
const REG_STATUS: u8 = 0x00;
const REG_MEAS_MODE: u8 = 0x01;
const REG_ALG_RESULT_DATA: u8 = 0x02;
const REG_RAW_DATA: u8 = 0x03;
const REG_ENV_DATA: u8 = 0x05;
const REG_BASELINE: u8 = 0x11;
const REG_HW_ID: u8 = 0x20;
const REG_HW_VERSION: u8 = 0x21;
const REG_FW_BOOT_VERSION: u8 = 0x23;
const REG_FW_APP_VERSION: u8 = 0x24;
const REG_ERROR_ID: u8 = 0xE0;
const REG_SW_RESET: u8 = 0xFF;

/// Boot loader opcode, sent without a register payload
const BOOTLOADER_APP_START: u8 = 0xF4;

/// Written to SW_RESET; any other sequence is ignored
const SW_RESET_SEQUENCE: [u8; 4] = [0x11, 0xE5, 0x72, 0x8A];

const HW_ID_CODE: u8 = 0x81;

/// Settle time after reset and after app start
const STARTUP_DELAY_MS: u32 = 100;
