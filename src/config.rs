//! Measurement mode and environment compensation encodings

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// How often the sensor runs its measurement cycle (DRIVE_MODE field of MEAS_MODE)
pub enum DriveMode {
    /// Measurements disabled
    Idle = 0x00,
    /// Constant power, one measurement per second
    Mode1Sec = 0x01,
    /// Pulse heating, one measurement every 10 seconds
    Mode10Sec = 0x02,
    /// Low power pulse heating, one measurement every 60 seconds
    Mode60Sec = 0x03,
    /// Constant power, raw data only every 250 ms
    Mode250Ms = 0x04,
}

impl Default for DriveMode {
    fn default() -> Self {
        DriveMode::Mode10Sec
    }
}

/// Contents of the MEAS_MODE register
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeasurementConfig {
    /// Assert nINT when new data is ready
    pub interrupt_mode: bool,
    /// Only assert nINT when a reading crosses the configured thresholds
    pub interrupt_threshold: bool,
    pub drive_mode: DriveMode,
}

impl MeasurementConfig {
    /// Pack into the MEAS_MODE byte.
    ///
    /// The drive mode is masked to two bits, so `Mode250Ms` packs the same
    /// as `Idle`.
    pub fn meas_mode_byte(&self) -> u8 {
        let threshold = self.interrupt_threshold as u8 & 0x01;
        let mode = self.interrupt_mode as u8 & 0x01;
        let rate = self.drive_mode as u8 & 0x03;
        threshold << 2 | mode << 3 | rate << 4
    }
}

/// Compensation temperature the sensor assumes until told otherwise, °C
const DEFAULT_TEMPERATURE: f32 = 25.0;

/// Round half away from zero, without pulling in libm
fn round_half_away(val: f32) -> i32 {
    if val >= 0.0 {
        (val + 0.5) as i32
    } else {
        (val - 0.5) as i32
    }
}

/// Encode the ENV_DATA payload: `[humidity * 2, 0x00, temp LSB, temp MSB]`.
///
/// Temperature is rounded to the nearest 0.5 °C and offset so that
/// -25 °C maps to 0, 25 °C to 100 and 125 °C to 300, stored little-endian.
/// This is not the datasheet's 1/512 °C format. Values below -25 °C
/// saturate to zero, values above 32742.5 °C (and +inf) to `0xFFFF`.
/// NaN encodes as the sensor's default of 25 °C.
pub fn encode_environment(temperature: f32, humidity: u8) -> [u8; 4] {
    let temperature = if temperature.is_nan() {
        DEFAULT_TEMPERATURE
    } else {
        temperature
    };
    // (t + 25) * 2 with t already on a 0.5 °C grid
    let half_degrees = round_half_away(temperature * 2.0).saturating_add(50);
    let temp = half_degrees.max(0).min(u16::MAX as i32) as u16;
    let [temp_lsb, temp_msb] = temp.to_le_bytes();

    [humidity.wrapping_mul(2), 0x00, temp_lsb, temp_msb]
}
