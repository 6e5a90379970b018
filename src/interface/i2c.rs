use embedded_hal as hal;

use super::SensorInterface;
use crate::Error;
#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

/// Longest register payload the sensor accepts (THRESHOLDS)
const MAX_WRITE_LEN: usize = 5;

/// This combines the I2C peripheral with the
/// 7-bit address the sensor answers on.
pub struct I2cInterface<I2C> {
    /// i2c port
    i2c_port: I2C,
    /// address for i2c communications
    address: u8,
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: hal::i2c::I2c<Error = CommE>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c_port: i2c,
            address,
        }
    }

    /// Release owned resources
    pub fn release(self) -> I2C {
        self.i2c_port
    }
}

impl<I2C, CommE> SensorInterface for I2cInterface<I2C>
where
    I2C: hal::i2c::I2c<Error = CommE>,
{
    type InterfaceError = Error<CommE>;

    fn register_read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Self::InterfaceError> {
        self.i2c_port
            .write_read(self.address, &[reg], buffer)
            .map_err(Error::Comm)?;

        #[cfg(feature = "rttdebug")]
        rprintln!("read reg 0x{:x} {:x?} ", reg, buffer);

        Ok(())
    }

    fn register_write(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::InterfaceError> {
        let len = data.len();
        if len > MAX_WRITE_LEN {
            return Err(Error::PayloadTooLong(len));
        }
        let mut block = [0u8; MAX_WRITE_LEN + 1];
        block[0] = reg;
        block[1..=len].copy_from_slice(data);

        #[cfg(feature = "rttdebug")]
        rprintln!("write {:x?} ", &block[..=len]);

        self.i2c_port
            .write(self.address, &block[..=len])
            .map_err(Error::Comm)
    }

    fn command(&mut self, opcode: u8) -> Result<(), Self::InterfaceError> {
        self.i2c_port
            .write(self.address, &[opcode])
            .map_err(Error::Comm)
    }
}
