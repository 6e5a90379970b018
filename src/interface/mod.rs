pub mod i2c;

pub use self::i2c::I2cInterface;

/// A method of communicating with the sensor
pub trait SensorInterface {
    /// Interface error type
    type InterfaceError;

    /// Fill `buffer` with the contents of the register block starting at `reg`
    fn register_read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Self::InterfaceError>;

    /// Write `data` into the register block starting at `reg`
    fn register_write(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::InterfaceError>;

    /// Send a bare opcode with no register payload
    fn command(&mut self, opcode: u8) -> Result<(), Self::InterfaceError>;
}
