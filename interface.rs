use std::thread;
use std::time::Duration;

use log::debug;
use rppal::i2c::I2c;

/// BME280 I2C default slave address.
pub const ADDR_BME280: u16 = 0x76;

/// The three bus primitives the driver needs.
pub trait Interface {
    type Error;

    /// Writes one byte to a register, returning once the bus acknowledged it.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;

    fn read_block(&mut self, base: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    fn delay_ms(&mut self, ms: u64);
}

/// Raspberry Pi I2C bus via rppal.
pub struct I2cInterface {
    i2c: I2c,
}

impl I2cInterface {
    pub fn new(address: u16) -> Result<Self, rppal::i2c::Error> {
        Self::from_i2c(I2c::new()?, address)
    }

    /// Opens `/dev/i2c-<bus>` and targets `address`.
    pub fn with_bus(bus: u8, address: u16) -> Result<Self, rppal::i2c::Error> {
        Self::from_i2c(I2c::with_bus(bus)?, address)
    }

    fn from_i2c(mut i2c: I2c, address: u16) -> Result<Self, rppal::i2c::Error> {
        i2c.set_slave_address(address)?;
        debug!("i2c slave address {:#04x}", address);
        Ok(I2cInterface { i2c })
    }
}

impl Interface for I2cInterface {
    type Error = rppal::i2c::Error;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.smbus_write_byte(register, value)
    }

    fn read_block(&mut self, base: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(&[base], buffer)
    }

    fn delay_ms(&mut self, ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }
}
