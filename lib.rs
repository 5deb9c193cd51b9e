//! # rpbme280
//!
//! BME280 driver for the Raspberry Pi I2C bus.
//!
//! The sensor is configured once, then every sample is a single bulk read of
//! the register map (0x88 through 0xFF) from which both the calibration
//! constants and the raw ADC values are decoded. Compensation uses the
//! datasheet's integer formulas only.
//!
//! ## Units
//! - **Temperature**: hundredths of a degree Celsius (2508 = 25.08 °C)
//! - **Pressure**: 1/25600 mbar (0 = unavailable)
//! - **Humidity**: 1/1024 %RH
//!
//! ```no_run
//! use rpbme280::{Bme280, I2cInterface, SensorConfig, ADDR_BME280};
//!
//! let interface = I2cInterface::new(ADDR_BME280).unwrap();
//! let mut bme280 = Bme280::new(interface)
//!     .configure(&SensorConfig::default())
//!     .unwrap();
//! let reading = bme280.sample().unwrap();
//! println!("{:.2} C", reading.celsius());
//! ```

use std::marker::PhantomData;

use log::{debug, trace};

pub mod compensation;
pub mod config;
pub mod error;
pub mod interface;
pub mod registers;
mod structs;

pub use config::SensorConfig;
pub use error::Error;
pub use interface::{I2cInterface, Interface, ADDR_BME280};
pub use registers::RegisterBuffer;
pub use structs::{CalibrationSet, CompensatedReading, FineTemperature, RawSample};

use registers::{block_len, REG_CALIB_00, REG_CTRL_HUM, REG_CTRL_MEAS};

// --- Typestates ---

pub struct Unconfigured;
pub struct Ready;

/// BME280 driver. `STATE` tracks whether calibration has been read, so
/// sampling an unconfigured sensor does not compile.
pub struct Bme280<I, STATE> {
    interface: I,
    calibration: CalibrationSet,
    _state: PhantomData<STATE>,
}

impl<I: Interface> Bme280<I, Unconfigured> {
    pub fn new(interface: I) -> Self {
        Bme280 {
            interface,
            calibration: CalibrationSet::default(),
            _state: PhantomData,
        }
    }

    /// Writes ctrl_hum then ctrl_meas, waits for the sensor to settle and
    /// reads the calibration constants for the rest of the session.
    pub fn configure(mut self, config: &SensorConfig) -> error::Result<Bme280<I, Ready>, I::Error> {
        debug!(
            "ctrl_hum = {:#04x}, ctrl_meas = {:#04x}",
            config.ctrl_hum, config.ctrl_meas
        );
        // ctrl_hum only takes effect after the following ctrl_meas write
        self.interface
            .write_register(REG_CTRL_HUM, config.ctrl_hum)
            .map_err(Error::Bus)?;
        self.interface
            .write_register(REG_CTRL_MEAS, config.ctrl_meas)
            .map_err(Error::Bus)?;

        self.interface.delay_ms(config.settle_ms);

        let calibration = read_registers(&mut self.interface)?.calibration();
        debug!("{:?}", calibration);

        Ok(Bme280 {
            interface: self.interface,
            calibration,
            _state: PhantomData,
        })
    }
}

impl<I: Interface> Bme280<I, Ready> {
    /// Reads the register map and returns the compensated reading.
    pub fn sample(&mut self) -> error::Result<CompensatedReading, I::Error> {
        let raw = self.read_registers()?.raw_sample();
        trace!("{:?}", raw);
        Ok(compensation::compensate(&raw, &self.calibration))
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn read_registers(&mut self) -> error::Result<RegisterBuffer, I::Error> {
        read_registers(&mut self.interface)
    }

    pub fn release(self) -> I {
        self.interface
    }
}

fn read_registers<I: Interface>(interface: &mut I) -> error::Result<RegisterBuffer, I::Error> {
    let mut bytes = vec![0u8; block_len(REG_CALIB_00)];
    interface
        .read_block(REG_CALIB_00, &mut bytes)
        .map_err(Error::Bus)?;
    Ok(RegisterBuffer::new(REG_CALIB_00, bytes)?)
}
