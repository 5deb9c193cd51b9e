use anyhow::{Context, Result};
use clap::Parser;

use rpbme280::{Bme280, I2cInterface, SensorConfig, ADDR_BME280};

/// Read temperature, pressure and humidity from a BME280.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// I2C bus number (/dev/i2c-N).
    #[arg(short, long, default_value_t = 1)]
    bus: u8,
    /// Slave address of the sensor, e.g. 0x76 or 0x77.
    #[arg(short, long, default_value = "0x76", value_parser = parse_address)]
    address: u16,
    /// Print a hex dump of the register map.
    #[arg(long)]
    dump: bool,
    /// Print the calibration constants.
    #[arg(long)]
    calibration: bool,
}

fn parse_address(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.address != ADDR_BME280 {
        log::info!("using slave address {:#04x}", args.address);
    }

    let interface = I2cInterface::with_bus(args.bus, args.address)
        .with_context(|| format!("failed to open /dev/i2c-{}", args.bus))?;
    let mut bme280 = Bme280::new(interface)
        .configure(&SensorConfig::default())
        .context("failed to configure BME280")?;

    if args.dump {
        let registers = bme280.read_registers()?;
        println!("Sensor data");
        println!("{}", registers);
    }

    if args.calibration {
        println!("{:#?}", bme280.calibration());
    }

    let reading = bme280.sample().context("failed to sample BME280")?;
    println!("Temperature: {:.2} C", reading.celsius());
    if reading.has_pressure() {
        println!("Pressure: {:.2} mbar", reading.millibar());
    } else {
        println!("Pressure: unavailable");
    }
    println!("Humidity: {:.2} %", reading.percent());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_addresses() {
        assert_eq!(parse_address("0x77"), Ok(0x77));
        assert_eq!(parse_address("118"), Ok(0x76));
        assert!(parse_address("0xZZ").is_err());
    }
}
