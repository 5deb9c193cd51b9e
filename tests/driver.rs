use rpbme280::{Bme280, CompensatedReading, Error, Interface, SensorConfig};

#[derive(Debug, PartialEq)]
enum Op {
    Write(u8, u8),
    Delay(u64),
    Read(u8, usize),
}

#[derive(Debug, PartialEq)]
struct Nack;

/// Register map backed by memory, recording every bus operation.
struct MockInterface {
    registers: [u8; 0x100],
    ops: Vec<Op>,
    fail_writes: bool,
}

impl MockInterface {
    fn new() -> Self {
        MockInterface {
            registers: [0; 0x100],
            ops: Vec::new(),
            fail_writes: false,
        }
    }

    fn set(&mut self, addr: u8, values: &[u8]) {
        let i = addr as usize;
        self.registers[i..i + values.len()].copy_from_slice(values);
    }

    /// Datasheet calibration plus typical humidity constants.
    fn with_datasheet_part() -> Self {
        let mut mock = Self::new();
        mock.set(
            0x88,
            &[
                0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, // T1..T3
                0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, // P1..P3
                0x27, 0x0B, 0x8C, 0x00, 0xF9, 0xFF, // P4..P6
                0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17, // P7..P9
            ],
        );
        mock.set(0xA1, &[75]);
        // H2 = 362, H3 = 0, H4 = 313, H5 = 50, H6 = 30
        mock.set(0xE1, &[0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 30]);
        // press, temp (525944, 25.08 C), hum
        mock.set(0xF7, &[0x65, 0x5A, 0xC0, 0x80, 0x67, 0x80, 0x75, 0x30]);
        mock
    }
}

impl Interface for MockInterface {
    type Error = Nack;

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Nack> {
        if self.fail_writes {
            return Err(Nack);
        }
        self.ops.push(Op::Write(register, value));
        self.registers[register as usize] = value;
        Ok(())
    }

    fn read_block(&mut self, base: u8, buffer: &mut [u8]) -> Result<(), Nack> {
        self.ops.push(Op::Read(base, buffer.len()));
        let start = base as usize;
        buffer.copy_from_slice(&self.registers[start..start + buffer.len()]);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u64) {
        self.ops.push(Op::Delay(ms));
    }
}

#[test]
fn configure_writes_two_registers_then_waits_then_reads() {
    let bme280 = Bme280::new(MockInterface::with_datasheet_part())
        .configure(&SensorConfig::default())
        .unwrap();
    let mock = bme280.release();
    assert_eq!(
        mock.ops,
        vec![
            Op::Write(0xF2, 0x03),
            Op::Write(0xF4, 0x6F),
            Op::Delay(100),
            Op::Read(0x88, 0x78),
        ]
    );
}

#[test]
fn calibration_is_decoded_once() {
    let mut bme280 = Bme280::new(MockInterface::with_datasheet_part())
        .configure(&SensorConfig::default())
        .unwrap();
    let calibration = *bme280.calibration();
    assert_eq!(calibration.dig_t1, 27504);
    assert_eq!(calibration.dig_p2, -10685);
    assert_eq!(calibration.dig_p6, -7);
    assert_eq!(calibration.dig_p8, -14600);
    assert_eq!(calibration.dig_h4, 313);
    assert_eq!(calibration.dig_h5, 50);

    bme280.sample().unwrap();
    bme280.sample().unwrap();
    assert_eq!(*bme280.calibration(), calibration);
}

#[test]
fn sample_compensates_one_bulk_read() {
    let mut bme280 = Bme280::new(MockInterface::with_datasheet_part())
        .configure(&SensorConfig::default())
        .unwrap();

    let reading = bme280.sample().unwrap();
    assert_eq!(
        reading,
        CompensatedReading {
            temperature: 2508,
            pressure: 25766987,
            humidity: 56316,
        }
    );
    assert_eq!(bme280.sample().unwrap(), reading);

    let mock = bme280.release();
    let reads = mock
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Read(0x88, 0x78)))
        .count();
    assert_eq!(reads, 3);
}

#[test]
fn zero_p1_reports_pressure_unavailable() {
    let mut mock = MockInterface::with_datasheet_part();
    mock.set(0x8E, &[0x00, 0x00]);
    let mut bme280 = Bme280::new(mock)
        .configure(&SensorConfig::default())
        .unwrap();

    let reading = bme280.sample().unwrap();
    assert_eq!(reading.pressure, 0);
    assert!(!reading.has_pressure());
    assert_eq!(reading.temperature, 2508);
}

#[test]
fn bus_errors_propagate() {
    let mut mock = MockInterface::with_datasheet_part();
    mock.fail_writes = true;
    let result = Bme280::new(mock).configure(&SensorConfig::default());
    assert!(matches!(result, Err(Error::Bus(Nack))));
}

#[test]
fn register_dump_starts_at_calibration_block() {
    let mut bme280 = Bme280::new(MockInterface::with_datasheet_part())
        .configure(&SensorConfig::default())
        .unwrap();
    let dump = bme280.read_registers().unwrap().to_string();
    assert!(dump.starts_with("0x88: 70 6B 43 67 18 FC 7D 8E\n"));
}
