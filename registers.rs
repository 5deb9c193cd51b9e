use std::fmt;

use crate::structs::{CalibrationSet, RawSample};

// BME280 register addresses.
// cf. https://trac.switch-science.com/wiki/BME280
pub const REG_CTRL_HUM: u8 = 0xF2;
pub const REG_CTRL_MEAS: u8 = 0xF4;
pub const REG_CALIB_00: u8 = 0x88;
pub const REG_CALIB_24: u8 = 0xA1;
pub const REG_CALIB_26: u8 = 0xE1;
pub const REG_PRESS_MSB: u8 = 0xF7;
pub const REG_TEMP_MSB: u8 = 0xFA;
pub const REG_HUM_MSB: u8 = 0xFD;

pub const REG_MAP_END: usize = 0x100;

pub const fn block_len(base: u8) -> usize {
    REG_MAP_END - base as usize
}

/// Raw bytes of the register map from `base` through 0xFF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBuffer {
    base: u8,
    bytes: Vec<u8>,
}

/// Ways a register buffer can fail to describe the register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The buffer does not start at or below the first calibration register.
    Base(u8),
    /// The buffer does not end at 0xFF.
    Length { expected: usize, actual: usize },
}

impl RegisterBuffer {
    pub fn new(base: u8, bytes: Vec<u8>) -> Result<Self, BufferError> {
        if base > REG_CALIB_00 {
            return Err(BufferError::Base(base));
        }
        let expected = block_len(base);
        if bytes.len() != expected {
            return Err(BufferError::Length {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(RegisterBuffer { base, bytes })
    }

    pub fn base(&self) -> u8 {
        self.base
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn byte(&self, addr: u8) -> u8 {
        self.bytes[(addr - self.base) as usize]
    }

    pub(crate) fn read_u16(&self, addr: u8) -> u16 {
        read_u16(&self.bytes, self.base, addr)
    }

    pub(crate) fn read_s16(&self, addr: u8) -> i16 {
        read_s16(&self.bytes, self.base, addr)
    }

    pub fn calibration(&self) -> CalibrationSet {
        let r = |addr: u8| self.byte(addr);

        CalibrationSet {
            dig_t1: self.read_u16(0x88),
            dig_t2: self.read_s16(0x8A),
            dig_t3: self.read_s16(0x8C),

            dig_p1: self.read_u16(0x8E),
            dig_p2: self.read_s16(0x90),
            dig_p3: self.read_s16(0x92),
            dig_p4: self.read_s16(0x94),
            dig_p5: self.read_s16(0x96),
            dig_p6: self.read_s16(0x98),
            dig_p7: self.read_s16(0x9A),
            dig_p8: self.read_s16(0x9C),
            dig_p9: self.read_s16(0x9E),

            dig_h1: r(REG_CALIB_24),
            dig_h2: self.read_s16(REG_CALIB_26),
            dig_h3: r(0xE3),
            // 0xE5 is shared: low nibble belongs to H4, high nibble to H5
            dig_h4: ((r(0xE4) as u16) << 4) | (r(0xE5) & 0x0F) as u16,
            dig_h5: ((r(0xE6) as u16) << 4) | (r(0xE5) >> 4) as u16,
            dig_h6: r(0xE7),
        }
    }

    pub fn raw_sample(&self) -> RawSample {
        RawSample {
            adc_t: read_adc20(&self.bytes, self.base, REG_TEMP_MSB),
            adc_p: read_adc20(&self.bytes, self.base, REG_PRESS_MSB),
            adc_h: read_adc16(&self.bytes, self.base, REG_HUM_MSB),
        }
    }
}

// hex dump, 8 registers per line
impl fmt::Display for RegisterBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (n, line) in self.bytes.chunks(8).enumerate() {
            write!(f, "{:#04x}:", self.base as usize + n * 8)?;
            for byte in line {
                write!(f, " {:02X}", byte)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// The free readers index `buffer` from `base`: they panic if `addr < base`
// or if the field runs past the end of `buffer`.

/// Little-endian unsigned 16-bit value at `addr`.
pub fn read_u16(buffer: &[u8], base: u8, addr: u8) -> u16 {
    let i = (addr - base) as usize;
    (buffer[i] as u16) | ((buffer[i + 1] as u16) << 8)
}

/// Little-endian two's-complement 16-bit value at `addr`.
pub fn read_s16(buffer: &[u8], base: u8, addr: u8) -> i16 {
    read_u16(buffer, base, addr) as i16
}

/// 20-bit ADC value from msb, lsb and the high nibble of xlsb.
pub fn read_adc20(buffer: &[u8], base: u8, addr: u8) -> u32 {
    let i = (addr - base) as usize;
    ((buffer[i] as u32) << 12) | ((buffer[i + 1] as u32) << 4) | ((buffer[i + 2] as u32) >> 4)
}

/// 16-bit big-endian ADC value.
pub fn read_adc16(buffer: &[u8], base: u8, addr: u8) -> u32 {
    let i = (addr - base) as usize;
    ((buffer[i] as u32) << 8) | buffer[i + 1] as u32
}
