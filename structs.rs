/// Factory calibration constants, read once per session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationSet {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
    pub dig_h1: u8,
    pub dig_h2: i16,
    pub dig_h3: u8,
    pub dig_h4: u16, // 12 bits
    pub dig_h5: u16, // 12 bits
    pub dig_h6: u8,
}

/// Uncompensated ADC readings taken from a single bulk read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawSample {
    pub adc_t: u32,
    pub adc_p: u32,
    pub adc_h: u32,
}

/// Fine temperature carried from the temperature formula into the pressure
/// and humidity formulas.
///
/// Only [`crate::compensation::temperature`] produces one. Passing a value
/// computed from a different [`RawSample`] into the pressure or humidity
/// formula is undefined by contract: the result is a number, but not a
/// meaningful reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineTemperature(pub(crate) i64);

impl FineTemperature {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Compensated output in fixed-point units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompensatedReading {
    /// Hundredths of a degree Celsius (2508 = 25.08 °C).
    pub temperature: i32,
    /// 1/25600 mbar. 0 means the pressure could not be computed.
    pub pressure: i64,
    /// 1/1024 %RH, never above 100 * 1024.
    pub humidity: u32,
}

impl CompensatedReading {
    pub fn celsius(&self) -> f64 {
        self.temperature as f64 / 100.0
    }

    pub fn millibar(&self) -> f64 {
        self.pressure as f64 / 25600.0
    }

    pub fn percent(&self) -> f64 {
        self.humidity as f64 / 1024.0
    }

    pub fn has_pressure(&self) -> bool {
        self.pressure != 0
    }
}
