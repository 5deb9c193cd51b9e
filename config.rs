const OSRS_H: u8 = 0x3; // Humidity oversampling x 4
const OSRS_T: u8 = 0x3; // Temperature oversampling x 4
const OSRS_P: u8 = 0x3; // Pressure oversampling x 4
const MODE: u8 = 0x3; // Normal mode

/// Register values written by `configure`, and how long to wait afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    pub ctrl_hum: u8,
    pub ctrl_meas: u8,
    pub settle_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig {
            ctrl_hum: OSRS_H,
            ctrl_meas: (OSRS_T << 5) | (OSRS_P << 2) | MODE,
            settle_ms: 100,
        }
    }
}
