//! Integer compensation formulas for the BME280.
//!
//! Temperature must be computed first: its fine temperature feeds both the
//! pressure and the humidity formula. Intermediates are `i128`, and every
//! `>>` is an arithmetic shift.

use log::warn;

use crate::structs::{CalibrationSet, CompensatedReading, FineTemperature, RawSample};

/// Upper clamp of the humidity intermediate, 100 %RH in 1/1024 % << 12.
const HUMIDITY_MAX: i128 = 0x1900_0000;

/// Returns the temperature in 0.01 °C together with `t_fine`.
pub fn temperature(raw: &RawSample, calib: &CalibrationSet) -> (i32, FineTemperature) {
    let adc_t = raw.adc_t as i64;
    let dig_t1 = calib.dig_t1 as i64;
    let dig_t2 = calib.dig_t2 as i64;
    let dig_t3 = calib.dig_t3 as i64;

    let var1 = ((adc_t >> 3) - (dig_t1 << 1)) * (dig_t2 >> 11);
    let var2 = ((((adc_t >> 4) - dig_t1) * ((adc_t >> 4) - dig_t1) >> 12) * dig_t3) >> 14;
    let t_fine = var1 + var2;

    (((t_fine * 5 + 128) >> 8) as i32, FineTemperature(t_fine))
}

/// Returns the pressure in 1/25600 mbar, or 0 if it cannot be computed.
///
/// `t_fine` must come from [`temperature`] on the same `raw` sample.
pub fn pressure(raw: &RawSample, calib: &CalibrationSet, t_fine: FineTemperature) -> i64 {
    let mut var1 = t_fine.0 as i128 - 128000;
    let mut var2 = var1 * var1 * calib.dig_p6 as i128;
    var2 += (var1 * calib.dig_p5 as i128) << 17;
    var2 += (calib.dig_p4 as i128) << 35;
    var1 = ((var1 * var1 * calib.dig_p3 as i128) >> 8) + ((var1 * calib.dig_p2 as i128) << 12);
    var1 = (((1i128 << 47) + var1) * calib.dig_p1 as i128) >> 33;

    if var1 == 0 {
        warn!("pressure divisor is zero, reporting pressure as unavailable");
        return 0;
    }

    let mut p = 1048576 - raw.adc_p as i128;
    // truncating division, never floating point
    p = (((p << 31) - var2) * 3125) / var1;

    match refine_pressure(p, calib).and_then(|p| i64::try_from(p).ok()) {
        Some(p) => p,
        None => {
            warn!(
                "pressure out of range for {:?}, reporting pressure as unavailable",
                calib
            );
            0
        }
    }
}

// A tiny divisor can push p past what the refinement products can hold.
fn refine_pressure(p: i128, calib: &CalibrationSet) -> Option<i128> {
    let q = p >> 13;
    let var1 = (calib.dig_p9 as i128).checked_mul(q)?.checked_mul(q)? >> 25;
    let var2 = (calib.dig_p8 as i128).checked_mul(p)? >> 19;
    let p = p.checked_add(var1)?.checked_add(var2)? >> 8;
    p.checked_add((calib.dig_p7 as i128) << 4)
}

/// Returns the relative humidity in 1/1024 %, clamped to 0..=100 %.
///
/// `t_fine` must come from [`temperature`] on the same `raw` sample.
pub fn humidity(raw: &RawSample, calib: &CalibrationSet, t_fine: FineTemperature) -> u32 {
    (humidity_unclamped(raw, calib, t_fine).clamp(0, HUMIDITY_MAX) >> 12) as u32
}

fn humidity_unclamped(raw: &RawSample, calib: &CalibrationSet, t_fine: FineTemperature) -> i128 {
    let adc_h = raw.adc_h as i128;
    let dig_h1 = calib.dig_h1 as i128;
    let dig_h2 = calib.dig_h2 as i128;
    let dig_h3 = calib.dig_h3 as i128;
    let dig_h4 = calib.dig_h4 as i128;
    let dig_h5 = calib.dig_h5 as i128;
    let dig_h6 = calib.dig_h6 as i128;

    let mut v_x1_u32r = t_fine.0 as i128 - 76800;
    v_x1_u32r = ((((adc_h << 14) - (dig_h4 << 20) - (dig_h5 * v_x1_u32r)) + 16384) >> 15)
        * (((((((v_x1_u32r * dig_h6) >> 10) * (((v_x1_u32r * dig_h3) >> 11) + 32768)) >> 10)
            + 2097152)
            * dig_h2
            + 8192)
            >> 14);
    v_x1_u32r - (((((v_x1_u32r >> 15) * (v_x1_u32r >> 15)) >> 7) * dig_h1) >> 4)
}

/// Runs all three formulas in order on one sample.
pub fn compensate(raw: &RawSample, calib: &CalibrationSet) -> CompensatedReading {
    let (temperature, t_fine) = temperature(raw, calib);

    CompensatedReading {
        temperature,
        pressure: pressure(raw, calib, t_fine),
        humidity: humidity(raw, calib, t_fine),
    }
}
