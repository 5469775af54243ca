//! Automatic decimal selection.

use crate::valueformats::DecimalCount;

/// Precision handed to a value formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalInfo {
    pub decimals: DecimalCount,
    pub scaled_decimals: DecimalCount,
}

/// Pick decimals for `value`.
///
/// An explicit `decimal_override` is used as-is. Otherwise the precision follows the value's
/// magnitude (smaller values get more decimals, integers get none) and `scaled_decimals`
/// carries the precision to use once a scaling formatter has divided the value down.
pub fn get_decimals_for_value(value: f64, decimal_override: DecimalCount) -> DecimalInfo {
    if decimal_override.is_some() {
        return DecimalInfo {
            decimals: decimal_override,
            scaled_decimals: None,
        };
    }

    let value = value.abs();
    if value == 0.0 || !value.is_finite() {
        return DecimalInfo {
            decimals: Some(0),
            scaled_decimals: None,
        };
    }

    let mut dec = -(value.log10().floor() as i32) + 1;
    let magn = 10f64.powi(-dec);
    let norm = value / magn;

    let mut size = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        if norm > 2.25 {
            dec += 1;
            2.5
        } else {
            2.0
        }
    } else if norm < 7.5 {
        5.0
    } else {
        10.0
    };
    size *= magn;

    if value.fract() == 0.0 {
        dec = 0;
    }

    let decimals = dec.max(0);
    let scaled_decimals = decimals - size.log10().floor() as i32 + 2;
    DecimalInfo {
        decimals: Some(decimals),
        scaled_decimals: Some(scaled_decimals),
    }
}
