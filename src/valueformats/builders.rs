//! Numeric formatting primitives and formatter constructors.

use crate::types::{exponent_with_sign, number_to_string};

use super::{DecimalCount, ValueFormatter, formatter};

/// Largest number of fraction digits [`to_fixed`] pads to.
pub const MAX_FIXED_DECIMALS: i32 = 20;

/// Round half towards positive infinity.
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Round `value` to `decimals` digits and pad with trailing zeros to exactly that many.
///
/// - `None` renders as `""`.
/// - Zero and results in exponent notation are returned without padding.
/// - With `decimals == None` the value keeps its own precision.
/// - `decimals` above [`MAX_FIXED_DECIMALS`] is treated as that maximum.
pub fn to_fixed(value: Option<f64>, decimals: DecimalCount) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if !value.is_finite() {
        return number_to_string(value);
    }

    let decimals = decimals.map(|d| d.min(MAX_FIXED_DECIMALS));
    let factor = match decimals {
        Some(d) if d > 0 => 10f64.powi(d),
        _ => 1.0,
    };
    let shifted = value * factor;
    let rounded = if shifted.is_finite() {
        round_half_up(shifted) / factor
    } else {
        value
    };
    let formatted = number_to_string(rounded);

    if formatted.contains('e') || value == 0.0 {
        return formatted;
    }

    if let Some(decimals) = decimals.and_then(|d| usize::try_from(d).ok()) {
        let precision = formatted
            .find('.')
            .map_or(0, |pos| formatted.len() - pos - 1);
        if precision < decimals {
            let mut padded = formatted;
            if precision == 0 {
                padded.push('.');
            }
            padded.push_str(&"0".repeat(decimals - precision));
            return padded;
        }
    }

    formatted
}

/// [`to_fixed`] with an optional precision hint: when `scaled_decimals` is set the value is
/// printed with `scaled_decimals + additional_decimals` digits.
pub fn to_fixed_scaled(
    value: f64,
    decimals: DecimalCount,
    scaled_decimals: DecimalCount,
    additional_decimals: i32,
    ext: &str,
) -> String {
    let digits = match scaled_decimals {
        Some(scaled) => Some(scaled.saturating_add(additional_decimals)),
        None => decimals,
    };
    format!("{}{ext}", to_fixed(Some(value), digits))
}

/// Formatter appending a fixed unit (`"12.5 ms"`) without scaling.
pub fn to_fixed_unit(unit: impl Into<String>) -> ValueFormatter {
    let unit = unit.into();
    formatter(move |size, decimals, _| match size {
        None => String::new(),
        Some(_) if unit.is_empty() => to_fixed(size, decimals),
        Some(_) => format!("{} {unit}", to_fixed(size, decimals)),
    })
}

/// Formatter prepending a fixed string (`"$12"`).
pub fn to_fixed_prefix(prefix: impl Into<String>) -> ValueFormatter {
    let prefix = prefix.into();
    formatter(move |size, decimals, _| match size {
        None => String::new(),
        Some(_) => format!("{prefix}{}", to_fixed(size, decimals)),
    })
}

/// Formatter appending a suffix with no separating space.
pub fn to_fixed_suffix(suffix: impl Into<String>) -> ValueFormatter {
    let suffix = suffix.into();
    formatter(move |size, decimals, _| match size {
        None => String::new(),
        Some(_) => format!("{}{suffix}", to_fixed(size, decimals)),
    })
}

/// Formatter that divides by `factor` while the magnitude is at least `factor`, choosing
/// the suffix for the number of divisions.
///
/// Running out of suffixes yields `"NA"`. When at least one division happened and a
/// `scaled_decimals` hint is given, the precision becomes `scaled_decimals + 3 * steps`.
pub fn scaled_units<S: AsRef<str>>(factor: f64, suffixes: &[S]) -> ValueFormatter {
    let suffixes: Vec<String> = suffixes.iter().map(|s| s.as_ref().to_string()).collect();
    formatter(move |size, decimals, scaled_decimals| {
        let Some(mut size) = size else {
            return String::new();
        };

        let mut steps = 0usize;
        while size.abs() >= factor {
            steps += 1;
            size /= factor;
            if steps >= suffixes.len() {
                return "NA".to_string();
            }
        }

        let decimals = match scaled_decimals {
            Some(scaled) if steps > 0 => Some(scaled.saturating_add(3 * steps as i32)),
            _ => decimals,
        };
        format!("{}{}", to_fixed(Some(size), decimals), suffixes[steps])
    })
}

const SI_PREFIXES: [&str; 12] = ["n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y"];
const BINARY_PREFIXES: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];

/// Decimal SI prefixes (`k`, `M`, `G`, …) around `unit`.
///
/// `offset` picks the starting prefix: `0` starts unprefixed, `-1` at milli, `2` at mega.
pub fn decimal_si_prefix(unit: &str, offset: i32) -> ValueFormatter {
    let start = usize::try_from(3 + offset).unwrap_or(0).min(SI_PREFIXES.len() - 1);
    let units: Vec<String> = SI_PREFIXES[start..]
        .iter()
        .map(|p| format!(" {p}{unit}"))
        .collect();
    scaled_units(1000.0, &units)
}

/// Binary IEC prefixes (`Ki`, `Mi`, `Gi`, …) around `unit`, starting at `offset`.
pub fn binary_si_prefix(unit: &str, offset: usize) -> ValueFormatter {
    let start = offset.min(BINARY_PREFIXES.len() - 1);
    let units: Vec<String> = BINARY_PREFIXES[start..]
        .iter()
        .map(|p| format!(" {p}{unit}"))
        .collect();
    scaled_units(1024.0, &units)
}

/// Currency symbol in front of a value scaled up to trillions (`"$1.2K"`).
pub fn currency(symbol: impl Into<String>) -> ValueFormatter {
    let symbol = symbol.into();
    let scaler = scaled_units(1000.0, &["", "K", "M", "B", "T"]);
    formatter(move |size, decimals, scaled_decimals| match size {
        None => String::new(),
        Some(_) => format!("{symbol}{}", scaler(size, decimals, scaled_decimals)),
    })
}

/// Count unit after a value scaled up to trillions (`"1.2K ops"`).
pub fn simple_count_unit(symbol: impl Into<String>) -> ValueFormatter {
    let symbol = symbol.into();
    let scaler = scaled_units(1000.0, &["", "K", "M", "B", "T"]);
    formatter(move |size, decimals, scaled_decimals| match size {
        None => String::new(),
        Some(_) => format!("{} {symbol}", scaler(size, decimals, scaled_decimals)),
    })
}

/// `"42%"` for values on a 0–100 scale.
pub fn to_percent(size: Option<f64>, decimals: DecimalCount, _scaled: DecimalCount) -> String {
    match size {
        None => String::new(),
        Some(_) => format!("{}%", to_fixed(size, decimals)),
    }
}

/// `"42%"` for values on a 0.0–1.0 scale.
pub fn to_percent_unit(size: Option<f64>, decimals: DecimalCount, _scaled: DecimalCount) -> String {
    match size {
        None => String::new(),
        Some(v) => format!("{}%", to_fixed(Some(100.0 * v), decimals)),
    }
}

/// Upper-case hexadecimal. Fractional values keep a hexadecimal fraction.
pub fn to_hex(value: Option<f64>, decimals: DecimalCount, _scaled: DecimalCount) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let rounded = to_fixed(Some(value), decimals).parse::<f64>().unwrap_or(value);
    float_to_hex(rounded).to_uppercase()
}

/// Hexadecimal with a `0x` prefix; the sign goes before the prefix (`-0x1A`).
pub fn to_hex0x(value: Option<f64>, decimals: DecimalCount, scaled: DecimalCount) -> String {
    if value.is_none() {
        return String::new();
    }
    let hex = to_hex(value, decimals, scaled);
    match hex.strip_prefix('-') {
        Some(rest) => format!("-0x{rest}"),
        None => format!("0x{hex}"),
    }
}

fn float_to_hex(v: f64) -> String {
    if !v.is_finite() {
        return number_to_string(v);
    }
    let sign = if v < 0.0 { "-" } else { "" };
    let abs = v.abs();
    let int_part = abs.trunc();
    let mut frac = abs - int_part;

    let mut digits = Vec::new();
    let mut n = int_part;
    while n >= 1.0 {
        let d = (n % 16.0) as u32;
        digits.push(std::char::from_digit(d, 16).unwrap_or('0'));
        n = (n / 16.0).trunc();
    }
    if digits.is_empty() {
        digits.push('0');
    }
    digits.reverse();
    let mut out: String = digits.into_iter().collect();

    if frac > 0.0 {
        out.push('.');
        // 13 hex digits cover the 52-bit mantissa.
        for _ in 0..13 {
            frac *= 16.0;
            let d = frac.trunc();
            out.push(std::char::from_digit(d as u32, 16).unwrap_or('0'));
            frac -= d;
            if frac == 0.0 {
                break;
            }
        }
    }
    format!("{sign}{out}")
}

/// Scientific notation (`"1.23e+3"`).
pub fn sci(value: Option<f64>, decimals: DecimalCount, _scaled: DecimalCount) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if !value.is_finite() {
        return number_to_string(value);
    }
    let raw = match decimals {
        Some(d) => {
            let d = d.clamp(0, 100) as usize;
            format!("{value:.d$e}")
        }
        None => format!("{value:e}"),
    };
    exponent_with_sign(&raw)
}

/// Grouped thousands with at most `decimals` fraction digits (default 3): `"1,234.5"`.
pub fn locale(value: Option<f64>, decimals: DecimalCount, _scaled: DecimalCount) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if !value.is_finite() {
        return number_to_string(value);
    }
    let digits = decimals.unwrap_or(3).clamp(0, 20) as usize;
    let factor = 10f64.powi(digits as i32);
    let rounded = round_half_up(value.abs() * factor) / factor;
    let fixed = format!("{rounded:.digits$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (fixed.clone(), String::new()),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
