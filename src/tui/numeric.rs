//! Element formatters for array display.
//!
//! One formatter is built per rendered array from the elements that will
//! actually be shown, so every cell shares the same notation and width.

use std::fmt;

/// Maximum fractional digits printed for a float.
pub const PRECISION: usize = 8;

/// Largest magnitude printed in fixed notation.
const FIXED_MAX: f64 = 1e8;
/// Smallest non-zero magnitude printed in fixed notation unless suppressed.
const FIXED_MIN: f64 = 1e-4;
/// Largest max/min magnitude ratio printed in fixed notation unless suppressed.
const FIXED_RATIO: f64 = 1e3;

/// Floating point element types that can be rendered.
pub trait FloatElement: Copy + fmt::Display + fmt::LowerExp {
    /// Widen to `f64` for magnitude checks.
    fn to_f64(self) -> f64;
}

impl FloatElement for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl FloatElement for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Right-aligned integers of a common width.
#[derive(Debug, Clone, Copy)]
pub struct IntFormat {
    width: usize,
}

impl IntFormat {
    /// Size the column for the given values.
    pub fn new(values: &[i128]) -> Self {
        let width = values.iter().map(|v| v.to_string().len()).max().unwrap_or(0);
        Self { width }
    }

    /// Format one value.
    pub fn format(&self, value: i128) -> String {
        format!("{value:>width$}", width = self.width)
    }
}

/// `True`/`False`, padded so both have the same width inside arrays.
pub fn format_bool(value: bool, scalar: bool) -> String {
    match (value, scalar) {
        (true, true) => "True".to_string(),
        (true, false) => " True".to_string(),
        (false, _) => "False".to_string(),
    }
}

/// Shared layout for the floats of one array.
#[derive(Debug, Clone, Copy)]
pub struct FloatFormat {
    scientific: bool,
    pad_left: usize,
    pad_right: usize,
    exp_digits: usize,
}

impl FloatFormat {
    /// Choose fixed or scientific notation and column padding.
    ///
    /// Scientific notation is used when the largest finite magnitude is at
    /// least 1e8, or, unless `suppress` is set, when the smallest non-zero
    /// magnitude is below 1e-4 or the spread between them exceeds 1e3.
    pub fn new<F: FloatElement>(values: &[F], suppress: bool) -> Self {
        let finite: Vec<F> = values
            .iter()
            .copied()
            .filter(|v| v.to_f64().is_finite())
            .collect();

        let magnitudes: Vec<f64> = finite
            .iter()
            .map(|v| v.to_f64().abs())
            .filter(|m| *m != 0.0)
            .collect();
        let scientific = match (
            magnitudes.iter().copied().reduce(f64::max),
            magnitudes.iter().copied().reduce(f64::min),
        ) {
            (Some(max), Some(min)) => {
                max >= FIXED_MAX || (!suppress && (min < FIXED_MIN || max / min > FIXED_RATIO))
            }
            _ => false,
        };

        let mut format = Self {
            scientific,
            pad_left: 0,
            pad_right: 0,
            exp_digits: 0,
        };

        if scientific {
            let parts: Vec<Scientific> = finite.iter().map(|v| Scientific::of(*v)).collect();
            format.pad_left = parts.iter().map(|p| p.int.len()).max().unwrap_or(0);
            format.pad_right = parts.iter().map(|p| p.frac.len()).max().unwrap_or(0);
            format.exp_digits = parts
                .iter()
                .map(|p| p.exp.unsigned_abs().to_string().len())
                .max()
                .unwrap_or(0)
                .max(2);
        } else {
            let parts: Vec<(String, String)> = finite.iter().map(|v| fixed_parts(*v)).collect();
            format.pad_left = parts.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
            format.pad_right = parts.iter().map(|(_, f)| f.len()).max().unwrap_or(0);
        }

        let special_width = values
            .iter()
            .filter_map(|v| special(v.to_f64()))
            .map(str::len)
            .max()
            .unwrap_or(0);
        format.pad_left = format
            .pad_left
            .max(special_width.saturating_sub(format.tail_width()));

        format
    }

    /// Format one value.
    pub fn format<F: FloatElement>(&self, value: F) -> String {
        let width = self.pad_left + self.tail_width();
        if let Some(s) = special(value.to_f64()) {
            return format!("{s:>width$}");
        }
        if self.scientific {
            let parts = Scientific::of(value);
            let sign = if parts.exp < 0 { '-' } else { '+' };
            format!(
                "{int:>left$}.{frac:0<right$}e{sign}{exp:0>digits$}",
                int = parts.int,
                left = self.pad_left,
                frac = parts.frac,
                right = self.pad_right,
                exp = parts.exp.unsigned_abs(),
                digits = self.exp_digits,
            )
        } else {
            let (int, frac) = fixed_parts(value);
            format!(
                "{int:>left$}.{frac:<right$}",
                left = self.pad_left,
                right = self.pad_right,
            )
        }
    }

    /// Width of everything after the integer part.
    fn tail_width(&self) -> usize {
        if self.scientific {
            1 + self.pad_right + 2 + self.exp_digits
        } else {
            1 + self.pad_right
        }
    }
}

fn special(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

/// Shortest round-trip digits, rounded to [`PRECISION`] fractional digits
/// when longer, with trailing zeros dropped.
fn fixed_parts<F: FloatElement>(value: F) -> (String, String) {
    let mut text = value.to_string();
    if text
        .split_once('.')
        .is_some_and(|(_, frac)| frac.len() > PRECISION)
    {
        text = format!("{value:.prec$}", prec = PRECISION);
    }
    if let Some((int, frac)) = text.split_once('.') {
        return (int.to_string(), frac.trim_end_matches('0').to_string());
    }
    (text, String::new())
}

/// Mantissa and exponent of the shortest scientific representation.
struct Scientific {
    int: String,
    frac: String,
    exp: i32,
}

impl Scientific {
    fn of<F: FloatElement>(value: F) -> Self {
        let mut text = format!("{value:e}");
        if Self::frac_len(&text) > PRECISION {
            text = format!("{value:.prec$e}", prec = PRECISION);
        }
        let (mantissa, exp) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exp = exp.parse().unwrap_or(0);
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        Self {
            int: int.to_string(),
            frac: frac.trim_end_matches('0').to_string(),
            exp,
        }
    }

    fn frac_len(text: &str) -> usize {
        let mantissa = text.split_once('e').map_or(text, |(m, _)| m);
        mantissa.split_once('.').map_or(0, |(_, f)| f.len())
    }
}
