// src/normalize.rs
//! Count normalization.
//!
//! Turns whatever a profile page (or a dataset cell) showed for a follower
//! count into either a strictly positive integer or `Missing`:
//!
//! ```text
//! "12.3K" → 12300      "1,234" → 1234      "1.234" → 1234 (dot = thousands)
//! "3M"    → 3000000    "PRIVADA" → Missing  "" / "0" / "-5" → Missing
//! ```
//!
//! `normalize` is total: it never panics and has no error channel. Every
//! failure mode collapses to `Missing`.

use std::fmt;

use crate::model::RawValue;

/// Markers for non-measurements. Matched as substrings of the uppercased
/// text, so `ERROR_DESCONOCIDO` is covered by `ERROR`.
pub const SENTINELS: [&str; 5] = ["PRIVADA", "NO_EXISTE", "NO_ENCONTRADO", "TIMEOUT", "ERROR"];

const THOUSAND_EXP: usize = 3;
const MILLION_EXP: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizedCount {
    /// Always `>= 1`. Counts past `u128::MAX` are `Missing`.
    Value(u128),
    Missing,
}

impl NormalizedCount {
    pub fn value(self) -> Option<u128> {
        match self {
            NormalizedCount::Value(n) => Some(n),
            NormalizedCount::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool { matches!(self, NormalizedCount::Missing) }
}

/// Canonical text form: the plain integer, or an empty cell.
impl fmt::Display for NormalizedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedCount::Value(n) => write!(f, "{n}"),
            NormalizedCount::Missing => Ok(()),
        }
    }
}

pub fn normalize(raw: &RawValue) -> NormalizedCount {
    match raw {
        RawValue::Numeric(v) => from_float(*v),
        RawValue::Text(s) => normalize_text(s),
        RawValue::Empty => NormalizedCount::Missing,
    }
}

/// Shorthand for a single dataset cell.
pub fn normalize_str(cell: &str) -> NormalizedCount {
    normalize(&RawValue::from_cell(cell))
}

pub fn normalize_all<'a, I>(raws: I) -> Vec<NormalizedCount>
where
    I: IntoIterator<Item = &'a RawValue>,
{
    raws.into_iter().map(normalize).collect()
}

pub fn normalize_text(text: &str) -> NormalizedCount {
    let upper = text.to_uppercase().replace(',', "");
    let s = upper.trim();

    if SENTINELS.iter().any(|m| s.contains(m)) {
        return NormalizedCount::Missing;
    }

    // Suffix branches first: they own their decimal point ("1.2K" = 1200).
    if s.contains('K') {
        return scaled(&s.replace('K', ""), THOUSAND_EXP);
    }
    if s.contains('M') {
        return scaled(&s.replace('M', ""), MILLION_EXP);
    }

    // No suffix: '.' is a thousands separator.
    let digits = s.replace('.', "");
    match digits.trim().parse::<u128>() {
        Ok(n) if n > 0 => NormalizedCount::Value(n),
        _ => NormalizedCount::Missing,
    }
}

fn from_float(v: f64) -> NormalizedCount {
    if !v.is_finite() || v <= 0.0 {
        return NormalizedCount::Missing;
    }
    truncated(v)
}

/// Final guard for float results: truncate, then require `1..=u128::MAX`.
fn truncated(v: f64) -> NormalizedCount {
    let t = v.trunc();
    if t >= 1.0 && t < u128::MAX as f64 {
        NormalizedCount::Value(t as u128)
    } else {
        NormalizedCount::Missing
    }
}

/// `number × 10^exp`, truncated toward zero.
fn scaled(number: &str, exp: usize) -> NormalizedCount {
    let number = number.trim();
    if let Some(n) = shift_decimal(number, exp) {
        return n;
    }
    // Exponents and other float syntax.
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => truncated(v * 10f64.powi(exp as i32)),
        _ => NormalizedCount::Missing,
    }
}

/// Exact scaling of plain `[+-]digits[.digits]` text by moving the decimal
/// point, so "2.3K" is 2300 and not 2299.999…
/// `None` when the text is not in that form.
fn shift_decimal(number: &str, exp: usize) -> Option<NormalizedCount> {
    let (negative, body) = match number.as_bytes().first() {
        Some(b'-') => (true, &number[1..]),
        Some(b'+') => (false, &number[1..]),
        _ => (false, number),
    };
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

    let plain = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !plain(int_part) || !plain(frac_part) || (int_part.is_empty() && frac_part.is_empty()) {
        return None;
    }

    let mut digits = String::with_capacity(int_part.len() + exp);
    digits.push_str(int_part);
    let frac = frac_part.as_bytes();
    for i in 0..exp {
        digits.push(frac.get(i).map_or('0', |&b| b as char));
    }

    // Too long for u128: let the float path deal with it.
    let n: u128 = digits.parse().ok()?;
    if negative || n == 0 {
        return Some(NormalizedCount::Missing);
    }
    Some(NormalizedCount::Value(n))
}
