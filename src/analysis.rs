// src/analysis.rs
//! First-digit distribution and comparison against a reference distribution.

use crate::normalize::NormalizedCount;

pub const DIGITS: std::ops::RangeInclusive<u8> = 1..=9;

/// Theoretical first-digit percentages, index 0 = digit 1.
pub const BENFORD_PERCENT: [f64; 9] = [30.1, 17.6, 12.5, 9.7, 7.9, 6.7, 5.8, 5.1, 4.6];

/// Digit → expected percentage. Passed in by the caller; never mutated by observed data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceDistribution {
    percent: [f64; 9],
}

impl ReferenceDistribution {
    pub const fn new(percent: [f64; 9]) -> Self { Self { percent } }

    /// The published table (one decimal place).
    pub const fn benford() -> Self { Self::new(BENFORD_PERCENT) }

    /// `100 · log10(1 + 1/d)` without rounding.
    pub fn benford_exact() -> Self {
        let mut percent = [0.0; 9];
        for (i, p) in percent.iter_mut().enumerate() {
            let d = (i + 1) as f64;
            *p = 100.0 * (1.0 + 1.0 / d).log10();
        }
        Self { percent }
    }

    pub fn percent(&self, digit: u8) -> f64 {
        slot(digit).map_or(0.0, |i| self.percent[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        DIGITS.map(move |d| (d, self.percent(d)))
    }
}

impl Default for ReferenceDistribution {
    fn default() -> Self { Self::benford() }
}

/// Observed first-digit distribution over digits 1–9. Every digit is present;
/// unseen digits are 0%.
#[derive(Clone, Debug, PartialEq)]
pub struct DigitFrequency {
    counts: [usize; 9],
    total: usize,
}

impl DigitFrequency {
    /// `None` when there is nothing to tally.
    pub fn from_counts(counts: [usize; 9]) -> Option<Self> {
        let total: usize = counts.iter().sum();
        if total == 0 { None } else { Some(Self { counts, total }) }
    }

    pub fn total(&self) -> usize { self.total }

    pub fn count(&self, digit: u8) -> usize {
        slot(digit).map_or(0, |i| self.counts[i])
    }

    pub fn percent(&self, digit: u8) -> f64 {
        (self.count(digit) as f64 / self.total as f64) * 100.0
    }

    /// `(digit, percent)` in ascending digit order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        DIGITS.map(move |d| (d, self.percent(d)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Analysis {
    /// No positive counts at all; nothing to chart.
    Empty,
    Frequencies(DigitFrequency),
}

impl Analysis {
    pub fn frequencies(&self) -> Option<&DigitFrequency> {
        match self {
            Analysis::Frequencies(f) => Some(f),
            Analysis::Empty => None,
        }
    }
}

/// Leading decimal digit of a positive integer. `None` for zero.
pub fn leading_digit(n: u128) -> Option<u8> {
    let first = n.to_string().bytes().next()?;
    match first {
        b'1'..=b'9' => Some(first - b'0'),
        _ => None,
    }
}

pub fn analyze<'a, I>(counts: I) -> Analysis
where
    I: IntoIterator<Item = &'a NormalizedCount>,
{
    let mut tally = [0usize; 9];
    for n in counts.into_iter().filter_map(|c| c.value()) {
        if let Some(d) = leading_digit(n) {
            tally[usize::from(d - 1)] += 1;
        }
    }
    match DigitFrequency::from_counts(tally) {
        Some(f) => Analysis::Frequencies(f),
        None => Analysis::Empty,
    }
}

/// One digit's row in a comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitComparison {
    pub digit: u8,
    pub count: usize,
    pub observed: f64,
    pub expected: f64,
}

impl DigitComparison {
    pub fn deviation(&self) -> f64 { self.observed - self.expected }
}

/// Observed vs reference, digit by digit over 1–9.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub rows: Vec<DigitComparison>,
    pub total: usize,
}

impl Comparison {
    pub fn new(observed: &DigitFrequency, reference: &ReferenceDistribution) -> Self {
        let rows = DIGITS
            .map(|d| DigitComparison {
                digit: d,
                count: observed.count(d),
                observed: observed.percent(d),
                expected: reference.percent(d),
            })
            .collect();
        Self { rows, total: observed.total() }
    }

    /// Mean absolute deviation in percentage points.
    pub fn mean_absolute_deviation(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.rows.iter().map(|r| r.deviation().abs()).sum();
        sum / self.rows.len() as f64
    }
}

fn slot(digit: u8) -> Option<usize> {
    if DIGITS.contains(&digit) { Some(usize::from(digit - 1)) } else { None }
}
