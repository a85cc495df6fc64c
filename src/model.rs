// src/model.rs
//
// Value types shared by collection, normalization and analysis.
//
// - RawValue:    one untyped count cell as it arrives from a data source.
// - Measurement: what a collector observed for one count field; keeps the
//                reason when nothing could be measured.
// - ProfileRecord: one followed account, as persisted between phases.

use std::fmt;

/// Raw count cell at the ingestion boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Numeric(f64),
    Text(String),
    Empty,
}

impl RawValue {
    /// Text cells; blank ones carry no measurement.
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().is_empty() { RawValue::Empty } else { RawValue::Text(cell.to_string()) }
    }

    /// Cell as it would be written back to a dataset.
    pub fn text(&self) -> String {
        match self {
            RawValue::Numeric(v) => v.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Empty => String::new(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self { RawValue::Numeric(v) }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self { RawValue::Numeric(v as f64) }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self { RawValue::Text(s.to_string()) }
}

impl From<Option<&str>> for RawValue {
    fn from(s: Option<&str>) -> Self {
        match s {
            Some(s) => RawValue::Text(s.to_string()),
            None => RawValue::Empty,
        }
    }
}

/// Why a count could not be measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reason {
    Private,
    NotExists,
    NotFound,
    Timeout,
    Unknown,
}

impl Reason {
    pub const ALL: [Reason; 5] = [
        Reason::Private, Reason::NotExists, Reason::NotFound, Reason::Timeout, Reason::Unknown,
    ];

    /// Marker written into the dataset in place of a count.
    pub fn sentinel(self) -> &'static str {
        match self {
            Reason::Private   => "PRIVADA",
            Reason::NotExists => "NO_EXISTE",
            Reason::NotFound  => "NO_ENCONTRADO",
            Reason::Timeout   => "TIMEOUT",
            Reason::Unknown   => "ERROR_DESCONOCIDO",
        }
    }

    /// Recognise a sentinel cell (case-insensitive, surrounding whitespace ignored).
    pub fn from_sentinel(cell: &str) -> Option<Reason> {
        let up = cell.trim().to_uppercase();
        Reason::ALL.into_iter().find(|r| r.sentinel() == up)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentinel())
    }
}

/// One scraped field: the raw text the page showed, or why there was none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Measurement {
    Measured(String),
    Unmeasurable(Reason),
}

impl Measurement {
    pub fn as_cell(&self) -> &str {
        match self {
            Measurement::Measured(s) => s,
            Measurement::Unmeasurable(r) => r.sentinel(),
        }
    }

    pub fn from_cell(cell: &str) -> Self {
        match Reason::from_sentinel(cell) {
            Some(r) => Measurement::Unmeasurable(r),
            None => Measurement::Measured(cell.to_string()),
        }
    }

    pub fn reason(&self) -> Option<Reason> {
        match self {
            Measurement::Unmeasurable(r) => Some(*r),
            Measurement::Measured(_) => None,
        }
    }
}

/// One followed account with everything phase 2 collects about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileRecord {
    pub username: String,
    pub followers: Measurement,
    pub following: Measurement,
    pub biography: Measurement,
}

impl ProfileRecord {
    /// Every field carries the same reason (private / missing account / failed load).
    pub fn unmeasurable(username: &str, reason: Reason) -> Self {
        Self {
            username: username.to_string(),
            followers: Measurement::Unmeasurable(reason),
            following: Measurement::Unmeasurable(reason),
            biography: Measurement::Unmeasurable(reason),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.followers.as_cell().to_string(),
            self.following.as_cell().to_string(),
            self.biography.as_cell().to_string(),
        ]
    }
}
