// src/dataset.rs
//! Tabular intermediate data shared by the phases.
//!
//! - Following list: one column, `username`.
//! - Profile data:   `username,seguidores,seguidos,biografia`.
//!
//! Delimited text is read and written; the extension picks comma or tab.
//! Spreadsheets (`.xlsx`, `.xlsm`, `.xls`, `.ods`) can be read: the first
//! sheet, first row as header. Numeric sheet cells stay numeric.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::csv::{self, Delim};
use crate::file;
use crate::model::{Measurement, ProfileRecord, RawValue};

pub const USERNAME_COLUMN: &str = "username";
pub const FOLLOWERS_COLUMN: &str = "seguidores";
pub const FOLLOWING_COLUMN: &str = "seguidos";
pub const BIOGRAPHY_COLUMN: &str = "biografia";
/// Older exports named the follower column this way.
pub const LEGACY_FOLLOWERS_COLUMN: &str = "followers_count";

pub const PROFILE_HEADER: [&str; 4] =
    [USERNAME_COLUMN, FOLLOWERS_COLUMN, FOLLOWING_COLUMN, BIOGRAPHY_COLUMN];

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to write '{}': {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("column '{column}' not found in '{}'", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("cannot write '{}': outputs are .csv or .tsv", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read spreadsheet '{}': {message}", path.display())]
    Sheet { path: PathBuf, message: String },
}

type Result<T> = std::result::Result<T, DatasetError>;

/// A loaded table: header plus data rows. Blank cells are `Empty`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub path: PathBuf,
    pub header: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let (header, rows) = match Source::for_path(path) {
            Source::Sheet => read_sheet(path)?,
            Source::Text(delim) => {
                let text = file::read_text(path)
                    .map_err(|source| DatasetError::Read { path: path.to_path_buf(), source })?;
                let (header, rows) = csv::split_header(csv::parse_rows(&text, delim));
                let rows: Vec<Vec<RawValue>> = rows
                    .iter()
                    .map(|r| r.iter().map(|c| RawValue::from_cell(c)).collect())
                    .collect();
                (header.unwrap_or_default(), rows)
            }
        };
        info!(path = %path.display(), records = rows.len(), "dataset loaded");
        Ok(Self { path: path.to_path_buf(), header, rows })
    }

    pub fn column(&self, name: &str) -> Result<usize> {
        csv::column_index(&self.header, name).ok_or_else(|| DatasetError::MissingColumn {
            column: name.to_string(),
            path: self.path.clone(),
        })
    }

    /// `seguidores`, else the legacy `followers_count`.
    pub fn follower_column(&self) -> Result<usize> {
        if let Some(i) = csv::column_index(&self.header, FOLLOWERS_COLUMN) {
            return Ok(i);
        }
        if let Some(i) = csv::column_index(&self.header, LEGACY_FOLLOWERS_COLUMN) {
            debug!("using legacy column '{}'", LEGACY_FOLLOWERS_COLUMN);
            return Ok(i);
        }
        Err(DatasetError::MissingColumn {
            column: FOLLOWERS_COLUMN.to_string(),
            path: self.path.clone(),
        })
    }

    /// Cells of one column; short rows yield `Empty`.
    pub fn raw_values(&self, col: usize) -> Vec<RawValue> {
        self.rows
            .iter()
            .map(|r| r.get(col).cloned().unwrap_or(RawValue::Empty))
            .collect()
    }

    pub fn follower_values(&self) -> Result<Vec<RawValue>> {
        let col = self.follower_column()?;
        Ok(self.raw_values(col))
    }
}

/// Handles from a following list (first column, header skipped).
pub fn load_usernames(path: &Path) -> Result<Vec<String>> {
    let ds = Dataset::load(path)?;
    let col = csv::column_index(&ds.header, USERNAME_COLUMN).unwrap_or(0);
    let names: Vec<String> = ds
        .rows
        .iter()
        .filter_map(|r| r.get(col))
        .map(|c| c.text().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(names)
}

pub fn save_usernames(path: &Path, usernames: &[String]) -> Result<PathBuf> {
    delim_for(path)?;
    let rows: Vec<Vec<String>> = usernames.iter().map(|u| vec![u.clone()]).collect();
    file::write_table(path, Some(&[USERNAME_COLUMN][..]), &rows)
        .map_err(|source| DatasetError::Write { path: path.to_path_buf(), source })
}

pub fn save_profiles(path: &Path, records: &[ProfileRecord]) -> Result<PathBuf> {
    delim_for(path)?;
    if records.is_empty() {
        warn!("no profile records to save");
    }
    let rows: Vec<Vec<String>> = records.iter().map(ProfileRecord::to_row).collect();
    file::write_table(path, Some(&PROFILE_HEADER[..]), &rows)
        .map_err(|source| DatasetError::Write { path: path.to_path_buf(), source })
}

/// Read profile records back; missing optional columns become empty.
pub fn load_profiles(path: &Path) -> Result<Vec<ProfileRecord>> {
    let ds = Dataset::load(path)?;
    let user = ds.column(USERNAME_COLUMN)?;
    let followers = ds.follower_column()?;
    let following = csv::column_index(&ds.header, FOLLOWING_COLUMN);
    let bio = csv::column_index(&ds.header, BIOGRAPHY_COLUMN);

    let cell = |r: &[RawValue], i: Option<usize>| -> String {
        i.and_then(|i| r.get(i)).map(RawValue::text).unwrap_or_default()
    };

    Ok(ds
        .rows
        .iter()
        .map(|r| ProfileRecord {
            username: cell(r, Some(user)),
            followers: Measurement::from_cell(&cell(r, Some(followers))),
            following: Measurement::from_cell(&cell(r, following)),
            biography: Measurement::from_cell(&cell(r, bio)),
        })
        .collect())
}

enum Source {
    Text(Delim),
    Sheet,
}

impl Source {
    fn for_path(path: &Path) -> Self {
        match extension(path).as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Source::Sheet,
            _ => Source::Text(Delim::for_path(path)),
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Outputs are always delimited text.
fn delim_for(path: &Path) -> Result<Delim> {
    match Source::for_path(path) {
        Source::Text(delim) => Ok(delim),
        Source::Sheet => Err(DatasetError::UnsupportedFormat { path: path.to_path_buf() }),
    }
}

/// First worksheet; its first row is the header.
fn read_sheet(path: &Path) -> Result<(Vec<String>, Vec<Vec<RawValue>>)> {
    let sheet_err = |message: String| DatasetError::Sheet { path: path.to_path_buf(), message };
    std::fs::metadata(path).map_err(|source| DatasetError::Read { path: path.to_path_buf(), source })?;

    let mut workbook = open_workbook_auto(path).map_err(|e| sheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| sheet_err(s!("workbook has no sheets")))?
        .map_err(|e| sheet_err(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|r| r.iter().map(|c| sheet_cell(c).text().trim().to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<RawValue>> = rows.map(|r| r.iter().map(sheet_cell).collect()).collect();
    debug!(path = %path.display(), rows = rows.len(), "first sheet read");
    Ok((header, rows))
}

fn sheet_cell(cell: &Data) -> RawValue {
    match cell {
        Data::Int(i) => RawValue::from(*i),
        Data::Float(f) => RawValue::Numeric(*f),
        Data::String(s) => RawValue::from_cell(s),
        Data::Empty | Data::Error(_) => RawValue::Empty,
        other => RawValue::from_cell(&other.to_string()),
    }
}
