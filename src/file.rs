// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::csv::{write_row, Delim};

/// Create/truncate `path`, write the header (if any) and all rows.
/// Parent directories are created as needed. Returns the path written.
pub fn write_table<S: AsRef<str>>(
    path: &Path,
    header: Option<&[S]>,
    rows: &[Vec<String>],
) -> io::Result<PathBuf> {
    ensure_parent(path)?;
    let delim = Delim::for_path(path);

    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    if let Some(h) = header {
        write_row(&mut out, h, delim)?;
    }
    for row in rows {
        write_row(&mut out, row.as_slice(), delim)?;
    }
    out.flush()?;
    Ok(path.to_path_buf())
}

pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Make sure the directory holding `path` exists.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}", dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
