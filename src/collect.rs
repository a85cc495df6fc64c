// src/collect.rs
//! Phase 1 and phase 2 drivers.
//!
//! Phase 1 turns the target's following list into `<target>_following_list.csv`.
//! Phase 2 reads every listed profile and writes `<target>_profile_data.csv`.
//!
//! Where the pages come from is behind [`FollowingSource`] / [`ProfileSource`];
//! [`CaptureDir`] serves pages saved to disk. A profile that cannot be read
//! still produces a row, with the reason in place of each value.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::options::profile_capture_in;
use crate::config::AppOptions;
use crate::dataset::{self, DatasetError};
use crate::file;
use crate::model::{ProfileRecord, Reason};
use crate::progress::Progress;
use crate::specs;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("no capture of the following list at '{}'", path.display())]
    MissingCapture { path: PathBuf },

    #[error("failed to read capture '{}': {source}", path.display())]
    ReadCapture { path: PathBuf, source: io::Error },

    #[error("no usernames to process in '{}'", path.display())]
    NoUsernames { path: PathBuf },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

type Result<T> = std::result::Result<T, CollectError>;

/// Produces the handles an account follows.
pub trait FollowingSource {
    fn following(&mut self, target: &str, limit: usize) -> Result<Vec<String>>;
}

/// Produces one profile record; never fails, failures become reasons.
pub trait ProfileSource {
    fn profile(&mut self, username: &str) -> ProfileRecord;
}

/// Pages saved to a directory: `<target>_following.html` and `<username>.html`.
#[derive(Clone, Debug)]
pub struct CaptureDir {
    following_page: PathBuf,
    dir: PathBuf,
}

impl CaptureDir {
    pub fn new(opts: &AppOptions) -> Self {
        Self { following_page: opts.following_capture(), dir: opts.captures_dir.clone() }
    }
}

impl FollowingSource for CaptureDir {
    fn following(&mut self, target: &str, limit: usize) -> Result<Vec<String>> {
        let path = &self.following_page;
        if !path.is_file() {
            return Err(CollectError::MissingCapture { path: path.clone() });
        }
        let doc = file::read_text(path)
            .map_err(|source| CollectError::ReadCapture { path: path.clone(), source })?;
        debug!(path = %path.display(), bytes = doc.len(), "following capture loaded");
        Ok(specs::parse_following(&doc, target, limit))
    }
}

impl ProfileSource for CaptureDir {
    fn profile(&mut self, username: &str) -> ProfileRecord {
        let path = profile_capture_in(&self.dir, username);
        if !path.is_file() {
            debug!(path = %path.display(), "no capture for profile");
            return ProfileRecord::unmeasurable(username, Reason::NotFound);
        }
        match file::read_text(&path) {
            Ok(doc) => specs::parse_profile(username, &doc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "capture unreadable");
                ProfileRecord::unmeasurable(username, Reason::Unknown)
            }
        }
    }
}

/// Phase 1: fetch the following list and save it. Returns the file written.
pub fn collect_following<S: FollowingSource + ?Sized>(
    opts: &AppOptions,
    source: &mut S,
    mut progress: Option<&mut dyn Progress>,
) -> Result<PathBuf> {
    let handles = source.following(&opts.target, opts.limit)?;
    if handles.is_empty() {
        warn!(target_account = %opts.target, "following list is empty");
    }
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Found {} accounts followed by @{}", handles.len(), opts.target));
    }

    let out = dataset::save_usernames(&opts.following_list_path(), &handles)?;
    info!(path = %out.display(), count = handles.len(), "following list saved");
    Ok(out)
}

/// Phase 2: read every listed profile and save the profile data.
pub fn enrich_profiles<S: ProfileSource + ?Sized>(
    opts: &AppOptions,
    source: &mut S,
    mut progress: Option<&mut dyn Progress>,
) -> Result<PathBuf> {
    let list = opts.following_list_path();
    let usernames = dataset::load_usernames(&list)?;
    if usernames.is_empty() {
        return Err(CollectError::NoUsernames { path: list });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(usernames.len());
    }

    let mut records = Vec::with_capacity(usernames.len());
    for username in &usernames {
        let rec = source.profile(username);
        info!(
            "@{} -> followers: {}, following: {}, bio: {}",
            rec.username,
            rec.followers.as_cell(),
            rec.following.as_cell(),
            bio_preview(rec.biography.as_cell()),
        );
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(username);
        }
        records.push(rec);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    log_reasons(&records);

    let out = dataset::save_profiles(&opts.profile_data_path(), &records)?;
    info!(path = %out.display(), profiles = records.len(), "profile data saved");
    Ok(out)
}

fn bio_preview(bio: &str) -> String {
    if bio.is_empty() {
        return s!("N/A");
    }
    let mut preview: String = bio.chars().take(50).collect();
    if bio.chars().count() > 50 { preview.push('…'); }
    preview
}

/// One summary line of why follower counts were unavailable.
fn log_reasons(records: &[ProfileRecord]) {
    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    for r in records.iter().filter_map(|r| r.followers.reason()) {
        *tally.entry(r.sentinel()).or_default() += 1;
    }
    if tally.is_empty() { return; }
    let parts: Vec<String> = tally.iter().map(|(k, v)| format!("{k}={v}")).collect();
    info!("unmeasured follower counts: {}", parts.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Measurement;
    use crate::progress::NullProgress;

    struct Fixed(Vec<&'static str>);

    impl FollowingSource for Fixed {
        fn following(&mut self, _target: &str, limit: usize) -> Result<Vec<String>> {
            let take = if limit == 0 { self.0.len() } else { limit };
            Ok(self.0.iter().take(take).map(|s| s.to_string()).collect())
        }
    }

    impl ProfileSource for Fixed {
        fn profile(&mut self, username: &str) -> ProfileRecord {
            if username.starts_with("priv") {
                return ProfileRecord::unmeasurable(username, Reason::Private);
            }
            ProfileRecord {
                username: s!(username),
                followers: Measurement::Measured(s!("1.5K")),
                following: Measurement::Measured(s!("20")),
                biography: Measurement::Measured(s!()),
            }
        }
    }

    fn opts(name: &str) -> AppOptions {
        let mut o = AppOptions::new("me");
        o.out_dir = std::env::temp_dir().join(format!("follow_benford_collect_{name}"));
        let _ = std::fs::remove_dir_all(&o.out_dir);
        o
    }

    #[test]
    fn phases_one_and_two_write_datasets() {
        let o = opts("both");
        let mut src = Fixed(vec!["ana", "priv.bob", "cam"]);
        let list = collect_following(&o, &mut src, None).unwrap();
        assert_eq!(dataset::load_usernames(&list).unwrap(), vec!["ana", "priv.bob", "cam"]);

        let mut progress = NullProgress;
        let data = enrich_profiles(&o, &mut src, Some(&mut progress)).unwrap();
        let recs = dataset::load_profiles(&data).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1].followers, Measurement::Unmeasurable(Reason::Private));
        assert_eq!(recs[2].followers, Measurement::Measured(s!("1.5K")));
    }

    #[test]
    fn enrich_without_usernames_fails() {
        let o = opts("empty");
        let mut src = Fixed(vec![]);
        collect_following(&o, &mut src, None).unwrap();
        let err = enrich_profiles(&o, &mut src, None).unwrap_err();
        assert!(matches!(err, CollectError::NoUsernames { .. }));
    }

    #[test]
    fn bio_preview_truncates() {
        assert_eq!(bio_preview(""), "N/A");
        assert_eq!(bio_preview(&"a".repeat(60)).chars().count(), 51);
    }
}
