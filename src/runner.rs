// src/runner.rs
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::{
    analysis::{self, Analysis, Comparison, ReferenceDistribution},
    collect::{self, CaptureDir},
    config::AppOptions,
    dataset::Dataset,
    error::{Error, Result},
    normalize,
    progress::Progress,
    report,
};

/// Which part of the pipeline to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    All = 0,
    Collect = 1,
    Enrich = 2,
    Analyze = 3,
}

impl Phase {
    pub fn title(self) -> &'static str {
        match self {
            Phase::All => "Full run (1 -> 2 -> 3)",
            Phase::Collect => "Phase 1: collect followed usernames",
            Phase::Enrich => "Phase 2: collect profile data",
            Phase::Analyze => "Phase 3: Benford analysis and chart",
        }
    }
}

impl TryFrom<u8> for Phase {
    type Error = u8;

    fn try_from(v: u8) -> std::result::Result<Self, u8> {
        match v {
            0 => Ok(Phase::All),
            1 => Ok(Phase::Collect),
            2 => Ok(Phase::Enrich),
            3 => Ok(Phase::Analyze),
            other => Err(other),
        }
    }
}

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    /// Set when phase 3 had data to compare.
    pub comparison: Option<Comparison>,
}

/// Top-level runner: dispatch on phase and run against the capture directory.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run_phase<W: Write>(
    phase: Phase,
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
    out: W,
) -> Result<RunSummary> {
    let mut source = CaptureDir::new(opts);
    run_with(phase, opts, &mut source, progress, out)
}

/// Like [`run_phase`], with an explicit page source for phases 1 and 2.
pub fn run_with<S, W>(
    phase: Phase,
    opts: &AppOptions,
    source: &mut S,
    mut progress: Option<&mut dyn Progress>,
    mut out: W,
) -> Result<RunSummary>
where
    S: collect::FollowingSource + collect::ProfileSource,
    W: Write,
{
    let mut summary = RunSummary::default();
    info!(target_account = %opts.target, ?phase, "run started");

    match phase {
        Phase::Collect => summary.files_written.push(collect_phase(opts, source, progress)?),
        Phase::Enrich => summary.files_written.push(enrich_phase(opts, source, progress)?),
        Phase::Analyze => analyze_phase(opts, &mut out, &mut summary)?,
        Phase::All => {
            // each step runs even when the previous one failed
            match collect_phase(opts, source, reborrow(&mut progress)) {
                Ok(p) => summary.files_written.push(p),
                Err(e) => error!("phase 1 failed: {e}"),
            }
            match enrich_phase(opts, source, reborrow(&mut progress)) {
                Ok(p) => summary.files_written.push(p),
                Err(e) => error!("phase 2 failed: {e}"),
            }
            if let Err(e) = analyze_phase(opts, &mut out, &mut summary) {
                error!("phase 3 failed: {e}");
            }
        }
    }
    Ok(summary)
}

/// Shorten the trait-object lifetime so the same progress can serve several phases.
fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    progress.as_deref_mut().map(|p| p as &mut dyn Progress)
}

fn collect_phase<S: collect::FollowingSource + ?Sized>(
    opts: &AppOptions,
    source: &mut S,
    progress: Option<&mut dyn Progress>,
) -> Result<PathBuf> {
    info!("{}", Phase::Collect.title());
    Ok(collect::collect_following(opts, source, progress)?)
}

fn enrich_phase<S: collect::ProfileSource + ?Sized>(
    opts: &AppOptions,
    source: &mut S,
    progress: Option<&mut dyn Progress>,
) -> Result<PathBuf> {
    let list = opts.following_list_path();
    require(2, &list)?;
    info!("{}", Phase::Enrich.title());
    Ok(collect::enrich_profiles(opts, source, progress)?)
}

fn analyze_phase<W: Write>(opts: &AppOptions, out: &mut W, summary: &mut RunSummary) -> Result<()> {
    let input = opts.analysis_input();
    require(3, &input)?;
    info!("{}", Phase::Analyze.title());

    let chart = opts.chart_path();
    let cmp = analyze_file(&input, &opts.reference(), &chart, out)?;
    if cmp.is_some() {
        summary.files_written.push(chart);
    }
    summary.comparison = cmp;
    Ok(())
}

fn require(phase: u8, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::MissingPrerequisite { phase, path: path.to_path_buf() })
    }
}

/// Load a dataset, normalize its follower column, compare against `reference`,
/// print the table to `out` and save the chart to `chart`.
///
/// An input without a single usable count prints a notice and yields `None`;
/// no chart is written in that case.
pub fn analyze_file<W: Write>(
    input: &Path,
    reference: &ReferenceDistribution,
    chart: &Path,
    mut out: W,
) -> Result<Option<Comparison>> {
    let ds = Dataset::load(input)?;
    let raws = ds.follower_values()?;
    let counts = normalize::normalize_all(&raws);
    let valid = counts.iter().filter(|c| !c.is_missing()).count();
    info!(records = raws.len(), valid, dropped = raws.len() - valid, "follower counts normalized");

    match analysis::analyze(&counts) {
        Analysis::Empty => {
            writeln!(out, "No data to analyze: '{}' has no valid follower counts.", input.display())?;
            Ok(None)
        }
        Analysis::Frequencies(freq) => {
            let cmp = report::report(&freq, reference, chart, &mut out)?;
            Ok(Some(cmp))
        }
    }
}
