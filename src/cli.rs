// src/cli.rs
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::config::{consts::*, AppOptions};
use crate::error::Result;
use crate::progress::ConsoleProgress;
use crate::runner::{self, Phase};

/// Benford's-law check on the follower counts of the accounts a target follows.
#[derive(Parser, Debug)]
#[command(name = "follow_benford", version, about)]
pub struct Args {
    /// Phase to run: 0 = all, 1 = collect list, 2 = profile data, 3 = analysis.
    /// Without it an interactive menu is shown.
    #[arg(value_parser = clap::value_parser!(u8).range(0..=3))]
    pub phase: Option<u8>,

    /// Account whose following list is analysed.
    #[arg(short, long, env = "BENFORD_TARGET", default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Maximum usernames taken from the following list (0 = no limit).
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Directory with the captured HTML pages.
    #[arg(long, default_value = DEFAULT_CAPTURES_DIR)]
    pub captures: PathBuf,

    /// Directory for the list, the profile data and the chart.
    #[arg(short, long = "out-dir", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Analyse this CSV/TSV instead of the profile data file (phase 3).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Use exact log10 Benford percentages instead of the one-decimal table.
    #[arg(long)]
    pub exact: bool,
}

impl Args {
    pub fn options(&self) -> AppOptions {
        AppOptions {
            target: self.target.trim().trim_start_matches('@').to_string(),
            limit: self.limit,
            captures_dir: self.captures.clone(),
            out_dir: self.out_dir.clone(),
            input: self.input.clone(),
            exact_reference: self.exact,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let opts = args.options();

    let phase = match args.phase {
        Some(n) => Phase::try_from(n).ok(),
        None => menu(&opts, io::stdin().lock(), io::stdout())?,
    };
    let Some(phase) = phase else { return Ok(()) };

    let stdout = io::stdout();
    let mut progress = ConsoleProgress::new(stdout.lock());
    println!("\n--- {} ---", phase.title());
    let summary = runner::run_phase(phase, &opts, Some(&mut progress), io::stdout())?;
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Interactive phase picker. `None` means the user chose to exit.
/// Re-prompts on anything that is not 0–4.
pub fn menu<R: BufRead, W: Write>(opts: &AppOptions, mut input: R, mut out: W) -> io::Result<Option<Phase>> {
    let rule = "=".repeat(44);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "  FOLLOWING ANALYZER (BENFORD) for @{}", opts.target)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Choose the phase to run:")?;
    for p in [Phase::Collect, Phase::Enrich, Phase::Analyze, Phase::All] {
        writeln!(out, "  [{}] {}", p as u8, p.title())?;
    }
    writeln!(out, "  [4] Exit")?;
    writeln!(out, "{rule}")?;

    let mut line = String::new();
    loop {
        write!(out, "Enter your choice (0-4): ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None); // EOF
        }
        match line.trim().parse::<u8>() {
            Ok(4) => return Ok(None),
            Ok(n) => match Phase::try_from(n) {
                Ok(p) => return Ok(Some(p)),
                Err(_) => writeln!(out, "Invalid option. Please choose 0, 1, 2, 3 or 4.")?,
            },
            Err(_) => writeln!(out, "Invalid input. Please enter a number.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(input: &str) -> (Option<Phase>, String) {
        let mut out = Vec::new();
        let got = menu(&AppOptions::default(), input.as_bytes(), &mut out).unwrap();
        (got, String::from_utf8(out).unwrap())
    }

    #[test]
    fn menu_reprompts_until_valid() {
        let (got, text) = pick("abc\n9\n2\n");
        assert_eq!(got, Some(Phase::Enrich));
        assert!(text.contains("Invalid input"));
        assert!(text.contains("Invalid option"));
    }

    #[test]
    fn menu_exit_and_eof() {
        assert_eq!(pick("4\n").0, None);
        assert_eq!(pick("").0, None);
    }

    #[test]
    fn args_parse_defaults_and_phase() {
        let args = Args::try_parse_from(["follow_benford", "3", "-t", "@someone", "-i", "data.tsv"]).unwrap();
        assert_eq!(args.phase, Some(3));
        let o = args.options();
        assert_eq!(o.target, "someone");
        assert_eq!(o.limit, DEFAULT_LIMIT);
        assert_eq!(o.input, Some(PathBuf::from("data.tsv")));
        assert!(Args::try_parse_from(["follow_benford", "7"]).is_err());
    }
}
