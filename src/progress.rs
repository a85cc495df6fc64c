// src/progress.rs
use std::io::Write;

/// Lightweight progress reporting used by the long-running phases.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (a profile was read).
    fn item_done(&mut self, _username: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Line-per-item progress on any writer (stdout in the CLI).
pub struct ConsoleProgress<W: Write> {
    out: W,
    done: usize,
    total: usize,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, done: 0, total: 0 }
    }

    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{msg}");
    }
    fn item_done(&mut self, username: &str) {
        self.done += 1;
        let _ = writeln!(self.out, "Processing {}/{}: @{}", self.done, self.total, username);
    }
    fn finish(&mut self) {
        if self.total == 0 {
            let _ = writeln!(self.out, "Done");
        } else {
            let _ = writeln!(self.out, "Done ({}/{})", self.done, self.total);
        }
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_counts_items() {
        let mut p = ConsoleProgress::new(Vec::new());
        p.begin(2);
        p.item_done("ana");
        p.item_done("bob");
        p.finish();
        let text = String::from_utf8(p.into_inner()).unwrap();
        assert_eq!(text, "Processing 1/2: @ana\nProcessing 2/2: @bob\nDone (2/2)\n");
    }
}
