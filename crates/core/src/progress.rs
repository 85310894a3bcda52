//! Generation phases and progress reporting.
//!
//! Percentages: 5 once the structure is built, 10 to 90 linearly across the
//! processed items, 95 while packaging, 100 when the bytes are ready.

use log::{info, warn};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GenerationPhase {
    Init,
    BuildStructure,
    ProcessItems,
    Finalize,
    Package,
    Done,
    Error,
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationPhase::Init => "INIT",
            GenerationPhase::BuildStructure => "BUILD_STRUCTURE",
            GenerationPhase::ProcessItems => "PROCESS_ITEMS",
            GenerationPhase::Finalize => "FINALIZE",
            GenerationPhase::Package => "PACKAGE",
            GenerationPhase::Done => "DONE",
            GenerationPhase::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// One progress notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub phase: GenerationPhase,
    pub message: String,
    pub percent: u8,
    /// Items processed so far; never decreases within a run.
    pub current: usize,
    pub total: usize,
}

pub type ProgressSink<'a> = &'a mut (dyn FnMut(&Progress) + Send);

/// Tracks the phase of one run and forwards notifications to an optional sink.
pub struct ProgressReporter<'a> {
    sink: Option<ProgressSink<'a>>,
    phase: GenerationPhase,
    percent: u8,
    current: usize,
    total: usize,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(total: usize, sink: Option<ProgressSink<'a>>) -> Self {
        Self {
            sink,
            phase: GenerationPhase::Init,
            percent: 0,
            current: 0,
            total,
        }
    }

    /// A reporter that only tracks phases.
    pub fn silent(total: usize) -> Self {
        Self::new(total, None)
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Moves to `next`. Phases only move forward; `Error` is reachable from anywhere.
    pub fn enter(&mut self, next: GenerationPhase) {
        if next < self.phase && next != GenerationPhase::Error {
            warn!("Ignoring backwards phase transition {} -> {}", self.phase, next);
            return;
        }
        if next != self.phase {
            info!("Generation phase {} -> {}", self.phase, next);
            self.phase = next;
        }
    }

    pub fn structure_built(&mut self) {
        self.enter(GenerationPhase::BuildStructure);
        self.emit("Document structure built", 5);
    }

    /// One item (and its images) finished.
    pub fn item_done(&mut self, what: &str) {
        self.enter(GenerationPhase::ProcessItems);
        self.current = (self.current + 1).min(self.total);
        let percent = item_percent(self.current, self.total);
        let message = format!("{} {} of {}", what, self.current, self.total);
        self.emit(&message, percent);
    }

    pub fn packaging(&mut self) {
        self.enter(GenerationPhase::Package);
        self.current = self.total;
        self.emit("Packaging document", 95);
    }

    pub fn done(&mut self) {
        self.enter(GenerationPhase::Done);
        self.current = self.total;
        self.emit("Document ready", 100);
    }

    /// Reports the fatal failure at the last percentage reached.
    pub fn failed(&mut self, reason: &str) {
        self.enter(GenerationPhase::Error);
        warn!("Generation failed: {}", reason);
        self.emit(&format!("Generation failed: {}", reason), self.percent);
    }

    fn emit(&mut self, message: &str, percent: u8) {
        self.percent = percent;
        let progress = Progress {
            phase: self.phase,
            message: message.to_string(),
            percent,
            current: self.current,
            total: self.total,
        };
        if let Some(sink) = self.sink.as_mut() {
            sink(&progress);
        }
    }
}

/// 10..=90, linear in `current / total`.
fn item_percent(current: usize, total: usize) -> u8 {
    if total == 0 {
        return 90;
    }
    let ratio = current as f64 / total as f64;
    (10.0 + 80.0 * ratio).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_percent_spans_ten_to_ninety() {
        assert_eq!(item_percent(0, 4), 10);
        assert_eq!(item_percent(2, 4), 50);
        assert_eq!(item_percent(4, 4), 90);
        assert_eq!(item_percent(0, 0), 90);
    }

    #[test]
    fn full_run_is_monotonic_and_ends_at_total() {
        let mut seen = Vec::new();
        let mut sink = |p: &Progress| seen.push(p.clone());
        {
            let mut reporter = ProgressReporter::new(3, Some(&mut sink));
            reporter.structure_built();
            for _ in 0..3 {
                reporter.item_done("Finding");
            }
            reporter.enter(GenerationPhase::Finalize);
            reporter.packaging();
            reporter.done();
            assert_eq!(reporter.phase(), GenerationPhase::Done);
        }

        let percents: Vec<u8> = seen.iter().map(|p| p.percent).collect();
        assert_eq!(percents, vec![5, 37, 63, 90, 95, 100]);
        assert!(seen.windows(2).all(|w| w[0].current <= w[1].current));
        let last = seen.last().unwrap();
        assert_eq!(last.current, last.total);
        assert_eq!(seen[2].message, "Finding 2 of 3");
    }

    #[test]
    fn phases_do_not_move_backwards() {
        let mut reporter = ProgressReporter::silent(0);
        reporter.enter(GenerationPhase::Package);
        reporter.enter(GenerationPhase::BuildStructure);
        assert_eq!(reporter.phase(), GenerationPhase::Package);
        reporter.failed("zip error");
        assert_eq!(reporter.phase(), GenerationPhase::Error);
    }

    #[test]
    fn failure_is_reported_at_the_last_percent() {
        let mut seen = Vec::new();
        let mut sink = |p: &Progress| seen.push(p.clone());
        {
            let mut reporter = ProgressReporter::new(1, Some(&mut sink));
            reporter.structure_built();
            reporter.item_done("Finding");
            reporter.packaging();
            reporter.failed("zip error");
        }

        let last = seen.last().unwrap();
        assert_eq!(last.phase, GenerationPhase::Error);
        assert_eq!(last.percent, 95);
        assert_eq!(last.message, "Generation failed: zip error");
    }
}
