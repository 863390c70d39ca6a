//! Resume tracking for interrupted runs.
//!
//! A resume point is the unit id where a previously interrupted run should
//! pick back up. Every unit ahead of that id in enumeration order is skipped;
//! the matching unit and everything after it are processed normally.

use tracing::warn;

use relsweep_model::{Unit, UnitId};

/// Tracks whether the resume point has been observed during one selection
/// pass. Scoped to a single run; not shared across workers.
#[derive(Debug)]
pub struct ResumeTracker {
    resume_from: Option<UnitId>,
    found: bool,
}

impl ResumeTracker {
    pub fn new(resume_from: Option<UnitId>) -> Self {
        ResumeTracker {
            resume_from,
            found: false,
        }
    }

    /// Whether `unit` should be skipped on resume grounds.
    ///
    /// The unit matching the resume id flips the tracker and is itself not
    /// skipped. With no resume id configured, nothing is ever skipped.
    pub fn should_skip(&mut self, unit: &Unit) -> bool {
        let Some(resume_from) = &self.resume_from else {
            return false;
        };
        if self.found {
            return false;
        }
        if resume_from.matches(unit.id.as_str()) {
            self.found = true;
            return false;
        }
        true
    }

    /// Close out the pass. A configured resume id that never matched leaves
    /// the run with zero units; that outcome is preserved deliberately, but
    /// loudly.
    pub fn finish(&self, selected: usize) {
        if let Some(resume_from) = &self.resume_from
            && !self.found
        {
            warn!(
                resume_from = %resume_from,
                selected,
                "resume point not found in the filtered unit set; \
                 the run will process zero units"
            );
        }
    }
}
