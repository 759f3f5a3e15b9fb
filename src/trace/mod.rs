//! Recording algorithm runs as replayable traces
//!
//! This module provides:
//! - [`Recorder`]: the append-only API an algorithm calls as it runs
//! - [`Trace`]: the finished, immutable sequence of [`Step`]s
//! - [`errors`]: [`TraceError`]
//!
//! # Recording Model
//!
//! An algorithm runs eagerly to completion. Every call to
//! [`Recorder::record`] captures the structure as it is at that instant,
//! assigns the next index and appends. Once [`Recorder::finish`] has returned
//! the trace, the recorder refuses further use.
//!
//! ```text
//! algorithm(input, &mut recorder) → recorder.finish() → Trace → PlaybackEngine
//! ```

pub mod errors;

use crate::snapshot::{Capture, Snapshot};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub use errors::TraceError;

/// Algorithm-specific extras attached to a step (queue contents, pivot, ...)
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One recorded moment of an algorithm run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub index: usize,
    pub snapshot: Snapshot,
    pub description: String,
    /// 1-based line in the algorithm's code listing
    pub source_line: Option<u32>,
    pub metadata: Metadata,
}

impl Step {
    pub fn meta(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}

/// Optional parts of a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepExtras {
    pub source_line: Option<u32>,
    pub metadata: Metadata,
}

impl StepExtras {
    /// Extras pointing at a code listing line
    pub fn line(line: u32) -> Self {
        StepExtras {
            source_line: Some(line),
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata entry (builder pattern)
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// The full, ordered sequence of steps produced by one algorithm run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    algorithm_name: String,
    steps: Vec<Step>,
}

impl Trace {
    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, failing outside `[0, len)`
    pub fn step_at(&self, index: usize) -> Result<&Step, TraceError> {
        self.steps.get(index).ok_or(TraceError::IndexOutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    pub fn steps(&self) -> impl ExactSizeIterator<Item = &Step> {
        self.steps.iter()
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}

/// Builds a [`Trace`] one step at a time
#[derive(Debug)]
pub struct Recorder {
    algorithm_name: String,
    steps: Vec<Step>,
    finished: bool,
}

impl Recorder {
    pub fn new(algorithm_name: impl Into<String>) -> Self {
        Recorder {
            algorithm_name: algorithm_name.into(),
            steps: Vec::new(),
            finished: false,
        }
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Capture `structure` and append a step with no line or metadata
    pub fn record<S: Capture + ?Sized>(
        &mut self,
        structure: &S,
        description: impl Into<String>,
    ) -> Result<usize, TraceError> {
        self.record_with(structure, description, StepExtras::default())
    }

    /// Capture `structure` and append a step; returns the new step's index
    pub fn record_with<S: Capture + ?Sized>(
        &mut self,
        structure: &S,
        description: impl Into<String>,
        extras: StepExtras,
    ) -> Result<usize, TraceError> {
        self.ensure_open()?;

        let index = self.steps.len();
        self.steps.push(Step {
            index,
            snapshot: structure.capture(),
            description: description.into(),
            source_line: extras.source_line,
            metadata: extras.metadata,
        });
        Ok(index)
    }

    /// Finalize and hand out the trace. The recorder is unusable afterwards.
    pub fn finish(&mut self) -> Result<Trace, TraceError> {
        self.ensure_open()?;
        self.finished = true;

        let steps = std::mem::take(&mut self.steps);
        debug!(
            algorithm = %self.algorithm_name,
            steps = steps.len(),
            "trace finalized"
        );
        Ok(Trace {
            algorithm_name: self.algorithm_name.clone(),
            steps,
        })
    }

    fn ensure_open(&self) -> Result<(), TraceError> {
        if self.finished {
            return Err(TraceError::Lifecycle {
                algorithm: self.algorithm_name.clone(),
            });
        }
        Ok(())
    }
}

/// Run `body` against a fresh recorder and finalize the result
pub fn record_trace<E, F>(algorithm_name: &str, body: F) -> Result<Trace, E>
where
    E: From<TraceError>,
    F: FnOnce(&mut Recorder) -> Result<(), E>,
{
    let mut recorder = Recorder::new(algorithm_name);
    body(&mut recorder)?;
    Ok(recorder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::array::{elements_from, Tag};

    #[test]
    fn test_indices_follow_append_order() {
        let mut rec = Recorder::new("demo");
        let mut arr = elements_from(&[1, 2]);
        assert_eq!(rec.record(&arr, "start").unwrap(), 0);
        arr[0].tag = Tag::Comparing;
        assert_eq!(
            rec.record_with(&arr, "compare", StepExtras::line(3).with("i", 0))
                .unwrap(),
            1
        );

        let trace = rec.finish().unwrap();
        assert_eq!(trace.len(), 2);
        for (i, step) in trace.steps().enumerate() {
            assert_eq!(step.index, i);
        }
        let second = trace.step_at(1).unwrap();
        assert_eq!(second.source_line, Some(3));
        assert_eq!(second.meta("i"), Some(&serde_json::json!(0)));
        assert_eq!(trace.algorithm_name(), "demo");
    }

    #[test]
    fn test_record_after_finish_is_a_lifecycle_error() {
        let mut rec = Recorder::new("demo");
        rec.record(&elements_from(&[1]), "only").unwrap();
        rec.finish().unwrap();

        let err = rec.record(&elements_from(&[1]), "late").unwrap_err();
        assert!(matches!(err, TraceError::Lifecycle { .. }));
        assert!(matches!(rec.finish(), Err(TraceError::Lifecycle { .. })));
    }

    #[test]
    fn test_step_at_out_of_range() {
        let trace = record_trace::<TraceError, _>("empty", |_| Ok(())).unwrap();
        assert!(trace.is_empty());
        assert_eq!(
            trace.step_at(0),
            Err(TraceError::IndexOutOfRange { index: 0, len: 0 })
        );
    }
}
