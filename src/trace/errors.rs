//! Errors raised while building or reading a trace
//!
//! Both variants indicate a programming mistake in the calling code rather
//! than bad user input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The recorder was used after `finish` handed its trace out
    #[error("recorder for `{algorithm}` used after the trace was finalized")]
    Lifecycle { algorithm: String },

    /// Step lookup outside `[0, len)`
    #[error("step index {index} out of range for a trace of {len} steps")]
    IndexOutOfRange { index: usize, len: usize },
}
