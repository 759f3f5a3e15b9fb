//! Caller-input errors from the playback engine
//!
//! Every error leaves the engine exactly as it was before the call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("cannot load an empty trace")]
    EmptyTrace,

    #[error("invalid playback speed {0} ms: must be a positive number of milliseconds")]
    InvalidSpeed(i64),
}
