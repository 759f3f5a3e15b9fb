//! # Introduction
//!
//! algotrace runs classic algorithms eagerly, recording an immutable snapshot
//! of the data structure at every interesting moment. The resulting trace is
//! then played back forward and backward under transport controls, either in
//! a terminal UI built with [ratatui](https://docs.rs/ratatui) or as plain
//! text/JSON.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Algorithm → Recorder → Trace → PlaybackEngine → TUI
//! ```
//!
//! 1. [`algorithms`]: the instrumented catalog (sorting, searching, graph,
//!    grid pathfinding, tree, sequence) and [`algorithms::run`].
//! 2. [`trace`]: [`trace::Recorder`] appends [`trace::Step`]s; `finish`
//!    seals them into a [`trace::Trace`].
//! 3. [`snapshot`]: the captured structures (tagged arrays, graph state,
//!    grids, trees, stacks/queues/lists) and the [`snapshot::Capture`] trait.
//! 4. [`playback`]: [`playback::PlaybackEngine`], a cursor over a trace with
//!    play/pause/step/seek/speed and a pluggable [`playback::Scheduler`].
//! 5. [`ui`]: ratatui-based viewer; not part of the stable library API.

pub mod algorithms;
pub mod playback;
pub mod snapshot;
pub mod trace;
pub mod ui;
