//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`structure`]: the captured data structure (bars, graph, tree, sequence)
//! - [`details`]: the current step's description and metadata
//! - [`source`]: pseudo-code listing with the current line highlighted
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each module exports one `render_*` function that draws into a [`Rect`]
//! from borrowed engine state; scroll offsets are the only thing they mutate.
//!
//! [`Rect`]: ratatui::layout::Rect

pub mod details;
pub mod source;
pub mod status;
pub mod structure;

pub use details::render_details_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use structure::render_structure_pane;
