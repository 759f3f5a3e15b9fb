//! Terminal viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, speed control
//! - **[`panes`]**: stateless render functions for each visible pane (structure,
//!   step details, code listing, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a loaded
//! [`PlaybackEngine`] and call [`App::run`] to start the event loop.
//!
//! [`PlaybackEngine`]: crate::playback::PlaybackEngine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, FocusedPane, PlayerConfig};
