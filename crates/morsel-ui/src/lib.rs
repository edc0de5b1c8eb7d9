//! Terminal UI layer for the Pink Morsel sales visualiser.
//!
//! Provides themes, the header and region-selector components, the
//! sales-over-time chart view with its fixed event annotation, and the main
//! application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use morsel_core as core;
