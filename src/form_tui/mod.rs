//! Terminal editor for a single form
//!
//! Header fields, the line-items table and the print/edit toggle in one
//! screen, driven by the same editor commands the CLI uses.

pub mod app;
pub mod components;
pub mod traits;
pub mod ui;

pub use app::{App, Focus, Overlay};
