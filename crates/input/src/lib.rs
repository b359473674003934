//! Viewer input: platform events mapped to a small set of actions.
//!
//! # Invariants
//! - The app consumes [`Action`]s, never raw window events.
//! - Input never edits wave parameters directly; parameter edits go through
//!   the debug panel.

pub mod action;
pub mod mapper;

pub use action::Action;
pub use mapper::{InputEvent, InputMapper, Key, PointerButton};
