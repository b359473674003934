//! Developer tooling: debug-panel control table, parameter inspector, presets.
//!
//! # Invariants
//! - Tools never hold the live parameters; they read snapshots and produce
//!   `ParamEdit`s or whole `WaveParameters` for the writer to apply.

pub mod controls;
pub mod inspector;
pub mod preset;

pub use controls::{ControlKind, ControlSpec, PANEL_CONTROLS, PanelState};
pub use inspector::{ParamInspector, ParamSummary};
pub use preset::{PresetError, PresetFormat, load_preset, save_preset};
