/// Errors raised when a parameter value is rejected at the panel or preset boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("invalid hex color {0:?}: expected #rgb or #rrggbb")]
    InvalidHex(String),
}
