use seascape_common::ParamError;
use seascape_kernel::WaveParameters;
use std::path::Path;

/// Errors from reading or writing preset files.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown preset format for {0:?}: expected .yaml, .yml or .json")]
    UnknownFormat(String),
    #[error("invalid preset: {0}")]
    Invalid(#[from] ParamError),
}

/// On-disk encoding of a preset. Fields missing from a document take their
/// default values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetFormat {
    Yaml,
    Json,
}

impl PresetFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, PresetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(PresetError::UnknownFormat(path.display().to_string())),
        }
    }

    pub fn encode(self, params: &WaveParameters) -> Result<String, PresetError> {
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(params)?,
            Self::Json => serde_json::to_string_pretty(params)?,
        })
    }

    /// Parse and validate a preset document.
    pub fn decode(self, text: &str) -> Result<WaveParameters, PresetError> {
        let params: WaveParameters = match self {
            Self::Yaml => serde_yaml::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        params.validate()?;
        Ok(params)
    }
}

pub fn load_preset(path: &Path) -> Result<WaveParameters, PresetError> {
    let format = PresetFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let params = format.decode(&text)?;
    tracing::info!(path = %path.display(), ?format, "preset loaded");
    Ok(params)
}

pub fn save_preset(path: &Path, params: &WaveParameters) -> Result<(), PresetError> {
    let format = PresetFormat::from_path(path)?;
    let text = format.encode(params)?;
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), ?format, "preset saved");
    Ok(())
}
