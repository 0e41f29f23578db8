//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `generate` and `inspect`.

use serde::Serialize;
use tonewav_audio::{AudioConfig, AudioError, RenderSummary, WavHeader};

/// Error codes for CLI-level failures.
///
/// Library failures pass their own `TONE_XXX` codes through.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Config file could not be parsed
    pub const CONFIG_PARSE: &str = "CLI_002";
    /// Incompatible command-line options
    pub const INVALID_ARGS: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "TONE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Render phase that failed, for I/O errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            phase: None,
        }
    }
}

impl From<&AudioError> for JsonError {
    fn from(err: &AudioError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
            phase: err.phase().map(|p| p.as_str().to_string()),
        }
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered during generation
    pub errors: Vec<JsonError>,
    /// Non-fatal config warnings
    pub warnings: Vec<String>,
    /// Generation result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
}

impl GenerateOutput {
    /// Creates a successful output.
    pub fn success(result: GenerateResult, warnings: Vec<String>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// Generation result details.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    /// Effective configuration after overrides
    pub config: AudioConfig,
    /// Sizes of what was written
    pub summary: RenderSummary,
    /// BLAKE3 hash of the PCM data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// Wall-clock time in milliseconds
    pub duration_ms: u64,
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// Whether the file parsed and its sizes are consistent
    pub success: bool,
    /// Errors encountered during inspection
    pub errors: Vec<JsonError>,
    /// Inspected file path
    pub input: String,
    /// File length in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_bytes: Option<u64>,
    /// Parsed header fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<WavHeader>,
    /// BLAKE3 hash of the PCM data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonewav_audio::WritePhase;

    #[test]
    fn test_json_error_from_audio_error() {
        let err = AudioError::io(
            WritePhase::Header,
            std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"),
        );
        let json = JsonError::from(&err);
        assert_eq!(json.code, "TONE_002");
        assert_eq!(json.phase.as_deref(), Some("header write"));
        assert!(json.message.contains("broken pipe"));
    }

    #[test]
    fn test_failure_output_serialization() {
        let output = GenerateOutput::failure(
            vec![JsonError::new(error_codes::FILE_READ, "missing")],
            vec![],
        );
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["code"], "CLI_001");
        assert!(value.get("result").is_none());
        assert!(value["errors"][0].get("phase").is_none());
    }
}
