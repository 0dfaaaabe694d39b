//! Export and import of the application-state blob.
//!
//! Exports are either the plain JSON blob or base64 of that JSON. Import
//! accepts both, so anything produced by [`export_blob`] round-trips.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::ApplicationState;
use crate::error::{IntranetError, Result};

/// Encoding of an export artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Base64,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Base64 => "b64",
        }
    }
}

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
    pub format: ExportFormat,
}

/// Serializes `state` into an artifact named after `now`.
pub fn export_blob(
    state: &ApplicationState,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> Result<ExportArtifact> {
    let json = serde_json::to_string_pretty(state)?;
    let contents = match format {
        ExportFormat::Json => json,
        ExportFormat::Base64 => STANDARD.encode(json.as_bytes()),
    };
    Ok(ExportArtifact {
        file_name: format!(
            "intranet-export-{}.{}",
            now.format("%Y%m%d-%H%M%S"),
            format.extension()
        ),
        contents,
        format,
    })
}

/// Parses an import, plain JSON or base64-of-JSON.
///
/// Every failure is reported as [`IntranetError::InvalidImport`]. The parsed
/// state is normalized before it is returned.
pub fn parse_import(raw: &str) -> Result<ApplicationState> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IntranetError::invalid_import("empty input"));
    }

    let json = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        let compact: String = trimmed.split_whitespace().collect();
        let bytes = STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| IntranetError::invalid_import(format!("not JSON or base64: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| {
            IntranetError::invalid_import(format!("decoded bytes are not UTF-8: {}", e))
        })?
    };

    let mut state: ApplicationState = serde_json::from_str(&json)
        .map_err(|e| IntranetError::invalid_import(e.to_string()))?;
    state.normalize();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::transition::Command;

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = ApplicationState::seed();
        Command::PostMessage {
            sender: "CHIEF-01".to_string(),
            text: "status?".to_string(),
            timestamp: "22:13".to_string(),
        }
        .apply(&mut state)
        .unwrap();

        let artifact = export_blob(&state, ExportFormat::Json, at()).unwrap();
        assert_eq!(artifact.file_name, "intranet-export-20231114-221320.json");
        assert_eq!(parse_import(&artifact.contents).unwrap(), state);
    }

    #[test]
    fn test_base64_round_trip() {
        let state = ApplicationState::seed();
        let artifact = export_blob(&state, ExportFormat::Base64, at()).unwrap();
        assert!(artifact.file_name.ends_with(".b64"));
        assert!(!artifact.contents.starts_with('{'));
        assert_eq!(parse_import(&artifact.contents).unwrap(), state);
    }

    #[test]
    fn test_garbage_is_invalid_import() {
        for raw in ["", "{not json", "@@@@", "{\"channels\": 3}"] {
            let err = parse_import(raw).unwrap_err();
            assert!(err.is_invalid_import(), "{raw:?} gave {err:?}");
        }
    }

    #[test]
    fn test_import_repairs_dangling_active_channel() {
        let raw = r#"{"channels":[{"id":"x"}],"activeChannelId":"nope"}"#;
        let state = parse_import(raw).unwrap();
        assert_eq!(state.active_channel_id, "x");
        assert!(state.agents.is_empty());
    }
}
