use std::str::FromStr;

use serde::Deserialize;

/// How a file is reduced to a comparable fingerprint.
///
/// - `Metadata`: size + modification time only. Cheap, but a content change
///   that preserves both is invisible.
/// - `Content`: size + modification time + a BLAKE3 digest of the file
///   contents. Every tracked file is read on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintMode {
    Metadata,
    Content,
}

impl Default for FingerprintMode {
    fn default() -> Self {
        FingerprintMode::Metadata
    }
}

impl FromStr for FingerprintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metadata" => Ok(FingerprintMode::Metadata),
            "content" => Ok(FingerprintMode::Content),
            other => Err(format!(
                "invalid fingerprint mode: {other} (expected \"metadata\" or \"content\")"
            )),
        }
    }
}
