use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Reject records of unrecognised type instead of skipping their payload.
    pub strict_record_types: bool,
}
