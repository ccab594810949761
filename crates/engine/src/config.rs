//! Database configuration
//!
//! Read from `survey.toml` in the database directory when present. Every key
//! is optional; missing keys take the defaults below.
//!
//! ```toml
//! control_type = "Control"
//! mandatory_control_fields = ["Coordinator Email", "Researcher", "Status"]
//! private_fields = ["id", "type", "survey", "name"]
//! reserved_prefix = "_"
//! base_url = "https://surveys.example.org"
//!
//! [[record_types]]
//! type = "Control"
//! fields = ["field", "value"]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use survey_core::{RecordType, SurveyError, SurveyResult};

/// Name of the configuration file inside a database directory
pub const CONFIG_FILE: &str = "survey.toml";

/// Name of the record type holding survey control entries
pub const CONTROL: &str = "Control";

/// Control keys every survey must carry at creation
pub const MANDATORY_CONTROL_FIELDS: [&str; 3] = ["Coordinator Email", "Researcher", "Status"];

/// Unified database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Record type whose records back the survey `control` mapping
    pub control_type: String,
    /// Keys the control mapping must contain when a survey is created
    pub mandatory_control_fields: Vec<String>,
    /// Top-level payload keys never folded into a record's data blob
    pub private_fields: Vec<String>,
    /// Payload keys starting with this prefix are never folded
    pub reserved_prefix: String,
    /// Prefix for generated `_url` links; empty yields relative links
    pub base_url: String,
    /// Record types seeded when the database is created
    pub record_types: Vec<RecordType>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            control_type: CONTROL.to_string(),
            mandatory_control_fields: MANDATORY_CONTROL_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            private_fields: ["id", "type", "survey", "name"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            reserved_prefix: "_".to_string(),
            base_url: String::new(),
            record_types: vec![RecordType::new(CONTROL, ["field", "value"])],
        }
    }
}

impl SurveyConfig {
    /// Parse from TOML text
    pub fn from_toml(text: &str) -> SurveyResult<Self> {
        toml::from_str(text)
            .map_err(|e| SurveyError::serialization(format!("invalid {}: {}", CONFIG_FILE, e)))
    }

    /// Render as TOML text
    pub fn to_toml(&self) -> SurveyResult<String> {
        toml::to_string_pretty(self).map_err(|e| SurveyError::serialization(e.to_string()))
    }

    /// Load `survey.toml` from `dir`, or defaults if the file does not exist
    pub fn load(dir: &Path) -> SurveyResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)?;
        let config = Self::from_toml(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Write `survey.toml` into `dir`
    pub fn save(&self, dir: &Path) -> SurveyResult<()> {
        fs::write(dir.join(CONFIG_FILE), self.to_toml()?)?;
        Ok(())
    }

    /// Reject configurations the serializers cannot work with
    pub fn validate(&self) -> SurveyResult<()> {
        if self.control_type.is_empty() {
            return Err(SurveyError::validation("control_type must not be empty"));
        }
        if self.reserved_prefix.is_empty() {
            return Err(SurveyError::validation("reserved_prefix must not be empty"));
        }
        for rt in &self.record_types {
            if rt.name.is_empty() {
                return Err(SurveyError::validation("record type names must not be empty"));
            }
        }
        Ok(())
    }
}
