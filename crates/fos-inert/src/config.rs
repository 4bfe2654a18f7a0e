//! Session configuration

use serde::{Deserialize, Serialize};

use crate::{INERT_ATTRIBUTE, InertError};

fn default_attribute() -> String {
    INERT_ATTRIBUTE.to_string()
}

fn default_max_redirect_attempts() -> usize {
    64
}

fn default_true() -> bool {
    true
}

/// How focus is moved off an inert element during Tab navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilePreference {
    /// Synthetic Tab where the document navigates on it, else emulated
    #[default]
    Auto,
    /// Always rebuild Tab order from the tree
    Emulated,
    /// Try a synthetic Tab keydown first
    SyntheticTab,
}

/// Inert emulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertConfig {
    /// Marker attribute
    #[serde(default = "default_attribute")]
    pub attribute: String,

    pub profile: ProfilePreference,

    /// Focus attempts per interception before falling back to blur
    #[serde(default = "default_max_redirect_attempts")]
    pub max_redirect_attempts: usize,

    /// Append the inert stylesheet to `<body>` on install
    #[serde(default = "default_true")]
    pub inject_style: bool,
}

impl Default for InertConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            profile: ProfilePreference::Auto,
            max_redirect_attempts: default_max_redirect_attempts(),
            inject_style: true,
        }
    }
}

impl InertConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, InertError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.attribute.make_ascii_lowercase();
        Ok(config)
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attribute = attribute.to_ascii_lowercase();
        self
    }

    pub fn with_profile(mut self, profile: ProfilePreference) -> Self {
        self.profile = profile;
        self
    }

    pub fn without_style(mut self) -> Self {
        self.inject_style = false;
        self
    }
}
