//! Privacy-warning annotation types.

use serde::{Deserialize, Serialize};

/// Where the client should render the privacy warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    Banner,
    Popup,
    Inline,
}

impl DisplayType {
    /// Parse a configured value. Anything outside the enumeration is `None`;
    /// callers substitute the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "banner" => Some(Self::Banner),
            "popup" => Some(Self::Popup),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Popup => "popup",
            Self::Inline => "inline",
        }
    }
}

/// The annotation attached to outbound data under `chatPermsWarning` when
/// warnings are enabled. Its presence is the enabled signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningAnnotation {
    pub message: String,
    #[serde(rename = "displayType")]
    pub display_type: DisplayType,
}
