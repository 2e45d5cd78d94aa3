//! Apifox wire contract.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseModeError;

/// `importFormat` sent with every import.
pub const IMPORT_FORMAT: &str = "openapi";

/// Every Apifox response is wrapped in `{success, data}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

/// One entry of the folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFolder {
    pub id: i64,
    pub name: String,
    /// Parent folder id in decimal, `"0"` for the root.
    #[serde(deserialize_with = "id_string")]
    pub parent_id: String,
}

impl RemoteFolder {
    pub fn new(id: i64, name: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: parent_id.into(),
        }
    }
}

/// Accepts an id sent either as a string or as a number.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => n.to_string(),
    })
}

/// `data` of a folder create response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedFolder {
    pub id: i64,
}

/// JSON body of the import call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDataBody<'a> {
    pub import_format: &'static str,
    /// The serialized Swagger document.
    pub data: &'a str,
    pub api_overwrite_mode: ApiOverwriteMode,
    pub schema_overwrite_mode: SchemaOverwriteMode,
    pub sync_api_folder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_folder_id: Option<String>,
    pub import_base_path: bool,
}

/// How an imported endpoint replaces an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiOverwriteMode {
    /// Match on method and path, overwrite.
    MethodAndPath,
    /// Keep both.
    Both,
    /// Merge into the existing endpoint.
    Merge,
    /// Leave the existing endpoint untouched.
    #[default]
    Ignore,
}

impl ApiOverwriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MethodAndPath => "methodAndPath",
            Self::Both => "both",
            Self::Merge => "merge",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for ApiOverwriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiOverwriteMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "methodAndPath" | "method-and-path" => Ok(Self::MethodAndPath),
            "both" => Ok(Self::Both),
            "merge" => Ok(Self::Merge),
            "ignore" => Ok(Self::Ignore),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// How an imported data model replaces an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaOverwriteMode {
    /// Match on name, overwrite.
    Name,
    /// Keep both.
    Both,
    /// Merge into the existing model.
    Merge,
    /// Leave the existing model untouched.
    #[default]
    Ignore,
}

impl SchemaOverwriteMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Both => "both",
            Self::Merge => "merge",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for SchemaOverwriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaOverwriteMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "both" => Ok(Self::Both),
            "merge" => Ok(Self::Merge),
            "ignore" => Ok(Self::Ignore),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}
