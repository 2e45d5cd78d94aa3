//! Client configuration and sync requests.

use docsync_schema::DocumentMeta;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SyncError};
use crate::folder::FolderPath;
use crate::wire::{ApiOverwriteMode, SchemaOverwriteMode};

/// Default Apifox API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.apifox.com";

/// Value of the `X-Apifox-Version` header.
pub const DEFAULT_API_VERSION: &str = "2024-01-20";

/// Locale appended to every endpoint.
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Where and how to reach Apifox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApifoxConfig {
    pub base_url: String,
    pub api_version: String,
    pub locale: String,
}

impl Default for ApifoxConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ApifoxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// `{base}/api/v1/projects/{project_id}/{resource}?locale={locale}`
    pub fn endpoint(&self, project_id: &str, resource: &str) -> String {
        format!(
            "{}/api/v1/projects/{}/{}?locale={}",
            self.base_url.trim_end_matches('/'),
            project_id,
            resource,
            self.locale
        )
    }
}

/// One sync into one Apifox project.
///
/// Unset overwrite modes mean [`ApiOverwriteMode::Ignore`] and
/// [`SchemaOverwriteMode::Ignore`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncRequest {
    /// Document title, used when the document is assembled from APIs.
    pub title: String,
    pub description: String,
    pub version: String,
    /// Project id, shown in the Apifox project settings.
    pub project_id: String,
    /// Personal access token. Creating folders may need a session token.
    #[serde(skip_serializing)]
    pub access_token: String,
    pub api_overwrite_mode: Option<ApiOverwriteMode>,
    pub schema_overwrite_mode: Option<SchemaOverwriteMode>,
    /// Let the import move endpoints into the folders the document names.
    pub sync_api_folder: bool,
    /// Prefix endpoint paths with the document base path.
    pub import_base_path: bool,
    /// Target folder, `/`-separated. Missing folders are created.
    pub api_folder_path: String,
}

impl SyncRequest {
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn api_overwrite_mode(mut self, mode: ApiOverwriteMode) -> Self {
        self.api_overwrite_mode = Some(mode);
        self
    }

    pub fn schema_overwrite_mode(mut self, mode: SchemaOverwriteMode) -> Self {
        self.schema_overwrite_mode = Some(mode);
        self
    }

    pub fn sync_api_folder(mut self, enable: bool) -> Self {
        self.sync_api_folder = enable;
        self
    }

    pub fn import_base_path(mut self, enable: bool) -> Self {
        self.import_base_path = enable;
        self
    }

    pub fn folder(mut self, path: impl Into<String>) -> Self {
        self.api_folder_path = path.into();
        self
    }

    /// Reject requests that cannot reach a project.
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(SyncError::MissingProjectId);
        }
        if self.access_token.trim().is_empty() {
            return Err(SyncError::MissingAccessToken);
        }
        Ok(())
    }

    /// The requested folder, `None` when the import targets the root.
    pub fn folder_path(&self) -> Option<FolderPath> {
        let path = FolderPath::parse(&self.api_folder_path);
        (!path.is_root()).then_some(path)
    }

    pub fn effective_api_overwrite_mode(&self) -> ApiOverwriteMode {
        self.api_overwrite_mode.unwrap_or_default()
    }

    pub fn effective_schema_overwrite_mode(&self) -> SchemaOverwriteMode {
        self.schema_overwrite_mode.unwrap_or_default()
    }

    /// Title, description and version for the assembled document.
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta::new()
            .title(&self.title)
            .description(&self.description)
            .version(&self.version)
    }
}

impl fmt::Debug for SyncRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncRequest")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("version", &self.version)
            .field("project_id", &self.project_id)
            .field("access_token", &"<redacted>")
            .field("api_overwrite_mode", &self.api_overwrite_mode)
            .field("schema_overwrite_mode", &self.schema_overwrite_mode)
            .field("sync_api_folder", &self.sync_api_folder)
            .field("import_base_path", &self.import_base_path)
            .field("api_folder_path", &self.api_folder_path)
            .finish()
    }
}
