//! Settings file loading.
//!
//! Settings come from, lowest precedence first: built-in defaults, the
//! settings file, environment variables (a `.env` file included), then
//! command line flags.
//!
//! ```toml
//! [apifox]
//! base_url = "https://api.apifox.com"
//!
//! [sync]
//! project_id = "123456"
//! api_overwrite_mode = "methodAndPath"
//! api_folder_path = "backend/users"
//! ```

use docsync_apifox::{ApifoxConfig, SyncRequest};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::SyncArgs;
use crate::error::{CliError, CliResult};

/// Settings file looked up in the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "docsync.toml";

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub apifox: ApifoxConfig,
    pub sync: SyncRequest,
}

impl Settings {
    /// Load `path`, or the default file when it exists.
    ///
    /// An explicit path must exist. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !default.exists() {
                    debug!("No settings file, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!(path = %path.display(), "Loading settings");
        let content = fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content, &path)
    }

    fn parse(content: &str, path: &Path) -> CliResult<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(content)
                .map_err(|e| CliError::Config(format!("JSON parse error: {}", e)))
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Apply command line overrides.
    pub fn resolve(self, args: &SyncArgs) -> (ApifoxConfig, SyncRequest) {
        let Settings {
            mut apifox,
            mut sync,
        } = self;

        if let Some(base_url) = &args.base_url {
            apifox.base_url = base_url.clone();
        }
        if let Some(project) = &args.project {
            sync.project_id = project.clone();
        }
        if let Some(token) = &args.token {
            sync.access_token = token.clone();
        }
        if let Some(folder) = &args.folder {
            sync.api_folder_path = folder.clone();
        }
        if let Some(mode) = args.api_overwrite {
            sync.api_overwrite_mode = Some(mode);
        }
        if let Some(mode) = args.schema_overwrite {
            sync.schema_overwrite_mode = Some(mode);
        }
        if let Some(enable) = args.sync_folder {
            sync.sync_api_folder = enable;
        }
        if let Some(enable) = args.import_base_path {
            sync.import_base_path = enable;
        }

        (apifox, sync)
    }
}
