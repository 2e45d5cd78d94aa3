//! Sync orchestration.
//!
//! A sync is one strictly ordered call sequence: folder listing, folder
//! creates in plan order, then a single import. The first failure aborts the
//! sync. Folders created before it are left in place.

use docsync_http_client::{HttpClient, HttpClientConfig, Transport};
use docsync_schema::{ApiDescriptor, assemble};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{ApifoxConfig, SyncRequest};
use crate::error::{Result, SyncError};
use crate::folder::{FolderPath, FolderPlan, reconcile};
use crate::wire::{CreatedFolder, Envelope, IMPORT_FORMAT, ImportDataBody, RemoteFolder};

const FOLDER_LISTING: &str = "folder listing";
const FOLDER_CREATE: &str = "folder create";
const IMPORT: &str = "import";

/// A folder created during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFolderRecord {
    pub name: String,
    pub id: i64,
    pub parent_id: i64,
}

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome {
    /// Folder the document was imported into, `None` for the root.
    pub folder_id: Option<i64>,
    /// Folders created on the way, in creation order.
    pub created_folders: Vec<CreatedFolderRecord>,
    /// `data` of the import response.
    pub response: serde_json::Value,
}

/// Apifox API client.
///
/// # Examples
///
/// ```rust,no_run
/// use docsync_apifox::{ApifoxClient, SyncRequest};
///
/// # async fn run() -> Result<(), docsync_apifox::SyncError> {
/// let client = ApifoxClient::from_config(Default::default())?;
/// let request = SyncRequest::new("123456", "token").folder("backend/users");
///
/// let outcome = client.sync_file(&request, "openapi/v1/openapi.json").await?;
/// println!("imported into {:?}", outcome.folder_id);
/// # Ok(())
/// # }
/// ```
pub struct ApifoxClient<T> {
    transport: T,
    config: ApifoxConfig,
}

impl ApifoxClient<HttpClient> {
    /// Client backed by a default [`HttpClient`].
    pub fn from_config(config: ApifoxConfig) -> Result<Self> {
        let transport = HttpClient::new(HttpClientConfig::default())?;
        Ok(Self::with_config(transport, config))
    }
}

impl<T: Transport> ApifoxClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ApifoxConfig::default())
    }

    pub fn with_config(transport: T, config: ApifoxConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApifoxConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Assemble a document from `apis` and import it.
    pub async fn sync(&self, request: &SyncRequest, apis: &[ApiDescriptor]) -> Result<SyncOutcome> {
        if apis.is_empty() {
            return Err(SyncError::NoApis);
        }
        request.validate()?;

        let document = assemble(apis, &request.meta())?;
        info!(apis = apis.len(), paths = document.paths.len(), "Assembled document");

        self.sync_document(request, document.to_json_pretty()?).await
    }

    /// Import a Swagger document stored on disk.
    pub async fn sync_file(&self, request: &SyncRequest, path: impl AsRef<Path>) -> Result<SyncOutcome> {
        let path = path.as_ref();
        request.validate()?;

        debug!(path = %path.display(), "Reading document");
        let document = tokio::fs::read_to_string(path).await?;
        self.sync_document(request, document).await
    }

    /// Import an already serialized Swagger document.
    pub async fn sync_document(&self, request: &SyncRequest, document: String) -> Result<SyncOutcome> {
        request.validate()?;
        serde_json::from_str::<serde_json::Value>(&document).map_err(SyncError::Document)?;

        let headers = self.headers(request);

        let (folder_id, created_folders) = match request.folder_path() {
            Some(path) => {
                let (id, created) = self.ensure_folders(request, &path, &headers).await?;
                (Some(id), created)
            }
            None => (None, Vec::new()),
        };

        let body = ImportDataBody {
            import_format: IMPORT_FORMAT,
            data: &document,
            api_overwrite_mode: request.effective_api_overwrite_mode(),
            schema_overwrite_mode: request.effective_schema_overwrite_mode(),
            sync_api_folder: request.sync_api_folder,
            api_folder_id: folder_id.map(|id| id.to_string()),
            import_base_path: request.import_base_path,
        };
        let body = serde_json::to_value(&body)?;

        let url = self.config.endpoint(&request.project_id, "import-data");
        debug!(url = %url, bytes = document.len(), "Importing document");
        let bytes = self.transport.post_json(&url, &body, &headers).await?;
        let response = unwrap_envelope::<serde_json::Value>(IMPORT, &bytes)?.unwrap_or_default();

        info!(
            project_id = %request.project_id,
            folder_id = ?folder_id,
            created = created_folders.len(),
            "Imported document"
        );

        Ok(SyncOutcome {
            folder_id,
            created_folders,
            response,
        })
    }

    /// Fetch the folder listing and plan the creates for the requested
    /// folder without creating anything.
    pub async fn plan_folders(&self, request: &SyncRequest) -> Result<FolderPlan> {
        request.validate()?;

        let path = request.folder_path().unwrap_or_default();
        if path.is_root() {
            return Ok(reconcile(&path, &[]));
        }

        let folders = self.list_folders(request, &self.headers(request)).await?;
        Ok(reconcile(&path, &folders))
    }

    /// Current folder tree of the project.
    pub async fn folders(&self, request: &SyncRequest) -> Result<Vec<RemoteFolder>> {
        request.validate()?;
        self.list_folders(request, &self.headers(request)).await
    }

    fn headers(&self, request: &SyncRequest) -> Vec<(String, String)> {
        vec![
            ("X-Apifox-Version".to_string(), self.config.api_version.clone()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", request.access_token),
            ),
        ]
    }

    async fn list_folders(
        &self,
        request: &SyncRequest,
        headers: &[(String, String)],
    ) -> Result<Vec<RemoteFolder>> {
        let url = self.config.endpoint(&request.project_id, "api-detail-folders");
        debug!(url = %url, "Listing folders");

        let bytes = self.transport.get(&url, headers).await?;
        let folders = unwrap_envelope::<Vec<RemoteFolder>>(FOLDER_LISTING, &bytes)?.unwrap_or_default();
        debug!(count = folders.len(), "Fetched folders");
        Ok(folders)
    }

    async fn create_folder(
        &self,
        request: &SyncRequest,
        name: &str,
        parent_id: i64,
        headers: &[(String, String)],
    ) -> Result<i64> {
        let url = self.config.endpoint(&request.project_id, "api-folders");
        debug!(url = %url, name, parent_id, "Creating folder");

        let params = [
            ("name".to_string(), name.to_string()),
            ("parentId".to_string(), parent_id.to_string()),
        ];
        let bytes = self.transport.post_form(&url, &params, headers).await?;
        let created = unwrap_envelope::<CreatedFolder>(FOLDER_CREATE, &bytes)?.ok_or(
            SyncError::MissingData {
                operation: FOLDER_CREATE,
            },
        )?;

        info!(name, id = created.id, parent_id, "Created folder");
        Ok(created.id)
    }

    /// Make `path` exist and return the leaf folder id.
    ///
    /// Creates run one at a time. Each planned parent is replaced by the id
    /// the service assigned to it before the child is created.
    async fn ensure_folders(
        &self,
        request: &SyncRequest,
        path: &FolderPath,
        headers: &[(String, String)],
    ) -> Result<(i64, Vec<CreatedFolderRecord>)> {
        let folders = self.list_folders(request, headers).await?;
        let plan = reconcile(path, &folders);

        if let Some(id) = plan.resolved() {
            debug!(path = %path, id, "Folder already exists");
            return Ok((id, Vec::new()));
        }

        let mut assigned = Vec::with_capacity(plan.steps().len());
        let mut created = Vec::with_capacity(plan.steps().len());
        for (index, step) in plan.steps().iter().enumerate() {
            let parent_id =
                plan.parent_id(index, &assigned)
                    .ok_or_else(|| SyncError::UnresolvedParent {
                        name: step.name.clone(),
                    })?;
            let id = self.create_folder(request, &step.name, parent_id, headers).await?;
            assigned.push(id);
            created.push(CreatedFolderRecord {
                name: step.name.clone(),
                id,
                parent_id,
            });
        }

        let leaf = plan
            .leaf_id(&assigned)
            .ok_or_else(|| SyncError::UnresolvedParent {
                name: path.to_string(),
            })?;
        Ok((leaf, created))
    }
}

/// Check `success` and decode `data`.
///
/// The envelope is decoded loosely first so a rejection is reported with the
/// raw body even when its `data` has an unexpected shape.
fn unwrap_envelope<D: DeserializeOwned>(operation: &'static str, bytes: &[u8]) -> Result<Option<D>> {
    let envelope: Envelope<serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|source| SyncError::Decode { operation, source })?;

    if !envelope.success {
        return Err(SyncError::Rejected {
            operation,
            body: String::from_utf8_lossy(bytes).into_owned(),
        });
    }

    match envelope.data {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|source| SyncError::Decode { operation, source }),
    }
}
