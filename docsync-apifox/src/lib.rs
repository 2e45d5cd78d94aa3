//! # docsync Apifox sync
//!
//! Pushes Swagger 2.0 documents into an Apifox project, creating the target
//! folder path first when it does not exist yet.
//!
//! ## Flow
//!
//! 1. List the project's folders (only when a folder path is requested)
//! 2. Plan the missing folders with [`reconcile`]
//! 3. Create them one by one, parents first
//! 4. Import the document into the leaf folder
//!
//! Every step is fatal on failure. There is no retry and no rollback.
//!
//! ## Example
//!
//! ```rust,no_run
//! use docsync_apifox::{ApiOverwriteMode, ApifoxClient, ApifoxConfig, SyncRequest};
//! use docsync_schema::{ApiDescriptor, Method};
//!
//! # async fn run() -> Result<(), docsync_apifox::SyncError> {
//! let client = ApifoxClient::from_config(ApifoxConfig::default())?;
//!
//! let request = SyncRequest::new("123456", std::env::var("APIFOX_TOKEN").unwrap_or_default())
//!     .title("User service")
//!     .api_overwrite_mode(ApiOverwriteMode::MethodAndPath)
//!     .folder("backend/users");
//!
//! let apis = [ApiDescriptor::new(Method::Get, "/health", "")];
//! let outcome = client.sync(&request, &apis).await?;
//! println!("created {} folders", outcome.created_folders.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod folder;
pub mod sync;
pub mod wire;

pub use config::{ApifoxConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_LOCALE, SyncRequest};
pub use error::{ParseModeError, Result, SyncError};
pub use folder::{CreateStep, FolderPath, FolderPlan, ParentRef, ROOT_FOLDER_ID, reconcile};
pub use sync::{ApifoxClient, CreatedFolderRecord, SyncOutcome};
pub use wire::{ApiOverwriteMode, RemoteFolder, SchemaOverwriteMode};
