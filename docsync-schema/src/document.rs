//! Swagger document assembly from registered APIs

use crate::builder::SchemaBuilder;
use crate::descriptor::{Describe, TypeRef};
use crate::error::Result;
use crate::parameters::ParameterBuilder;
use crate::spec::{Info, Operation, PathItem, Response, SwaggerDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Default document title
pub const DEFAULT_TITLE: &str = "API Documentation";
/// Default document description
pub const DEFAULT_DESCRIPTION: &str = "API description";
/// Default document version
pub const DEFAULT_VERSION: &str = "v1.0.0";
/// Default export directory
pub const DEFAULT_EXPORT_DIR: &str = "openapi/v1";
/// File name written by [`SwaggerDocument::export`]
pub const EXPORT_FILE_NAME: &str = "openapi.json";

/// HTTP method of a registered API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// A registered API, as produced at route-registration time
#[derive(Debug, Clone)]
pub struct ApiDescriptor {
    pub base_path: String,
    pub relative_path: String,
    pub method: Method,
    pub remark: String,
    pub request: Option<TypeRef>,
    pub response: Option<TypeRef>,
}

impl ApiDescriptor {
    /// API with no request or response type
    pub fn new(
        method: Method,
        base_path: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            relative_path: relative_path.into(),
            method,
            remark: String::new(),
            request: None,
            response: None,
        }
    }

    /// GET API taking `Req` as query parameters and returning `Resp`
    pub fn get<Req: Describe, Resp: Describe>(
        base_path: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Self {
        Self::new(Method::Get, base_path, relative_path)
            .request::<Req>()
            .response::<Resp>()
    }

    /// POST API taking `Req` as JSON body and returning `Resp`
    pub fn post<Req: Describe, Resp: Describe>(
        base_path: impl Into<String>,
        relative_path: impl Into<String>,
    ) -> Self {
        Self::new(Method::Post, base_path, relative_path)
            .request::<Req>()
            .response::<Resp>()
    }

    pub fn remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    pub fn request<T: Describe>(mut self) -> Self {
        self.request = Some(TypeRef::of::<T>());
        self
    }

    pub fn response<T: Describe>(mut self) -> Self {
        self.response = Some(TypeRef::of::<T>());
        self
    }

    /// `base_path/relative_path` with repeated slashes collapsed
    pub fn full_path(&self) -> String {
        let joined = format!("{}/{}", self.base_path, self.relative_path);
        let mut path = String::with_capacity(joined.len());
        for c in joined.chars() {
            if c == '/' && path.ends_with('/') {
                continue;
            }
            path.push(c);
        }
        path
    }
}

/// Title, description and version of a document. Empty values fall back
/// to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl DocumentMeta {
    pub fn new() -> Self {
        Self::default()
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

    fn info(&self) -> Info {
        let or_default = |value: &str, default: &str| {
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };

        Info {
            title: or_default(&self.title, DEFAULT_TITLE),
            description: or_default(&self.description, DEFAULT_DESCRIPTION),
            version: or_default(&self.version, DEFAULT_VERSION),
        }
    }
}

/// Combines registered APIs into one Swagger 2.0 document.
///
/// Two APIs resolving to the same path and method overwrite each other; the
/// later registration wins and a warning is logged.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    parameters: ParameterBuilder,
}

impl DocumentAssembler {
    pub fn new(schemas: SchemaBuilder) -> Self {
        Self {
            parameters: ParameterBuilder::new(schemas),
        }
    }

    /// Assemble the document
    pub fn assemble(&self, apis: &[ApiDescriptor], meta: &DocumentMeta) -> Result<SwaggerDocument> {
        let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();

        for api in apis {
            let path = api.full_path();
            let operation = self.operation(api)?;
            let item = paths.entry(path.clone()).or_default();
            let slot = match api.method {
                Method::Get => &mut item.get,
                Method::Post => &mut item.post,
            };
            if slot.replace(operation).is_some() {
                warn!(path = %path, method = ?api.method, "duplicate API registration, keeping the last one");
            }
            debug!(path = %path, method = ?api.method, "documented API");
        }

        Ok(SwaggerDocument {
            swagger: "2.0".to_string(),
            info: meta.info(),
            definitions: BTreeMap::new(),
            security_definitions: BTreeMap::new(),
            paths,
        })
    }

    fn operation(&self, api: &ApiDescriptor) -> Result<Operation> {
        let schema = match api.response {
            Some(response) => self.parameters.schemas().build(&response.resolve(), 0)?,
            None => None,
        };

        let mut responses = BTreeMap::new();
        responses.insert(
            "200".to_string(),
            Response {
                description: "Success".to_string(),
                schema,
            },
        );

        Ok(Operation {
            summary: api.remark.clone(),
            description: api.remark.clone(),
            consumes: vec![CONTENT_TYPE_JSON.to_string()],
            produces: vec![CONTENT_TYPE_JSON.to_string()],
            parameters: self.parameters.build(api)?,
            responses,
        })
    }
}

/// Assemble with the default schema builder
pub fn assemble(apis: &[ApiDescriptor], meta: &DocumentMeta) -> Result<SwaggerDocument> {
    DocumentAssembler::default().assemble(apis, meta)
}

impl SwaggerDocument {
    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `openapi.json` into `dir`, creating it if needed
    pub fn export(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let file = dir.join(EXPORT_FILE_NAME);
        fs::write(&file, self.to_json_pretty()?)?;
        info!(file = %file.display(), paths = self.paths.len(), "exported swagger document");
        Ok(file)
    }
}
