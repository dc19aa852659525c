//! Resource model
//!
//! Typed resources decoded from JSON or YAML documents. Decoding validates:
//! a resource whose kind tag or payload is wrong never comes out of `serde`.
//!
//! # Module Structure
//!
//! - [`kind`] - Kind tags of the resource model
//! - [`metadata`] - Global and project-scoped identity
//! - [`common`] - Display hints and plugin references
//! - [`datasource`] - Global and project datasources, and selection over them
//! - [`document`] - Documents holding either datasource variant
//!
//! # Example
//!
//! ```
//! use dsmodel::resource::{filter_datasource, Datasource};
//!
//! let doc = r#"{
//!     "kind": "Datasource",
//!     "metadata": {"name": "prom", "project": "perf"},
//!     "spec": {"default": true, "plugin": {"kind": "prometheus", "spec": {}}}
//! }"#;
//! let ds = Datasource::from_json(doc).unwrap();
//! let defaults = filter_datasource("prometheus", Some(true), &[ds]);
//! assert_eq!(defaults.len(), 1);
//! ```

pub mod common;
pub mod datasource;
pub mod document;
pub mod kind;
pub mod metadata;

pub use common::{Display, Plugin};
pub use datasource::{
    filter_datasource, Datasource, DatasourceResource, DatasourceSpec, GlobalDatasource,
};
pub use document::{load_documents, select, DatasourceDocument};
pub use kind::Kind;
pub use metadata::{Metadata, ProjectMetadata, ResourceMetadata};

use serde_json::Value;

/// Contract of every top-level resource
pub trait Resource {
    /// Kind tag as a plain string
    fn kind(&self) -> &str;

    fn metadata(&self) -> &dyn ResourceMetadata;

    /// The spec without its typed shape, for generic rendering
    fn spec(&self) -> serde_json::Result<Value>;
}
