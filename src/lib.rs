//! Datasource resource model
//!
//! - [`resource`] - Typed resources with validation on decode, and selection
//! - [`format`] - JSON and YAML document handling
//! - [`config`] - Persistent settings of the `dsctl` tool
//! - [`commands`] - Bodies of the `dsctl` subcommands
//! - [`error`] - Decode and validation errors

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod resource;

pub use error::{DecodeError, ValidationError};
pub use format::Format;
pub use resource::{
    filter_datasource, Datasource, DatasourceResource, DatasourceSpec, GlobalDatasource,
};
