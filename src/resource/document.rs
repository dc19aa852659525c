//! Documents holding either datasource variant
//!
//! A file may carry one resource, a list of resources, or (in YAML) a stream
//! of `---` separated documents. The `kind` field decides which variant each
//! entry is decoded as; the full validated decode runs afterwards.

use serde::{Deserialize, Serialize};

use super::datasource::{filter_datasource, Datasource, GlobalDatasource};
use super::kind::Kind;
use super::metadata::ResourceMetadata;
use super::Resource;
use crate::error::{DecodeError, ValidationError};
use crate::format::Format;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatasourceDocument {
    Global(GlobalDatasource),
    Project(Datasource),
}

fn unsupported(kind: &str) -> DecodeError {
    DecodeError::Invalid(ValidationError::InvalidKind {
        kind: kind.to_string(),
        resource: Kind::Datasource.as_str(),
    })
}

impl DatasourceDocument {
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .unwrap_or_default()
            .to_string();
        match kind.parse::<Kind>() {
            Ok(Kind::GlobalDatasource) => {
                Ok(Self::Global(GlobalDatasource::from_json_value(value)?))
            }
            Ok(Kind::Datasource) => Ok(Self::Project(Datasource::from_json_value(value)?)),
            _ => Err(unsupported(&kind)),
        }
    }

    pub fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, DecodeError> {
        let kind = value
            .get("kind")
            .and_then(|k| k.as_str())
            .unwrap_or_default()
            .to_string();
        match kind.parse::<Kind>() {
            Ok(Kind::GlobalDatasource) => {
                Ok(Self::Global(GlobalDatasource::from_yaml_value(value)?))
            }
            Ok(Kind::Datasource) => Ok(Self::Project(Datasource::from_yaml_value(value)?)),
            _ => Err(unsupported(&kind)),
        }
    }

    fn as_resource(&self) -> &dyn Resource {
        match self {
            Self::Global(d) => d,
            Self::Project(d) => d,
        }
    }

    pub fn kind(&self) -> &str {
        self.as_resource().kind()
    }

    pub fn name(&self) -> &str {
        self.as_resource().metadata().name()
    }

    pub fn project(&self) -> Option<&str> {
        self.as_resource().metadata().project()
    }
}

/// Decode every datasource held in `input`
pub fn load_documents(
    format: Format,
    input: &str,
) -> Result<Vec<DatasourceDocument>, DecodeError> {
    let mut documents = Vec::new();
    match format {
        Format::Json => match serde_json::from_str::<serde_json::Value>(input)? {
            serde_json::Value::Array(items) => {
                for item in items {
                    documents.push(DatasourceDocument::from_json_value(item)?);
                }
            }
            value => documents.push(DatasourceDocument::from_json_value(value)?),
        },
        Format::Yaml => {
            for doc in serde_yaml::Deserializer::from_str(input) {
                match serde_yaml::Value::deserialize(doc)? {
                    serde_yaml::Value::Null => {}
                    serde_yaml::Value::Sequence(items) => {
                        for item in items {
                            documents.push(DatasourceDocument::from_yaml_value(item)?);
                        }
                    }
                    value => documents.push(DatasourceDocument::from_yaml_value(value)?),
                }
            }
        }
    }
    tracing::debug!("loaded {} datasource document(s)", documents.len());
    Ok(documents)
}

/// Select by plugin kind and default flag within each variant.
///
/// Global datasources come first, then project ones, each group in input
/// order.
pub fn select(
    documents: Vec<DatasourceDocument>,
    kind: &str,
    default: Option<bool>,
) -> Vec<DatasourceDocument> {
    let mut globals = Vec::new();
    let mut projects = Vec::new();
    for doc in documents {
        match doc {
            DatasourceDocument::Global(d) => globals.push(d),
            DatasourceDocument::Project(d) => projects.push(d),
        }
    }

    filter_datasource(kind, default, &globals)
        .into_iter()
        .map(DatasourceDocument::Global)
        .chain(
            filter_datasource(kind, default, &projects)
                .into_iter()
                .map(DatasourceDocument::Project),
        )
        .collect()
}
