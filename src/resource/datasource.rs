//! Datasource resources
//!
//! A datasource says where queryable data comes from. It exists in two
//! scopes:
//!
//! - [`GlobalDatasource`] is shared with every project; any dashboard can use it
//! - [`Datasource`] belongs to one project; only that project's dashboards can use it
//!
//! Both variants are validated while they are deserialized, whatever the
//! encoding. A value that made it out of `serde` has the right kind tag and
//! a non-empty spec.

use super::common::{null_as_default, Display, Plugin};
use super::kind::Kind;
use super::metadata::{Metadata, ProjectMetadata, ResourceMetadata};
use super::Resource;
use crate::error::{DecodeError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration payload of a datasource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    /// Used when a query does not name a datasource
    #[serde(default, deserialize_with = "null_as_default")]
    pub default: bool,
    /// Plugin carrying the actual connection configuration
    #[serde(default, deserialize_with = "null_as_default")]
    pub plugin: Plugin,
}

impl DatasourceSpec {
    /// Exact equality with the zero value.
    ///
    /// A spec holding only a display, or a plugin with an empty config
    /// object, is not empty.
    pub fn is_empty(&self) -> bool {
        *self == DatasourceSpec::default()
    }
}

/// Wire shape of both variants before validation
#[derive(Debug, Deserialize)]
pub(crate) struct RawResource<M> {
    #[serde(default, deserialize_with = "null_as_default")]
    kind: String,
    metadata: M,
    #[serde(default, deserialize_with = "null_as_default")]
    spec: DatasourceSpec,
}

/// Invariants shared by both variants
fn check(kind: &str, expected: Kind, spec: &DatasourceSpec) -> Result<(), ValidationError> {
    if kind != expected.as_str() {
        return Err(ValidationError::InvalidKind {
            kind: kind.to_string(),
            resource: expected.as_str(),
        });
    }
    if spec.is_empty() {
        return Err(ValidationError::EmptySpec);
    }
    Ok(())
}

fn check_raw<M>(raw: &RawResource<M>, expected: Kind) -> Result<(), ValidationError> {
    check(&raw.kind, expected, &raw.spec).inspect_err(|err| {
        tracing::debug!(kind = %raw.kind, "rejected {} document: {}", expected, err);
    })
}

/// Datasource shared with every project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResource<Metadata>")]
pub struct GlobalDatasource {
    pub kind: Kind,
    pub metadata: Metadata,
    pub spec: DatasourceSpec,
}

impl TryFrom<RawResource<Metadata>> for GlobalDatasource {
    type Error = ValidationError;

    fn try_from(raw: RawResource<Metadata>) -> Result<Self, Self::Error> {
        check_raw(&raw, Kind::GlobalDatasource)?;
        Ok(Self {
            kind: Kind::GlobalDatasource,
            metadata: raw.metadata,
            spec: raw.spec,
        })
    }
}

impl GlobalDatasource {
    /// Build in memory. Nothing is checked; see [`GlobalDatasource::validate`].
    pub fn new(metadata: Metadata, spec: DatasourceSpec) -> Self {
        Self {
            kind: Kind::GlobalDatasource,
            metadata,
            spec,
        }
    }

    pub fn from_json(input: &str) -> Result<Self, DecodeError> {
        let raw: RawResource<Metadata> = serde_json::from_str(input)?;
        Ok(Self::try_from(raw)?)
    }

    pub fn from_json_slice(input: &[u8]) -> Result<Self, DecodeError> {
        let raw: RawResource<Metadata> = serde_json::from_slice(input)?;
        Ok(Self::try_from(raw)?)
    }

    pub fn from_yaml(input: &str) -> Result<Self, DecodeError> {
        let raw: RawResource<Metadata> = serde_yaml::from_str(input)?;
        Ok(Self::try_from(raw)?)
    }

    pub(crate) fn from_json_value(value: Value) -> Result<Self, DecodeError> {
        let raw: RawResource<Metadata> = serde_json::from_value(value)?;
        Ok(Self::try_from(raw)?)
    }

    pub(crate) fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, DecodeError> {
        let raw: RawResource<Metadata> = serde_yaml::from_value(value)?;
        Ok(Self::try_from(raw)?)
    }

    /// Re-check the invariants, e.g. after building the value by hand
    pub fn validate(&self) -> Result<(), ValidationError> {
        check(self.kind.as_str(), Kind::GlobalDatasource, &self.spec)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Copy of the spec
    pub fn dts_spec(&self) -> DatasourceSpec {
        self.spec.clone()
    }
}

/// Datasource owned by a single project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResource<ProjectMetadata>")]
pub struct Datasource {
    pub kind: Kind,
    pub metadata: ProjectMetadata,
    pub spec: DatasourceSpec,
}

impl TryFrom<RawResource<ProjectMetadata>> for Datasource {
    type Error = ValidationError;

    fn try_from(raw: RawResource<ProjectMetadata>) -> Result<Self, Self::Error> {
        check_raw(&raw, Kind::Datasource)?;
        Ok(Self {
            kind: Kind::Datasource,
            metadata: raw.metadata,
            spec: raw.spec,
        })
    }
}

impl Datasource {
    /// Build in memory. Nothing is checked; see [`Datasource::validate`].
    pub fn new(metadata: ProjectMetadata, spec: DatasourceSpec) -> Self {
        Self {
            kind: Kind::Datasource,
            metadata,
            spec,
        }
    }

    pub fn from_json(input: &str) -> Result<Self, DecodeError> {
        let raw: RawResource<ProjectMetadata> = serde_json::from_str(input)?;
        Ok(Self::try_from(raw)?)
    }

    pub fn from_json_slice(input: &[u8]) -> Result<Self, DecodeError> {
        let raw: RawResource<ProjectMetadata> = serde_json::from_slice(input)?;
        Ok(Self::try_from(raw)?)
    }

    pub fn from_yaml(input: &str) -> Result<Self, DecodeError> {
        let raw: RawResource<ProjectMetadata> = serde_yaml::from_str(input)?;
        Ok(Self::try_from(raw)?)
    }

    pub(crate) fn from_json_value(value: Value) -> Result<Self, DecodeError> {
        let raw: RawResource<ProjectMetadata> = serde_json::from_value(value)?;
        Ok(Self::try_from(raw)?)
    }

    pub(crate) fn from_yaml_value(value: serde_yaml::Value) -> Result<Self, DecodeError> {
        let raw: RawResource<ProjectMetadata> = serde_yaml::from_value(value)?;
        Ok(Self::try_from(raw)?)
    }

    /// Re-check the invariants, e.g. after building the value by hand
    pub fn validate(&self) -> Result<(), ValidationError> {
        check(self.kind.as_str(), Kind::Datasource, &self.spec)
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn kind(&self) -> &str {
        self.kind.as_str()
    }

    /// Copy of the spec
    pub fn dts_spec(&self) -> DatasourceSpec {
        self.spec.clone()
    }
}

impl Resource for GlobalDatasource {
    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn metadata(&self) -> &dyn ResourceMetadata {
        &self.metadata
    }

    fn spec(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.spec)
    }
}

impl Resource for Datasource {
    fn kind(&self) -> &str {
        self.kind.as_str()
    }

    fn metadata(&self) -> &dyn ResourceMetadata {
        &self.metadata
    }

    fn spec(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.spec)
    }
}

/// Anything shaped like a datasource.
///
/// Lets selection code work the same way over global and project-scoped
/// collections.
pub trait DatasourceResource {
    fn metadata(&self) -> &dyn ResourceMetadata;

    fn datasource_spec(&self) -> &DatasourceSpec;

    /// Owned copy of the spec
    fn dts_spec(&self) -> DatasourceSpec {
        self.datasource_spec().clone()
    }
}

impl DatasourceResource for GlobalDatasource {
    fn metadata(&self) -> &dyn ResourceMetadata {
        &self.metadata
    }

    fn datasource_spec(&self) -> &DatasourceSpec {
        &self.spec
    }
}

impl DatasourceResource for Datasource {
    fn metadata(&self) -> &dyn ResourceMetadata {
        &self.metadata
    }

    fn datasource_spec(&self) -> &DatasourceSpec {
        &self.spec
    }
}

/// Select datasources by plugin kind and default flag.
///
/// An empty `kind` or a `None` default disables that criterion. Kind
/// matching is exact. Input order is kept and the input is left untouched.
pub fn filter_datasource<T>(kind: &str, default: Option<bool>, list: &[T]) -> Vec<T>
where
    T: DatasourceResource + Clone,
{
    list.iter()
        .filter(|d| {
            let spec = d.datasource_spec();
            (kind.is_empty() || spec.plugin.kind == kind)
                && default.is_none_or(|flag| spec.default == flag)
        })
        .cloned()
        .collect()
}
