//! Resource identity
//!
//! Only the shape this crate relies on lives here. Naming rules and
//! lifecycle bookkeeping belong to the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity accessor shared by global and project-scoped metadata
pub trait ResourceMetadata {
    fn name(&self) -> &str;

    /// Owning project, `None` for global resources
    fn project(&self) -> Option<&str> {
        None
    }
}

/// Identity of a global resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub version: u64,
}

impl Metadata {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }
}

impl ResourceMetadata for Metadata {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Identity of a resource that lives inside a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(flatten)]
    pub metadata: Metadata,
    pub project: String,
}

impl ProjectMetadata {
    pub fn new(project: &str, name: &str) -> Self {
        Self {
            metadata: Metadata::new(name),
            project: project.to_string(),
        }
    }
}

impl ResourceMetadata for ProjectMetadata {
    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn project(&self) -> Option<&str> {
        Some(&self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamps_default_when_absent() {
        let metadata: Metadata = serde_json::from_value(json!({"name": "prom"})).unwrap();
        assert_eq!(metadata.name, "prom");
        assert_eq!(metadata.created_at, DateTime::<Utc>::default());
        assert_eq!(metadata.version, 0);
    }

    #[test]
    fn test_project_metadata_is_flat_on_the_wire() {
        let metadata = ProjectMetadata::new("perf", "prom");
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["name"], "prom");
        assert_eq!(value["project"], "perf");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_project_metadata_requires_project() {
        let res: Result<ProjectMetadata, _> = serde_json::from_value(json!({"name": "prom"}));
        assert!(res.is_err());
    }

    #[test]
    fn test_resource_metadata_accessors() {
        let global = Metadata::new("prom");
        assert_eq!(global.name(), "prom");
        assert_eq!(global.project(), None);

        let scoped = ProjectMetadata::new("perf", "loki");
        assert_eq!(scoped.name(), "loki");
        assert_eq!(scoped.project(), Some("perf"));
    }
}
