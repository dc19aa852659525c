//! Resource kind tags

use crate::error::UnknownKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind tag of every resource in the model.
///
/// Serialized as the bare literal, e.g. `"GlobalDatasource"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Project,
    GlobalDatasource,
    Datasource,
    Dashboard,
    Folder,
    GlobalSecret,
    Secret,
    GlobalVariable,
    Variable,
    User,
    Role,
    GlobalRole,
    RoleBinding,
    GlobalRoleBinding,
}

impl Kind {
    pub const ALL: &'static [Kind] = &[
        Kind::Project,
        Kind::GlobalDatasource,
        Kind::Datasource,
        Kind::Dashboard,
        Kind::Folder,
        Kind::GlobalSecret,
        Kind::Secret,
        Kind::GlobalVariable,
        Kind::Variable,
        Kind::User,
        Kind::Role,
        Kind::GlobalRole,
        Kind::RoleBinding,
        Kind::GlobalRoleBinding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Project => "Project",
            Kind::GlobalDatasource => "GlobalDatasource",
            Kind::Datasource => "Datasource",
            Kind::Dashboard => "Dashboard",
            Kind::Folder => "Folder",
            Kind::GlobalSecret => "GlobalSecret",
            Kind::Secret => "Secret",
            Kind::GlobalVariable => "GlobalVariable",
            Kind::Variable => "Variable",
            Kind::User => "User",
            Kind::Role => "Role",
            Kind::GlobalRole => "GlobalRole",
            Kind::RoleBinding => "RoleBinding",
            Kind::GlobalRoleBinding => "GlobalRoleBinding",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    /// Exact, case-sensitive match on the literal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
