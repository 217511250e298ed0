use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::Role;
use crate::RoleError;

/// A parsed role manifest: every role the application deploys.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct RoleManifest {
    pub roles: Vec<Role>,
}

impl RoleManifest {
    /// Parses a YAML manifest and validates it.
    pub fn from_yaml(content: &str) -> Result<Self, RoleError> {
        let manifest: Self = serde_yaml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks the invariants later stages rely on: named roles, unique role
    /// names, unique volume tags per role, non-negative volume sizes.
    pub fn validate(&self) -> Result<(), RoleError> {
        let mut names = HashSet::new();
        for role in &self.roles {
            if role.name.is_empty() {
                return Err(RoleError::UnnamedRole);
            }
            if !names.insert(role.name.as_str()) {
                return Err(RoleError::DuplicateRole(role.name.clone()));
            }

            let mut tags = HashSet::new();
            for volume in role.run.volumes() {
                if !tags.insert(volume.tag.as_str()) {
                    return Err(RoleError::DuplicateVolumeTag {
                        role: role.name.clone(),
                        tag: volume.tag.clone(),
                    });
                }
                if volume.size < 0 {
                    return Err(RoleError::InvalidVolumeSize {
                        role: role.name.clone(),
                        tag: volume.tag.clone(),
                        size: volume.size,
                    });
                }
            }
        }
        Ok(())
    }

    /// Looks up a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == name)
    }
}
