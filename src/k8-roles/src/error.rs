use serde_yaml::Error as SerdeYamlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleError {
    #[error("Yaml error: {0}")]
    SerdeError(#[from] SerdeYamlError),
    #[error("Role without a name")]
    UnnamedRole,
    #[error("Duplicate role: {0}")]
    DuplicateRole(String),
    #[error("Duplicate volume tag {tag} in role {role}")]
    DuplicateVolumeTag { role: String, tag: String },
    #[error("Invalid size {size} for volume {tag} in role {role}")]
    InvalidVolumeSize {
        role: String,
        tag: String,
        size: i64,
    },
}
