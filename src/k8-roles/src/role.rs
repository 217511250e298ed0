use serde::Deserialize;
use serde::Serialize;

use crate::PortValue;

/// One application component: its name and how it runs.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Role {
    pub name: String,
    pub run: RunConfig,
}

/// Runtime shape of a role.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct RunConfig {
    pub scaling: Scaling,
    /// requested memory in megabytes
    pub memory: Option<i64>,
    /// volumes claimed once per replica
    pub persistent_volumes: Vec<VolumeDefinition>,
    /// volumes shared across replicas
    pub shared_volumes: Vec<VolumeDefinition>,
    pub exposed_ports: Vec<ExposedPort>,
    pub env: Vec<EnvVar>,
}

impl RunConfig {
    /// Declared volumes: persistent first, then shared.
    pub fn volumes(&self) -> impl Iterator<Item = &VolumeDefinition> {
        self.persistent_volumes
            .iter()
            .chain(self.shared_volumes.iter())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Scaling {
    pub min: i64,
    pub max: i64,
}

impl Default for Scaling {
    fn default() -> Self {
        Self { min: 1, max: 1 }
    }
}

/// A volume requirement: mount point, claim tag, and size in whole
/// gigabytes.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct VolumeDefinition {
    pub path: String,
    pub tag: String,
    pub size: i64,
}

/// A port the role serves.  `external` and `internal` must expand to the
/// same number of ports.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExposedPort {
    pub name: String,
    pub protocol: String,
    pub external: PortValue,
    pub internal: PortValue,
}

impl Default for ExposedPort {
    fn default() -> Self {
        Self {
            name: String::new(),
            protocol: "TCP".to_owned(),
            external: PortValue::default(),
            internal: PortValue::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}
