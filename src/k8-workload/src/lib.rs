//!
//! # Workload synthesis
//!
//! Turns application roles into Kubernetes workload resources: a
//! `Deployment` for stateless roles, a `StatefulSet` with per-replica
//! volume claims for stateful ones, plus the services each shape needs.
//!
//! Output is an ordered tree ([`k8_tree::Node`]) ready for YAML or JSON
//! emission.  In chart mode, values that belong to chart configuration are
//! emitted as template placeholders instead of literals, for an external
//! templating engine to resolve.
//!

mod common;
mod deployment;
mod error;
mod pod;
mod ports;
mod service;
mod settings;
mod stateful_set;

pub use self::deployment::deployment;
pub use self::error::ExportError;
pub use self::pod::pod_template;
pub use self::service::service_list;
pub use self::settings::ExportSettings;
pub use self::stateful_set::stateful_set;
