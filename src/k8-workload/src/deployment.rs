use tracing::debug;

use k8_roles::Role;
use k8_tree::Mapping;
use k8_tree::Node;

use crate::common;
use crate::common::DEPLOYMENT;
use crate::pod;
use crate::service;
use crate::ExportError;
use crate::ExportSettings;

/// Builds a `Deployment` and its service list for a stateless role.
///
/// The deployment comes back with its mapping keys recursively sorted, so
/// repeated exports of the same role serialize identically.
pub fn deployment(role: &Role, settings: &ExportSettings) -> Result<(Node, Node), ExportError> {
    debug!("exporting deployment for role {}", role.name);

    let pod_template = pod::pod_template(role, settings)?;
    let services = service::service_list(role, false, settings)?;

    let mut spec = Mapping::new();
    spec.add_int("replicas", role.run.scaling.min);
    spec.add_node("selector", common::selector(&role.name));
    spec.add_node("template", pod_template);

    let mut deployment = common::resource(&DEPLOYMENT, Some(role.name.as_str()));
    deployment.add_node("spec", spec);

    Ok((Node::from(deployment).sorted(), services))
}
