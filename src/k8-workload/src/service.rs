use tracing::debug;

use k8_roles::Role;
use k8_tree::Mapping;
use k8_tree::Node;

use crate::common;
use crate::common::LIST;
use crate::common::SERVICE;
use crate::ports;
use crate::ExportError;
use crate::ExportSettings;

/// Builds the services backing one role, wrapped in a `v1` `List`.
///
/// In headless-paired mode the list starts with the headless service that
/// gives stateful replicas their stable per-pod names, followed by the
/// routable ClusterIP service.  Otherwise only the routable service is
/// built.  Roles without exposed ports yield an empty list.
pub fn service_list(
    role: &Role,
    headless: bool,
    _settings: &ExportSettings,
) -> Result<Node, ExportError> {
    debug!("building service list for role {}", role.name);

    let mut items = Vec::new();
    if !role.run.exposed_ports.is_empty() {
        if headless {
            items.push(service(role, true)?);
        }
        items.push(service(role, false)?);
    }

    let mut list = common::resource(&LIST, None);
    list.add_node("items", Node::List(items));
    Ok(list.into())
}

fn service(role: &Role, headless: bool) -> Result<Node, ExportError> {
    let name = if headless {
        format!("{}-set", role.name)
    } else {
        role.name.clone()
    };

    let mut spec = Mapping::new();
    if headless {
        // no virtual IP; DNS resolves straight to the pods
        spec.add_str("clusterIP", "None");
    }
    spec.add_node("selector", common::role_labels(&role.name));
    spec.add_node("ports", Node::List(service_ports(role)?));

    let mut service = common::resource(&SERVICE, Some(name.as_str()));
    service.add_node("spec", spec);
    Ok(service.into())
}

fn service_ports(role: &Role) -> Result<Vec<Node>, ExportError> {
    let mut nodes = Vec::new();
    for port in &role.run.exposed_ports {
        for pair in ports::expand(&role.name, port)? {
            let mut entry = Mapping::with_str("name", pair.name);
            entry.add_str("protocol", pair.protocol);
            entry.add_int("port", i64::from(pair.external));
            entry.add_int("targetPort", i64::from(pair.internal));
            nodes.push(entry.into());
        }
    }
    Ok(nodes)
}
