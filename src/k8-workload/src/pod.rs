use k8_roles::Role;
use k8_tree::Mapping;
use k8_tree::Node;

use crate::common;
use crate::ports;
use crate::ExportError;
use crate::ExportSettings;

/// Builds the pod template shared by both workload shapes: metadata naming
/// and labelling the role, and a spec running its container.
pub fn pod_template(role: &Role, settings: &ExportSettings) -> Result<Node, ExportError> {
    let mut metadata = Mapping::with_str("name", role.name.as_str());
    metadata.add_node("labels", common::role_labels(&role.name));

    let spec = Mapping::with_node("containers", Node::List(vec![container(role, settings)?]));

    let mut template = Mapping::with_node("metadata", metadata);
    template.add_node("spec", spec);
    Ok(template.into())
}

fn container(role: &Role, settings: &ExportSettings) -> Result<Node, ExportError> {
    let mut container = Mapping::with_str("name", role.name.as_str());
    container.add_str("image", image_name(role, settings));

    let ports = container_ports(role)?;
    if !ports.is_empty() {
        container.add_node("ports", Node::List(ports));
    }
    let env = environment(role);
    if !env.is_empty() {
        container.add_node("env", Node::List(env));
    }
    if let Some(resources) = resources(role, settings) {
        container.add_node("resources", resources);
    }
    let mounts = volume_mounts(role);
    if !mounts.is_empty() {
        container.add_node("volumeMounts", Node::List(mounts));
    }
    Ok(container.into())
}

/// Image reference for a role: `[registry/][organization/]repository-role`,
/// tagged with the configured tag or `latest`.
fn image_name(role: &Role, settings: &ExportSettings) -> String {
    let mut image = String::new();
    if let Some(registry) = &settings.registry {
        image.push_str(registry);
        image.push('/');
    }
    if let Some(organization) = &settings.organization {
        image.push_str(organization);
        image.push('/');
    }
    if settings.repository.is_empty() {
        image.push_str(&role.name);
    } else {
        image.push_str(&settings.repository);
        image.push('-');
        image.push_str(&role.name);
    }
    image.push(':');
    if settings.image_tag.is_empty() {
        image.push_str("latest");
    } else {
        image.push_str(&settings.image_tag);
    }
    image
}

fn container_ports(role: &Role) -> Result<Vec<Node>, ExportError> {
    let mut nodes = Vec::new();
    for port in &role.run.exposed_ports {
        for pair in ports::expand(&role.name, port)? {
            let mut entry = Mapping::with_str("name", pair.name);
            entry.add_int("containerPort", i64::from(pair.internal));
            entry.add_str("protocol", pair.protocol);
            nodes.push(entry.into());
        }
    }
    Ok(nodes)
}

fn environment(role: &Role) -> Vec<Node> {
    role.run
        .env
        .iter()
        .map(|env| {
            let mut entry = Mapping::with_str("name", env.name.as_str());
            entry.add_str("value", env.value.as_str());
            entry.into()
        })
        .collect()
}

fn resources(role: &Role, settings: &ExportSettings) -> Option<Mapping> {
    if !settings.use_memory_limits {
        return None;
    }
    let memory = role.run.memory?;
    let requests = Mapping::with_str("memory", format!("{}M", memory));
    Some(Mapping::with_node("requests", requests))
}

fn volume_mounts(role: &Role) -> Vec<Node> {
    role.run
        .volumes()
        .map(|volume| {
            let mut mount = Mapping::with_str("name", volume.tag.as_str());
            mount.add_str("mountPath", volume.path.as_str());
            mount.into()
        })
        .collect()
}
