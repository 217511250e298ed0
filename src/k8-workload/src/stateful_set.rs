use tracing::debug;
use tracing::trace;

use k8_roles::Role;
use k8_roles::VolumeDefinition;
use k8_tree::Mapping;
use k8_tree::Node;

use crate::common;
use crate::common::STATEFUL_SET;
use crate::pod;
use crate::service;
use crate::ExportError;
use crate::ExportSettings;

const STORAGE_CLASS_ANNOTATION: &str = "volume.beta.kubernetes.io/storage-class";

/// Builds a `StatefulSet` and its service pair for a stateful role: the
/// headless service pinning per-pod identities plus the routable one.
///
/// The stateful set comes back with its mapping keys recursively sorted,
/// so repeated exports of the same role serialize identically.
///
/// # Panics
///
/// Panics if `role` is `None`.  The stateful path is fed from manifest
/// lookups; a missing role here is a caller bug, not a recoverable
/// condition.
pub fn stateful_set(
    role: Option<&Role>,
    settings: &ExportSettings,
) -> Result<(Node, Node), ExportError> {
    let role = role.expect("no role given");
    debug!("exporting stateful set for role {}", role.name);

    let pod_template = pod::pod_template(role, settings)?;
    let services = service::service_list(role, true, settings)?;

    let claims = all_volume_claims(role, settings.create_helm_chart);

    let mut spec = Mapping::with_int("replicas", role.run.scaling.min);
    spec.add_str("serviceName", format!("{}-set", role.name));
    spec.add_node("template", pod_template);
    spec.add_node("volumeClaimTemplates", Node::List(claims));

    let mut stateful_set = common::resource(&STATEFUL_SET, Some(role.name.as_str()));
    stateful_set.add_node("spec", spec);

    Ok((Node::from(stateful_set).sorted(), services))
}

/// Claims for every volume the role declares: per-replica claims first,
/// then shared claims, each group in declaration order.
fn all_volume_claims(role: &Role, create_helm_chart: bool) -> Vec<Node> {
    let mut claims = volume_claims(
        &role.run.persistent_volumes,
        "persistent",
        "ReadWriteOnce",
        create_helm_chart,
    );
    claims.extend(volume_claims(
        &role.run.shared_volumes,
        "shared",
        "ReadWriteMany",
        create_helm_chart,
    ));
    claims
}

/// Derives one volume claim per declaration, in input order.
///
/// The storage class is the literal category name or, in chart mode, a
/// placeholder the templating engine resolves from chart values.
fn volume_claims(
    volumes: &[VolumeDefinition],
    storage_class: &str,
    access_mode: &str,
    create_helm_chart: bool,
) -> Vec<Node> {
    let storage_class = if create_helm_chart {
        format!(
            "{{{{ .Values.kube.storage_class.{} | quote }}}}",
            storage_class
        )
    } else {
        storage_class.to_owned()
    };

    trace!("deriving {} {} volume claims", volumes.len(), access_mode);

    volumes
        .iter()
        .map(|volume| {
            let mut metadata = Mapping::with_str("name", volume.tag.as_str());
            metadata.add_node(
                "annotations",
                Mapping::with_str(STORAGE_CLASS_ANNOTATION, storage_class.as_str()),
            );

            let mut spec = Mapping::with_node("accessModes", Node::str_list([access_mode]));
            spec.add_node(
                "resources",
                Mapping::with_node(
                    "requests",
                    Mapping::with_str("storage", format!("{}G", volume.size)),
                ),
            );

            let mut claim = Mapping::with_node("metadata", metadata);
            claim.add_node("spec", spec);
            claim.into()
        })
        .collect()
}

#[cfg(test)]
mod test {
    use k8_roles::Role;
    use k8_roles::VolumeDefinition;
    use k8_tree::Node;

    use super::all_volume_claims;
    use super::stateful_set;
    use super::volume_claims;
    use crate::ExportSettings;

    fn volume(tag: &str, size: i64) -> VolumeDefinition {
        VolumeDefinition {
            path: format!("/var/lib/{}", tag),
            tag: tag.to_owned(),
            size,
        }
    }

    fn test_role() -> Role {
        let mut role = Role {
            name: "db".to_owned(),
            ..Default::default()
        };
        role.run.scaling.min = 2;
        role.run.persistent_volumes.push(volume("data", 20));
        role.run.persistent_volumes.push(volume("wal", 5));
        role.run.shared_volumes.push(volume("exports", 40));
        role
    }

    fn claim_class(claim: &Node) -> Option<&str> {
        claim
            .get("metadata")
            .and_then(|metadata| metadata.get("annotations"))
            .and_then(|annotations| annotations.get("volume.beta.kubernetes.io/storage-class"))
            .and_then(Node::as_str)
    }

    fn claim_mode(claim: &Node) -> Option<&str> {
        claim
            .get("spec")
            .and_then(|spec| spec.get("accessModes"))
            .and_then(Node::as_list)
            .and_then(|modes| modes[0].as_str())
    }

    fn claim_storage(claim: &Node) -> Option<&str> {
        claim
            .get("spec")
            .and_then(|spec| spec.get("resources"))
            .and_then(|resources| resources.get("requests"))
            .and_then(|requests| requests.get("storage"))
            .and_then(Node::as_str)
    }

    #[test]
    fn test_claims_follow_input_order() {
        let volumes = [volume("data", 20), volume("wal", 5)];
        let claims = volume_claims(&volumes, "persistent", "ReadWriteOnce", false);
        assert_eq!(claims.len(), 2);

        let names: Vec<&str> = claims
            .iter()
            .map(|claim| {
                claim
                    .get("metadata")
                    .and_then(|metadata| metadata.get("name"))
                    .and_then(Node::as_str)
                    .expect("claim name")
            })
            .collect();
        assert_eq!(names, ["data", "wal"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(volume_claims(&[], "persistent", "ReadWriteOnce", false).is_empty());
    }

    #[test]
    fn test_claim_shape() {
        let volumes = [volume("data", 20)];
        let claims = volume_claims(&volumes, "persistent", "ReadWriteOnce", false);

        assert_eq!(claim_class(&claims[0]), Some("persistent"));
        assert_eq!(claim_mode(&claims[0]), Some("ReadWriteOnce"));
        assert_eq!(claim_storage(&claims[0]), Some("20G"));
    }

    #[test]
    fn test_zero_size_renders_without_rejection() {
        let claims = volume_claims(&[volume("scratch", 0)], "shared", "ReadWriteMany", false);
        assert_eq!(claim_storage(&claims[0]), Some("0G"));
    }

    #[test]
    fn test_chart_mode_substitutes_placeholder() {
        let volumes = [volume("data", 20)];
        let claims = volume_claims(&volumes, "persistent", "ReadWriteOnce", true);
        assert_eq!(
            claim_class(&claims[0]),
            Some("{{ .Values.kube.storage_class.persistent | quote }}")
        );

        let claims = volume_claims(&volumes, "shared", "ReadWriteMany", true);
        assert_eq!(
            claim_class(&claims[0]),
            Some("{{ .Values.kube.storage_class.shared | quote }}")
        );
    }

    #[test]
    fn test_access_modes_are_fixed_per_category() {
        let claims = all_volume_claims(&test_role(), false);
        assert_eq!(claims.len(), 3);

        // persistent claims first, in declaration order, then shared
        assert_eq!(claim_mode(&claims[0]), Some("ReadWriteOnce"));
        assert_eq!(claim_mode(&claims[1]), Some("ReadWriteOnce"));
        assert_eq!(claim_mode(&claims[2]), Some("ReadWriteMany"));
        assert_eq!(claim_class(&claims[2]), Some("shared"));
    }

    #[test]
    fn test_stateful_set_shape() {
        let (stateful_set, services) =
            stateful_set(Some(&test_role()), &ExportSettings::default()).expect("stateful set");

        assert_eq!(
            stateful_set.get("apiVersion").and_then(Node::as_str),
            Some("apps/v1beta1")
        );
        assert_eq!(
            stateful_set.get("kind").and_then(Node::as_str),
            Some("StatefulSet")
        );

        let spec = stateful_set.get("spec").expect("spec");
        assert_eq!(spec.get("replicas").and_then(Node::as_int), Some(2));
        assert_eq!(
            spec.get("serviceName").and_then(Node::as_str),
            Some("db-set")
        );

        let claims = spec
            .get("volumeClaimTemplates")
            .and_then(Node::as_list)
            .expect("claims");
        assert_eq!(claims.len(), 3);

        // no exposed ports, so the service list is empty but still present
        let items = services.get("items").and_then(Node::as_list).expect("items");
        assert!(items.is_empty());
    }

    #[test]
    fn test_no_volumes_yields_empty_claim_list() {
        let role = Role {
            name: "db".to_owned(),
            ..Default::default()
        };
        let (stateful_set, _) =
            stateful_set(Some(&role), &ExportSettings::default()).expect("stateful set");
        let claims = stateful_set
            .get("spec")
            .and_then(|spec| spec.get("volumeClaimTemplates"))
            .and_then(Node::as_list)
            .expect("claim list present");
        assert!(claims.is_empty());
    }

    #[test]
    fn test_envelope_keys_are_sorted() {
        let (stateful_set, _) =
            stateful_set(Some(&test_role()), &ExportSettings::default()).expect("stateful set");
        let keys: Vec<&str> = stateful_set
            .as_mapping()
            .expect("mapping")
            .iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["apiVersion", "kind", "metadata", "spec"]);

        let spec_keys: Vec<&str> = stateful_set
            .get("spec")
            .and_then(Node::as_mapping)
            .expect("spec")
            .iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(
            spec_keys,
            ["replicas", "serviceName", "template", "volumeClaimTemplates"]
        );
    }

    #[test]
    #[should_panic(expected = "no role given")]
    fn test_missing_role_panics() {
        let _ = stateful_set(None, &ExportSettings::default());
    }
}
