use k8_tree::Mapping;

/// Label tying pods, selectors, and services back to their role.
pub(crate) const ROLE_LABEL: &str = "app.kubernetes.io/component";

/// API coordinates of one resource kind.
pub(crate) struct WorkloadKind {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
}

impl WorkloadKind {
    /// `group/version`, or the bare version for the core group.
    pub(crate) fn api_version(&self) -> String {
        if self.group == "core" {
            return self.version.to_owned();
        }
        format!("{}/{}", self.group, self.version)
    }
}

pub(crate) const DEPLOYMENT: WorkloadKind = WorkloadKind {
    group: "extensions",
    version: "v1beta1",
    kind: "Deployment",
};

pub(crate) const STATEFUL_SET: WorkloadKind = WorkloadKind {
    group: "apps",
    version: "v1beta1",
    kind: "StatefulSet",
};

pub(crate) const SERVICE: WorkloadKind = WorkloadKind {
    group: "core",
    version: "v1",
    kind: "Service",
};

pub(crate) const LIST: WorkloadKind = WorkloadKind {
    group: "core",
    version: "v1",
    kind: "List",
};

/// Builds the envelope every resource starts from: `apiVersion`, `kind`,
/// and, when a name is given, a `metadata` block carrying it.
pub(crate) fn resource(kind: &WorkloadKind, name: Option<&str>) -> Mapping {
    let mut resource = Mapping::with_str("apiVersion", kind.api_version());
    resource.add_str("kind", kind.kind);
    if let Some(name) = name {
        resource.add_node("metadata", Mapping::with_str("name", name));
    }
    resource
}

/// Label selector matching every pod of `role_name`.
pub(crate) fn selector(role_name: &str) -> Mapping {
    Mapping::with_node("matchLabels", role_labels(role_name))
}

/// The labels applied to pods of a role.
pub(crate) fn role_labels(role_name: &str) -> Mapping {
    Mapping::with_str(ROLE_LABEL, role_name)
}
