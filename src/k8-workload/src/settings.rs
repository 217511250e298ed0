/// Settings for one export run.  Read-only for the builders.
#[derive(Debug, Default, Clone)]
pub struct ExportSettings {
    /// emit template placeholders for chart parameters instead of literals
    pub create_helm_chart: bool,
    /// image registry host, e.g. `docker.io`
    pub registry: Option<String>,
    /// registry organization
    pub organization: Option<String>,
    /// image repository prefix; the role name is appended
    pub repository: String,
    /// image tag; `latest` when empty
    pub image_tag: String,
    /// derive container memory requests from role memory declarations
    pub use_memory_limits: bool,
}
