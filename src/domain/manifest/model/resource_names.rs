use std::collections::BTreeMap;

/// Conventional names derived from the application name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub app: String,
    pub service: String,
    pub pvc: String,
    pub deployment: String,
    pub ingress: String,
    pub cron_container: String,
}

impl ResourceNames {
    pub fn from_app(app: &str) -> Self {
        Self {
            app: app.to_string(),
            service: format!("{app}-svc"),
            pvc: format!("{app}-data"),
            deployment: format!("{app}-dep"),
            ingress: format!("{app}-ingress"),
            cron_container: format!("{app}-cron"),
        }
    }

    /// The one label set used for pod template labels and both selectors.
    pub fn labels(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("app".to_string(), self.app.clone())])
    }
}
