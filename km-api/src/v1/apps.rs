use std::fmt;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppAction {
    #[default]
    Install,
    Update,
}

impl fmt::Display for AppAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppAction::Install => write!(f, "install"),
            AppAction::Update => write!(f, "update"),
        }
    }
}

// The App object is owned by the kubemart operator; the CLI only ever creates it, flips the
// action to "update", or deletes it.  The plan is stored as the canonical value from the
// marketplace manifest (e.g. "10Gi"), never as the human-readable label.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(group = "kubemart.civo.com", version = "v1alpha1", kind = "App", namespaced)]
#[kube(status = "AppStatus")]
#[kube(
    printcolumn = r#"{"name":"version", "type":"string", "description":"installed app version", "jsonPath":".status.installedVersion"}"#,
    printcolumn = r#"{"name":"status", "type":"string", "description":"last reconcile status", "jsonPath":".status.lastStatus"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    pub name: String,
    pub action: AppAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatus {
    #[serde(default)]
    pub last_status: String,

    #[serde(default)]
    pub installed_version: String,

    #[serde(default)]
    pub new_update_available: bool,

    #[serde(default)]
    pub new_update_version: String,
}

impl App {
    pub fn is_being_deleted(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    pub fn has_update_available(&self) -> bool {
        self.status.as_ref().is_some_and(|s| s.new_update_available)
    }
}
