use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use km_api::v1::{
    App,
    AppAction,
    AppSpec,
    AppStatus,
};
use rstest::*;

use crate::constants::*;

pub fn test_app(name: &str, installed_version: &str, update_version: Option<&str>) -> App {
    let mut app = App::new(name, AppSpec { name: name.into(), action: AppAction::Install, plan: None });
    app.metadata.namespace = Some(TEST_NAMESPACE.into());
    app.metadata.resource_version = Some("1".into());
    app.status = Some(AppStatus {
        last_status: "installation_finished".into(),
        installed_version: installed_version.into(),
        new_update_available: update_version.is_some(),
        new_update_version: update_version.unwrap_or_default().into(),
    });
    app
}

pub fn deleting(mut app: App) -> App {
    app.metadata.deletion_timestamp = Some(metav1::Time("2024-01-01T00:00:00Z".parse().unwrap()));
    app.metadata.finalizers = Some(vec!["kubemart.civo.com/finalizer".into()]);
    app
}

#[fixture]
pub fn installed_app() -> App {
    test_app(TEST_APP, "3.8.9", None)
}

#[fixture]
pub fn updatable_app() -> App {
    test_app(TEST_APP, "3.8.9", Some("3.9.0"))
}

pub fn app_list(apps: Vec<App>) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "kubemart.civo.com/v1alpha1",
        "kind": "AppList",
        "metadata": {"resourceVersion": "1"},
        "items": apps,
    })
}
