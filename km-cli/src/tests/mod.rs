mod install_test;
mod uninstall_test;

use assertables::*;
use httpmock::Method::*;
use km_testutils::*;
use rstest::*;
use serde_json::json;
use tracing_test::traced_test;

use super::*;

const OPERATOR_TAG: &str = "v0.1.0";
const OPERATOR_MANIFESTS: &str = "apiVersion: v1
kind: Namespace
metadata:
  name: kubemart-system
";

fn handle_app_crd(fake_apiserver: &mut MockServerBuilder) {
    fake_apiserver.handle(|when, then| {
        when.method(GET).path(format!("{CRD_PATH}/{APP_CRD_NAME}"));
        then.json_body(json!({
            "apiVersion": "apiextensions.k8s.io/v1",
            "kind": "CustomResourceDefinition",
            "metadata": {"name": APP_CRD_NAME},
            "spec": {
                "group": "kubemart.civo.com",
                "names": {"kind": "App", "plural": "apps"},
                "scope": "Namespaced",
                "versions": [],
            },
        }));
    });
}

fn fake_github() -> (MockServerBuilder, ReleaseClient) {
    let mut github = MockServerBuilder::new();
    github
        .handle(|when, then| {
            when.method(GET).path("/repos/kubemart/kubemart-operator/releases/latest");
            then.json_body(json!({"tag_name": OPERATOR_TAG}));
        })
        .handle(|when, then| {
            when.method(GET).path(format!(
                "/kubemart/kubemart-operator/releases/download/{OPERATOR_TAG}/kubemart-operator.yaml"
            ));
            then.body(OPERATOR_MANIFESTS);
        })
        .build();
    let releases = ReleaseClient::with_base_urls(&github.base_url(), &github.base_url()).unwrap();
    (github, releases)
}
