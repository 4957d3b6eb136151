use assertables::*;

use super::*;

const CONFIGMAP_DOC: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: kubemart-config
  namespace: kubemart-system
  annotations:
    owner: someone
data:
  email: someone@example.com
"#;

const OPERATOR_DOCS: &str = r#"# kubemart operator bundle
---
apiVersion: v1
kind: Namespace
metadata:
  name: kubemart-system
---
# nothing to see here

---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: kubemart-operator-controller-manager
spec:
  replicas: 1
"#;

fn handle_discovery(fake_apiserver: &mut MockServerBuilder) {
    fake_apiserver
        .handle(|when, then| {
            when.method(GET).path("/api/v1");
            then.json_body(core_v1_discovery());
        })
        .handle(|when, then| {
            when.method(GET).path("/version");
            then.json_body(server_version("1", "21+"));
        });
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_apply_twice_patches_twice() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    handle_discovery(&mut fake_apiserver);
    fake_apiserver
        .handle_multiple(
            |when, then| {
                when.method(PATCH)
                    .path(CONFIGMAP_PATH)
                    .query_param("fieldManager", "kubectl")
                    .query_param("force", "true");
                then.json_body(json!({
                    "apiVersion": "v1",
                    "kind": "ConfigMap",
                    "metadata": {"name": "kubemart-config", "namespace": "kubemart-system"},
                }));
            },
            2,
        )
        .build();

    let mut executor = ManifestExecutor::new(client);
    executor.execute(CONFIGMAP_DOC, ManifestOp::Apply, FIELD_MANAGER).await.unwrap();
    executor.execute(CONFIGMAP_DOC, ManifestOp::Apply, FIELD_MANAGER).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[case::new_server("21+", true)]
#[case::old_server("18", false)]
#[traced_test]
#[tokio::test]
async fn test_apply_last_applied_annotation(#[case] minor: &'static str, #[case] annotated: bool) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let mut annotations = json!({"owner": "someone"});
    if annotated {
        annotations[LAST_APPLIED_CONFIG_ANNOTATION_KEY] = json!(CONFIGMAP_DOC);
    }

    fake_apiserver
        .handle(|when, then| {
            when.method(GET).path("/api/v1");
            then.json_body(core_v1_discovery());
        })
        .handle(move |when, then| {
            when.method(GET).path("/version");
            then.json_body(server_version("1", minor));
        })
        .handle(move |when, then| {
            when.method(PATCH).path(CONFIGMAP_PATH).json_body(json!({
                "apiVersion": "v1",
                "kind": "ConfigMap",
                "metadata": {
                    "name": "kubemart-config",
                    "namespace": "kubemart-system",
                    "annotations": annotations.clone(),
                },
                "data": {"email": "someone@example.com"},
            }));
            then.json_body(json!({
                "apiVersion": "v1",
                "kind": "ConfigMap",
                "metadata": {"name": "kubemart-config", "namespace": "kubemart-system"},
            }));
        })
        .build();

    let mut executor = ManifestExecutor::new(client);
    executor.execute(CONFIGMAP_DOC, ManifestOp::Apply, FIELD_MANAGER).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_apply_multi_document() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    handle_discovery(&mut fake_apiserver);
    fake_apiserver
        .handle(|when, then| {
            when.method(GET).path("/apis/apps/v1");
            then.json_body(apps_v1_discovery());
        })
        .handle(|when, then| {
            when.method(PATCH).path(format!("{NAMESPACES_PATH}/kubemart-system"));
            then.json_body(json!({"apiVersion": "v1", "kind": "Namespace", "metadata": {"name": "kubemart-system"}}));
        })
        .handle(|when, then| {
            // no namespace in the document, so the client default is used
            when.method(PATCH)
                .path("/apis/apps/v1/namespaces/default/deployments/kubemart-operator-controller-manager");
            then.json_body(json!({
                "apiVersion": "apps/v1",
                "kind": "Deployment",
                "metadata": {"name": "kubemart-operator-controller-manager", "namespace": "default"},
            }));
        })
        .build();

    let mut executor = ManifestExecutor::new(client);
    executor.execute_all(OPERATOR_DOCS, ManifestOp::Apply, FIELD_MANAGER).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_apply_stops_at_first_failure() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    handle_discovery(&mut fake_apiserver);
    fake_apiserver
        .handle(|when, then| {
            when.method(PATCH).path(format!("{NAMESPACES_PATH}/kubemart-system"));
            then.status(403).json_body(json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Failure",
                "reason": "Forbidden",
                "code": 403
            }));
        })
        .build();

    let mut executor = ManifestExecutor::new(client);
    let err = executor.execute_all(OPERATOR_DOCS, ManifestOp::Apply, FIELD_MANAGER).await.unwrap_err();
    assert_contains!(format!("{err:#}"), "unable to apply v1.Namespace kubemart-system");

    // the deployment is never reached, so apps/v1 discovery never happens
    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_delete_missing_is_ok() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver
        .handle(|when, then| {
            when.method(GET).path("/api/v1");
            then.json_body(core_v1_discovery());
        })
        .handle(|when, then| {
            when.method(DELETE).path(CONFIGMAP_PATH);
            then.status(404).json_body(status_not_found());
        })
        .build();

    let mut executor = ManifestExecutor::new(client);
    executor.execute(CONFIGMAP_DOC, ManifestOp::Delete, FIELD_MANAGER).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[case::no_type_meta("metadata:\n  name: foo\n")]
#[case::no_name("apiVersion: v1\nkind: ConfigMap\nmetadata: {}\n")]
fn test_decode_manifest_invalid(#[case] doc: &str) {
    assert!(decode_manifest(doc).unwrap_err().downcast::<KubernetesError>().is_ok());
}

#[rstest]
fn test_add_last_applied_annotation() {
    let mut obj = decode_manifest(CONFIGMAP_DOC).unwrap();
    add_last_applied_annotation(&mut obj, CONFIGMAP_DOC);

    let annotations = obj.annotations();
    assert_eq!(annotations.get("owner").unwrap(), "someone");
    assert_eq!(annotations.get(LAST_APPLIED_CONFIG_ANNOTATION_KEY).unwrap(), CONFIGMAP_DOC);
}

#[rstest]
fn test_add_last_applied_annotation_keeps_existing() {
    let doc = format!(
        "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: foo\n  annotations:\n    {LAST_APPLIED_CONFIG_ANNOTATION_KEY}: custom\n"
    );
    let mut obj = decode_manifest(&doc).unwrap();
    add_last_applied_annotation(&mut obj, &doc);
    assert_eq!(obj.annotations().get(LAST_APPLIED_CONFIG_ANNOTATION_KEY).unwrap(), "custom");
}

#[rstest]
fn test_split_manifests() {
    let docs = split_manifests(OPERATOR_DOCS);
    assert_len_eq_x!(&docs, 2);
    assert_starts_with!(docs[0], "apiVersion: v1\nkind: Namespace");
    assert_starts_with!(docs[1], "apiVersion: apps/v1\nkind: Deployment");
}

#[rstest]
#[case::empty("")]
#[case::separators_only("---\n---\n")]
#[case::comments_only("# hello\n---\n  # world\n")]
fn test_split_manifests_nothing(#[case] text: &str) {
    assert_is_empty!(split_manifests(text));
}

#[rstest]
fn test_background_delete_params() {
    let params = background_delete_params();
    assert_eq!(params.grace_period_seconds, Some(0));
    assert!(matches!(params.propagation_policy, Some(kube::api::PropagationPolicy::Background)));
}
