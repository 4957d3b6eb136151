use assert_fs::TempDir;
use km_core::catalog::{
    Catalog,
    CatalogError,
};
use km_core::config::KubemartPaths;
use km_core::k8s::AppError;

use super::install::*;
use super::*;

#[fixture]
fn catalog(kubemart_root: TempDir) -> (TempDir, Catalog) {
    let catalog = Catalog::new(&KubemartPaths::new(kubemart_root.path()));
    (kubemart_root, catalog)
}

fn target(app: &str, plan: Option<&str>) -> InstallTarget {
    InstallTarget { app: app.into(), plan: plan.map(String::from) }
}

#[rstest]
#[case::single("rabbitmq", None, vec![target("rabbitmq", None)])]
#[case::with_plan("mariadb:10GB", None, vec![target("mariadb", Some("10GB"))])]
#[case::plan_flag("mariadb", Some("10GB"), vec![target("mariadb", Some("10GB"))])]
#[case::multiple(" mariadb:5GB , rabbitmq,", None, vec![target("mariadb", Some("5GB")), target("rabbitmq", None)])]
fn test_parse_targets(#[case] apps: &str, #[case] plan: Option<&str>, #[case] expected: Vec<InstallTarget>) {
    assert_eq!(parse_targets(apps, plan).unwrap(), expected);
}

#[rstest]
#[case::empty("", None)]
#[case::empty_plan("mariadb:", None)]
#[case::empty_app(":10GB", None)]
#[case::double_colon("mariadb:10GB:extra", None)]
#[case::flag_with_multiple("mariadb,rabbitmq", Some("10GB"))]
#[case::plan_twice("mariadb:5GB", Some("10GB"))]
fn test_parse_targets_invalid(#[case] apps: &str, #[case] plan: Option<&str>) {
    assert!(parse_targets(apps, plan).unwrap_err().downcast::<InstallError>().is_ok());
}

#[rstest]
#[case::requested(target("mariadb", Some("10GB")), Some("10Gi"))]
#[case::defaulted(target("mariadb", None), Some("5Gi"))]
#[case::no_plans(target("rabbitmq", Some("10GB")), None)]
fn test_resolve_target_plan(catalog: (TempDir, Catalog), #[case] t: InstallTarget, #[case] expected: Option<&str>) {
    let (_root, catalog) = catalog;
    let resolved = resolve_target(&catalog, &t).unwrap();
    assert_eq!(resolved.plan_value.as_deref(), expected);
}

#[rstest]
fn test_resolve_target_dependencies(catalog: (TempDir, Catalog)) {
    let (_root, catalog) = catalog;
    let resolved = resolve_target(&catalog, &target(TEST_DEP_APP, None)).unwrap();
    assert_eq!(
        resolved,
        ResolvedInstall {
            app: TEST_DEP_APP.into(),
            plan_value: Some("1".into()),
            dependencies: vec!["mariadb".into()],
        }
    );
}

#[rstest]
fn test_resolve_target_unknown_app(catalog: (TempDir, Catalog)) {
    let (_root, catalog) = catalog;
    let err = resolve_target(&catalog, &target("redis", None)).unwrap_err();
    assert!(matches!(err.downcast::<CatalogError>().unwrap(), CatalogError::AppNotFound(_)));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_install_unsupported_plan_never_reaches_cluster(catalog: (TempDir, Catalog)) {
    let (_root, catalog) = catalog;
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.build();

    let args = Args { apps: "rabbitmq,mariadb:1TB".into(), plan: None, quiet: true };
    let err = install::cmd(&args, &catalog, client).await.unwrap_err();
    assert!(matches!(err.downcast::<CatalogError>().unwrap(), CatalogError::PlanNotSupported(_)));

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_install_with_plan_stores_value(catalog: (TempDir, Catalog)) {
    let (_root, catalog) = catalog;
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let mut created = test_app(TEST_PLAN_APP, "", None);
    created.spec.plan = Some("10Gi".into());

    handle_app_crd(&mut fake_apiserver);
    fake_apiserver
        .handle_not_found(format!("{APPS_PATH}/{TEST_PLAN_APP}"))
        .handle(move |when, then| {
            when.method(POST).path(APPS_PATH).json_body(json!({
                "apiVersion": "kubemart.civo.com/v1alpha1",
                "kind": "App",
                "metadata": {"name": "mariadb", "namespace": "kubemart-system"},
                "spec": {"name": "mariadb", "action": "install", "plan": "10Gi"},
            }));
            then.json_body_obj(&created);
        })
        .build();

    let args = Args { apps: "mariadb:10GB".into(), plan: None, quiet: true };
    install::cmd(&args, &catalog, client).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_install_dependency_being_deleted(catalog: (TempDir, Catalog)) {
    let (_root, catalog) = catalog;
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let terminating = deleting(test_app(TEST_PLAN_APP, "10.5", None));

    handle_app_crd(&mut fake_apiserver);
    fake_apiserver
        .handle(move |when, then| {
            when.method(GET).path(format!("{APPS_PATH}/{TEST_PLAN_APP}"));
            then.json_body_obj(&terminating);
        })
        .build();

    let args = Args { apps: TEST_DEP_APP.into(), plan: None, quiet: false };
    let err = install::cmd(&args, &catalog, client).await.unwrap_err();
    assert!(matches!(err.downcast::<AppError>().unwrap(), AppError::DependencyBeingDeleted(_)));

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_install_without_crd(catalog: (TempDir, Catalog)) {
    let (_root, catalog) = catalog;
    let (mut fake_apiserver, client) = make_fake_apiserver();
    fake_apiserver.handle_not_found(format!("{CRD_PATH}/{APP_CRD_NAME}")).build();

    let args = Args { apps: TEST_APP.into(), plan: None, quiet: true };
    let err = install::cmd(&args, &catalog, client).await.unwrap_err();
    assert_contains!(format!("{err}"), "kubemart init");

    fake_apiserver.assert();
}
