use km_core::k8s::AppError;

use super::uninstall::*;
use super::*;

#[rstest]
fn test_parse_app_names() {
    assert_eq!(parse_app_names("rabbitmq, mariadb,,"), vec!["rabbitmq", "mariadb"]);
    assert_is_empty!(parse_app_names(" , "));
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_uninstall(installed_app: App) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    handle_app_crd(&mut fake_apiserver);
    fake_apiserver
        .handle(move |when, then| {
            when.method(GET).path(format!("{APPS_PATH}/{TEST_APP}"));
            then.json_body_obj(&installed_app);
        })
        .handle(|when, then| {
            when.method(DELETE).path(format!("{APPS_PATH}/{TEST_APP}"));
            then.json_body(status_ok());
        })
        .build();

    let args = Args { apps: TEST_APP.into(), wait: false };
    uninstall::cmd(&args, client).await.unwrap();

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_uninstall_not_installed() {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    handle_app_crd(&mut fake_apiserver);
    fake_apiserver.handle_not_found(format!("{APPS_PATH}/{TEST_APP}")).build();

    let args = Args { apps: TEST_APP.into(), wait: true };
    let err = uninstall::cmd(&args, client).await.unwrap_err();
    assert!(matches!(err.downcast::<AppError>().unwrap(), AppError::NotInstalled(_)));

    fake_apiserver.assert();
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_uninstall_already_deleting(installed_app: App) {
    let (mut fake_apiserver, client) = make_fake_apiserver();
    let terminating = deleting(installed_app);
    handle_app_crd(&mut fake_apiserver);
    fake_apiserver
        .handle(move |when, then| {
            when.method(GET).path(format!("{APPS_PATH}/{TEST_APP}"));
            then.json_body_obj(&terminating);
        })
        .build();

    let args = Args { apps: TEST_APP.into(), wait: false };
    let err = uninstall::cmd(&args, client).await.unwrap_err();
    assert!(matches!(err.downcast::<AppError>().unwrap(), AppError::BeingDeleted(_)));

    fake_apiserver.assert();
}
