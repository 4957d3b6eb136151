use super::*;

#[rstest]
#[case::plain("1", "21", 121)]
#[case::plus_suffix("1", "21+", 121)]
#[case::provider_suffix("1", "16-eks", 116)]
#[case::single_digit_minor("1", "9", 109)]
fn test_combined_server_version(#[case] major: &str, #[case] minor: &str, #[case] expected: u32) {
    assert_eq!(combined_server_version(major, minor).unwrap(), expected);
}

#[rstest]
fn test_combined_server_version_malformed() {
    let err = combined_server_version("1", "+").unwrap_err().downcast::<KubernetesError>().unwrap();
    assert!(matches!(err, KubernetesError::MalformedVersion(_)));
}

#[rstest]
#[case::https("https://10.20.30.40:6443/", Some("10.20.30.40"))]
#[case::no_port("http://192.168.1.2", Some("192.168.1.2"))]
#[case::hostname("https://my-cluster.example.com:6443", None)]
fn test_extract_ip_address(#[case] url: &str, #[case] expected: Option<&str>) {
    match expected {
        Some(ip) => assert_eq!(extract_ip_address(url).unwrap(), ip),
        None => assert!(extract_ip_address(url).is_err()),
    }
}

#[rstest]
#[case::tagged("ghcr.io/kubemart/kubemart-operator:v1.2.3", Some("v1.2.3"))]
#[case::registry_port("localhost:5000/kubemart-operator", None)]
#[case::registry_port_and_tag("localhost:5000/kubemart-operator:v0.1.0", Some("v0.1.0"))]
#[case::untagged("kubemart-operator", None)]
fn test_image_tag(#[case] image: &str, #[case] expected: Option<&str>) {
    assert_eq!(image_tag(image), expected);
}

#[rstest]
fn test_namespaced_name() {
    let app = test_app(TEST_APP, "1.0.0", None);
    assert_eq!(app.namespaced_name(), "kubemart-system/rabbitmq");

    let ns = corev1::Namespace {
        metadata: metav1::ObjectMeta { name: Some("foo".into()), ..Default::default() },
        ..Default::default()
    };
    assert_eq!(ns.namespaced_name(), "foo");
}
