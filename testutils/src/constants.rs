pub const TEST_NAMESPACE: &str = "kubemart-system";
pub const TEST_APP: &str = "rabbitmq";
pub const TEST_PLAN_APP: &str = "mariadb";
pub const TEST_DEP_APP: &str = "wordpress";
pub const TEST_EMAIL: &str = "someone@example.com";
pub const TEST_CLUSTER_NAME: &str = "test-cluster";
pub const TEST_MASTER_IP: &str = "10.20.30.40";
pub const TEST_OPERATOR_TAG: &str = "v1.2.3";

pub const APPS_PATH: &str = "/apis/kubemart.civo.com/v1alpha1/namespaces/kubemart-system/apps";
pub const CRD_PATH: &str = "/apis/apiextensions.k8s.io/v1/customresourcedefinitions";
pub const OPERATOR_DEPLOYMENT_PATH: &str =
    "/apis/apps/v1/namespaces/kubemart-system/deployments/kubemart-operator-controller-manager";
pub const CONFIGMAP_PATH: &str = "/api/v1/namespaces/kubemart-system/configmaps/kubemart-config";
pub const NAMESPACES_PATH: &str = "/api/v1/namespaces";
