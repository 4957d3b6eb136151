use const_format::formatcp;

// Well-known annotations
pub const LAST_APPLIED_CONFIG_ANNOTATION_KEY: &str = "kubectl.kubernetes.io/last-applied-configuration";

// Cluster objects owned by kubemart
pub const KUBEMART_NAMESPACE: &str = "kubemart-system";
pub const KUBEMART_CONFIGMAP_NAME: &str = "kubemart-config";
pub const APP_CRD_NAME: &str = "apps.kubemart.civo.com";
pub const JOBWATCHER_CRD_NAME: &str = "jobwatchers.kubemart.civo.com";
pub const OPERATOR_DEPLOYMENT_NAME: &str = "kubemart-operator-controller-manager";
pub const OPERATOR_CONTAINER_NAME: &str = "manager";

// ConfigMap keys read by the operator
pub const CONFIGMAP_EMAIL_KEY: &str = "email";
pub const CONFIGMAP_DOMAIN_KEY: &str = "domain";
pub const CONFIGMAP_CLUSTER_NAME_KEY: &str = "cluster_name";
pub const CONFIGMAP_MASTER_IP_KEY: &str = "master_ip";

// Server-side apply
pub const FIELD_MANAGER: &str = "kubectl";
pub const LAST_APPLIED_MIN_SERVER_VERSION: u32 = 119;

// Local cache
pub const KUBEMART_DIR_NAME: &str = ".kubemart";
pub const APPS_DIR_NAME: &str = "apps";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const APP_MANIFEST_FILE_NAME: &str = "manifest.yaml";
pub const POST_INSTALL_FILE_NAME: &str = "post_install.md";
pub const CACHE_STALE_AFTER_SECONDS: i64 = 30 * 60;

// Marketplace and releases
pub const GITHUB_ORG: &str = "kubemart";
pub const CLI_REPO: &str = "kubemart-cli";
pub const OPERATOR_REPO: &str = "kubemart-operator";
pub const OPERATOR_MANIFEST_FILE_NAME: &str = "kubemart-operator.yaml";
pub const MARKETPLACE_BRANCH: &str = "master";
pub const MARKETPLACE_GIT_URL: &str = formatcp!("https://github.com/{GITHUB_ORG}/kubernetes-marketplace.git");
pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_URL: &str = "https://github.com";

// Defaults
pub const DEFAULT_DOMAIN_SUFFIX: &str = "xip.io";

// Timing
pub const DELETE_POLL_INTERVAL_SECONDS: u64 = 5;
pub const UNINSTALL_MAX_POLLS: u32 = 60;
pub const DESTROY_MAX_POLLS: u32 = 120;
pub const CONFLICT_RETRY_INITIAL_MILLIS: u64 = 100;
pub const CONFLICT_RETRY_MAX_INTERVAL_MILLIS: u64 = 2000;
pub const CONFLICT_RETRY_MAX_ELAPSED_SECONDS: u64 = 30;

