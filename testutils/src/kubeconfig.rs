use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use crate::constants::*;

pub const TEST_CONTEXT: &str = "test-context";

pub fn kubeconfig_yaml(server: &str, current_context: &str) -> String {
    format!(
        r#"apiVersion: v1
kind: Config
clusters:
- name: {TEST_CLUSTER_NAME}
  cluster:
    server: {server}
    insecure-skip-tls-verify: true
contexts:
- name: {TEST_CONTEXT}
  context:
    cluster: {TEST_CLUSTER_NAME}
    user: test-user
current-context: {current_context}
users:
- name: test-user
  user:
    token: not-a-real-token
"#
    )
}

pub fn write_kubeconfig(dir: &Path, server: &str) -> PathBuf {
    let path = dir.join("kubeconfig");
    fs::write(&path, kubeconfig_yaml(server, TEST_CONTEXT)).unwrap();
    path
}
