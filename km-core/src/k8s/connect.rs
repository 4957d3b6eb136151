use std::path::Path;

use kube::config::{
    KubeConfigOptions,
    Kubeconfig,
};
use tracing::*;

use super::*;

pub fn load_kubeconfig(path: Option<&Path>) -> anyhow::Result<Kubeconfig> {
    match path {
        Some(p) => Kubeconfig::read_from(p).with_context(|| format!("unable to read kubeconfig {}", p.display())),
        None => Ok(Kubeconfig::read()?),
    }
}

pub async fn client_config(path: Option<&Path>) -> anyhow::Result<kube::Config> {
    match path {
        Some(_) => {
            let kubeconfig = load_kubeconfig(path)?;
            Ok(kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?)
        },
        None => Ok(kube::Config::infer().await?),
    }
}

pub async fn new_client(path: Option<&Path>) -> anyhow::Result<kube::Client> {
    let config = client_config(path).await?;
    debug!("connecting to {}", config.cluster_url);
    Ok(kube::Client::try_from(config)?)
}

pub fn cluster_name(kubeconfig: &Kubeconfig) -> anyhow::Result<String> {
    let Some(current) = kubeconfig.current_context.as_deref() else {
        bail!(KubernetesError::no_current_context("current-context is not set"));
    };

    kubeconfig
        .contexts
        .iter()
        .find(|c| c.name == current)
        .and_then(|c| c.context.as_ref())
        .map(|c| c.cluster.clone())
        .ok_or_else(|| KubernetesError::no_current_context(current))
}

pub async fn master_ip(path: Option<&Path>) -> anyhow::Result<String> {
    let config = client_config(path).await?;
    extract_ip_address(&config.cluster_url.to_string())
}
