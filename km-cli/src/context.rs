use std::path::PathBuf;

use km_core::catalog::{
    Catalog,
    MarketplaceMirror,
    refresh_if_stale,
};
use km_core::config::KubemartPaths;
use km_core::k8s;
use km_core::prelude::*;
use tracing::*;

// Everything the global flags control gets threaded through here instead of being stashed in
// environment variables
pub struct CliContext {
    pub kubeconfig: Option<PathBuf>,
    pub paths: KubemartPaths,
}

impl CliContext {
    pub fn new(kubeconfig: Option<PathBuf>) -> anyhow::Result<CliContext> {
        Ok(CliContext { kubeconfig, paths: KubemartPaths::from_home()? })
    }

    pub async fn client(&self) -> anyhow::Result<kube::Client> {
        k8s::new_client(self.kubeconfig.as_deref()).await
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(&self.paths)
    }

    pub async fn refresh_cache(&self, mirror: &dyn MarketplaceMirror, now_ts: i64) -> EmptyResult {
        if refresh_if_stale(mirror, &self.paths, now_ts).await? {
            info!("local app cache updated");
        }
        Ok(())
    }
}
