use std::fs;
use std::path::Path;
use std::process::Output;

use async_trait::async_trait;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use tokio::process::Command;
use tracing::*;

use super::*;
use crate::config::LocalConfig;

// The marketplace is a git repository; tests swap in a mock mirror
#[cfg_attr(any(test, feature = "mock"), automock)]
#[async_trait]
pub trait MarketplaceMirror: Send + Sync {
    async fn clone_to(&self, dir: &Path) -> EmptyResult;
    async fn pull(&self, dir: &Path) -> EmptyResult;
}

pub struct GitMirror {
    url: String,
    branch: String,
}

impl GitMirror {
    pub fn new(url: &str, branch: &str) -> GitMirror {
        GitMirror { url: url.into(), branch: branch.into() }
    }
}

impl Default for GitMirror {
    fn default() -> Self {
        GitMirror::new(MARKETPLACE_GIT_URL, MARKETPLACE_BRANCH)
    }
}

async fn run_git(args: &[&str]) -> anyhow::Result<Output> {
    debug!("running git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .output()
        .await
        .context("unable to run git - is it installed and on your PATH?")?;

    if !output.status.success() {
        bail!("git {} failed: {}", args[0], String::from_utf8_lossy(&output.stderr).trim());
    }
    Ok(output)
}

#[async_trait]
impl MarketplaceMirror for GitMirror {
    async fn clone_to(&self, dir: &Path) -> EmptyResult {
        let dir = dir.to_string_lossy();
        info!("cloning {} into {dir}", self.url);
        run_git(&["clone", "--branch", &self.branch, &self.url, &dir]).await?;
        Ok(())
    }

    async fn pull(&self, dir: &Path) -> EmptyResult {
        let dir = dir.to_string_lossy();
        info!("updating marketplace mirror in {dir}");
        run_git(&["-C", &dir, "pull", "origin", &self.branch]).await?;
        Ok(())
    }
}

// Used by `init`; an existing apps mirror is left alone.  Returns true if we cloned.
pub async fn ensure_marketplace(
    mirror: &dyn MarketplaceMirror,
    paths: &KubemartPaths,
    now_ts: i64,
) -> anyhow::Result<bool> {
    if paths.apps_dir.exists() {
        debug!("{} already exists, not cloning", paths.apps_dir.display());
        return Ok(false);
    }
    fs::create_dir_all(&paths.root_dir)?;

    if let Err(err) = mirror.clone_to(&paths.apps_dir).await {
        // a half-written clone would make the next `init` skip cloning
        if paths.apps_dir.exists()
            && let Err(rm_err) = fs::remove_dir_all(&paths.apps_dir)
        {
            warn!("unable to clean up {}: {rm_err}", paths.apps_dir.display());
        }
        return Err(err.context("unable to clone the marketplace"));
    }
    LocalConfig { apps_last_updated_at: now_ts }.save(&paths.config_file)?;
    Ok(true)
}

// Returns true if the mirror was pulled
pub async fn refresh_if_stale(
    mirror: &dyn MarketplaceMirror,
    paths: &KubemartPaths,
    now_ts: i64,
) -> anyhow::Result<bool> {
    let config = LocalConfig::load(&paths.config_file);
    if !config.is_stale(now_ts) {
        debug!("marketplace mirror is fresh (last updated at {})", config.apps_last_updated_at);
        return Ok(false);
    }

    mirror
        .pull(&paths.apps_dir)
        .await
        .context("unable to update the local app cache - try running `kubemart init`")?;
    LocalConfig { apps_last_updated_at: now_ts }.save(&paths.config_file)?;
    Ok(true)
}
