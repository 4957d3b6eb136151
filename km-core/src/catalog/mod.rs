mod manifest;
mod mirror;
mod plans;

use std::fmt;
use std::fs;
use std::path::PathBuf;

pub use manifest::*;
pub use mirror::*;
pub use plans::*;

use crate::config::KubemartPaths;
use crate::errors::*;
use crate::prelude::*;

#[derive(Clone, Debug)]
pub struct UnsupportedPlan {
    pub app: String,
    pub label: String,
    pub supported: Vec<String>,
}

impl fmt::Display for UnsupportedPlan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} plan is not supported for {} app - supported values are: {}",
            self.label,
            self.app,
            self.supported.join(", ")
        )
    }
}

err_impl! {CatalogError,
    #[error("unable to find {0} app in the marketplace")]
    AppNotFound(String),

    #[error("{0}")]
    PlanNotSupported(UnsupportedPlan),

    #[error("plan {0} has no configuration values")]
    EmptyPlan(String),

    #[error("invalid dependency name: {0}")]
    InvalidDependency(String),
}

// Hidden entries (.git, ., ..) and the marketplace's helper scripts aren't apps
fn is_app_dir_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\']) && name != "bin"
}

// Read-only view of the marketplace mirror in ~/.kubemart/apps; every app is a directory
// holding a manifest.yaml and (optionally) a post_install.md
#[derive(Clone, Debug)]
pub struct Catalog {
    apps_dir: PathBuf,
}

impl Catalog {
    pub fn new(paths: &KubemartPaths) -> Catalog {
        Catalog { apps_dir: paths.apps_dir.clone() }
    }

    pub fn app_exists(&self, name: &str) -> bool {
        is_app_dir_name(name) && self.apps_dir.join(name).is_dir()
    }

    pub fn list_apps(&self) -> anyhow::Result<Vec<String>> {
        let entries = fs::read_dir(&self.apps_dir)
            .with_context(|| format!("unable to read {} - try running `kubemart init`", self.apps_dir.display()))?;

        let mut apps = vec![];
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_app_dir_name(&name) {
                continue;
            }
            apps.push(name);
        }
        apps.sort();
        Ok(apps)
    }

    pub fn manifest(&self, name: &str) -> anyhow::Result<AppManifest> {
        if !self.app_exists(name) {
            bail!(CatalogError::app_not_found(name));
        }
        AppManifest::load(&self.apps_dir.join(name).join(APP_MANIFEST_FILE_NAME))
    }

    pub fn namespace(&self, name: &str) -> anyhow::Result<String> {
        Ok(self.manifest(name)?.namespace)
    }

    pub fn dependencies(&self, name: &str) -> anyhow::Result<Vec<String>> {
        self.manifest(name)?.dependencies.iter().map(|d| sanitize_dependency_name(d)).collect()
    }

    pub fn post_install_notes(&self, name: &str) -> anyhow::Result<String> {
        if !self.app_exists(name) {
            bail!(CatalogError::app_not_found(name));
        }
        let path = self.apps_dir.join(name).join(POST_INSTALL_FILE_NAME);
        fs::read_to_string(&path).with_context(|| format!("unable to read {}", path.display()))
    }
}

#[cfg(test)]
mod tests;
