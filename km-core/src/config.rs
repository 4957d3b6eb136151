use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::*;

use crate::errors::*;
use crate::prelude::*;

// Where kubemart keeps its local state; normally ~/.kubemart
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KubemartPaths {
    pub root_dir: PathBuf,
    pub apps_dir: PathBuf,
    pub config_file: PathBuf,
}

impl KubemartPaths {
    pub fn new(root_dir: impl Into<PathBuf>) -> KubemartPaths {
        let root_dir = root_dir.into();
        KubemartPaths {
            apps_dir: root_dir.join(APPS_DIR_NAME),
            config_file: root_dir.join(CONFIG_FILE_NAME),
            root_dir,
        }
    }

    pub fn from_home() -> anyhow::Result<KubemartPaths> {
        let home = dirs::home_dir().ok_or(anyhow!("could not determine home directory"))?;
        Ok(KubemartPaths::new(home.join(KUBEMART_DIR_NAME)))
    }

    pub fn app_dir(&self, app_name: &str) -> PathBuf {
        self.apps_dir.join(app_name)
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LocalConfig {
    #[serde(default)]
    pub apps_last_updated_at: i64,
}

impl LocalConfig {
    // A missing or corrupt config file just means we've never refreshed
    pub fn load(path: &Path) -> LocalConfig {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(err) => {
                debug!("could not read {}: {err}", path.display());
                return LocalConfig::default();
            },
        };

        serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!("ignoring unparseable {}: {err}", path.display());
            LocalConfig::default()
        })
    }

    pub fn save(&self, path: &Path) -> EmptyResult {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(self)?).with_context(|| format!("unable to write {}", path.display()))?;
        Ok(())
    }

    pub fn is_stale(&self, now_ts: i64) -> bool {
        now_ts - self.apps_last_updated_at > CACHE_STALE_AFTER_SECONDS
    }
}
