use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Deserializer,
};

use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AppManifest {
    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub plans: Vec<Plan>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Plan {
    pub label: String,

    // order matters: only the first key's value is used
    #[serde(default)]
    pub configuration: IndexMap<String, PlanValue>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct PlanValue {
    #[serde(deserialize_with = "scalar_to_string")]
    pub value: String,
}

impl AppManifest {
    pub fn load(path: &Path) -> anyhow::Result<AppManifest> {
        let contents = fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?;
        AppManifest::from_yaml(&contents).with_context(|| format!("unable to parse {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<AppManifest> {
        // an empty manifest file is valid and has no namespace, deps, or plans
        if contents.trim().is_empty() {
            return Ok(AppManifest::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn plan_labels(&self) -> Vec<String> {
        self.plans.iter().map(|p| p.label.clone()).collect()
    }

    pub fn find_plan(&self, label: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.label == label)
    }
}

impl Plan {
    pub fn canonical_value(&self) -> Option<&str> {
        self.configuration.values().next().map(|v| v.value.as_str())
    }
}

// Marketplace authors write `value: 1` as often as `value: "1"`
fn scalar_to_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("expected a scalar plan value, got {other:?}"))),
    }
}

// "MariaDB:10GB" -> "mariadb"
pub fn sanitize_dependency_name(dep: &str) -> anyhow::Result<String> {
    let name: String = dep
        .trim()
        .to_lowercase()
        .chars()
        .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    if name.is_empty() {
        bail!(CatalogError::invalid_dependency(dep));
    }
    Ok(name)
}
