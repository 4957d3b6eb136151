use super::*;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlanChoice {
    // the app has no plans, so any requested plan is ignored
    NotApplicable,
    Defaulted(String),
    Requested(String),
}

impl PlanChoice {
    pub fn label(&self) -> Option<&str> {
        match self {
            PlanChoice::NotApplicable => None,
            PlanChoice::Defaulted(l) | PlanChoice::Requested(l) => Some(l),
        }
    }
}

// Plans are listed smallest-first in the marketplace, so "smallest" is just the first one
pub fn smallest_plan(labels: &[String]) -> Option<&str> {
    labels.first().map(String::as_str)
}

pub fn choose_plan(labels: &[String], requested: Option<&str>) -> PlanChoice {
    match (smallest_plan(labels), requested) {
        (None, _) => PlanChoice::NotApplicable,
        (Some(_), Some(label)) => PlanChoice::Requested(label.into()),
        (Some(smallest), None) => PlanChoice::Defaulted(smallest.into()),
    }
}

impl Catalog {
    pub fn plan_labels(&self, app_name: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.manifest(app_name)?.plan_labels())
    }

    pub fn resolve_plan_value(&self, app_name: &str, label: &str) -> anyhow::Result<String> {
        let manifest = self.manifest(app_name)?;
        let Some(plan) = manifest.find_plan(label) else {
            bail!(CatalogError::plan_not_supported(&UnsupportedPlan {
                app: app_name.into(),
                label: label.into(),
                supported: manifest.plan_labels(),
            }));
        };

        match plan.canonical_value() {
            Some(v) => Ok(v.into()),
            None => bail!(CatalogError::empty_plan(label)),
        }
    }
}
