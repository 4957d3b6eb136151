use kube::api::{
    DeleteParams,
    DynamicObject,
    Patch,
    PatchParams,
    PropagationPolicy,
};
use tracing::*;

use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ManifestOp {
    Apply,
    Delete,
}

// Applies or deletes arbitrary (possibly multi-document) YAML manifests the same way
// `kubectl apply --server-side --force-conflicts` would.  The server version is looked up once per
// executor, since it decides whether we need to write the last-applied annotation ourselves.
pub struct ManifestExecutor {
    apiset: DynamicApiSet,
    server_version: Option<u32>,
}

impl ManifestExecutor {
    pub fn new(client: kube::Client) -> ManifestExecutor {
        ManifestExecutor { apiset: DynamicApiSet::new(client), server_version: None }
    }

    pub async fn execute(&mut self, doc: &str, op: ManifestOp, field_owner: &str) -> EmptyResult {
        let mut obj = decode_manifest(doc)?;
        let gvk = GVK::from_dynamic_obj(&obj)?;
        let name = obj.name_any();
        let display_name = obj.namespaced_name();

        match op {
            ManifestOp::Apply => {
                if self.server_version().await? >= LAST_APPLIED_MIN_SERVER_VERSION {
                    add_last_applied_annotation(&mut obj, doc);
                }

                info!("applying {gvk} {display_name}");
                let api = self.apiset.api_for_obj(&obj).await?;
                api.patch(&name, &PatchParams::apply(field_owner).force(), &Patch::Apply(&obj))
                    .await
                    .with_context(|| format!("unable to apply {gvk} {display_name}"))?;
            },
            ManifestOp::Delete => {
                info!("deleting {gvk} {display_name}");
                let api = self.apiset.api_for_obj(&obj).await?;
                match api.delete(&name, &background_delete_params()).await {
                    Ok(_) => (),
                    Err(kube::Error::Api(kube::core::ErrorResponse { code: 404, .. })) => {
                        debug!("{gvk} {display_name} already gone");
                    },
                    Err(e) => return Err(e).with_context(|| format!("unable to delete {gvk} {display_name}")),
                }
            },
        }

        Ok(())
    }

    pub async fn execute_all(&mut self, manifests: &str, op: ManifestOp, field_owner: &str) -> EmptyResult {
        for doc in split_manifests(manifests) {
            self.execute(&doc, op, field_owner).await?;
        }
        Ok(())
    }

    async fn server_version(&mut self) -> anyhow::Result<u32> {
        if let Some(v) = self.server_version {
            return Ok(v);
        }

        let v = server_version_combined(self.apiset.client()).await?;
        debug!("cluster server version is {v}");
        self.server_version = Some(v);
        Ok(v)
    }
}

pub fn background_delete_params() -> DeleteParams {
    DeleteParams {
        grace_period_seconds: Some(0),
        propagation_policy: Some(PropagationPolicy::Background),
        ..Default::default()
    }
}

pub fn decode_manifest(doc: &str) -> anyhow::Result<DynamicObject> {
    let value: serde_json::Value = serde_yaml::from_str(doc).context("unable to parse manifest YAML")?;
    let obj: DynamicObject = serde_json::from_value(value).context("unable to decode manifest")?;
    if obj.types.is_none() {
        bail!(KubernetesError::missing_type_meta(&obj.name_any()));
    }
    if obj.metadata.name.as_deref().unwrap_or_default().is_empty() {
        bail!(KubernetesError::missing_name(&GVK::from_dynamic_obj(&obj)?.to_string()));
    }
    Ok(obj)
}

// Documents that don't already carry a last-applied annotation get the raw document text, which
// is what `kubectl apply` would have stored.
pub fn add_last_applied_annotation(obj: &mut DynamicObject, raw: &str) {
    obj.annotations_mut()
        .entry(LAST_APPLIED_CONFIG_ANNOTATION_KEY.into())
        .or_insert_with(|| raw.into());
}

pub fn split_manifests(text: &str) -> Vec<String> {
    let mut docs = vec![];
    let mut current = String::new();
    for line in text.lines() {
        if is_document_separator(line) {
            push_document(&mut docs, &mut current);
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    push_document(&mut docs, &mut current);
    docs
}

fn is_document_separator(line: &str) -> bool {
    line.trim_end() == "---" || line.starts_with("--- ")
}

fn push_document(docs: &mut Vec<String>, current: &mut String) {
    let doc = std::mem::take(current);
    let has_content = doc.lines().any(|l| {
        let l = l.trim();
        !l.is_empty() && !l.starts_with('#')
    });
    if has_content {
        docs.push(doc);
    }
}
