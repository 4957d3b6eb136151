use std::collections::HashMap;
use std::collections::hash_map::Entry;

use kube::api::{
    ApiResource,
    DynamicObject,
};
use kube::discovery::{
    ApiCapabilities,
    Scope,
};
use tracing::*;

use crate::k8s::GVK;
use crate::prelude::*;

// A DynamicApiSet caches the discovery results for every kind we've touched so that applying a
// multi-document manifest only hits the discovery endpoints once per GVK.
pub struct DynamicApiSet {
    client: kube::Client,
    resources: HashMap<GVK, (ApiResource, ApiCapabilities)>,
    apis: HashMap<GVK, kube::Api<DynamicObject>>,
    namespaced_apis: HashMap<(GVK, String), kube::Api<DynamicObject>>,
}

impl DynamicApiSet {
    pub fn new(client: kube::Client) -> DynamicApiSet {
        DynamicApiSet {
            client,
            resources: HashMap::new(),
            apis: HashMap::new(),
            namespaced_apis: HashMap::new(),
        }
    }

    pub fn client(&self) -> &kube::Client {
        &self.client
    }

    pub async fn api_for(&mut self, gvk: &GVK) -> anyhow::Result<&kube::Api<DynamicObject>> {
        let ar = self.api_meta_for(gvk).await?.0.clone();
        match self.apis.entry(gvk.clone()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => Ok(e.insert(kube::Api::all_with(self.client.clone(), &ar))),
        }
    }

    pub async fn namespaced_api_for(&mut self, gvk: &GVK, ns: String) -> anyhow::Result<&kube::Api<DynamicObject>> {
        let ar = self.api_meta_for(gvk).await?.0.clone();
        match self.namespaced_apis.entry((gvk.clone(), ns)) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let api = kube::Api::namespaced_with(self.client.clone(), &e.key().1, &ar);
                Ok(e.insert(api))
            },
        }
    }

    // Picks the right API handle for an object based on the scope reported by discovery;
    // namespaced objects that don't set a namespace land in the client's default namespace
    pub async fn api_for_obj(&mut self, obj: &DynamicObject) -> anyhow::Result<&kube::Api<DynamicObject>> {
        let gvk = GVK::from_dynamic_obj(obj)?;
        let scope = self.api_meta_for(&gvk).await?.1.scope.clone();
        match scope {
            Scope::Namespaced => {
                let ns = obj.namespace().unwrap_or_else(|| self.client.default_namespace().into());
                debug!("using namespaced api for {gvk} in {ns}");
                self.namespaced_api_for(&gvk, ns).await
            },
            Scope::Cluster => self.api_for(&gvk).await,
        }
    }

    async fn api_meta_for(&mut self, gvk: &GVK) -> anyhow::Result<&(ApiResource, ApiCapabilities)> {
        match self.resources.entry(gvk.clone()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let api_meta = kube::discovery::pinned_kind(&self.client, e.key()).await?;
                Ok(e.insert(api_meta))
            },
        }
    }
}
