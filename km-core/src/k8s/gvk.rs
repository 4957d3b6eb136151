use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use kube::api::{
    DynamicObject,
    GroupVersionKind,
    TypeMeta,
};

use crate::errors::*;
use crate::k8s::KubernetesError;

// GVK is a "newtype" wrapper around the GroupVersionKind object so that we can hash it and give it
// a readable format ("group/version.kind", or just "version.kind" for the core group) in logs and
// error messages.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct GVK(GroupVersionKind);

impl GVK {
    pub fn new(group: &str, version: &str, kind: &str) -> GVK {
        GVK(GroupVersionKind::gvk(group, version, kind))
    }

    pub fn from_dynamic_obj(obj: &DynamicObject) -> anyhow::Result<GVK> {
        match &obj.types {
            Some(t) => GVK::from_type_meta(t),
            None => bail!(KubernetesError::missing_type_meta(&obj.metadata.name.clone().unwrap_or_default())),
        }
    }

    pub fn from_type_meta(tm: &TypeMeta) -> anyhow::Result<GVK> {
        Ok(GVK(tm.try_into()?))
    }
}

// Impl Deref lets a GVK act like a GroupVersionKind anywhere one of those is expected
impl Deref for GVK {
    type Target = GroupVersionKind;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for GVK {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut group = Cow::from(&self.0.group);
        if !group.is_empty() {
            group.to_mut().push('/');
        }

        write!(f, "{group}{}.{}", self.0.version, self.0.kind)
    }
}
