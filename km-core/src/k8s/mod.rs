mod apiset;
mod apps;
mod cluster;
mod connect;
mod gvk;
mod ssa;
mod util;

pub use apiset::*;
pub use apps::*;
pub use cluster::*;
pub use connect::*;
pub use gvk::*;
pub use ssa::*;
pub use util::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {KubernetesError,
    #[error("manifest has no apiVersion/kind: {0}")]
    MissingTypeMeta(String),

    #[error("manifest for {0} has no metadata.name")]
    MissingName(String),

    #[error("no IPv4 address found in cluster URL: {0}")]
    NoIpAddress(String),

    #[error("kubeconfig has no usable current context: {0}")]
    NoCurrentContext(String),

    #[error("malformed server version segment: {0}")]
    MalformedVersion(String),

    #[error("{0} container not found in operator deployment")]
    ContainerNotFound(String),

    #[error("App CRD ({0}) is not found in the cluster. You can install it by running 'kubemart init' command")]
    CrdMissing(String),
}

pub trait KubeResourceExt {
    fn namespaced_name(&self) -> String;
}

#[cfg(test)]
mod tests;
