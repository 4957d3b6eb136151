use lazy_static::lazy_static;
use regex::Regex;

use super::*;

lazy_static! {
    static ref IPV4_RE: Regex = Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").expect("valid IPv4 regex");
    static ref LEADING_DIGITS_RE: Regex = Regex::new(r"^[0-9]+").expect("valid digits regex");
}

// Managed providers report things like "21+" or "16-eks"; we only care about the digits
pub fn sanitize_version_segment(segment: &str) -> anyhow::Result<u32> {
    match LEADING_DIGITS_RE.find(segment.trim()) {
        Some(m) => Ok(m.as_str().parse()?),
        None => bail!(KubernetesError::malformed_version(segment)),
    }
}

// 1.21 -> 121, 1.9 -> 109
pub fn combined_server_version(major: &str, minor: &str) -> anyhow::Result<u32> {
    Ok(sanitize_version_segment(major)? * 100 + sanitize_version_segment(minor)?)
}

pub fn extract_ip_address(url: &str) -> anyhow::Result<String> {
    match IPV4_RE.find(url) {
        Some(m) => Ok(m.as_str().into()),
        None => bail!(KubernetesError::no_ip_address(url)),
    }
}

// "ghcr.io/kubemart/kubemart-operator:v1.2.3" -> Some("v1.2.3"); a registry port is not a tag
pub fn image_tag(image: &str) -> Option<&str> {
    let (_, tag) = image.rsplit_once(':')?;
    if tag.is_empty() || tag.contains('/') { None } else { Some(tag) }
}

impl<T: kube::Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{ns}/{}", self.name_any()),
            None => self.name_any(),
        }
    }
}
