use serde::Deserialize;
use tracing::*;

use crate::errors::*;
use crate::prelude::*;

err_impl! {ReleaseError,
    #[error("downloaded operator manifest for release {0} is empty")]
    EmptyManifest(String),
}

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

// Talks to the GitHub releases API (for tags) and to github.com (for release assets); both base
// URLs can be overridden so tests can point them at a local server
pub struct ReleaseClient {
    http: reqwest::Client,
    api_url: String,
    download_url: String,
}

impl ReleaseClient {
    pub fn new() -> anyhow::Result<ReleaseClient> {
        ReleaseClient::with_base_urls(GITHUB_API_URL, GITHUB_URL)
    }

    pub fn with_base_urls(api_url: &str, download_url: &str) -> anyhow::Result<ReleaseClient> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("kubemart/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ReleaseClient {
            http,
            api_url: api_url.trim_end_matches('/').into(),
            download_url: download_url.trim_end_matches('/').into(),
        })
    }

    pub async fn latest_release_tag(&self, owner: &str, repo: &str) -> anyhow::Result<String> {
        let url = format!("{}/repos/{owner}/{repo}/releases/latest", self.api_url);
        debug!("fetching latest release from {url}");
        let release: LatestRelease = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("unable to read latest release of {owner}/{repo}"))?;
        Ok(release.tag_name)
    }

    pub async fn latest_operator_manifests(&self) -> anyhow::Result<String> {
        let tag = self.latest_release_tag(GITHUB_ORG, OPERATOR_REPO).await?;
        let url = format!(
            "{}/{GITHUB_ORG}/{OPERATOR_REPO}/releases/download/{tag}/{OPERATOR_MANIFEST_FILE_NAME}",
            self.download_url
        );
        info!("downloading operator manifests from {url}");
        let body = self.http.get(&url).send().await?.error_for_status()?.text().await?;
        if body.trim().is_empty() {
            bail!(ReleaseError::empty_manifest(&tag));
        }
        Ok(body)
    }
}

// Compares dotted numeric versions, ignoring a leading "v" and any pre-release suffix
pub fn is_newer_version(latest: &str, current: &str) -> bool {
    parse_version(latest) > parse_version(current)
}

fn parse_version(v: &str) -> Vec<u64> {
    v.trim()
        .trim_start_matches('v')
        .split(['-', '+'])
        .next()
        .unwrap_or_default()
        .split('.')
        .map(|seg| seg.parse().unwrap_or(0))
        .collect()
}
