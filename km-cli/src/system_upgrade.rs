use km_core::k8s::{
    ManifestExecutor,
    ManifestOp,
};
use km_core::errors::*;
use km_core::prelude::*;
use km_core::releases::ReleaseClient;

pub async fn cmd(client: kube::Client, releases: &ReleaseClient) -> EmptyResult {
    let manifests = releases
        .latest_operator_manifests()
        .await
        .context("unable to download latest operator manifests")?;
    ManifestExecutor::new(client)
        .execute_all(&manifests, ManifestOp::Apply, FIELD_MANAGER)
        .await?;

    println!("System upgrade completed successfully");
    Ok(())
}
