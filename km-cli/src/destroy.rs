use std::io::BufRead;
use std::time::Duration;

use km_core::errors::*;
use km_core::k8s::{
    self,
    AppGateway,
    ManifestExecutor,
    ManifestOp,
};
use km_core::prelude::*;
use km_core::releases::ReleaseClient;
use tracing::*;

#[derive(clap::Args)]
pub struct Args {
    #[arg(short, long, long_help = "skip the interactive confirmation prompt")]
    pub yes: bool,
}

pub(super) fn confirm(input: &mut impl BufRead) -> anyhow::Result<bool> {
    println!(
        "Are you sure you want to delete ALL apps and completely remove Kubemart (operator, CRDs, etc.) from your cluster? y/n"
    );
    let answer = input.lines().next().ok_or(anyhow!("could not read stdin"))??;
    Ok(answer.trim() == "y")
}

pub async fn cmd(args: &Args, client: kube::Client, releases: &ReleaseClient, input: &mut impl BufRead) -> EmptyResult {
    if !args.yes && !confirm(input)? {
        bail!("operation cancelled");
    }

    // a bare cluster, or a rerun after the CRDs are already gone, has no apps left to clean up
    if k8s::crd_exists(&client, APP_CRD_NAME).await? {
        let gateway = AppGateway::new(client.clone());
        for app in gateway.list().await? {
            let name = app.name_any();
            println!("Deleting {name} app...");
            gateway.delete(&name).await?;
        }

        // the operator has to stay up until every App finalizer has run
        println!("Waiting for all apps to be deleted...");
        gateway
            .wait_until_all_gone(Duration::from_secs(DELETE_POLL_INTERVAL_SECONDS), DESTROY_MAX_POLLS)
            .await?;
        println!("All apps have been deleted");
    } else {
        info!("{APP_CRD_NAME} not found, skipping app deletion");
    }

    println!("Deleting Kubemart operator, CRDs, etc...");
    let manifests = releases
        .latest_operator_manifests()
        .await
        .context("unable to download latest operator manifests")?;
    ManifestExecutor::new(client.clone())
        .execute_all(&manifests, ManifestOp::Delete, FIELD_MANAGER)
        .await?;
    k8s::delete_namespace(&client, KUBEMART_NAMESPACE).await?;

    println!("All done");
    Ok(())
}
