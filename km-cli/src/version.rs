use clap::crate_version;
use km_core::k8s;
use km_core::errors::*;
use km_core::prelude::*;
use km_core::releases::{
    ReleaseClient,
    is_newer_version,
};
use tracing::*;

use crate::context::CliContext;

#[derive(clap::Args)]
pub struct Args {
    #[arg(short, long, long_help = "only print the version number", conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(short, long, long_help = "print client details and the status of Kubemart components in the cluster")]
    pub verbose: bool,
}

fn created(exists: anyhow::Result<bool>) -> &'static str {
    match exists {
        Ok(true) => "created",
        Ok(false) => "not created",
        Err(err) => {
            debug!("status check failed: {err:#}");
            "unknown"
        },
    }
}

fn or_unknown(res: anyhow::Result<String>) -> String {
    res.unwrap_or_else(|err| {
        debug!("version lookup failed: {err:#}");
        "unknown".into()
    })
}

pub async fn cluster_report(client: &kube::Client) -> Vec<(String, String)> {
    vec![
        ("Kubernetes version".into(), or_unknown(k8s::server_version_human(client).await)),
        ("Operator version".into(), or_unknown(k8s::operator_version(client).await)),
        ("App CRD status".into(), created(k8s::crd_exists(client, APP_CRD_NAME).await).into()),
        ("JobWatcher CRD status".into(), created(k8s::crd_exists(client, JOBWATCHER_CRD_NAME).await).into()),
        (
            format!("Namespace ({KUBEMART_NAMESPACE}) status"),
            created(k8s::namespace_exists(client, KUBEMART_NAMESPACE).await).into(),
        ),
        (
            format!("ConfigMap ({KUBEMART_CONFIGMAP_NAME}) status"),
            created(k8s::configmap_exists(client).await).into(),
        ),
    ]
}

pub async fn newer_release(releases: &ReleaseClient, current: &str) -> anyhow::Result<Option<String>> {
    let latest = releases
        .latest_release_tag(GITHUB_ORG, CLI_REPO)
        .await
        .context("checking for a newer version failed")?;
    Ok(is_newer_version(&latest, current).then_some(latest))
}

pub async fn cmd(args: &Args, ctx: &CliContext, releases: &ReleaseClient) -> EmptyResult {
    let current = crate_version!();
    if args.quiet {
        println!("v{current}");
        return Ok(());
    }

    if args.verbose {
        println!("Client version: v{current}");
        println!("OS/Arch (client): {}/{}", std::env::consts::OS, std::env::consts::ARCH);
        println!("---");
        let client = ctx.client().await?;
        for (label, value) in cluster_report(&client).await {
            println!("{label}: {value}");
        }
    } else {
        println!("v{current}");
    }

    if let Some(latest) = newer_release(releases, current).await? {
        println!("\nFYI, a newer Kubemart CLI version ({latest}) is available, please upgrade");
    }
    Ok(())
}
