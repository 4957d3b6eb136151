use km_core::catalog::{
    MarketplaceMirror,
    ensure_marketplace,
};
use km_core::k8s::{
    self,
    KubemartConfigMap,
    ManifestExecutor,
    ManifestOp,
};
use km_core::errors::*;
use km_core::prelude::*;
use km_core::releases::ReleaseClient;
use tracing::*;

use crate::context::CliContext;

#[derive(clap::Args)]
pub struct Args {
    #[arg(short, long, long_help = "email address passed to the operator (e.g. for TLS certificates)")]
    pub email: String,

    #[arg(short = 'n', long, long_help = "domain name for installed apps [default: <master-ip>.xip.io]")]
    pub domain_name: Option<String>,
}

pub fn default_domain(master_ip: &str) -> String {
    format!("{master_ip}.{DEFAULT_DOMAIN_SUFFIX}")
}

pub async fn cmd(
    args: &Args,
    ctx: &CliContext,
    mirror: &dyn MarketplaceMirror,
    releases: &ReleaseClient,
    now_ts: i64,
) -> EmptyResult {
    let kubeconfig = ctx.kubeconfig.as_deref();
    let master_ip = k8s::master_ip(kubeconfig)
        .await
        .context("unable to determine master node IP address")?;
    let cluster_name = k8s::cluster_name(&k8s::load_kubeconfig(kubeconfig)?).context("unable to determine cluster name")?;

    let settings = KubemartConfigMap {
        email: args.email.clone(),
        domain: args.domain_name.clone().unwrap_or_else(|| default_domain(&master_ip)),
        cluster_name,
        master_ip,
    };
    debug!("kubemart configmap settings: {settings:?}");

    println!("Fetching apps...");
    if !ensure_marketplace(mirror, &ctx.paths, now_ts).await? {
        println!("Local app cache already exists in {}", ctx.paths.root_dir.display());
    }

    let client = ctx.client().await?;
    if !k8s::namespace_exists(&client, KUBEMART_NAMESPACE).await? {
        println!("Creating namespace {KUBEMART_NAMESPACE}...");
        k8s::create_namespace(&client, KUBEMART_NAMESPACE).await?;
    }

    if !k8s::configmap_exists(&client).await? {
        println!("Creating configmap {KUBEMART_CONFIGMAP_NAME}...");
        k8s::create_configmap(&client, &settings).await?;
    }

    println!("Applying operator manifests...");
    let manifests = releases
        .latest_operator_manifests()
        .await
        .context("unable to download latest operator manifests")?;
    ManifestExecutor::new(client)
        .execute_all(&manifests, ManifestOp::Apply, FIELD_MANAGER)
        .await?;

    println!("You are good to go");
    Ok(())
}
