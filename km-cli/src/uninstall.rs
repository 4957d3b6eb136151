use std::time::Duration;

use km_core::k8s::{
    self,
    AppError,
    AppGateway,
};
use km_core::errors::*;
use km_core::prelude::*;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long_help = "comma-separated list of apps to uninstall")]
    pub apps: String,

    #[arg(short, long, long_help = "block until the apps are completely removed")]
    pub wait: bool,
}

pub fn parse_app_names(apps: &str) -> Vec<String> {
    apps.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

pub async fn cmd(args: &Args, client: kube::Client) -> EmptyResult {
    let names = parse_app_names(&args.apps);
    if names.is_empty() {
        bail!("no app names given");
    }

    k8s::require_app_crd(&client).await?;
    let gateway = AppGateway::new(client);
    for name in &names {
        let app = gateway.get(name).await?;
        if app.is_being_deleted() {
            bail!(AppError::being_deleted(name));
        }

        gateway.delete(name).await?;
        println!("{name} app is now scheduled to be deleted");
    }

    if args.wait {
        for name in &names {
            println!("Waiting for {name} app to be deleted...");
            gateway
                .wait_until_gone(name, Duration::from_secs(DELETE_POLL_INTERVAL_SECONDS), UNINSTALL_MAX_POLLS)
                .await?;
            println!("{name} app deleted");
        }
    }

    Ok(())
}
