use km_core::k8s::{
    self,
    AppGateway,
};
use km_core::prelude::*;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long_help = "name of the app to update")]
    pub app: String,
}

pub async fn cmd(args: &Args, client: kube::Client) -> EmptyResult {
    k8s::require_app_crd(&client).await?;
    let app = AppGateway::new(client).request_update(&args.app).await?;

    let target = app.status.map(|s| s.new_update_version).unwrap_or_default();
    if target.is_empty() {
        println!("{} app is now scheduled to be updated", args.app);
    } else {
        println!("{} app is now scheduled to be updated to {target}", args.app);
    }
    Ok(())
}
