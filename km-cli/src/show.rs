use km_core::catalog::Catalog;
use km_core::k8s::{
    self,
    AppGateway,
};
use km_core::prelude::*;

#[derive(clap::Args)]
pub struct Args {
    #[arg(long_help = "name of the installed app")]
    pub app: String,
}

pub async fn notes_for(app: &str, catalog: &Catalog, client: kube::Client) -> anyhow::Result<String> {
    k8s::require_app_crd(&client).await?;
    AppGateway::new(client).get(app).await?;
    catalog.post_install_notes(app)
}

pub async fn cmd(args: &Args, catalog: &Catalog, client: kube::Client) -> EmptyResult {
    println!("{}", notes_for(&args.app, catalog, client).await?);
    Ok(())
}
