mod completions;
mod context;
mod destroy;
mod init;
mod install;
mod installed;
mod list;
mod show;
mod system_upgrade;
mod uninstall;
mod update;
mod version;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    CommandFactory,
    Parser,
    Subcommand,
};
use clockabilly::{
    Clockable,
    UtcClock,
};
use km_core::catalog::GitMirror;
use km_core::logging;
use km_core::prelude::*;
use km_core::releases::ReleaseClient;

use crate::context::CliContext;

#[derive(Parser)]
#[command(about = "command-line app for installing apps from the Kubemart marketplace", version, propagate_version = true)]
struct KubemartRoot {
    #[command(subcommand)]
    subcommand: KubemartSubcommand,

    #[arg(short, long, global = true, long_help = "path to the kubeconfig file to use")]
    kubeconfig: Option<PathBuf>,

    #[arg(short, long, global = true, long_help = "print debug logs")]
    debug: bool,
}

#[derive(Subcommand)]
enum KubemartSubcommand {
    #[command(about = "generate shell completions for kubemart")]
    Completions(completions::Args),

    #[command(about = "completely remove Kubemart and all installed apps from the cluster")]
    Destroy(destroy::Args),

    #[command(about = "set up the local environment and install the Kubemart operator")]
    Init(init::Args),

    #[command(about = "install one or more apps", visible_alias = "i")]
    Install(install::Args),

    #[command(about = "list apps installed in the cluster")]
    Installed,

    #[command(about = "list apps that can be installed", visible_alias = "ls")]
    List,

    #[command(about = "show the post-install notes for an installed app")]
    Show(show::Args),

    #[command(about = "upgrade the Kubemart operator and CRDs to the latest release")]
    SystemUpgrade,

    #[command(about = "uninstall one or more apps", visible_aliases = &["rm", "delete"])]
    Uninstall(uninstall::Args),

    #[command(about = "update an installed app to the latest version")]
    Update(update::Args),

    #[command(about = "print the kubemart version")]
    Version(version::Args),
}

impl KubemartSubcommand {
    fn needs_fresh_cache(&self) -> bool {
        !matches!(
            self,
            KubemartSubcommand::Completions(_) | KubemartSubcommand::Init(_) | KubemartSubcommand::Version(_)
        )
    }
}

async fn run(root: &KubemartRoot) -> EmptyResult {
    let ctx = CliContext::new(root.kubeconfig.clone())?;
    if root.subcommand.needs_fresh_cache() {
        ctx.refresh_cache(&GitMirror::default(), UtcClock.now_ts()).await?;
    }

    // Not every subcommand talks to the cluster (or to GitHub), so clients are only built by
    // the arms that need them
    match &root.subcommand {
        KubemartSubcommand::Completions(args) => completions::cmd(args, KubemartRoot::command()),
        KubemartSubcommand::Destroy(args) => {
            let client = ctx.client().await?;
            destroy::cmd(args, client, &ReleaseClient::new()?, &mut io::stdin().lock()).await
        },
        KubemartSubcommand::Init(args) => {
            init::cmd(args, &ctx, &GitMirror::default(), &ReleaseClient::new()?, UtcClock.now_ts()).await
        },
        KubemartSubcommand::Install(args) => {
            let client = ctx.client().await?;
            install::cmd(args, &ctx.catalog(), client).await
        },
        KubemartSubcommand::Installed => installed::cmd(ctx.client().await?).await,
        KubemartSubcommand::List => list::cmd(&ctx.catalog()),
        KubemartSubcommand::Show(args) => {
            let client = ctx.client().await?;
            show::cmd(args, &ctx.catalog(), client).await
        },
        KubemartSubcommand::SystemUpgrade => {
            let client = ctx.client().await?;
            system_upgrade::cmd(client, &ReleaseClient::new()?).await
        },
        KubemartSubcommand::Uninstall(args) => uninstall::cmd(args, ctx.client().await?).await,
        KubemartSubcommand::Update(args) => update::cmd(args, ctx.client().await?).await,
        KubemartSubcommand::Version(args) => version::cmd(args, &ctx, &ReleaseClient::new()?).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let root = KubemartRoot::parse();
    logging::setup_for_cli(root.debug);

    match run(&root).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests;
