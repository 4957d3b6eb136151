use km_core::catalog::{
    Catalog,
    CatalogError,
    PlanChoice,
    choose_plan,
};
use km_core::errors::*;
use km_core::k8s::{
    self,
    AppGateway,
};
use km_core::prelude::*;
use tracing::*;

err_impl! {InstallError,
    #[error("invalid app argument: {0} (expected APP or APP:PLAN)")]
    MalformedTarget(String),

    #[error("--plan can only be used when installing a single app: {0}")]
    PlanFlagWithMultipleApps(String),

    #[error("plan given twice for {0} (use either APP:PLAN or --plan)")]
    ConflictingPlans(String),
}

#[derive(clap::Args)]
pub struct Args {
    #[arg(long_help = "comma-separated list of apps to install, each optionally suffixed with :PLAN")]
    pub apps: String,

    #[arg(short, long, long_help = "plan (e.g. storage size label) for the app; single app only")]
    pub plan: Option<String>,

    #[arg(short, long, long_help = "don't print post-install notes")]
    pub quiet: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallTarget {
    pub app: String,
    pub plan: Option<String>,
}

// What actually gets sent to the cluster, after the plan label was mapped to its value
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedInstall {
    pub app: String,
    pub plan_value: Option<String>,
    pub dependencies: Vec<String>,
}

pub fn parse_targets(apps: &str, plan_flag: Option<&str>) -> anyhow::Result<Vec<InstallTarget>> {
    let mut targets = vec![];
    for item in apps.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let target = match item.split_once(':') {
            Some((app, plan)) if !app.is_empty() && !plan.is_empty() && !plan.contains(':') => {
                InstallTarget { app: app.into(), plan: Some(plan.into()) }
            },
            Some(_) => bail!(InstallError::malformed_target(item)),
            None => InstallTarget { app: item.into(), plan: None },
        };
        targets.push(target);
    }

    if targets.is_empty() {
        bail!(InstallError::malformed_target(apps));
    }

    if let Some(plan) = plan_flag {
        if targets.len() > 1 {
            bail!(InstallError::plan_flag_with_multiple_apps(apps));
        }
        if targets[0].plan.is_some() {
            bail!(InstallError::conflicting_plans(&targets[0].app));
        }
        targets[0].plan = Some(plan.into());
    }

    Ok(targets)
}

pub fn resolve_target(catalog: &Catalog, target: &InstallTarget) -> anyhow::Result<ResolvedInstall> {
    if !catalog.app_exists(&target.app) {
        bail!(CatalogError::app_not_found(&target.app));
    }

    let labels = catalog.plan_labels(&target.app)?;
    let choice = choose_plan(&labels, target.plan.as_deref());
    match &choice {
        PlanChoice::NotApplicable if target.plan.is_some() => {
            debug!("{} app has no plans, ignoring requested plan", target.app);
        },
        PlanChoice::Defaulted(label) => {
            println!("{} app requires a plan; next time you can pass one with APP:PLAN or --plan.", target.app);
            println!("Proceeding with the smallest plan ({label}).");
        },
        _ => (),
    }

    let plan_value = match choice.label() {
        Some(label) => Some(catalog.resolve_plan_value(&target.app, label)?),
        None => None,
    };

    Ok(ResolvedInstall {
        app: target.app.clone(),
        plan_value,
        dependencies: catalog.dependencies(&target.app)?,
    })
}

pub async fn cmd(args: &Args, catalog: &Catalog, client: kube::Client) -> EmptyResult {
    // everything local gets validated before we touch the cluster
    let resolved = parse_targets(&args.apps, args.plan.as_deref())?
        .iter()
        .map(|t| resolve_target(catalog, t))
        .collect::<anyhow::Result<Vec<_>>>()?;

    k8s::require_app_crd(&client).await?;
    let gateway = AppGateway::new(client);
    for install in resolved {
        gateway.check_dependencies(&install.dependencies).await?;
        gateway.create(&install.app, install.plan_value.clone()).await?;
        println!("{} app is now scheduled to be installed", install.app);

        if !args.quiet {
            match catalog.post_install_notes(&install.app) {
                Ok(notes) => println!("\n{notes}"),
                Err(err) => debug!("no post-install notes for {}: {err}", install.app),
            }
        }
    }

    Ok(())
}
