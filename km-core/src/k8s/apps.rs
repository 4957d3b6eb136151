use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use kube::api::{
    ListParams,
    PostParams,
};
use tokio::time::sleep;
use tracing::*;

use super::*;

err_impl! {AppError,
    #[error("{0} app is already installed")]
    AlreadyInstalled(String),

    #[error("{0} app is being deleted - please wait until the deletion finishes")]
    BeingDeleted(String),

    #[error("{0} app is not installed")]
    NotInstalled(String),

    #[error("there is no new update available for {0} app - you are already on the latest version")]
    NoNewUpdate(String),

    #[error("{0} dependency is being deleted - please wait until the deletion finishes and try again")]
    DependencyBeingDeleted(String),

    #[error("{0} did not finish deleting in time - please rerun the command")]
    DeletionTimedOut(String),
}

#[derive(Clone, Copy, Debug)]
pub struct ConflictRetry {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub max_elapsed: Duration,
}

impl Default for ConflictRetry {
    fn default() -> Self {
        ConflictRetry {
            initial_interval: Duration::from_millis(CONFLICT_RETRY_INITIAL_MILLIS),
            max_interval: Duration::from_millis(CONFLICT_RETRY_MAX_INTERVAL_MILLIS),
            max_elapsed: Duration::from_secs(CONFLICT_RETRY_MAX_ELAPSED_SECONDS),
        }
    }
}

impl ConflictRetry {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_interval,
            initial_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: Some(self.max_elapsed),
            ..ExponentialBackoff::default()
        }
    }
}

pub fn build_app(name: &str, plan: Option<String>) -> App {
    let mut app = App::new(name, AppSpec { name: name.into(), action: AppAction::Install, plan });
    app.metadata.namespace = Some(KUBEMART_NAMESPACE.into());
    app
}

// All App objects live in the kubemart namespace, and are named after the marketplace app
pub struct AppGateway {
    api: kube::Api<App>,
    retry: ConflictRetry,
}

impl AppGateway {
    pub fn new(client: kube::Client) -> AppGateway {
        AppGateway {
            api: kube::Api::namespaced(client, KUBEMART_NAMESPACE),
            retry: ConflictRetry::default(),
        }
    }

    pub fn with_conflict_retry(mut self, retry: ConflictRetry) -> Self {
        self.retry = retry;
        self
    }

    pub async fn create(&self, name: &str, plan: Option<String>) -> anyhow::Result<App> {
        if let Some(existing) = self.get_opt(name).await? {
            if existing.is_being_deleted() {
                bail!(AppError::being_deleted(name));
            }
            bail!(AppError::already_installed(name));
        }

        info!("creating App {KUBEMART_NAMESPACE}/{name} (plan: {plan:?})");
        self.api
            .create(&PostParams::default(), &build_app(name, plan))
            .await
            .with_context(|| format!("unable to create {name} app"))
    }

    pub async fn get(&self, name: &str) -> anyhow::Result<App> {
        match self.get_opt(name).await? {
            Some(app) => Ok(app),
            None => bail!(AppError::not_installed(name)),
        }
    }

    pub async fn get_opt(&self, name: &str) -> anyhow::Result<Option<App>> {
        Ok(self.api.get_opt(name).await?)
    }

    pub async fn list(&self) -> anyhow::Result<Vec<App>> {
        Ok(self.api.list(&ListParams::default()).await?.items)
    }

    // Flip spec.action to "update" so the operator upgrades the app; a write that loses a
    // resourceVersion race re-reads the object and tries again until the retry budget runs out
    pub async fn request_update(&self, name: &str) -> anyhow::Result<App> {
        let mut backoff = self.retry.backoff();
        loop {
            let mut app = self.get(name).await?;
            if app.is_being_deleted() {
                bail!(AppError::being_deleted(name));
            }
            if !app.has_update_available() {
                bail!(AppError::no_new_update(name));
            }

            app.spec.action = AppAction::Update;
            match self.api.replace(name, &PostParams::default(), &app).await {
                Ok(updated) => return Ok(updated),
                Err(e @ kube::Error::Api(kube::core::ErrorResponse { code: 409, .. })) => match backoff.next_backoff() {
                    Some(delay) => {
                        warn!("conflict updating {name} app, retrying in {delay:?}");
                        sleep(delay).await;
                    },
                    None => return Err(e).with_context(|| format!("unable to update {name} app")),
                },
                Err(e) => return Err(e).with_context(|| format!("unable to update {name} app")),
            }
        }
    }

    pub async fn delete(&self, name: &str) -> EmptyResult {
        match self.api.delete(name, &background_delete_params()).await {
            Ok(_) => Ok(()),
            Err(kube::Error::Api(kube::core::ErrorResponse { code: 404, .. })) => {
                debug!("App {name} already gone");
                Ok(())
            },
            Err(e) => Err(e).with_context(|| format!("unable to delete {name} app")),
        }
    }

    pub async fn check_dependencies(&self, deps: &[String]) -> EmptyResult {
        for dep in deps {
            if let Some(app) = self.get_opt(dep).await?
                && app.is_being_deleted()
            {
                bail!(AppError::dependency_being_deleted(dep));
            }
        }
        Ok(())
    }

    pub async fn wait_until_gone(&self, name: &str, interval: Duration, max_polls: u32) -> EmptyResult {
        for _ in 0..max_polls {
            if self.get_opt(name).await?.is_none() {
                return Ok(());
            }
            debug!("waiting for {name} app to be deleted");
            sleep(interval).await;
        }
        bail!(AppError::deletion_timed_out(&format!("{name} app")))
    }

    pub async fn wait_until_all_gone(&self, interval: Duration, max_polls: u32) -> EmptyResult {
        for _ in 0..max_polls {
            let remaining = self.list().await?;
            if remaining.is_empty() {
                return Ok(());
            }
            debug!("waiting for {} apps to be deleted", remaining.len());
            sleep(interval).await;
        }
        bail!(AppError::deletion_timed_out("installed apps"))
    }
}
