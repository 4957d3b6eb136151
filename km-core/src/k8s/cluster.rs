use k8s_openapi::api::apps::v1 as appsv1;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{
    Api,
    PostParams,
};
use tracing::*;

use super::*;
use crate::macros::*;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KubemartConfigMap {
    pub email: String,
    pub domain: String,
    pub cluster_name: String,
    pub master_ip: String,
}

// A namespace that is terminating is treated the same as a missing one, since nothing new
// can be created inside it
pub async fn namespace_exists(client: &kube::Client, name: &str) -> anyhow::Result<bool> {
    let api: Api<corev1::Namespace> = Api::all(client.clone());
    match api.get_opt(name).await? {
        Some(ns) if ns.metadata.deletion_timestamp.is_some() => {
            debug!("namespace {name} is terminating");
            Ok(false)
        },
        Some(_) => Ok(true),
        None => Ok(false),
    }
}

pub async fn create_namespace(client: &kube::Client, name: &str) -> EmptyResult {
    let api: Api<corev1::Namespace> = Api::all(client.clone());
    let ns = corev1::Namespace {
        metadata: metav1::ObjectMeta { name: Some(name.into()), ..Default::default() },
        ..Default::default()
    };
    info!("creating namespace {name}");
    api.create(&PostParams::default(), &ns)
        .await
        .with_context(|| format!("unable to create namespace {name}"))?;
    Ok(())
}

pub async fn delete_namespace(client: &kube::Client, name: &str) -> EmptyResult {
    let api: Api<corev1::Namespace> = Api::all(client.clone());
    info!("deleting namespace {name}");
    match api.delete(name, &background_delete_params()).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(kube::core::ErrorResponse { code: 404, .. })) => Ok(()),
        Err(e) => Err(e).with_context(|| format!("unable to delete namespace {name}")),
    }
}

pub fn build_configmap(settings: &KubemartConfigMap) -> corev1::ConfigMap {
    corev1::ConfigMap {
        metadata: metav1::ObjectMeta {
            name: Some(KUBEMART_CONFIGMAP_NAME.into()),
            namespace: Some(KUBEMART_NAMESPACE.into()),
            ..Default::default()
        },
        data: kmap!(
            CONFIGMAP_EMAIL_KEY => settings.email,
            CONFIGMAP_DOMAIN_KEY => settings.domain,
            CONFIGMAP_CLUSTER_NAME_KEY => settings.cluster_name,
            CONFIGMAP_MASTER_IP_KEY => settings.master_ip,
        ),
        ..Default::default()
    }
}

pub async fn configmap_exists(client: &kube::Client) -> anyhow::Result<bool> {
    let api: Api<corev1::ConfigMap> = Api::namespaced(client.clone(), KUBEMART_NAMESPACE);
    Ok(api.get_opt(KUBEMART_CONFIGMAP_NAME).await?.is_some())
}

pub async fn create_configmap(client: &kube::Client, settings: &KubemartConfigMap) -> EmptyResult {
    let api: Api<corev1::ConfigMap> = Api::namespaced(client.clone(), KUBEMART_NAMESPACE);
    info!("creating configmap {KUBEMART_NAMESPACE}/{KUBEMART_CONFIGMAP_NAME}");
    api.create(&PostParams::default(), &build_configmap(settings))
        .await
        .context("unable to create kubemart configmap")?;
    Ok(())
}

pub async fn crd_exists(client: &kube::Client, name: &str) -> anyhow::Result<bool> {
    let api: Api<CustomResourceDefinition> = Api::all(client.clone());
    Ok(api.get_opt(name).await?.is_some())
}

pub async fn require_app_crd(client: &kube::Client) -> EmptyResult {
    if !crd_exists(client, APP_CRD_NAME).await? {
        bail!(KubernetesError::crd_missing(APP_CRD_NAME));
    }
    Ok(())
}

pub async fn server_version_human(client: &kube::Client) -> anyhow::Result<String> {
    Ok(client.apiserver_version().await?.git_version)
}

pub async fn server_version_combined(client: &kube::Client) -> anyhow::Result<u32> {
    let info = client.apiserver_version().await?;
    combined_server_version(&info.major, &info.minor)
}

pub async fn operator_version(client: &kube::Client) -> anyhow::Result<String> {
    let api: Api<appsv1::Deployment> = Api::namespaced(client.clone(), KUBEMART_NAMESPACE);
    let depl = api
        .get(OPERATOR_DEPLOYMENT_NAME)
        .await
        .context("unable to find kubemart operator deployment")?;

    let containers = depl
        .spec
        .and_then(|s| s.template.spec)
        .map(|ps| ps.containers)
        .unwrap_or_default();

    let image = containers
        .into_iter()
        .find(|c| c.name == OPERATOR_CONTAINER_NAME)
        .and_then(|c| c.image)
        .ok_or_else(|| KubernetesError::container_not_found(OPERATOR_CONTAINER_NAME))?;

    Ok(image_tag(&image).unwrap_or_default().into())
}
