use serde_json::json;

fn resource(name: &str, singular: &str, kind: &str, namespaced: bool) -> serde_json::Value {
    json!({
        "name": name,
        "singularName": singular,
        "namespaced": namespaced,
        "kind": kind,
        "verbs": ["create","delete","deletecollection","get","list","patch","update","watch"],
    })
}

pub fn core_v1_discovery() -> serde_json::Value {
    json!({
        "kind": "APIResourceList",
        "groupVersion": "v1",
        "resources": [
            resource("configmaps", "configmap", "ConfigMap", true),
            resource("namespaces", "namespace", "Namespace", false),
            resource("serviceaccounts", "serviceaccount", "ServiceAccount", true),
            resource("services", "service", "Service", true),
        ],
    })
}

pub fn apps_v1_discovery() -> serde_json::Value {
    json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "apps/v1",
        "resources": [
            resource("daemonsets", "daemonset", "DaemonSet", true),
            resource("deployments", "deployment", "Deployment", true),
            {
                "name": "deployments/status",
                "singularName": "",
                "namespaced": true,
                "kind": "Deployment",
                "verbs": ["get","patch","update"],
            },
            resource("statefulsets", "statefulset", "StatefulSet", true),
        ],
    })
}

pub fn apiextensions_v1_discovery() -> serde_json::Value {
    json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "apiextensions.k8s.io/v1",
        "resources": [
            resource("customresourcedefinitions", "customresourcedefinition", "CustomResourceDefinition", false),
        ],
    })
}

pub fn kubemart_v1alpha1_discovery() -> serde_json::Value {
    json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "kubemart.civo.com/v1alpha1",
        "resources": [
            resource("apps", "app", "App", true),
            resource("jobwatchers", "jobwatcher", "JobWatcher", true),
        ],
    })
}
