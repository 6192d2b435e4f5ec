pub mod kube_resources;
