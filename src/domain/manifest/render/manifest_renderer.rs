use serde_json::json;
use tracing::debug;

use crate::domain::manifest::model::manifest_set::{ManifestResource, ManifestSet};
use crate::errors::{serialization_error, ManifestError};

use super::output_format::{OutputFormat, OutputLayout};

/// One output file, fully serialized and ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub contents: String,
}

/// Serializes every resource up front so a failure leaves nothing half written.
pub fn render_manifest_set(
    set: &ManifestSet,
    chart_name: &str,
    format: OutputFormat,
    layout: OutputLayout,
) -> Result<Vec<RenderedDocument>, ManifestError> {
    let resources = set.resources();
    let ext = format.extension();

    let docs = match layout {
        OutputLayout::Single => vec![RenderedDocument {
            file_name: format!("{chart_name}.k8s.{ext}"),
            contents: render_stream(&resources, format)?,
        }],
        OutputLayout::PerResource => resources
            .iter()
            .enumerate()
            .map(|(index, resource)| {
                Ok(RenderedDocument {
                    file_name: format!(
                        "{index:02}-{}-{}.{ext}",
                        resource.kind().to_lowercase(),
                        resource.name()
                    ),
                    contents: render_one(resource, format)?,
                })
            })
            .collect::<Result<Vec<_>, ManifestError>>()?,
    };

    debug!(
        "Rendered {} resource(s) into {} document(s) as {}",
        resources.len(),
        docs.len(),
        format.as_code()
    );
    Ok(docs)
}

/// All resources as one string: a `---` separated YAML stream, or a JSON `List`.
pub fn render_stream(
    resources: &[ManifestResource<'_>],
    format: OutputFormat,
) -> Result<String, ManifestError> {
    match format {
        OutputFormat::Yaml => {
            let docs = resources
                .iter()
                .map(|r| serde_yaml::to_string(r).map_err(serialization_error))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(docs.join("---\n"))
        }
        OutputFormat::Json => {
            let items = resources
                .iter()
                .map(|r| serde_json::to_value(r).map_err(serialization_error))
                .collect::<Result<Vec<_>, _>>()?;
            let list = json!({
                "apiVersion": "v1",
                "kind": "List",
                "items": items,
            });
            let mut out = serde_json::to_string_pretty(&list).map_err(serialization_error)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn render_one(resource: &ManifestResource<'_>, format: OutputFormat) -> Result<String, ManifestError> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(resource).map_err(serialization_error),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(resource).map_err(serialization_error)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::manifest_config_entity::ManifestConfig;
    use crate::domain::manifest::builder::manifest_builder::build_manifest_set;

    fn ingress_set() -> ManifestSet {
        build_manifest_set(&ManifestConfig {
            ingress_host: Some("nextcloud.kube.home".into()),
            enable_ingress: true,
            ..ManifestConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn single_yaml_file_uses_chart_name() {
        let set = ingress_set();
        let docs = render_manifest_set(&set, "nextcloud-cdk8s", OutputFormat::Yaml, OutputLayout::Single).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].file_name, "nextcloud-cdk8s.k8s.yaml");
        assert_eq!(docs[0].contents.matches("\n---\n").count(), 3);
        assert!(docs[0].contents.starts_with("apiVersion: v1\nkind: Service\n"));
        assert!(docs[0].contents.contains("apiVersion: apps/v1\nkind: Deployment\n"));
        assert!(docs[0].contents.contains("apiVersion: networking.k8s.io/v1\nkind: Ingress\n"));
    }

    #[test]
    fn per_resource_files_are_numbered_by_kind() {
        let set = ingress_set();
        let docs = render_manifest_set(&set, "nextcloud-cdk8s", OutputFormat::Yaml, OutputLayout::PerResource).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "00-service-nextcloud-svc.yaml",
                "01-persistentvolumeclaim-nextcloud-data.yaml",
                "02-deployment-nextcloud-dep.yaml",
                "03-ingress-nextcloud-ingress.yaml",
            ]
        );
        assert!(docs.iter().all(|d| !d.contents.contains("---")));
    }

    #[test]
    fn json_stream_is_a_v1_list() {
        let set = ingress_set();
        let docs = render_manifest_set(&set, "chart", OutputFormat::Json, OutputLayout::Single).unwrap();
        assert_eq!(docs[0].file_name, "chart.k8s.json");

        let value: serde_json::Value = serde_json::from_str(&docs[0].contents).unwrap();
        assert_eq!(value["kind"], "List");
        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0]["kind"], "Service");
        assert_eq!(items[0]["spec"]["type"], "ClusterIP");
        assert_eq!(items[2]["spec"]["strategy"]["type"], "Recreate");
    }

    #[test]
    fn yaml_uses_kubernetes_field_names() {
        let set = build_manifest_set(&ManifestConfig::default()).unwrap();
        let yaml = render_stream(&set.resources(), OutputFormat::Yaml).unwrap();
        for field in ["targetPort: http", "storageClassName: rawfile-btrfs", "claimName: nextcloud-data", "mountPath: /var/www/html/data", "imagePullPolicy: IfNotPresent"] {
            assert!(yaml.contains(field), "missing {field}");
        }
    }
}
