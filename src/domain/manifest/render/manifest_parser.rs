use serde::Deserialize;
use serde_json::Value;

use crate::core::schema::kube_resources::{Deployment, Ingress, PersistentVolumeClaim, Service};
use crate::domain::manifest::model::manifest_set::ManifestSet;
use crate::errors::{parse_error, ManifestError};

/// Reads a rendered YAML stream or JSON `List` back into a `ManifestSet`.
pub fn parse_manifest_stream(raw: &str) -> Result<ManifestSet, ManifestError> {
    let mut service = None;
    let mut pvc = None;
    let mut deployment = None;
    let mut ingress = None;

    for doc in split_documents(raw)? {
        let kind = doc
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| parse_error("document has no kind"))?
            .to_string();

        match kind.as_str() {
            "Service" => set_once(&mut service, doc, &kind)?,
            "PersistentVolumeClaim" => set_once(&mut pvc, doc, &kind)?,
            "Deployment" => set_once(&mut deployment, doc, &kind)?,
            "Ingress" => set_once(&mut ingress, doc, &kind)?,
            other => return Err(parse_error(format!("unsupported kind '{other}'"))),
        }
    }

    Ok(ManifestSet {
        service: service.ok_or_else(|| parse_error("stream has no Service"))?,
        pvc: pvc.ok_or_else(|| parse_error("stream has no PersistentVolumeClaim"))?,
        deployment: deployment.ok_or_else(|| parse_error("stream has no Deployment"))?,
        ingress,
    })
}

fn split_documents(raw: &str) -> Result<Vec<Value>, ManifestError> {
    if raw.trim_start().starts_with('{') {
        let value: Value = serde_json::from_str(raw).map_err(parse_error)?;
        return Ok(match value {
            Value::Object(ref obj) if obj.get("kind").and_then(Value::as_str) == Some("List") => {
                obj.get("items")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default()
            }
            other => vec![other],
        });
    }

    let mut docs = Vec::new();
    for de in serde_yaml::Deserializer::from_str(raw) {
        let value = serde_yaml::Value::deserialize(de).map_err(parse_error)?;
        if value.is_null() {
            continue;
        }
        docs.push(serde_json::to_value(value).map_err(parse_error)?);
    }
    Ok(docs)
}

fn set_once<T>(slot: &mut Option<T>, doc: Value, kind: &str) -> Result<(), ManifestError>
where
    T: for<'de> Deserialize<'de>,
{
    if slot.is_some() {
        return Err(parse_error(format!("stream has more than one {kind}")));
    }
    let resource: T = serde_json::from_value(doc)
        .map_err(|e| parse_error(format!("invalid {kind}: {e}")))?;
    *slot = Some(resource);
    Ok(())
}
