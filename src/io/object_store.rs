use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{info, instrument};

use crate::backend::ContactsBackend;
use crate::error::{ManagerError, Result};
use crate::io::file_timestamp;

/// Object key for a JSON export, e.g. `root-email-address-list_01-02-2024_10-20-30.json`.
pub fn export_key(prefix: &str, now: DateTime<Local>) -> String {
    format!("{prefix}_{}.json", file_timestamp(now))
}

/// Uploads `document` as compact JSON to `bucket` and returns the key used.
#[instrument(level = "info", skip(backend, document, now))]
pub fn export_json(
    backend: &dyn ContactsBackend,
    bucket: &str,
    prefix: &str,
    document: &Value,
    now: DateTime<Local>,
) -> Result<String> {
    let key = export_key(prefix, now);
    let body = serde_json::to_vec(document)?;
    backend
        .put_object(bucket, &key, body)
        .map_err(|err| match err {
            ManagerError::Remote(source) => ManagerError::Export {
                bucket: bucket.to_string(),
                key: key.clone(),
                source,
            },
            other => other,
        })?;
    info!(%key, "exported listing");
    Ok(key)
}
