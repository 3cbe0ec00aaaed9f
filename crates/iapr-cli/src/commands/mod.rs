//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use iapr_core::models::config::IaprConfig;
use iapr_core::receipt::{classify, decode};
use iapr_core::{InboundRecord, SourcePlatform};

/// Load the config from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&str>) -> anyhow::Result<IaprConfig> {
    match path {
        Some(path) => Ok(IaprConfig::from_file(Path::new(path))?),
        None => Ok(IaprConfig::default()),
    }
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("iapr")
        .join("config.json")
}

/// Whether the file is a full mail message rather than a bare body.
pub fn is_message_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("eml"))
        .unwrap_or(false)
}

/// Load one receipt file as an inbound record.
///
/// `.eml` files carry their own headers. Bare bodies use the file name as
/// uid and subject, the modification time as date, and the detected brand
/// as platform.
pub async fn load_record(path: &Path) -> anyhow::Result<InboundRecord> {
    let raw = tokio::fs::read(path).await?;
    let uid = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt")
        .to_string();

    if is_message_file(path) {
        let mut record = InboundRecord::from_message(uid, &raw)?;
        if record.platform.is_none() {
            record.platform = SourcePlatform::from_brand(classify(&decode(&record.body)));
        }
        return Ok(record);
    }

    let body = String::from_utf8_lossy(&raw).into_owned();
    let modified = tokio::fs::metadata(path).await?.modified()?;
    let subject = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(InboundRecord {
        platform: SourcePlatform::from_brand(classify(&decode(&body))),
        uid,
        subject,
        received_at: DateTime::<Utc>::from(modified),
        body,
        mailbox: String::new(),
    })
}
