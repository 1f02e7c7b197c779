use serde::{Deserialize, Serialize};

/// One record from the daily-image endpoint.
///
/// Parsing is deliberately lenient: every text field falls back to empty
/// text when its key is missing, so a thin payload still yields a record.
/// A key that is present with the wrong shape is a parse failure; the
/// fallback flow relies on parse errors meaning "malformed", never
/// "incomplete".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub url: String,
    /// High-resolution variant; the source sometimes sends `""` for "none".
    #[serde(default, deserialize_with = "hdurl_or_absent")]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub service_version: String,
}

/// An empty `hdurl` means "not provided", never an empty-string URL.
fn hdurl_or_absent<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.filter(|s| !s.is_empty()))
}
