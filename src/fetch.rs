// src/fetch.rs
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{ApiConfig, APOD_DATE_FORMAT};
use crate::error::FetchError;
use crate::model::ApodRecord;

/// Seam between the state controller and the HTTP layer, so tests can drive
/// load cycles with scripted outcomes.
#[async_trait]
pub trait ApodFetcher: Send + Sync {
    /// Today's record, or the most recent prior day's when today has none.
    async fn fetch_latest(&self) -> Result<ApodRecord, FetchError>;
}

/// HTTP client for the daily-image endpoint.
pub struct ApodClient {
    http: reqwest::Client,
    config: ApiConfig,
}

/// How the today request missed: `Soft` routes to the one-day fallback,
/// `Hard` ends the cycle.
enum TodayMiss {
    Soft(String),
    Hard(FetchError),
}

impl ApodClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Unknown(format!("building http client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Record for one specific date (`yyyy-MM-dd`).
    pub async fn fetch_for_date(&self, date: &str) -> Result<ApodRecord, FetchError> {
        tracing::debug!(%date, "requesting date-scoped record");
        let (status, body) = self.send(Some(date)).await?;

        if !status.is_success() || body.is_empty() {
            return Err(FetchError::Http {
                code: status.as_u16(),
                status: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;
        if let Some(err_field) = value.get("error") {
            return Err(FetchError::NoImageForDate {
                date: date.to_string(),
                message: soft_error_message(err_field),
            });
        }

        serde_json::from_value(value).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// The today request, kept forgiving: only a body that is present but
    /// unparseable is a hard failure on this path. Everything else (a
    /// transport error, a non-success status, an empty body, a soft `error`
    /// payload) means "no image yet" and routes to the fallback date.
    async fn try_today(&self) -> Result<ApodRecord, TodayMiss> {
        tracing::debug!("requesting today's record");
        let (status, body) = match self.send(None).await {
            Ok(pair) => pair,
            Err(err) => return Err(TodayMiss::Soft(err.to_string())),
        };

        if !status.is_success() || body.is_empty() {
            return Err(TodayMiss::Soft(format!(
                "status {status}, {} body bytes",
                body.len()
            )));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| TodayMiss::Hard(FetchError::Parse(e.to_string())))?;
        if let Some(err_field) = value.get("error") {
            return Err(TodayMiss::Soft(soft_error_message(err_field)));
        }

        serde_json::from_value(value).map_err(|e| TodayMiss::Hard(FetchError::Parse(e.to_string())))
    }

    async fn send(&self, date: Option<&str>) -> Result<(StatusCode, String), FetchError> {
        let mut query: Vec<(&str, &str)> = vec![("api_key", self.config.api_key.as_str())];
        if let Some(d) = date {
            query.push(("date", d));
        }

        let resp = self
            .http
            .get(&self.config.base_url)
            .query(&query)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("reading response body: {e}")))?;
        Ok((status, body))
    }
}

#[async_trait]
impl ApodFetcher for ApodClient {
    async fn fetch_latest(&self) -> Result<ApodRecord, FetchError> {
        ensure_metrics_described();
        counter!("apod_fetch_total").increment(1);
        let t0 = Instant::now();

        let result = match self.try_today().await {
            Ok(record) => Ok(record),
            Err(TodayMiss::Soft(reason)) => {
                let date = yesterday_local();
                counter!("apod_fallback_total").increment(1);
                tracing::warn!(%reason, %date, "no usable image for today, trying the previous day");
                self.fetch_for_date(&date).await
            }
            Err(TodayMiss::Hard(err)) => Err(err),
        };

        histogram!("apod_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        match &result {
            Ok(record) => {
                tracing::debug!(date = %record.date, title = %record.title, "fetched record");
            }
            Err(err) => {
                counter!("apod_fetch_errors_total").increment(1);
                tracing::error!(error = %err, "fetch cycle failed");
            }
        }
        result
    }
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("apod_fetch_total", "Fetch-with-fallback cycles started.");
        describe_counter!(
            "apod_fetch_errors_total",
            "Cycles that ended in a fetch error."
        );
        describe_counter!(
            "apod_fallback_total",
            "Cycles that fell back to the previous day."
        );
        describe_histogram!("apod_fetch_ms", "Wall time of a full fetch cycle in milliseconds.");
    });
}

/// The soft-failure `error` field is usually a string, but some deployments
/// wrap it in an object; render whatever arrived.
fn soft_error_message(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Yesterday per the machine's local calendar.
///
/// The source API decides "today" in UTC, so the two readings can disagree
/// around midnight; callers get the local one regardless.
fn yesterday_local() -> String {
    previous_day(Local::now().date_naive())
        .format(APOD_DATE_FORMAT)
        .to_string()
}

fn previous_day(date: NaiveDate) -> NaiveDate {
    date - Days::new(1)
}
