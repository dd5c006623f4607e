// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use dealerdesk_app::{
    ContactType, ListEntry, MakeListEntry, ReportColumn, ReportDefinition, ReportId,
    ReportService, UserId,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot reach {base_url} -- check api.base_url and that the service is up ({source})")]
    Connection {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("service rejected the request: {0}")]
    Service(String),
    #[error("decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let base_url = Url::parse(trimmed)
            .with_context(|| format!("api.base_url {trimmed:?} is not a valid URL"))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            bail!("api.base_url {trimmed:?} must be an http(s) URL -- e.g. https://dealer.example.com/api");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn report(&self, id: &ReportId) -> ApiResult<ReportDefinition> {
        let url = self.endpoint(&["reports", id.as_str()]);
        let report: ReportDefinition = self.fetch(self.http.get(url), "report")?;
        info!(report = %report.id, columns = report.columns.len(), "loaded report");
        Ok(report)
    }

    /// Columns `user` may place on a report built from `service`.
    pub fn report_columns(
        &self,
        service: ReportService,
        user: &UserId,
    ) -> ApiResult<Vec<ReportColumn>> {
        let mut url = self.endpoint(&["reports", user.as_str(), "columns"]);
        url.query_pairs_mut().append_pair("service", service.as_str());
        let columns: Vec<ReportColumn> = self.fetch(self.http.get(url), "report columns")?;
        debug!(service = service.as_str(), count = columns.len(), "fetched report columns");
        Ok(columns)
    }

    pub fn save_report_columns(&self, id: &ReportId, columns: &[ReportColumn]) -> ApiResult<()> {
        let url = self.endpoint(&["reports", id.as_str(), "columns"]);
        let request = self.http.post(url).json(&SaveColumnsRequest { columns });
        self.send(request)?;
        info!(report = %id, columns = columns.len(), "saved report columns");
        Ok(())
    }

    pub fn automakes(&self) -> ApiResult<Vec<MakeListEntry>> {
        let url = self.endpoint(&["inventory", "automakes"]);
        self.fetch(self.http.get(url), "automakes")
    }

    /// Models for `make_key` (`"landrover"`). The service answers with an
    /// empty object when it knows no models.
    pub fn automake_models(&self, make_key: &str) -> ApiResult<Vec<ListEntry>> {
        let url = self.endpoint(&["inventory", "automakes", make_key, "models"]);
        let body: serde_json::Value = self.fetch(self.http.get(url), "automake models")?;
        if !body.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(body).map_err(|source| ApiError::Decode {
            what: "automake models",
            source,
        })
    }

    pub fn contact_types(&self) -> ApiResult<Vec<ContactType>> {
        let url = self.endpoint(&["contacts", "0", "types"]);
        self.fetch(self.http.get(url), "contact types")
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, what: &'static str) -> ApiResult<T> {
        let body = self.send(request)?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode { what, source })
    }

    fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().map_err(|source| ApiError::Connection {
            base_url: self.base_url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(clean_error_response(status, &body));
        }
        if let Some(message) = service_error(&body) {
            return Err(ApiError::Service(message));
        }
        Ok(body)
    }
}

#[derive(Debug, Serialize)]
struct SaveColumnsRequest<'a> {
    columns: &'a [ReportColumn],
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    status: Option<String>,
    error: Option<String>,
    info: Option<String>,
}

/// Services report failures inside a 2xx body as `{"status": "Error", ...}`.
fn service_error(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<StatusEnvelope>(body).ok()?;
    if !envelope.status.is_some_and(|status| status.eq_ignore_ascii_case("error")) {
        return None;
    }
    let message = envelope
        .error
        .or(envelope.info)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| "unknown error".to_owned());
    Some(message)
}

fn clean_error_response(status: StatusCode, body: &str) -> ApiError {
    let message = if let Ok(envelope) = serde_json::from_str::<StatusEnvelope>(body)
        && let Some(error) = envelope.error.or(envelope.info)
        && !error.is_empty()
    {
        error
    } else if !body.is_empty() && body.len() < 100 && !body.contains('{') {
        body.trim().to_owned()
    } else {
        status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_owned()
    };
    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}
