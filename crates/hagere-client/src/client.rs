//! backend REST client
//!
//! one thin method per endpoint; responses decode into the domain types from
//! `hagere-distribution`. no caching: every call is a fresh source of truth.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use hagere_distribution::{DistributionRecord, Game};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::session::Session;

#[derive(Clone)]
pub struct AdminClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
}

impl AdminClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url,
            http,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// attach the bearer token, send, and map the response envelope
    ///
    /// a 401 clears the session before surfacing `Unauthorized`; any other
    /// non-2xx becomes `Status` with the backend's detail text
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let request = match self.session.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.clear().await;
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!(path, ?query, "GET");
        self.send(self.http.get(self.endpoint(path)).query(query)).await
    }

    /// distribution rows for one game; `redistribute` forces the backend to
    /// recompute shares even when a prior distribution exists
    pub async fn distribute_winnings(
        &self,
        game_id: &str,
        redistribute: bool,
    ) -> Result<Vec<DistributionRecord>> {
        let query = [
            ("game_id", game_id.to_string()),
            ("redistribute", redistribute.to_string()),
        ];
        let value = self.get_json("/games/distribute_winnings", &query).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// cross-game ledger rows; `None` bounds are unbounded and an absent
    /// phone means all beneficiaries
    pub async fn winning_distribution(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        phone: Option<&str>,
    ) -> Result<Vec<DistributionRecord>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start {
            query.push(("start_date", start.to_rfc3339()));
        }
        if let Some(end) = end {
            query.push(("end_date", end.to_rfc3339()));
        }
        if let Some(phone) = phone.filter(|p| !p.is_empty()) {
            query.push(("phone", phone.to_string()));
        }
        let value = self.get_json("/games/winning_distribution", &query).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// approve every pending record of one game
    ///
    /// not idempotent by contract: never call twice concurrently for the same
    /// game. the caller's loading state is the guard.
    pub async fn approve_distribution(&self, game_id: &str) -> Result<Vec<DistributionRecord>> {
        let path = format!("/games/update_distribution/{game_id}");
        debug!(%game_id, "PUT approve distribution");
        let value = self.send(self.http.put(self.endpoint(&path))).await?;
        parse_approval_payload(value)
    }

    /// ledger-wide pre-aggregated summary
    pub async fn winning_summary(&self) -> Result<WinningSummary> {
        let value = self.get_json("/games/winning_summary", &[]).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// games listing, optionally bounded by date
    pub async fn games_by_date_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Game>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start {
            query.push(("start_date", start.to_rfc3339()));
        }
        if let Some(end) = end {
            query.push(("end_date", end.to_rfc3339()));
        }
        let value = self.get_json("/games/by_date_range/", &query).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// backend-side aggregate over the whole winnings ledger
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningSummary {
    pub total_games: u64,
    pub total_winning: f64,
    pub total_distributable: f64,
    pub total_distributed: f64,
    pub approved_count: u64,
    pub pending_count: u64,
}

/// pull the `detail` field out of an error body, falling back to the raw text
fn extract_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct Detail {
        detail: String,
    }

    match serde_json::from_str::<Detail>(body) {
        Ok(d) => d.detail,
        Err(_) if body.trim().is_empty() => "request failed".into(),
        Err(_) => body.trim().to_string(),
    }
}

/// the approval endpoint signals "did not take effect" with an empty or
/// falsy payload rather than an error status
fn parse_approval_payload(value: Value) -> Result<Vec<DistributionRecord>> {
    match value {
        Value::Null | Value::Bool(false) => {
            Err(ApiError::NotApproved("empty approval payload".into()))
        }
        Value::String(s) if s.is_empty() => {
            Err(ApiError::NotApproved("empty approval payload".into()))
        }
        other => serde_json::from_value(other).map_err(|e| ApiError::Decode(e.to_string())),
    }
}
