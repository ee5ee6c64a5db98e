//! Async HTTP client wrapping the RSVP JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use rsvp_core::record::{RsvpRecord, Submission};
use serde::Deserialize;

/// Connection settings for the RSVP API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the RSVP JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct ListBody {
  rsvps: Vec<RsvpRecord>,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Server acknowledgement of an accepted submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAck {
  pub message:      String,
  pub submitted_at: DateTime<Utc>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /rsvps`
  pub async fn list_rsvps(&self) -> Result<Vec<RsvpRecord>> {
    let resp = self
      .client
      .get(self.url("/rsvps"))
      .send()
      .await
      .context("GET /rsvps failed")?;

    let body: ListBody = ok_or_error(resp, "GET /rsvps")
      .await?
      .json()
      .await
      .context("deserialising RSVPs")?;
    Ok(body.rsvps)
  }

  /// `POST /rsvp`
  pub async fn submit(&self, submission: &Submission) -> Result<SubmitAck> {
    let resp = self
      .client
      .post(self.url("/rsvp"))
      .json(submission)
      .send()
      .await
      .context("POST /rsvp failed")?;

    ok_or_error(resp, "POST /rsvp")
      .await?
      .json()
      .await
      .context("deserialising acknowledgement")
  }
}

/// Pass a successful response through; otherwise turn the server's
/// `{"error": ...}` body into an error.
async fn ok_or_error(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let detail = resp
    .json::<ErrorBody>()
    .await
    .map(|b| b.error)
    .unwrap_or_else(|_| status.to_string());
  Err(anyhow!("{what} → {status}: {detail}"))
}
