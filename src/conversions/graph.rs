use crate::config::AppConfig;
use crate::conversions::{EventRequest, EventsApi};
use anyhow::{bail, Result};
use serde_json::json;

/// Real events-API adapter. Posts one batch per call to
/// `{base}/{pixel_id}/events`; the shared client's timeout is the only
/// deadline applied.
pub struct GraphEventsApi {
    pub base_url: String,
    pub access_token: String,
    pub client: reqwest::Client,
}

impl GraphEventsApi {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.events_api_base.clone(),
            access_token: config.access_token.clone(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl EventsApi for GraphEventsApi {
    fn name(&self) -> &'static str {
        "graph"
    }

    async fn send_events(&self, request: &EventRequest) -> Result<()> {
        let events_url = format!("{}/{}/events", self.base_url, request.pixel_id);
        let mut body = json!({
            "data": request.events,
            "access_token": self.access_token,
        });
        if let Some(code) = &request.test_event_code {
            body["test_event_code"] = json!(code);
        }

        let resp = self.client.post(events_url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            bail!(
                "events API returned HTTP {}: {}",
                status.as_u16(),
                detail.chars().take(200).collect::<String>()
            );
        }

        Ok(())
    }
}
