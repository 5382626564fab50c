#[derive(Clone)]
pub struct AppConfig {
    pub pixel_id: Option<String>,
    pub access_token: String,
    pub events_api_base: String,
    pub taxonomy_api_base: String,
    pub test_event_code: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            pixel_id: std::env::var("PIXEL_ID").ok().filter(|v| !v.is_empty()),
            access_token: std::env::var("CAPI_ACCESS_TOKEN").unwrap_or_default(),
            events_api_base: std::env::var("EVENTS_API_BASE")
                .unwrap_or_else(|_| "https://graph.facebook.com/v12.0".to_string()),
            taxonomy_api_base: std::env::var("TAXONOMY_API_BASE")
                .unwrap_or_else(|_| "https://graph.facebook.com/v12.0".to_string()),
            test_event_code: std::env::var("TEST_EVENT_CODE").ok().filter(|v| !v.is_empty()),
        }
    }
}
