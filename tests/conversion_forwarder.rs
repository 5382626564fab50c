use conversions_gateway::conversions::mock::MockEventsApi;
use conversions_gateway::domain::context::RequestContext;
use conversions_gateway::domain::event::{ContentItem, ConversionEvent, CustomDataPayload, UserPayload};
use conversions_gateway::error::{ConversionApiError, ErrorSink};
use conversions_gateway::service::conversion_forwarder::ConversionForwarder;
use std::sync::{Arc, Mutex};

struct RecordingSink {
    records: Mutex<Vec<(String, bool)>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    fn records(&self) -> Vec<(String, bool)> {
        self.records.lock().unwrap().clone()
    }
}

impl ErrorSink for RecordingSink {
    fn handle(&self, error: ConversionApiError, fatal: bool) {
        self.records.lock().unwrap().push((error.to_string(), fatal));
    }
}

fn forwarder(
    pixel_id: Option<&str>,
    behavior: &str,
) -> (ConversionForwarder, Arc<MockEventsApi>, Arc<RecordingSink>) {
    let api = Arc::new(MockEventsApi::new(behavior));
    let sink = Arc::new(RecordingSink::new());
    let forwarder = ConversionForwarder {
        pixel_id: pixel_id.map(str::to_string),
        test_event_code: None,
        events_api: api.clone(),
        error_sink: sink.clone(),
    };
    (forwarder, api, sink)
}

fn purchase_event() -> ConversionEvent {
    ConversionEvent {
        event_type: Some("Purchase".to_string()),
        custom_data: Some(CustomDataPayload {
            value: Some(42.0),
            currency: Some("USD".to_string()),
            contents: Some(vec![ContentItem {
                id: Some("7".to_string()),
                quantity: Some(2),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn no_pixel_performs_no_network_calls() {
    let (forwarder, api, sink) = forwarder(None, "ALWAYS_SUCCESS");

    forwarder
        .handle_event(&purchase_event(), &RequestContext::default())
        .await;

    assert_eq!(api.call_count(), 0);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn empty_payload_is_treated_as_success_without_sending() {
    let (forwarder, api, sink) = forwarder(Some("px1"), "ALWAYS_SUCCESS");

    forwarder
        .handle_event(&ConversionEvent::default(), &RequestContext::default())
        .await;

    assert_eq!(api.call_count(), 0);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn purchase_maps_one_sparse_content_line() {
    let (forwarder, api, _sink) = forwarder(Some("px1"), "ALWAYS_SUCCESS");

    forwarder
        .handle_event(&purchase_event(), &RequestContext::default())
        .await;

    assert_eq!(api.call_count(), 1);
    let request = api.captured_requests().remove(0);
    assert_eq!(request.pixel_id, "px1");
    assert_eq!(request.events.len(), 1);

    let event = &request.events[0];
    assert_eq!(event.event_name.as_deref(), Some("Purchase"));

    let custom = event.custom_data.as_ref().unwrap();
    assert_eq!(custom.value, Some(42.0));
    assert_eq!(custom.currency.as_deref(), Some("USD"));

    let contents = custom.contents.as_ref().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].id.as_deref(), Some("7"));
    assert_eq!(contents[0].quantity, Some(2));

    // Fields never supplied must not appear on the wire at all.
    let wire = serde_json::to_value(event).unwrap();
    assert!(wire["custom_data"].get("content_name").is_none());
    assert!(wire["custom_data"]["contents"][0].get("title").is_none());
    assert!(wire.get("event_time").is_none());
}

#[tokio::test]
async fn empty_contents_list_is_omitted_from_custom_data() {
    let (forwarder, api, _sink) = forwarder(Some("px1"), "ALWAYS_SUCCESS");

    let event = ConversionEvent {
        event_type: Some("Purchase".to_string()),
        custom_data: Some(CustomDataPayload {
            currency: Some("USD".to_string()),
            contents: Some(vec![]),
            ..Default::default()
        }),
        ..Default::default()
    };

    forwarder.handle_event(&event, &RequestContext::default()).await;

    let request = api.captured_requests().remove(0);
    let custom = request.events[0].custom_data.as_ref().unwrap();
    assert_eq!(custom.contents, None);
    assert_eq!(custom.currency.as_deref(), Some("USD"));
}

#[tokio::test]
async fn user_fields_pass_through_with_context_enrichment() {
    let (forwarder, api, _sink) = forwarder(Some("px1"), "ALWAYS_SUCCESS");

    let event = ConversionEvent {
        event_type: Some("ViewContent".to_string()),
        user: Some(UserPayload {
            email: Some("jane@example.com".to_string()),
            firstname: Some("Jane".to_string()),
            country_iso: Some("FR".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let ctx = RequestContext::new(
        Some("203.0.113.9".to_string()),
        Some("Mozilla/5.0".to_string()),
        Some("fb.1.1700000000.123".to_string()),
        None,
    );

    forwarder.handle_event(&event, &ctx).await;

    let request = api.captured_requests().remove(0);
    let user = request.events[0].user_data.as_ref().unwrap();
    assert_eq!(user.fbp, "fb.1.1700000000.123");
    assert_eq!(user.fbc, "");
    assert_eq!(user.client_ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(user.client_user_agent.as_deref(), Some("Mozilla/5.0"));
    assert_eq!(user.email.as_deref(), Some("jane@example.com"));
    assert_eq!(user.first_name.as_deref(), Some("Jane"));
    assert_eq!(user.country.as_deref(), Some("FR"));
    assert_eq!(user.last_name, None);
}

#[tokio::test]
async fn send_failure_is_swallowed_into_one_non_fatal_record() {
    // Run with RUST_LOG=debug to see the swallowed error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let (forwarder, api, sink) = forwarder(Some("px1"), "ALWAYS_FAILURE");

    forwarder
        .handle_event(&purchase_event(), &RequestContext::default())
        .await;

    assert_eq!(api.call_count(), 1);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "failed to send conversion API event");
    assert!(!records[0].1);
}

#[tokio::test]
async fn test_event_code_is_forwarded_when_configured() {
    let api = Arc::new(MockEventsApi::new("ALWAYS_SUCCESS"));
    let sink = Arc::new(RecordingSink::new());
    let forwarder = ConversionForwarder {
        pixel_id: Some("px1".to_string()),
        test_event_code: Some("TEST71042".to_string()),
        events_api: api.clone(),
        error_sink: sink,
    };

    forwarder
        .handle_event(&purchase_event(), &RequestContext::default())
        .await;

    let request = api.captured_requests().remove(0);
    assert_eq!(request.test_event_code.as_deref(), Some("TEST71042"));
}
