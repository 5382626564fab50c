use crate::conversions::{Content, CustomData, EventRequest, EventsApi, GraphEvent, UserData};
use crate::domain::context::RequestContext;
use crate::domain::event::{ContentItem, ConversionEvent, CustomDataPayload, UserPayload};
use crate::error::{ConversionApiError, ErrorSink};
use std::sync::Arc;

/// Best-effort bridge from storefront hook payloads to the vendor events
/// API. `handle_event` never fails the caller: with no pixel configured it
/// is a no-op, and a failing send is routed to the error sink instead of
/// propagating into the storefront request.
pub struct ConversionForwarder {
    pub pixel_id: Option<String>,
    pub test_event_code: Option<String>,
    pub events_api: Arc<dyn EventsApi>,
    pub error_sink: Arc<dyn ErrorSink>,
}

impl ConversionForwarder {
    pub fn new(
        config: &crate::config::AppConfig,
        events_api: Arc<dyn EventsApi>,
        error_sink: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            pixel_id: config.pixel_id.clone(),
            test_event_code: config.test_event_code.clone(),
            events_api,
            error_sink,
        }
    }

    pub async fn handle_event(&self, event: &ConversionEvent, ctx: &RequestContext) {
        let Some(pixel_id) = &self.pixel_id else {
            tracing::debug!("no pixel configured, dropping conversion event");
            return;
        };

        let Some(graph_event) = build_event(event, ctx) else {
            // Payload carried none of the recognized fields. Nothing to send.
            return;
        };

        let request = EventRequest {
            pixel_id: pixel_id.clone(),
            events: vec![graph_event],
            test_event_code: self.test_event_code.clone(),
        };

        if let Err(e) = self.events_api.send_events(&request).await {
            self.error_sink
                .handle(ConversionApiError::SendEvent { source: e }, false);
        }
    }
}

/// Sparse mapping from the hook payload to the wire event. Each output
/// field is set only when its source field is present; a payload with no
/// recognized fields yields `None`.
pub fn build_event(event: &ConversionEvent, ctx: &RequestContext) -> Option<GraphEvent> {
    let graph_event = GraphEvent {
        event_name: event.event_type.clone(),
        event_time: event.event_time,
        user_data: event.user.as_ref().map(|u| build_user_data(u, ctx)),
        custom_data: event.custom_data.as_ref().map(build_custom_data),
        event_source_url: event.event_source_url.clone(),
    };

    if graph_event.is_empty() {
        return None;
    }
    Some(graph_event)
}

/// Tracking cookies and caller network details come from the request
/// context; identity fields are copied from the payload verbatim. Hashing
/// is deliberately not applied here.
fn build_user_data(user: &UserPayload, ctx: &RequestContext) -> UserData {
    UserData {
        fbp: ctx.fbp.clone().unwrap_or_default(),
        fbc: ctx.fbc.clone().unwrap_or_default(),
        client_ip_address: ctx.client_ip.clone(),
        client_user_agent: ctx.user_agent.clone(),
        email: user.email.clone(),
        first_name: user.firstname.clone(),
        last_name: user.lastname.clone(),
        phone: user.phone.clone(),
        date_of_birth: user.birthday.clone(),
        city: user.city.clone(),
        state: user.state_iso.clone(),
        zip_code: user.post_code.clone(),
        country: user.country_iso.clone(),
        gender: user.gender.clone(),
    }
}

fn build_custom_data(custom: &CustomDataPayload) -> CustomData {
    CustomData {
        currency: custom.currency.clone(),
        value: custom.value,
        // Only attached when at least one line item existed.
        contents: custom
            .contents
            .as_ref()
            .filter(|items| !items.is_empty())
            .map(|items| items.iter().map(build_content).collect()),
        content_type: custom.content_type.clone(),
        content_name: custom.content_name.clone(),
        content_category: custom.content_category.clone(),
        content_ids: custom.content_ids.clone(),
        num_items: custom.num_items,
        order_id: custom.order_id.clone(),
        search_string: custom.search_string.clone(),
    }
}

fn build_content(item: &ContentItem) -> Content {
    Content {
        id: item.id.clone(),
        title: item.title.clone(),
        category: item.category.clone(),
        item_price: item.item_price,
        brand: item.brand.clone(),
        quantity: item.quantity,
    }
}
