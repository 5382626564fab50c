use serde::{Deserialize, Serialize};

/// Storefront event as delivered by the host framework's hooks. Every field
/// is optional: hooks fire with whatever subset they know about, and only
/// the fields actually present make it onto the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionEvent {
    pub event_type: Option<String>,
    /// Unix seconds.
    pub event_time: Option<i64>,
    pub user: Option<UserPayload>,
    pub custom_data: Option<CustomDataPayload>,
    pub event_source_url: Option<String>,
}

/// Customer identity fields, passed through exactly as supplied.
/// No hashing or normalization happens at this layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub city: Option<String>,
    pub state_iso: Option<String>,
    pub post_code: Option<String>,
    pub country_iso: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomDataPayload {
    pub currency: Option<String>,
    pub value: Option<f64>,
    pub contents: Option<Vec<ContentItem>>,
    pub content_type: Option<String>,
    pub content_name: Option<String>,
    pub content_category: Option<String>,
    pub content_ids: Option<Vec<String>>,
    pub num_items: Option<u32>,
    pub order_id: Option<String>,
    pub search_string: Option<String>,
}

/// One line item of a commerce event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub item_price: Option<f64>,
    pub brand: Option<String>,
    pub quantity: Option<u32>,
}
