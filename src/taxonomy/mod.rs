use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lookup of the advertiser-side taxonomy ID recorded for a local store
/// category. The mapping store itself lives outside this crate.
#[async_trait::async_trait]
pub trait CategoryMappingRepo: Send + Sync {
    async fn external_category_id(&self, category_id: i64) -> Result<Option<String>>;
}

/// Client for the remote taxonomy API. Every failure mode collapses to
/// "no result": a missing mapping, a transport error, and a body that is
/// not a collection all look the same to the caller.
pub struct TaxonomyClient {
    pub base_url: String,
    pub client: reqwest::Client,
    pub mapping_repo: Arc<dyn CategoryMappingRepo>,
}

impl TaxonomyClient {
    pub fn new(
        config: &crate::config::AppConfig,
        client: reqwest::Client,
        mapping_repo: Arc<dyn CategoryMappingRepo>,
    ) -> Self {
        Self {
            base_url: config.taxonomy_api_base.clone(),
            client,
            mapping_repo,
        }
    }

    /// Resolve a local category to its taxonomy entry: first result of the
    /// remote lookup, or `None`. One outbound call at most, no retries, no
    /// cache.
    pub async fn resolve_category(&self, category_id: i64) -> Option<Value> {
        let external_id = match self.mapping_repo.external_category_id(category_id).await {
            Ok(Some(id)) => id,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(category_id, error = %e, "category mapping lookup failed");
                return None;
            }
        };

        let body = self.get(&format!("taxonomy/{external_id}"), &[], &[]).await?;
        first_entry(body)
    }

    async fn get(&self, path: &str, fields: &[&str], extra: &[(String, String)]) -> Option<Value> {
        let url = format!("{}/{}", self.base_url, path);
        let query = merge_query(fields, extra);

        let resp = match self.client.get(url).query(&query).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(path, error = %e, "taxonomy API request failed");
                return None;
            }
        };

        match resp.json::<Value>().await {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(path, error = %e, "taxonomy API response not decodable");
                None
            }
        }
    }
}

/// Build the request query: the `fields` CSV filter goes in first (present
/// even when empty), then caller-supplied pairs, which win on collision.
pub fn merge_query(fields: &[&str], extra: &[(String, String)]) -> Vec<(String, String)> {
    let mut query = BTreeMap::new();
    query.insert("fields".to_string(), fields.join(","));
    for (k, v) in extra {
        query.insert(k.clone(), v.clone());
    }
    query.into_iter().collect()
}

/// First element of a decoded collection: arrays yield their first item,
/// objects their first member value, anything else yields `None`.
pub fn first_entry(value: Value) -> Option<Value> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(members) => members.into_iter().next().map(|(_, v)| v),
        _ => None,
    }
}
