use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::lookup::record::{select_best, FoodFactsRecord};

const PAGE_SIZE: u32 = 5;

/// Grounding-data source for text searches. A `None` always means "no data";
/// lookup failures degrade to the AI-only path instead of failing the search.
#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn search(&self, query: &str) -> Option<FoodFactsRecord>;
}

/// OpenFoodFacts search client.
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    http: Client,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    async fn fetch_candidates(&self, query: &str) -> anyhow::Result<Vec<Value>> {
        let url = format!("{}/cgi/search.pl", self.base_url);
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let products = body
            .get("products")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(products)
    }
}

#[async_trait]
impl FoodLookup for OpenFoodFactsClient {
    async fn search(&self, query: &str) -> Option<FoodFactsRecord> {
        match self.fetch_candidates(query).await {
            Ok(candidates) => {
                debug!(query, count = candidates.len(), "openfoodfacts candidates");
                select_best(&candidates)
            }
            Err(e) => {
                // No retry: a failed lookup just loses the grounding context.
                warn!(error = %e, query, "openfoodfacts lookup failed");
                None
            }
        }
    }
}
