//! Orchestration of the search and scan pipelines.
//!
//! Text path: cache check → food-database lookup → prompt construction →
//! AI completion → consistency guard → cache write. Image path: direct AI
//! call with inline image data, never cached.

use tracing::{debug, info, instrument};

use crate::ai::{prompts, response, schema, AnalysisError, CompletionBackend, CompletionRequest, Part};
use crate::lookup::FoodLookup;
use crate::products::cache::SearchCache;
use crate::products::model::{MealItem, ProductRecord};
use crate::products::validate::enforce_consistency;

#[instrument(skip(cache, lookup, ai))]
pub async fn search_by_name(
    cache: &dyn SearchCache,
    lookup: &dyn FoodLookup,
    ai: &dyn CompletionBackend,
    query: &str,
) -> Result<ProductRecord, AnalysisError> {
    let query = query.trim();

    if let Some(hit) = cache.get(query).await {
        info!(query, "search served from cache");
        return Ok(hit);
    }

    // Lookup failure degrades to the AI-only path; it never fails the search.
    let grounding = lookup.search(query).await;
    let prompt = match &grounding {
        Some(record) => {
            debug!(query, "lookup grounding available");
            prompts::grounded_search_prompt(query, record)
        }
        None => prompts::ungrounded_search_prompt(query),
    };

    let text = ai
        .generate(CompletionRequest::text(prompt, schema::product_schema()))
        .await?;
    let mut product = enforce_consistency(response::parse_product(&text)?);

    product.image_url = grounding
        .as_ref()
        .and_then(|r| r.image_url.clone())
        .or_else(|| Some(placeholder_image_url(&product.name)));

    cache.put(query, &product).await;
    info!(query, product = %product.name, "search resolved");
    Ok(product)
}

#[instrument(skip(ai, image_b64))]
pub async fn analyze_image(
    ai: &dyn CompletionBackend,
    image_b64: String,
    mime_type: String,
) -> Result<ProductRecord, AnalysisError> {
    let request = CompletionRequest {
        parts: vec![
            Part::InlineImage {
                mime_type,
                data_b64: image_b64,
            },
            Part::Text(prompts::scan_instruction()),
        ],
        schema: schema::product_schema(),
    };
    let text = ai.generate(request).await?;
    let product = enforce_consistency(response::parse_product(&text)?);
    info!(product = %product.name, "image analyzed");
    Ok(product)
}

#[instrument(skip(ai))]
pub async fn analyze_meal(
    ai: &dyn CompletionBackend,
    description: &str,
) -> Result<Vec<MealItem>, AnalysisError> {
    let request = CompletionRequest::text(
        prompts::meal_breakdown_prompt(description),
        schema::meal_breakdown_schema(),
    );
    let text = ai.generate(request).await?;
    let items = response::parse_meal_items(&text)?;
    info!(items = items.len(), "meal description broken down");
    Ok(items)
}

fn placeholder_image_url(name: &str) -> String {
    let encoded: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '+' })
        .collect();
    format!("https://placehold.co/400x400/e2e8f0/1e293b?text={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::FoodFactsRecord;
    use crate::products::cache::MemorySearchCache;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeAi {
        response: String,
        calls: AtomicUsize,
    }

    impl FakeAi {
        fn returning(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionBackend for FakeAi {
        async fn generate(&self, _request: CompletionRequest) -> Result<String, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct FakeLookup {
        record: Option<FoodFactsRecord>,
        calls: AtomicUsize,
    }

    impl FakeLookup {
        fn with(record: Option<FoodFactsRecord>) -> Self {
            Self {
                record,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl FoodLookup for FakeLookup {
        async fn search(&self, _query: &str) -> Option<FoodFactsRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.record.clone()
        }
    }

    fn oreo_completion() -> String {
        json!({
            "name": "Oreo Original",
            "brand": "Oreo",
            "category": "Biscuits",
            "health_reasoning": "Highly processed, high in sugar.",
            "ingredients": [
                { "name": "wheat flour", "status": "neutral", "reason": "refined grain" },
                { "name": "sugar", "status": "bad", "reason": "added sugar" }
            ],
            "nutrition": { "calories": 471, "protein": 5, "carbs": 69, "fats": 20, "sugar": 38 },
            "pros": [], "cons": ["high sugar"], "certifications": [], "additives": ["soy lecithin"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn repeat_query_hits_cache_and_skips_both_adapters() {
        let cache = MemorySearchCache::default();
        let lookup = FakeLookup::with(None);
        let ai = FakeAi::returning(oreo_completion());

        let first = search_by_name(&cache, &lookup, &ai, "Oreo Cookies")
            .await
            .expect("first search");
        assert!(first.name.contains("Oreo"));
        assert_eq!(lookup.calls(), 1);
        assert_eq!(ai.calls(), 1);

        // Different casing and whitespace must still hit the cache.
        let second = search_by_name(&cache, &lookup, &ai, " oreo cookies ")
            .await
            .expect("second search");
        assert_eq!(second.name, first.name);
        assert_eq!(lookup.calls(), 1);
        assert_eq!(ai.calls(), 1);
    }

    #[tokio::test]
    async fn non_food_query_surfaces_not_found_and_is_not_cached() {
        let cache = MemorySearchCache::default();
        let lookup = FakeLookup::with(None);
        let ai = FakeAi::returning(
            json!({
                "name": "NON_FOOD_ITEM",
                "ingredients": [],
                "nutrition": { "calories": 0, "protein": 0, "carbs": 0, "fats": 0, "sugar": 0 }
            })
            .to_string(),
        );

        let err = search_by_name(&cache, &lookup, &ai, "laptop")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NotFood));
        assert!(cache.get("laptop").await.is_none());

        // A failed query is retried upstream on the next attempt.
        let _ = search_by_name(&cache, &lookup, &ai, "laptop").await;
        assert_eq!(ai.calls(), 2);
    }

    #[tokio::test]
    async fn lookup_image_preferred_over_placeholder() {
        let cache = MemorySearchCache::default();
        let lookup = FakeLookup::with(Some(FoodFactsRecord {
            name: Some("Oreo Original".into()),
            image_url: Some("https://img.example/oreo.jpg".into()),
            calories_100g: Some(471.0),
            ingredients_text: Some("wheat flour, sugar".into()),
            ..Default::default()
        }));
        let ai = FakeAi::returning(oreo_completion());

        let product = search_by_name(&cache, &lookup, &ai, "oreo")
            .await
            .expect("search");
        assert_eq!(product.image_url.as_deref(), Some("https://img.example/oreo.jpg"));
    }

    #[tokio::test]
    async fn missing_grounding_falls_back_to_placeholder_image() {
        let cache = MemorySearchCache::default();
        let lookup = FakeLookup::with(None);
        let ai = FakeAi::returning(oreo_completion());

        let product = search_by_name(&cache, &lookup, &ai, "oreo")
            .await
            .expect("search");
        let url = product.image_url.expect("placeholder expected");
        assert!(url.starts_with("https://placehold.co/"));
        assert!(url.contains("Oreo"));
    }

    #[tokio::test]
    async fn consistency_guard_runs_on_search_results() {
        let cache = MemorySearchCache::default();
        let lookup = FakeLookup::with(None);
        // Model violates the sugar rule; the guard must correct it.
        let ai = FakeAi::returning(
            json!({
                "name": "Choc Bar",
                "ingredients": [{ "name": "cane sugar", "status": "bad", "reason": "added sugar" }],
                "nutrition": { "calories": 500, "protein": 5, "carbs": 60, "fats": 25, "sugar": 0 }
            })
            .to_string(),
        );

        let product = search_by_name(&cache, &lookup, &ai, "choc bar")
            .await
            .expect("search");
        assert!(product.nutrition.sugar > 0.0);
    }

    #[tokio::test]
    async fn scan_path_never_touches_the_cache() {
        let ai = FakeAi::returning(oreo_completion());
        let product = analyze_image(&ai, "aGVsbG8=".into(), "image/jpeg".into())
            .await
            .expect("scan");
        assert_eq!(product.name, "Oreo Original");
        assert_eq!(ai.calls(), 1);
    }
}
