use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::products::model::ProductRecord;

/// Namespace prefix; bump on schema-incompatible ProductRecord changes.
const CACHE_PREFIX: &str = "search_v1:";

/// Cache key for a text query: prefix + lowercase trimmed query, so that
/// "Oreo Cookies" and " oreo cookies " share an entry.
pub fn cache_key(query: &str) -> String {
    format!("{}{}", CACHE_PREFIX, query.trim().to_lowercase())
}

/// Read-through / write-through store for resolved text searches.
///
/// No eviction and no TTL: entries live until the table is cleared. Cache
/// failures must never fail a search, so both methods are infallible at the
/// seam and log internally.
#[async_trait]
pub trait SearchCache: Send + Sync {
    async fn get(&self, query: &str) -> Option<ProductRecord>;
    async fn put(&self, query: &str, product: &ProductRecord);
}

/// Postgres-backed cache over the `search_cache` table.
#[derive(Clone)]
pub struct PgSearchCache {
    db: PgPool,
}

impl PgSearchCache {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SearchCache for PgSearchCache {
    async fn get(&self, query: &str) -> Option<ProductRecord> {
        let key = cache_key(query);
        let row: Result<Option<(serde_json::Value,)>, sqlx::Error> =
            sqlx::query_as(r#"SELECT product FROM search_cache WHERE cache_key = $1"#)
                .bind(&key)
                .fetch_optional(&self.db)
                .await;
        match row {
            Ok(Some((value,))) => match serde_json::from_value(value) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(error = %e, %key, "cached product failed to deserialize; ignoring entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, %key, "cache read error");
                None
            }
        }
    }

    async fn put(&self, query: &str, product: &ProductRecord) {
        let key = cache_key(query);
        let value = match serde_json::to_value(product) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, %key, "cache serialize error");
                return;
            }
        };
        let res = sqlx::query(
            r#"
            INSERT INTO search_cache (cache_key, product)
            VALUES ($1, $2)
            ON CONFLICT (cache_key) DO UPDATE SET product = EXCLUDED.product
            "#,
        )
        .bind(&key)
        .bind(value)
        .execute(&self.db)
        .await;
        if let Err(e) = res {
            warn!(error = %e, %key, "cache write error");
        }
    }
}

/// In-process cache used by tests and the `AppState::fake` constructor.
#[derive(Default)]
pub struct MemorySearchCache {
    entries: RwLock<HashMap<String, ProductRecord>>,
}

#[async_trait]
impl SearchCache for MemorySearchCache {
    async fn get(&self, query: &str) -> Option<ProductRecord> {
        self.entries
            .read()
            .ok()
            .and_then(|map| map.get(&cache_key(query)).cloned())
    }

    async fn put(&self, query: &str, product: &ProductRecord) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(cache_key(query), product.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::model::Nutrition;
    use uuid::Uuid;

    fn product(name: &str) -> ProductRecord {
        ProductRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            brand: String::new(),
            category: String::new(),
            image_url: None,
            health_reasoning: String::new(),
            ingredients: vec![],
            nutrition: Nutrition::default(),
            certifications: vec![],
            pros: vec![],
            cons: vec![],
            additives: vec![],
            healthier_alternatives: None,
        }
    }

    #[test]
    fn keys_are_case_and_whitespace_insensitive() {
        assert_eq!(cache_key("Oreo Cookies"), cache_key(" oreo cookies "));
        assert_eq!(cache_key("Oreo Cookies"), "search_v1:oreo cookies");
    }

    #[tokio::test]
    async fn memory_cache_roundtrip_with_normalized_key() {
        let cache = MemorySearchCache::default();
        cache.put("Oreo Cookies", &product("Oreo")).await;
        let hit = cache.get(" OREO cookies ").await.expect("should hit");
        assert_eq!(hit.name, "Oreo");
        assert!(cache.get("digestives").await.is_none());
    }

    #[tokio::test]
    async fn later_write_wins_for_same_key() {
        let cache = MemorySearchCache::default();
        cache.put("milk", &product("Milk A")).await;
        cache.put(" MILK ", &product("Milk B")).await;
        assert_eq!(cache.get("milk").await.unwrap().name, "Milk B");
    }
}
