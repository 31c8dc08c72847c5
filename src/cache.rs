use crate::article::ServerArticle;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Read-through cache for article listings, the one piece of shared
/// mutable state in the process. Entries expire after the TTL; article
/// writes invalidate the whole cache.
pub struct ArticleCache {
    entries: Cache<String, Arc<Vec<ServerArticle>>>,
}

impl ArticleCache {
    pub fn new(ttl: Duration) -> Self {
        ArticleCache {
            entries: Cache::builder()
                .max_capacity(64)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Cache key for one listing request.
    pub fn key(category: Option<&str>, limit: i64) -> String {
        format!("{}:{}", category.unwrap_or("*"), limit)
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<ServerArticle>>> {
        self.entries.get(key)
    }

    pub fn put(&self, key: String, articles: Vec<ServerArticle>) {
        self.entries.insert(key, Arc::new(articles));
    }

    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::DBArticle;
    use chrono::Utc;

    fn article(id: i32) -> ServerArticle {
        let now = Utc::now();
        ServerArticle::new(DBArticle {
            id,
            title: "A Weekend in Piran".into(),
            content: "<p>Salt pans and Venetian alleys.</p>".into(),
            category_id: None,
            author: "Editorial Team".into(),
            tags: None,
            feature_img: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = ArticleCache::new(Duration::from_millis(50));
        let key = ArticleCache::key(None, 10);
        cache.put(key.clone(), vec![article(1)]);
        assert!(cache.get(&key).is_some());

        std::thread::sleep(Duration::from_millis(80));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn writes_invalidate_every_entry() {
        let cache = ArticleCache::new(Duration::from_secs(60));
        cache.put(ArticleCache::key(None, 10), vec![article(1)]);
        cache.put(ArticleCache::key(Some("guides"), 5), vec![article(2)]);

        cache.invalidate_all();
        assert!(cache.get(&ArticleCache::key(None, 10)).is_none());
        assert!(cache.get(&ArticleCache::key(Some("guides"), 5)).is_none());
    }

    #[test]
    fn keys_distinguish_category_and_limit() {
        assert_ne!(
            ArticleCache::key(None, 10),
            ArticleCache::key(Some("guides"), 10)
        );
        assert_ne!(ArticleCache::key(None, 10), ArticleCache::key(None, 20));
    }
}
