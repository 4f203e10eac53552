//! News Service
//!
//! Orchestrates one aggregation pass: cache lookup, feed fetch,
//! normalization and filtering, bounded-concurrency image enrichment,
//! and cache write-back. Assembled result sets are memoized per query
//! shape for a short TTL so bursts of identical requests skip all
//! network I/O.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use yerel_core::NewsItem;
use yerel_news::{GoogleNewsClient, ImageEnricher};

/// How long an assembled result set stays valid
const RESULT_CACHE_TTL_SECS: u64 = 180;

/// Cache entry with expiration
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Configuration for NewsService
#[derive(Debug, Clone)]
pub struct NewsServiceConfig {
    /// Cache TTL for assembled result sets (in seconds)
    pub cache_ttl_secs: u64,
}

impl Default for NewsServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: RESULT_CACHE_TTL_SECS,
        }
    }
}

/// Aggregation service for district and city-wide news
pub struct NewsService {
    google_news: GoogleNewsClient,
    enricher: ImageEnricher,
    config: NewsServiceConfig,
    /// Assembled result sets keyed by query shape
    cache: RwLock<HashMap<String, CacheEntry<Vec<NewsItem>>>>,
}

impl NewsService {
    /// Create a new NewsService sharing one HTTP client across all
    /// upstream call sites
    pub fn new(client: reqwest::Client, config: NewsServiceConfig) -> Self {
        info!(
            "Initializing NewsService (result cache TTL: {}s)",
            config.cache_ttl_secs
        );
        Self {
            google_news: GoogleNewsClient::new(client.clone()),
            enricher: ImageEnricher::new(client),
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch, filter and enrich news for one query shape.
    ///
    /// Never fails: a feed fetch or parse failure degrades to an empty
    /// result set, and enrichment failures only leave images absent.
    pub async fn fetch_news(
        &self,
        query: &str,
        district: &str,
        limit: usize,
        strict: bool,
    ) -> Vec<NewsItem> {
        let key = cache_key(district, query, limit, strict);

        if let Some(items) = self.cached(&key).await {
            debug!("Cache hit for '{}' ({} items)", key, items.len());
            return items;
        }

        let mut items = match self.google_news.search(query, district, limit, strict).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Feed fetch failed for query '{}': {}", query, e);
                Vec::new()
            }
        };

        self.enricher.enrich_items(&mut items).await;

        self.store(key, items.clone()).await;
        items
    }

    /// Cached payload for `key`, evicting it first when expired
    async fn cached(&self, key: &str) -> Option<Vec<NewsItem>> {
        {
            let cache = self.cache.read().await;
            match cache.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.data.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired; re-check under the write lock before evicting, a
        // racing refresh may have replaced the entry
        let mut cache = self.cache.write().await;
        if let Some(entry) = cache.get(key) {
            if !entry.is_expired() {
                return Some(entry.data.clone());
            }
            cache.remove(key);
        }
        None
    }

    async fn store(&self, key: String, items: Vec<NewsItem>) {
        let mut cache = self.cache.write().await;
        cache.insert(
            key,
            CacheEntry::new(items, Duration::from_secs(self.config.cache_ttl_secs)),
        );
    }
}

fn cache_key(district: &str, query: &str, limit: usize, strict: bool) -> String {
    format!("{}:{}:{}:{}", district, query, limit, strict)
}

/// Build the search query for one district.
///
/// Two district names are ambiguous enough in Turkish news to need
/// negative keywords: Beşiktaş (the football club) and Avcılar
/// ("hunters").
pub fn district_query(district: &str) -> String {
    let mut query = format!("\"{}\" İstanbul yerel haberleri", district);
    match district {
        "Beşiktaş" => query.push_str(" -transfer -maç -stadyum -futbol"),
        "Avcılar" => query.push_str(" -avcılık -avcı -tüfek"),
        _ => {}
    }
    query
}

/// City-wide breaking-news query: OR-grouped incident keywords, with the
/// other major cities excluded outright because the feed sometimes leaks
/// them past the quoted city term
pub fn breaking_query() -> String {
    concat!(
        "\"İstanbul\" (son dakika OR belediye OR asayiş OR kaza OR trafik OR yangın OR operasyon OR gözaltı) ",
        "-Bursa -Ankara -İzmir -Antalya -Adana -Konya -Kayseri -Gaziantep -Sakarya -Kocaeli -Edirne -Tekirdağ -Eskişehir"
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items(n: usize) -> Vec<NewsItem> {
        (0..n)
            .map(|i| NewsItem {
                title: format!("Haber {}", i),
                link: format!("https://example.com/{}", i),
                image: None,
                source: "Haber".to_string(),
                date: "--:--".to_string(),
                district: "Fatih".to_string(),
            })
            .collect()
    }

    fn service() -> NewsService {
        NewsService::new(reqwest::Client::new(), NewsServiceConfig::default())
    }

    #[tokio::test]
    async fn cache_round_trip_returns_payload_unchanged() {
        let service = service();
        let items = sample_items(3);

        service.store("k".to_string(), items.clone()).await;
        let cached = service.cached("k").await.expect("fresh entry");

        assert_eq!(cached.len(), 3);
        assert_eq!(cached[0].link, items[0].link);
    }

    #[tokio::test]
    async fn cache_miss_on_unknown_key() {
        assert!(service().cached("unknown").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn cache_expires_after_ttl_and_is_evicted() {
        let service = service();
        service.store("k".to_string(), sample_items(1)).await;

        tokio::time::advance(Duration::from_secs(RESULT_CACHE_TTL_SECS - 1)).await;
        assert!(service.cached("k").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(service.cached("k").await.is_none());
        // Evicted, not just hidden
        assert!(service.cache.read().await.get("k").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_key_can_be_repopulated() {
        let service = service();
        service.store("k".to_string(), sample_items(1)).await;
        tokio::time::advance(Duration::from_secs(RESULT_CACHE_TTL_SECS + 1)).await;
        assert!(service.cached("k").await.is_none());

        service.store("k".to_string(), sample_items(2)).await;
        assert_eq!(service.cached("k").await.unwrap().len(), 2);
    }

    #[test]
    fn cache_key_includes_every_query_dimension() {
        let a = cache_key("Fatih", "q", 30, true);
        assert_eq!(a, "Fatih:q:30:true");
        assert_ne!(a, cache_key("Fatih", "q", 30, false));
        assert_ne!(a, cache_key("Fatih", "q", 70, true));
        assert_ne!(a, cache_key("Pendik", "q", 30, true));
    }

    #[test]
    fn district_query_quotes_the_district() {
        assert_eq!(
            district_query("Kadıköy"),
            "\"Kadıköy\" İstanbul yerel haberleri"
        );
    }

    #[test]
    fn ambiguous_districts_get_negative_keywords() {
        let besiktas = district_query("Beşiktaş");
        assert!(besiktas.contains("-futbol"));
        assert!(besiktas.contains("-transfer"));

        let avcilar = district_query("Avcılar");
        assert!(avcilar.contains("-avcılık"));
        assert!(avcilar.contains("-tüfek"));
    }

    #[test]
    fn breaking_query_locks_to_istanbul_and_excludes_cities() {
        let q = breaking_query();
        assert!(q.starts_with("\"İstanbul\""));
        assert!(q.contains("son dakika OR"));
        assert!(q.contains("-Ankara"));
        assert!(q.contains("-Eskişehir"));
    }
}
