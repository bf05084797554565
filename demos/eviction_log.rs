//! Eviction Log Demonstration
//!
//! Fills a small byte-budgeted cache, prints every eviction reported by the
//! callback, and finishes with the cache's metrics report.
//!
//! The cache also emits `tracing` events. Run with `RUST_LOG=sized_lru=trace` to
//! see them:
//!
//! ```text
//! RUST_LOG=sized_lru=trace cargo run --example eviction_log
//! ```

use sized_lru::{config::LruCacheConfig, metrics::CacheMetrics, LruCache};
use std::collections::BTreeMap;
use std::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sized_lru=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("🚀 Byte-Budgeted LRU Cache - Eviction Log");
    println!("=========================================\n");

    let config = LruCacheConfig { max_bytes: 40 };
    println!("📊 Budget: {} bytes for keys and values\n", config.max_bytes);

    // The callback only forwards; printing happens outside the cache call
    let (tx, rx) = mpsc::channel();
    let mut cache: LruCache<&'static str, String> = LruCache::init(
        config,
        Some(Box::new(move |key, value: String| {
            let _ = tx.send((key, value.len()));
        })),
    );

    let workload: [(&str, &str); 6] = [
        ("apple", "red"),
        ("banana", "yellow"),
        ("cherry", "dark red"),
        ("date", "brown"),
        ("elderberry", "deep purple"),
        ("fig", "green"),
    ];

    for (step, &(key, value)) in workload.iter().enumerate() {
        // Keep "apple" warm so it survives longer than its neighbours
        if step > 0 {
            cache.get("apple");
        }
        cache.add(key, value.to_string());
        println!(
            "➕ add {:<12} used {:>2}/{} bytes, {} entries",
            key,
            cache.used_bytes(),
            cache.max_bytes(),
            cache.len()
        );
        for (evicted, value_len) in rx.try_iter() {
            println!("   🗑️  evicted {} ({} byte value)", evicted, value_len);
        }
    }

    println!("\n🔁 Recency order (most to least recent):");
    for (key, value) in cache.iter() {
        println!("   {:<12} {}", key, value);
    }

    print_metrics(cache.algorithm_name(), &cache.metrics());
}

fn print_metrics(name: &str, metrics: &BTreeMap<String, f64>) {
    println!("\n📈 {} METRICS", name);
    println!("==============");
    for (key, value) in metrics {
        if key.contains("rate") || key.contains("utilization") {
            println!("   {:<26} {:>8.2}%", key, value * 100.0);
        } else {
            println!("   {:<26} {:>8.0}", key, value);
        }
    }
}
