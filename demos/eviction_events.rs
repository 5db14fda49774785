//! Walks through each eviction policy with printing listeners attached.
//!
//! ```text
//! cargo run --example eviction_events
//! ```

use std::error::Error;

use evictcache::prelude::*;
use strum::IntoEnumIterator;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    for policy in EvictionPolicy::iter() {
        let mut cache = CacheBuilder::new(3)
            .policy(policy)
            .seed(7)
            .try_build::<&str, u32>()?;

        cache.on_evicting(|cache, key, value| {
            println!("  evicting {key}={value} ({} resident)", cache.len());
            Ok(())
        });
        cache.on_evicted(|_, key, _| {
            println!("  evicted  {key}");
            Ok(())
        });

        println!("{policy}:");
        for (i, key) in ["alpha", "beta", "gamma"].into_iter().enumerate() {
            cache.insert(key, i as u32)?;
        }
        cache.touch(&"alpha");
        cache.touch(&"alpha");
        cache.touch(&"gamma");

        if let Some(candidate) = cache.peek_eviction_candidate() {
            println!("  next victim: {candidate}");
        }
        cache.insert("delta", 3)?;
        cache.insert("epsilon", 4)?;

        let order: Vec<_> = cache.keys().copied().collect();
        println!("  order: {order:?}");
        println!("  stats: {}", cache.stats());
    }

    Ok(())
}
