/// Read-through caching for provider lookups.
///
/// Evaluates to the cached value when `$key` is present. Otherwise awaits
/// `$block`, queues the result for a background write with `$ttl` seconds to
/// live, and evaluates to it. A failed cache read is logged and treated as a
/// miss; errors from `$block` are returned from the enclosing function with `?`.
///
/// # Example
/// ```rust,ignore
/// let summary = cached!(cache, CacheKey::ShowDetails { media_type, id }, 3600, async move {
///     fetch_details(id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => Ok(cached),
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, fetching from source");
                }
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
