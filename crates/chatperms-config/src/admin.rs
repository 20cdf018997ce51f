//! Admin settings handlers, wired by the host's HTTP layer.
//!
//! `GET /settings` maps to [`current_settings`] and `PUT /settings` to
//! [`apply_settings`]; the host returns 200 on `Ok` and 500 with
//! `{error: message}` on `Err`.

use crate::store::encode_for_store;
use crate::{EffectiveSettings, SETTINGS_NAMESPACE, SettingsCache, resolver};
use chatperms_host::SettingsStore;
use chatperms_types::HostError;
use serde_json::Value;

/// The current effective settings in the admin-surface JSON shape.
pub fn current_settings(cache: &SettingsCache) -> Value {
    serde_json::to_value(cache.current().as_ref()).unwrap_or(Value::Null)
}

/// Apply a partial settings mapping: string-encode the provided fields,
/// merge them into the store namespace, re-resolve, and atomically replace
/// the cached snapshot. Returns the new effective settings.
pub async fn apply_settings(
    store: &dyn SettingsStore,
    cache: &SettingsCache,
    partial: &Value,
) -> Result<EffectiveSettings, HostError> {
    let Value::Object(partial) = partial else {
        return Err(HostError::Store(
            "settings payload must be an object".to_string(),
        ));
    };

    store
        .set(SETTINGS_NAMESPACE, encode_for_store(partial))
        .await?;

    let resolved = resolver::resolve(store).await;
    cache.replace(resolved.clone());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatperms_host::MemorySettingsStore;
    use serde_json::json;

    #[test]
    fn get_reflects_the_cached_snapshot() {
        let cache = SettingsCache::default();
        let value = current_settings(&cache);
        assert_eq!(value["minPosts"], 5);
        assert_eq!(value["adminUids"], json!([1]));
    }

    #[tokio::test]
    async fn partial_save_persists_and_refreshes_the_cache() {
        let store = MemorySettingsStore::new();
        let cache = SettingsCache::default();

        let updated = apply_settings(
            &store,
            &cache,
            &json!({
                "minReputation": 30,
                "keywordAlertsEnabled": true,
                "keywordList": ["Banned"],
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.min_reputation, 30);
        assert!(updated.keyword_alerts_enabled);
        assert_eq!(updated.keyword_list, vec!["banned"]);
        assert_eq!(cache.current().min_reputation, 30);
        // Untouched fields keep their defaults.
        assert_eq!(updated.min_posts, 5);
    }

    #[tokio::test]
    async fn later_saves_merge_over_earlier_ones() {
        let store = MemorySettingsStore::new();
        let cache = SettingsCache::default();

        apply_settings(&store, &cache, &json!({"minReputation": 30}))
            .await
            .unwrap();
        apply_settings(&store, &cache, &json!({"minPosts": 2}))
            .await
            .unwrap();

        let current = cache.current();
        assert_eq!(current.min_reputation, 30);
        assert_eq!(current.min_posts, 2);
    }

    #[tokio::test]
    async fn non_object_payload_is_rejected() {
        let store = MemorySettingsStore::new();
        let cache = SettingsCache::default();

        let result = apply_settings(&store, &cache, &json!(["not", "an", "object"])).await;
        assert!(matches!(result, Err(HostError::Store(_))));
        // Nothing changed.
        assert_eq!(cache.current().min_reputation, 10);
    }
}
