//! Identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static LAST_WINE_ID: AtomicU64 = AtomicU64::new(0);

/// Returns a new wine item id of the form `wine-<millis>`.
///
/// Ids are seeded from the wall clock but strictly increasing within the
/// process, so two calls in the same millisecond still produce distinct
/// ids. Uniqueness across the whole wine list follows from that.
pub(crate) fn wine_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);

    let previous = LAST_WINE_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(last.saturating_add(1).max(now))
        })
        .unwrap_or_else(|last| last);
    let id = previous.saturating_add(1).max(now);

    format!("wine-{id}")
}

/// Returns a short random id (8 hex chars of a v4 UUID).
///
/// Used for menu items and events, where ids only need to be unique
/// within one document collection.
pub(crate) fn short_id() -> String {
    let mut buffer = Uuid::encode_buffer();
    let simple = Uuid::new_v4().simple().encode_lower(&mut buffer);
    simple[..8].to_string()
}
