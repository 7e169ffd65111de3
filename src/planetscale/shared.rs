//! Connections shared by every `PlanetScaleConnection` built from the same
//! configuration when `use_shared_connection` is set.
//!
//! Entries are keyed by the identity of the configuration `Arc` and hold only a
//! weak reference to it. Entries whose configuration has been dropped are
//! pruned on every access, so a shared connection lives as long as something
//! still holds its configuration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::planetscale::PlanetScaleDialectConfig;
use crate::traits::Execute;

struct Entry {
    owner: Weak<PlanetScaleDialectConfig>,
    connection: Arc<dyn Execute>,
}

static SHARED_CONNECTIONS: Lazy<Mutex<HashMap<usize, Entry>>> = Lazy::new(Default::default);

fn key(config: &Arc<PlanetScaleDialectConfig>) -> usize {
    Arc::as_ptr(config) as usize
}

fn registry() -> MutexGuard<'static, HashMap<usize, Entry>> {
    let mut map = SHARED_CONNECTIONS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    // A live entry at an address always belongs to the Arc currently there.
    map.retain(|_, entry| entry.owner.strong_count() > 0);
    map
}

/// Returns the shared connection for `config`, creating it with `create` if
/// there is none yet. The first connection stored wins.
pub(crate) fn get_or_insert_with(
    config: &Arc<PlanetScaleDialectConfig>,
    create: impl FnOnce() -> Arc<dyn Execute>,
) -> Arc<dyn Execute> {
    let mut map = registry();
    let entry = map.entry(key(config)).or_insert_with(|| {
        debug!("creating shared connection");
        Entry {
            owner: Arc::downgrade(config),
            connection: create(),
        }
    });
    Arc::clone(&entry.connection)
}

pub(crate) fn get(config: &Arc<PlanetScaleDialectConfig>) -> Option<Arc<dyn Execute>> {
    registry()
        .get(&key(config))
        .map(|entry| Arc::clone(&entry.connection))
}
