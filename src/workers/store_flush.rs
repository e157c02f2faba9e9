//! Periodic sled flush so an unclean shutdown loses at most a few minutes.

use crate::store::Store;

pub async fn run(store: &Store) {
    match store.flush() {
        Ok(()) => tracing::debug!("Store flushed"),
        Err(err) => tracing::warn!(error = %err, "Store flush failed"),
    }
}
