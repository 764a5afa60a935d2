//! Realm enumeration
//!
//! Captures the set of realms to export in a single read transaction.

use crate::adapters::store::TransactionalStore;
use crate::domain::realm::RealmRef;
use crate::domain::Result;

/// List every realm known to the store, in store order
///
/// Runs exactly one transaction. An empty list is a valid result. Store
/// failures propagate unchanged.
pub fn list_realms<S: TransactionalStore>(store: &S) -> Result<Vec<RealmRef>> {
    let realms = store.run_in_transaction(|session| session.list_realms())?;

    tracing::info!(
        store = %store.describe(),
        realm_count = realms.len(),
        "Enumerated realms"
    );

    Ok(realms)
}
