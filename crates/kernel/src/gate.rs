//! Existence gate: preconditions that referenced rows are present.
//!
//! Checks are independent short queries. A mutation that depends on several
//! rows checks them concurrently and only proceeds once every check has
//! resolved. The check and the later write are not atomic; a row deleted in
//! between surfaces as a foreign-key failure from the store.

use futures_util::future::join_all;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::store::{Reference, Store};

/// Whether the referenced row exists.
pub async fn exists(store: &dyn Store, reference: &Reference) -> AppResult<bool> {
    Ok(store.exists(reference).await?)
}

/// Fail with [`AppError::Missing`] unless the referenced row exists.
pub async fn require(store: &dyn Store, reference: &Reference) -> AppResult<()> {
    if exists(store, reference).await? {
        Ok(())
    } else {
        debug!(%reference, "existence check failed");
        Err(AppError::Missing(reference.clone()))
    }
}

/// Check every reference concurrently and wait for all of them.
///
/// When several checks fail, the first failure in `references` order is
/// returned, so the outcome depends only on store state.
pub async fn require_all(store: &dyn Store, references: &[Reference]) -> AppResult<()> {
    let outcomes = join_all(references.iter().map(|r| require(store, r))).await;
    outcomes.into_iter().collect()
}
