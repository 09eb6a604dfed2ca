//! Gazette test utilities.
//!
//! An in-memory [`Store`](gazette_kernel::store::Store) with the same
//! observable behavior as the PostgreSQL store, and the seed fixture the
//! integration tests run against.

mod fixture;
mod memory;

pub use fixture::{SeedData, seed};
pub use memory::MemoryStore;
