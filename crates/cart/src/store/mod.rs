//! Cart persistence strategies.
//!
//! Local and server-backed carts persist through the same [`CartStore`]
//! interface so [`crate::session::CartSession`] does not care where
//! snapshots live.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;

use crate::error::CartError;
use crate::snapshot::CartSnapshot;

/// A persistence strategy for cart snapshots.
///
/// Implementations must tolerate concurrent calls; the session debounces
/// saves and may issue a save while a previous one is in flight.
pub trait CartStore: Send + Sync + 'static {
    /// Load the persisted snapshot, `None` when nothing was saved yet.
    ///
    /// A store that finds corrupt data should return an error and leave
    /// recovery (fall back to an empty cart, clear the storage) to the
    /// caller.
    fn load(&self) -> impl Future<Output = Result<Option<CartSnapshot>, CartError>> + Send;

    /// Persist a snapshot, replacing any previous one.
    fn save(&self, snapshot: CartSnapshot) -> impl Future<Output = Result<(), CartError>> + Send;

    /// Remove any persisted snapshot.
    fn clear(&self) -> impl Future<Output = Result<(), CartError>> + Send;
}
