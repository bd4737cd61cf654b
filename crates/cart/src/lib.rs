//! Cart state machine for OctoCAT Supply.
//!
//! One canonical cart implementation, parameterized by a pricing policy,
//! with interchangeable persistence strategies:
//!
//! - [`reducer`] - pure `(state, action) -> state` transitions
//! - [`policy`] - shipping/tax configuration ([`PricingPolicy`])
//! - [`snapshot`] - the persisted envelope and its validation rules
//! - [`store`] - the [`CartStore`] strategy trait plus in-memory and
//!   file-backed implementations
//! - [`session`] - [`CartSession`]: a store-backed cart with debounced
//!   persistence and a bounded undo window
//! - [`remote`] - server-backed cart with optimistic updates and rollback
//!
//! Derived totals (`item_count`, `subtotal`, `shipping`, `tax`, `total`) are
//! never mutated directly; every transition recomputes them from the items.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod item;
pub mod policy;
pub mod reducer;
pub mod remote;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;

pub use error::CartError;
pub use item::CartItem;
pub use policy::PricingPolicy;
pub use reducer::{CartAction, apply};
pub use remote::{CartApi, RefreshTicket, RemoteCart};
pub use session::CartSession;
pub use snapshot::CartSnapshot;
pub use state::CartState;
pub use store::{CartStore, FileStore, MemoryStore};
