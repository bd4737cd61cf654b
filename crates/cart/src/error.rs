//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart persistence and the server-backed cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Reading or writing the backing store failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The persisted snapshot could not be parsed.
    #[error("snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// HTTP transport error talking to the cart API.
    #[error("cart api transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The cart API returned a non-success status.
    #[error("cart api returned status {status}")]
    Api {
        /// HTTP status code from the server.
        status: u16,
    },

    /// The referenced product is not in the cart.
    #[error("product {0} not in cart")]
    ProductNotInCart(i32),
}
