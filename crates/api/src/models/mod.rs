//! Domain models and request/response payloads.
//!
//! Every wire-facing type serializes in camelCase to match the JSON contract
//! of the API. Row types derive `sqlx::FromRow` against snake_case columns.

pub mod cart;
pub mod delivery;
pub mod order;
pub mod org;
pub mod product;
pub mod supplier;
pub mod user;

pub use cart::{AddCartItem, Cart, CartLine, CartWithItems, SetCartItemQuantity};
pub use delivery::{
    CreateDelivery, CreateOrderDetailDelivery, Delivery, OrderDetailDelivery, UpdateDelivery,
    UpdateOrderDetailDelivery,
};
pub use order::{
    CreateOrder, CreateOrderDetail, Order, OrderDetail, UpdateOrder, UpdateOrderDetail,
};
pub use org::{
    Branch, CreateBranch, CreateHeadquarters, Headquarters, UpdateBranch, UpdateHeadquarters,
};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use supplier::{CreateSupplier, Supplier, UpdateSupplier};
pub use user::{CurrentUser, User};

/// Keys under which values are stored in the tower-sessions session.
pub mod session_keys {
    /// The authenticated user (`CurrentUser`).
    pub const CURRENT_USER: &str = "current_user";
}
