//! Server-backed cart with optimistic updates.
//!
//! Mutations apply to local state immediately, then go to the cart API; on
//! failure the local state rolls back to the pre-mutation snapshot, so the
//! cart never silently diverges from the server. Every mutation bumps a
//! sequence number, and a fetched server cart is adopted only through a
//! [`RefreshTicket`] taken before the fetch: if a newer mutation landed in
//! between, the stale response is discarded instead of clobbering it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use octocat_supply_core::{CartItemId, ProductId};

use crate::error::CartError;
use crate::item::CartItem;
use crate::policy::PricingPolicy;
use crate::reducer::{CartAction, apply};
use crate::state::CartState;

/// A cart line as the server represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCartItem {
    /// Server-assigned line id.
    pub cart_item_id: CartItemId,
    /// Product identity.
    pub product_id: ProductId,
    /// Line quantity.
    pub quantity: u32,
    /// Unit price captured when the line was created.
    pub unit_price: Decimal,
}

/// A cart resource as the server represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCart {
    /// Server-assigned cart id.
    pub cart_id: Uuid,
    /// Lines currently in the cart.
    #[serde(default)]
    pub items: Vec<ApiCartItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemBody {
    product_id: ProductId,
    quantity: u32,
    unit_price: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetQuantityBody {
    quantity: u32,
}

/// HTTP client for the `/api/carts` surface.
#[derive(Debug, Clone)]
pub struct CartApi {
    client: reqwest::Client,
    base_url: String,
}

impl CartApi {
    /// Create a client against the given API base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn carts_url(&self) -> String {
        format!("{}/api/carts", self.base_url)
    }

    /// Create a new server cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Transport` on connection failure and
    /// `CartError::Api` on a non-success status.
    pub async fn create_cart(&self) -> Result<ApiCart, CartError> {
        let response = self.client.post(self.carts_url()).send().await?;
        expect_success(&response)?;
        Ok(response.json().await?)
    }

    /// Fetch a cart with its items.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Transport` or `CartError::Api` as for
    /// [`create_cart`](Self::create_cart).
    pub async fn get_cart(&self, cart_id: Uuid) -> Result<ApiCart, CartError> {
        let url = format!("{}/{cart_id}", self.carts_url());
        let response = self.client.get(url).send().await?;
        expect_success(&response)?;
        Ok(response.json().await?)
    }

    /// Add quantity of a product to a cart; the server merges duplicate
    /// products into one line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Transport` or `CartError::Api`.
    pub async fn add_item(
        &self,
        cart_id: Uuid,
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<(), CartError> {
        let url = format!("{}/{cart_id}/items", self.carts_url());
        let body = AddItemBody {
            product_id,
            quantity,
            unit_price,
        };
        let response = self.client.post(url).json(&body).send().await?;
        expect_success(&response)
    }

    /// Set a line's quantity exactly; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Transport` or `CartError::Api`.
    pub async fn set_quantity(
        &self,
        cart_id: Uuid,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        let url = format!("{}/{cart_id}/items/{product_id}", self.carts_url());
        let body = SetQuantityBody { quantity };
        let response = self.client.put(url).json(&body).send().await?;
        expect_success(&response)
    }

    /// Remove a product's line from a cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Transport` or `CartError::Api`.
    pub async fn remove_item(&self, cart_id: Uuid, product_id: ProductId) -> Result<(), CartError> {
        let url = format!("{}/{cart_id}/items/{product_id}", self.carts_url());
        let response = self.client.delete(url).send().await?;
        expect_success(&response)
    }

    /// Remove every line from a cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Transport` or `CartError::Api`.
    pub async fn clear(&self, cart_id: Uuid) -> Result<(), CartError> {
        let url = format!("{}/{cart_id}", self.carts_url());
        let response = self.client.delete(url).send().await?;
        expect_success(&response)
    }
}

fn expect_success(response: &reqwest::Response) -> Result<(), CartError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(CartError::Api {
            status: status.as_u16(),
        })
    }
}

/// Proof of when a refresh was started, relative to local mutations.
///
/// Taken with [`RemoteCart::begin_refresh`] before fetching, redeemed with
/// [`RemoteCart::apply_refresh`] after. A ticket older than the latest
/// mutation is refused, so an in-flight fetch can never overwrite state the
/// user changed while it was on the wire.
#[derive(Debug, Clone, Copy)]
pub struct RefreshTicket {
    issued: u64,
}

/// A cart whose source of truth is a server cart resource.
pub struct RemoteCart {
    api: CartApi,
    cart_id: Uuid,
    policy: PricingPolicy,
    state: CartState,
    /// Sequence number of the most recently issued mutation.
    seq: u64,
}

impl RemoteCart {
    /// Create a fresh server cart.
    ///
    /// # Errors
    ///
    /// Returns the API error when the cart cannot be created.
    pub async fn open(api: CartApi, policy: PricingPolicy) -> Result<Self, CartError> {
        let cart = api.create_cart().await?;
        Ok(Self {
            api,
            cart_id: cart.cart_id,
            state: CartState::from_items(
                merge_server_items(&cart.items, &CartState::empty()),
                &policy,
            ),
            policy,
            seq: 0,
        })
    }

    /// Resume an existing server cart, hydrating local state from it.
    ///
    /// # Errors
    ///
    /// Returns the API error when the cart cannot be fetched (e.g. it
    /// expired server-side).
    pub async fn resume(
        api: CartApi,
        policy: PricingPolicy,
        cart_id: Uuid,
    ) -> Result<Self, CartError> {
        let cart = api.get_cart(cart_id).await?;
        Ok(Self {
            api,
            cart_id: cart.cart_id,
            state: CartState::from_items(
                merge_server_items(&cart.items, &CartState::empty()),
                &policy,
            ),
            policy,
            seq: 0,
        })
    }

    /// The server-side cart id, persisted by callers across sessions.
    #[must_use]
    pub const fn cart_id(&self) -> Uuid {
        self.cart_id
    }

    /// The current (optimistic) local state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Add quantity of an item, optimistically.
    ///
    /// # Errors
    ///
    /// Returns the API error after rolling local state back.
    pub async fn add_item(&mut self, item: CartItem, quantity: u32) -> Result<(), CartError> {
        let product_id = item.product_id;
        let unit_price = item.unit_price;
        let action = CartAction::AddItem { item, quantity };
        self.mutate(action, |api, cart_id| async move {
            api.add_item(cart_id, product_id, quantity, unit_price).await
        })
        .await
    }

    /// Remove a product's line, optimistically.
    ///
    /// # Errors
    ///
    /// Returns the API error after rolling local state back.
    pub async fn remove_item(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let action = CartAction::RemoveItem { product_id };
        self.mutate(action, |api, cart_id| async move {
            api.remove_item(cart_id, product_id).await
        })
        .await
    }

    /// Set a line's quantity exactly, optimistically. Zero removes.
    ///
    /// # Errors
    ///
    /// Returns the API error after rolling local state back.
    pub async fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), CartError> {
        let action = CartAction::UpdateQuantity {
            product_id,
            quantity,
        };
        self.mutate(action, |api, cart_id| async move {
            api.set_quantity(cart_id, product_id, quantity).await
        })
        .await
    }

    /// Empty the cart, optimistically.
    ///
    /// # Errors
    ///
    /// Returns the API error after rolling local state back.
    pub async fn clear(&mut self) -> Result<(), CartError> {
        self.mutate(CartAction::Clear, |api, cart_id| async move {
            api.clear(cart_id).await
        })
        .await
    }

    /// Start a refresh, capturing the current mutation sequence.
    #[must_use]
    pub const fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket { issued: self.seq }
    }

    /// Adopt a fetched server cart, unless a newer local mutation has been
    /// issued since the ticket was taken. Returns whether it was adopted.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, cart: &ApiCart) -> bool {
        if self.seq == ticket.issued {
            self.state =
                CartState::from_items(merge_server_items(&cart.items, &self.state), &self.policy);
            true
        } else {
            tracing::debug!(
                "discarding stale cart refresh (seq {} < {})",
                ticket.issued,
                self.seq
            );
            false
        }
    }

    /// Fetch the server cart and adopt it in one step.
    ///
    /// Callers that fetch concurrently with user mutations should take a
    /// [`RefreshTicket`] themselves, fetch via [`CartApi`], and redeem it
    /// with [`apply_refresh`](Self::apply_refresh).
    ///
    /// # Errors
    ///
    /// Returns the API error when the fetch fails; local state is kept.
    pub async fn refresh(&mut self) -> Result<(), CartError> {
        let ticket = self.begin_refresh();
        let cart = self.api.get_cart(self.cart_id).await?;
        self.apply_refresh(ticket, &cart);
        Ok(())
    }

    async fn mutate<F, Fut>(&mut self, action: CartAction, request: F) -> Result<(), CartError>
    where
        F: FnOnce(CartApi, Uuid) -> Fut,
        Fut: Future<Output = Result<(), CartError>>,
    {
        let previous = self.state.clone();
        self.state = apply(&self.state, action, &self.policy);
        self.seq += 1;

        match request(self.api.clone(), self.cart_id).await {
            Ok(()) => {
                // Best effort: adopt the server's view of the cart. A failed
                // refresh keeps the optimistic state.
                if let Err(err) = self.refresh().await {
                    tracing::warn!("cart refresh after mutation failed: {err}");
                }
                Ok(())
            }
            Err(err) => {
                self.state = previous;
                Err(err)
            }
        }
    }
}

/// Build local line items from server lines, keeping display metadata
/// (name, image, discount) from any matching local line.
fn merge_server_items(server_items: &[ApiCartItem], local: &CartState) -> Vec<CartItem> {
    server_items
        .iter()
        .map(|server| {
            local.line(server.product_id).map_or_else(
                || {
                    CartItem::new(
                        server.product_id,
                        format!("Product {}", server.product_id),
                        server.unit_price,
                        server.quantity,
                    )
                },
                |known| CartItem {
                    quantity: server.quantity,
                    unit_price: server.unit_price,
                    ..known.clone()
                },
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn server_item(line: i32, product: i32, quantity: u32, price: Decimal) -> ApiCartItem {
        ApiCartItem {
            cart_item_id: CartItemId::new(line),
            product_id: ProductId::new(product),
            quantity,
            unit_price: price,
        }
    }

    #[test]
    fn test_merge_keeps_local_metadata() {
        let policy = PricingPolicy::default();
        let mut local_item =
            CartItem::new(ProductId::new(1), "Ergo Keyboard".into(), dec!(80), 1);
        local_item.discount = Some(dec!(0.25));
        local_item.img_name = Some("keyboard.png".into());
        let local = CartState::from_items(vec![local_item], &policy);

        let merged = merge_server_items(&[server_item(10, 1, 4, dec!(80))], &local);

        let line = merged.first().unwrap();
        assert_eq!(line.name, "Ergo Keyboard");
        assert_eq!(line.img_name.as_deref(), Some("keyboard.png"));
        assert_eq!(line.discount, Some(dec!(0.25)));
        assert_eq!(line.quantity, 4);
    }

    #[test]
    fn test_merge_synthesizes_unknown_products() {
        let merged = merge_server_items(
            &[server_item(10, 9, 2, dec!(15))],
            &CartState::empty(),
        );
        let line = merged.first().unwrap();
        assert_eq!(line.name, "Product 9");
        assert_eq!(line.unit_price, dec!(15));
        assert_eq!(line.quantity, 2);
    }

    fn remote_cart_with(items: Vec<CartItem>) -> RemoteCart {
        let policy = PricingPolicy::default();
        RemoteCart {
            api: CartApi::new("http://localhost:0"),
            cart_id: Uuid::nil(),
            state: CartState::from_items(items, &policy),
            policy,
            seq: 0,
        }
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let mut cart = remote_cart_with(vec![CartItem::new(
            ProductId::new(1),
            "Widget".into(),
            dec!(10),
            2,
        )]);
        let ticket = cart.begin_refresh();

        // A mutation lands while the fetch is on the wire.
        cart.state = apply(
            &cart.state,
            CartAction::UpdateQuantity {
                product_id: ProductId::new(1),
                quantity: 7,
            },
            &cart.policy,
        );
        cart.seq += 1;

        let server = ApiCart {
            cart_id: Uuid::nil(),
            items: vec![server_item(10, 1, 2, dec!(10))],
        };
        assert!(!cart.apply_refresh(ticket, &server));
        assert_eq!(cart.state().product_quantity(ProductId::new(1)), 7);
    }

    #[test]
    fn test_current_refresh_is_adopted() {
        let mut cart = remote_cart_with(Vec::new());
        let ticket = cart.begin_refresh();

        let server = ApiCart {
            cart_id: Uuid::nil(),
            items: vec![server_item(10, 3, 4, dec!(5))],
        };
        assert!(cart.apply_refresh(ticket, &server));
        assert_eq!(cart.state().product_quantity(ProductId::new(3)), 4);
    }

    #[test]
    fn test_api_cart_wire_format() {
        let json = r#"{"cartId":"6f2b2a2e-95ac-4f10-8f7a-6f2d3c6f0b5e","items":[
            {"cartItemId":1,"productId":2,"quantity":3,"unitPrice":"9.99"}
        ]}"#;
        let cart: ApiCart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        let line = cart.items.first().unwrap();
        assert_eq!(line.product_id, ProductId::new(2));
        assert_eq!(line.unit_price, dec!(9.99));
    }
}
