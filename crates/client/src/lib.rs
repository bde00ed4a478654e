//! Chainring client library.
//!
//! Everything the browsing session owns, as a library:
//!
//! - [`catalog`] - read-only catalog lists fetched from the backend and
//!   cached in memory for the page session
//! - [`auth`] - the cookie-session auth collaborator client; login yields
//!   the [`auth::AuthToken`] capability that gates cart mutation
//! - [`cart`] - the durable, invariant-bearing cart state machine
//! - [`checkout`] - the confirmation flow that snapshots and clears the cart
//!
//! The cart never talks to the network; catalog fetches never touch the
//! cart. A failed fetch degrades to an empty list, a failed cart persist
//! degrades to memory-only state, and neither path is allowed to fail the
//! caller.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

mod http;

pub use auth::{AuthClient, AuthClientError, AuthToken};
pub use cart::{Cart, CartError, CartItem, CartStore};
pub use catalog::{CatalogClient, ClientError};
pub use checkout::{CheckoutError, CheckoutFlow, OrderConfirmation, OrderSummary};
