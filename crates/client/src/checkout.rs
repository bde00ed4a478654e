//! Checkout confirmation flow.
//!
//! A small state machine over the cart: `Idle -> SummaryOpen -> Confirming
//! -> Idle`, with cancel as the alternate exit from `SummaryOpen`. Opening
//! the summary snapshots the cart; confirming waits out a simulated
//! submission delay, clears the cart, and returns to idle. There is no
//! server-side order record; confirmation is terminal on the client.

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::cart::storage::CartStorage;
use crate::cart::{CartItem, CartStore};

/// Simulated order-submission latency. Not interruptible once entered.
const CONFIRM_LATENCY: Duration = Duration::from_millis(1500);

/// Message shown with a successful confirmation.
const CONFIRMATION_MESSAGE: &str = "Thank you for your order!";

/// Invalid transition attempted on the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} is not valid while checkout is {state}")]
pub struct CheckoutError {
    /// The operation that was attempted.
    pub operation: &'static str,
    /// The state the flow was in.
    pub state: &'static str,
}

/// Immutable snapshot of the cart taken when the summary opens.
///
/// Later cart mutations do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    items: Vec<CartItem>,
    total: Decimal,
}

impl OrderSummary {
    /// The snapshotted lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The snapshotted total.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }
}

/// Result of a confirmed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// What was ordered.
    pub summary: OrderSummary,
    /// User-facing success notification.
    pub message: &'static str,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    SummaryOpen(OrderSummary),
    Confirming,
}

impl State {
    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SummaryOpen(_) => "showing the order summary",
            Self::Confirming => "confirming",
        }
    }
}

/// The checkout state machine.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: State,
}

impl CheckoutFlow {
    /// A flow in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flow is idle (no summary open, nothing confirming).
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// The open summary, if the flow is in `SummaryOpen`.
    #[must_use]
    pub fn summary(&self) -> Option<&OrderSummary> {
        match &self.state {
            State::SummaryOpen(summary) => Some(summary),
            _ => None,
        }
    }

    /// Open the order summary over the current cart.
    ///
    /// Valid only from idle. The returned summary is a snapshot: mutating
    /// the cart afterwards does not change it.
    ///
    /// # Errors
    ///
    /// [`CheckoutError`] when a summary is already open or a confirmation
    /// is in flight.
    pub fn open_summary<S: CartStorage>(
        &mut self,
        cart: &CartStore<S>,
    ) -> Result<OrderSummary, CheckoutError> {
        match self.state {
            State::Idle => {
                let summary = OrderSummary {
                    items: cart.cart().items().to_vec(),
                    total: cart.total(),
                };
                self.state = State::SummaryOpen(summary.clone());
                Ok(summary)
            }
            _ => Err(CheckoutError {
                operation: "open summary",
                state: self.state.name(),
            }),
        }
    }

    /// Close the summary without ordering. The cart is untouched.
    ///
    /// # Errors
    ///
    /// [`CheckoutError`] unless a summary is open.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        match self.state {
            State::SummaryOpen(_) => {
                self.state = State::Idle;
                Ok(())
            }
            _ => Err(CheckoutError {
                operation: "cancel",
                state: self.state.name(),
            }),
        }
    }

    /// Confirm the order: wait out the simulated submission, clear the
    /// cart, and return to idle.
    ///
    /// While the confirmation is in flight the flow reports itself as
    /// `confirming`, so a second confirm or a cancel is rejected.
    ///
    /// # Errors
    ///
    /// [`CheckoutError`] unless a summary is open.
    pub async fn confirm<S: CartStorage>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let summary = match std::mem::take(&mut self.state) {
            State::SummaryOpen(summary) => summary,
            other => {
                let err = CheckoutError {
                    operation: "confirm",
                    state: other.name(),
                };
                self.state = other;
                return Err(err);
            }
        };

        self.state = State::Confirming;
        tokio::time::sleep(CONFIRM_LATENCY).await;

        cart.clear();
        self.state = State::Idle;

        tracing::info!(total = %summary.total(), lines = summary.items().len(), "order confirmed");
        Ok(OrderConfirmation {
            summary,
            message: CONFIRMATION_MESSAGE,
        })
    }
}
