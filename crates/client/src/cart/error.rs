//! Cart operation errors.

use thiserror::Error;

/// Rejections reported by cart mutations.
///
/// Both variants are user-facing notifications and leave the cart exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Adding to the cart requires a logged-in session.
    #[error("you must be logged in to add items to the cart")]
    NotAuthenticated,

    /// The item is already in the cart; the existing line and its quantity
    /// are kept unchanged.
    #[error("{name} is already in your cart")]
    AlreadyInCart {
        /// Display name of the duplicate item.
        name: String,
    },
}
