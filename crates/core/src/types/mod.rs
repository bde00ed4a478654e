//! Shared domain types.

pub mod auth;
pub mod catalog;
pub mod email;
pub mod id;
pub mod message;

pub use auth::{LoginPayload, RegisterPayload, SessionCheck};
pub use catalog::{Accessory, Bike, Dealer, Logo};
pub use email::{Email, EmailError};
pub use id::{ItemId, UserId};
pub use message::{ContactMessage, DealerMessage, NewContactMessage, NewDealerMessage};
