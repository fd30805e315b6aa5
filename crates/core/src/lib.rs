//! `vshares-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no locking, no logging).

pub mod entity;
pub mod error;
pub mod id;
pub mod shares;
pub mod value_object;

pub use entity::Entity;
pub use error::{LedgerError, LedgerResult};
pub use id::{AccountId, OwnerId};
pub use shares::Shares;
pub use value_object::ValueObject;
