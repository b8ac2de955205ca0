//! Production batches, sales and the derived remaining-volume balance.
//!
//! Pure domain logic (no IO, no HTTP, no storage). Stores compute the same
//! balance in SQL; [`balance::remaining_volume`] is the reference definition.

pub mod balance;
pub mod batch;
pub mod sale;

pub use balance::{BatchBalance, remaining_volume};
pub use batch::{Batch, NewBatch};
pub use sale::{NewSale, Sale};
