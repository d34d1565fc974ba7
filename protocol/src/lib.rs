//! Wire records and persistence seams shared by the manor frontend and API.
//!
//! The puzzle core knows nothing about users. This crate attributes its
//! [`ProgressEvent`](manor_core::ProgressEvent)s to a [`Session`] and stores
//! them per user and stage.

pub use catalog::*;
pub use error::*;
pub use gateway::*;
pub use records::*;
pub use session::*;
pub use store::*;
pub use unlock::*;

mod catalog;
mod error;
mod gateway;
mod records;
mod session;
mod store;
mod unlock;
