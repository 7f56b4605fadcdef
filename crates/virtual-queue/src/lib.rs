//! Client of the virtual-queue guest service, which admits parties of guests
//! into queues and assigns them boarding groups.
//!
//! The heart of this crate is [`Client::join_queue`], which submits a party
//! and resolves the service's partial rejections of its guests by removing
//! them and resubmitting the remainder of the party.

mod client;
mod error;
mod join;
mod models;
mod response;
mod token;
pub mod transport;

pub use client::{Client, Resort, Resource, DL_ORIGIN, WDW_ORIGIN};
pub use error::Error;
pub use models::{
    sort_guests, ConflictType, Conflicts, Guest, GuestId, JoinQueueResult, Position, Queue,
};
pub use response::{classify, ConflictEntry, JoinQueueRequest, JoinQueueResponse, Outcome};
pub use token::{fixed, Fixed, TokenProvider};
pub use transport::{HttpTransport, Transport};
