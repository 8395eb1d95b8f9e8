//! Network layer - request orchestration against the rows service
//!
//! The Network actor receives action commands, runs each one as its own
//! task and sends back what the App layer should show.

pub mod actions;
pub mod actor;
pub mod client;

pub use actions::{Action, ActionReport};
pub use actor::NetworkActor;
pub use client::{RowsApi, RowsClient};
