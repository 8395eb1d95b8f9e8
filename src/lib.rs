//! # Rowtree
//!
//! A terminal client for a remote ordered collection of rows kept in a
//! server-side tree.
//!
//! ## Features
//! - Add, delete, membership check and clear
//! - Range, first/last and length queries
//! - Bulk upload of a file of rows
//! - Transient success/error indicator with timed fade
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime) - every call goes through [`network::RowsClient`]

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod feedback;
pub mod messages;
pub mod models;
pub mod network;
pub mod payload;
pub mod ui;

// Re-export commonly used types
pub use config::Config;
pub use error::{Outcome, RequestError};
pub use feedback::{FeedbackIndicator, IndicatorState};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Endpoint, HttpMethod, RequestDescriptor};
pub use payload::Payload;
pub use app::{AppActor, AppState};
pub use network::{Action, ActionReport, NetworkActor, RowsApi, RowsClient};
