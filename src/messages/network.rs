//! Network messages - communication between App and Network layers

use crate::network::{Action, ActionReport};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run one action; overlapping actions are allowed
    RunAction { id: u64, action: Action },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// An action finished, successfully or not
    ActionFinished {
        id: u64,
        action: &'static str,
        report: ActionReport,
        time_ms: u64,
    },
}

