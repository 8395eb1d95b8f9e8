//! Failure taxonomy for calls against the rows service

use std::path::PathBuf;

use thiserror::Error;

/// Result of one orchestrated call
pub type Outcome<T> = Result<T, RequestError>;

/// Classified failure of one orchestrated call
#[derive(Debug, Error)]
pub enum RequestError {
    /// The service could not be reached or sent no response
    #[error("{message}")]
    Network { message: String },

    /// The service answered outside the 2xx range
    #[error("{message}")]
    Service { message: String, status: u16 },

    /// The body could not be decoded into what the call expects
    #[error("{message}")]
    MalformedResponse { message: String, status: Option<u16> },

    /// Upload requested without a file; nothing was sent
    #[error("no file selected")]
    NoFileSelected,

    /// Upload file could not be read; nothing was sent
    #[error("cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RequestError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Service { status, .. } => Some(*status),
            RequestError::MalformedResponse { status, .. } => *status,
            _ => None,
        }
    }

    /// Map a transport error the way the request log reports it
    pub fn from_transport(e: &reqwest::Error) -> Self {
        let message = if e.is_timeout() {
            "Request timed out".to_string()
        } else if e.is_connect() {
            format!("Connection failed: {}", e)
        } else {
            format!("Request failed: {}", e)
        };
        RequestError::Network { message }
    }

    /// Whether the failure stayed local and never reached the network
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            RequestError::NoFileSelected | RequestError::FileUnreadable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_carries_status() {
        let err = RequestError::Service {
            message: "duplicate row".into(),
            status: 400,
        };
        assert_eq!(err.message(), "duplicate row");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_local());
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = RequestError::Network {
            message: "Connection failed: refused".into(),
        };
        assert_eq!(err.status(), None);
        assert!(RequestError::NoFileSelected.is_local());
    }
}
