use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// HTTP methods the rows service accepts
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// Endpoint segments under the service base address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Add,
    Delete,
    Clear,
    Contains,
    All,
    Between,
    FirstLast,
    EqualLength,
    LessThan,
    MoreThan,
    UploadFile,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Add => "add",
            Endpoint::Delete => "delete",
            Endpoint::Clear => "clear",
            Endpoint::Contains => "contains",
            Endpoint::All => "all",
            Endpoint::Between => "between",
            Endpoint::FirstLast => "first-last",
            Endpoint::EqualLength => "equal-length",
            Endpoint::LessThan => "less-than",
            Endpoint::MoreThan => "more-than",
            Endpoint::UploadFile => "upload-file",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the rows service. Built per call and dropped once sent.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub endpoint: Endpoint,
    /// `None` means no body is sent at all
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, endpoint: Endpoint) -> Self {
        RequestDescriptor {
            method,
            endpoint,
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Request carrying `{ "row": ... }`
    pub fn row(method: HttpMethod, endpoint: Endpoint, row: &str) -> Self {
        Self::new(method, endpoint).with_body(json!({ "row": row }))
    }
}
