//! Action callers - one round trip per user operation
//!
//! Add, delete, clear and upload list the tree again once they succeed.

use std::path::PathBuf;

use serde_json::json;

use crate::constants::NO_FILE_PROMPT;
use crate::error::RequestError;
use crate::models::{Endpoint, HttpMethod, RequestDescriptor};
use crate::network::client::RowsApi;

/// A user-facing operation on the tree
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Add(String),
    Delete(String),
    Clear,
    Contains(String),
    All,
    Between { from: String, to: String },
    FirstLast,
    EqualLength(String),
    LessThan(String),
    MoreThan(String),
    Upload(Option<PathBuf>),
}

/// What an action leaves for the App layer to show
#[derive(Clone, Debug, PartialEq)]
pub enum ActionReport {
    /// New results panel content
    Panel(String),
    /// Blocking prompt; the results panel is left alone
    Prompt(String),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add(_) => "add",
            Action::Delete(_) => "delete",
            Action::Clear => "clear",
            Action::Contains(_) => "contains",
            Action::All => "all",
            Action::Between { .. } => "between",
            Action::FirstLast => "first-last",
            Action::EqualLength(_) => "equal-length",
            Action::LessThan(_) => "less-than",
            Action::MoreThan(_) => "more-than",
            Action::Upload(_) => "upload",
        }
    }

    /// Fixed text written to the results panel when the action fails
    pub fn failure_text(&self) -> &'static str {
        match self {
            Action::Add(_) => "Error adding row",
            Action::Delete(_) => "Error removing row",
            Action::Clear => "Error clearing tree",
            Action::Contains(_) => "Error checking row",
            Action::All => "Error retrieving rows",
            Action::Between { .. } => "Error finding rows between",
            Action::FirstLast => "Error retrieving first and last rows",
            Action::EqualLength(_) => "Error finding equal length rows",
            Action::LessThan(_) => "Error finding rows with less length",
            Action::MoreThan(_) => "Error finding rows with more length",
            Action::Upload(_) => "Error uploading file",
        }
    }

    pub async fn run<A: RowsApi + ?Sized>(self, api: &A) -> ActionReport {
        let request = match &self {
            Action::Add(row) => RequestDescriptor::row(HttpMethod::POST, Endpoint::Add, row),
            Action::Delete(row) => RequestDescriptor::row(HttpMethod::DELETE, Endpoint::Delete, row),
            Action::Clear => RequestDescriptor::new(HttpMethod::DELETE, Endpoint::Clear)
                .with_body(json!({ "noContent": false })),
            Action::Contains(row) => {
                RequestDescriptor::row(HttpMethod::POST, Endpoint::Contains, row)
            }
            Action::All => RequestDescriptor::new(HttpMethod::GET, Endpoint::All),
            Action::Between { from, to } => RequestDescriptor::new(HttpMethod::POST, Endpoint::Between)
                .with_body(json!({ "str1": from, "str2": to })),
            Action::FirstLast => RequestDescriptor::new(HttpMethod::GET, Endpoint::FirstLast),
            Action::EqualLength(row) => {
                RequestDescriptor::row(HttpMethod::POST, Endpoint::EqualLength, row)
            }
            Action::LessThan(row) => RequestDescriptor::row(HttpMethod::POST, Endpoint::LessThan, row),
            Action::MoreThan(row) => RequestDescriptor::row(HttpMethod::POST, Endpoint::MoreThan, row),
            Action::Upload(path) => return self.upload(api, path.clone()).await,
        };

        match (&self, api.send(request).await) {
            (Action::Add(_) | Action::Delete(_) | Action::Clear, Ok(_)) => list_all(api).await,
            (Action::Contains(row), Ok(payload)) => {
                ActionReport::Panel(membership_sentence(row, payload.is_truthy()))
            }
            (_, Ok(payload)) => ActionReport::Panel(payload.render()),
            (_, Err(e)) => self.fail(&e),
        }
    }

    async fn upload<A: RowsApi + ?Sized>(&self, api: &A, path: Option<PathBuf>) -> ActionReport {
        match api.upload(path.as_deref()).await {
            Ok(count) => {
                tracing::info!(count, "Rows uploaded");
                list_all(api).await
            }
            Err(RequestError::NoFileSelected) => ActionReport::Prompt(NO_FILE_PROMPT.to_string()),
            Err(e) if e.is_local() => {
                tracing::error!(action = self.name(), error = %e, "Upload not sent");
                ActionReport::Prompt(e.message())
            }
            Err(e) => self.fail(&e),
        }
    }

    fn fail(&self, e: &RequestError) -> ActionReport {
        tracing::error!(action = self.name(), error = %e, status = ?e.status(), "Action failed");
        ActionReport::Panel(self.failure_text().to_string())
    }
}

async fn list_all<A: RowsApi + ?Sized>(api: &A) -> ActionReport {
    let action = Action::All;
    match api
        .send(RequestDescriptor::new(HttpMethod::GET, Endpoint::All))
        .await
    {
        Ok(payload) => ActionReport::Panel(payload.render()),
        Err(e) => action.fail(&e),
    }
}

pub fn membership_sentence(row: &str, present: bool) -> String {
    if present {
        format!("Row '{}' is in the tree", row)
    } else {
        format!("Row '{}' is not in the tree", row)
    }
}
