//! Network actor - runs actions in the Tokio async runtime

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::RowsApi;

/// Network actor that runs one task per action command.
/// No queueing and no cancellation: every action runs to completion.
pub struct NetworkActor {
    api: Arc<dyn RowsApi>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_actions: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(api: Arc<dyn RowsApi>, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            api,
            response_tx,
            active_actions: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::RunAction { id, action }) => {
                            let api = self.api.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_actions.spawn(async move {
                                let name = action.name();
                                let start = Instant::now();
                                tracing::info!(id, action = name, "Running action");
                                let report = action.run(api.as_ref()).await;
                                let time_ms = start.elapsed().as_millis() as u64;
                                tracing::info!(id, action = name, time_ms, "Action completed");
                                let _ = response_tx.send(NetworkResponse::ActionFinished {
                                    id,
                                    action: name,
                                    report,
                                    time_ms,
                                });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Reap completed tasks
                Some(result) = self.active_actions.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Action task failed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Outcome;
    use crate::models::RequestDescriptor;
    use crate::network::{Action, ActionReport};
    use crate::payload::Payload;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;

    struct ListingApi;

    #[async_trait]
    impl RowsApi for ListingApi {
        async fn send(&self, _request: RequestDescriptor) -> Outcome<Payload> {
            Ok(Payload::from(json!(["a", "b"])))
        }

        async fn upload(&self, _file: Option<&Path>) -> Outcome<u64> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_runs_actions_and_reports_back() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let actor = NetworkActor::new(Arc::new(ListingApi), resp_tx);
        let handle = tokio::spawn(actor.run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::RunAction { id: 7, action: Action::All })
            .unwrap();
        cmd_tx
            .send(NetworkCommand::RunAction { id: 8, action: Action::Contains("a".into()) })
            .unwrap();

        let mut finished = Vec::new();
        for _ in 0..2 {
            match resp_rx.recv().await.unwrap() {
                NetworkResponse::ActionFinished { id, report, .. } => finished.push((id, report)),
            }
        }
        finished.sort_by_key(|(id, _)| *id);
        assert_eq!(finished[0], (7, ActionReport::Panel("a\nb".into())));
        assert_eq!(finished[1], (8, ActionReport::Panel("Row 'a' is in the tree".into())));

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }
}
