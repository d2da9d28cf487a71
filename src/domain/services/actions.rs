#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::ReplyService;
use crate::domain::models::ReplyServiceBox;
use crate::domain::models::TurnOutcome;
use crate::domain::models::TurnRequest;

async fn reply_worker(
    backend: Arc<dyn ReplyService + Send + Sync>,
    turn_request: TurnRequest,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let result = backend.get_reply(&turn_request.request).await;
    tx.send(Event::BackendReply(TurnOutcome {
        turn: turn_request.turn,
        result,
    }))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs remote calls off the UI loop. Each request gets its own worker,
    /// and every worker reports exactly one `BackendReply`, failed or not.
    pub async fn start(
        backend: ReplyServiceBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let backend: Arc<dyn ReplyService + Send + Sync> = Arc::from(backend);

        while let Some(action) = rx.recv().await {
            match action {
                Action::BackendRequest(turn_request) => {
                    tracing::debug!(turn = turn_request.turn, "Dispatching reply request");

                    let worker_backend = backend.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        if let Err(err) = reply_worker(worker_backend, turn_request, worker_tx).await {
                            tracing::error!(err = ?err, "Failed to report reply to the UI");
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}
