use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_logging::catalog_debug;
use thiserror::Error;

use crate::fetch::CharacterFetcher;
use crate::{EngineEvent, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        params: Vec<(String, String)>,
    },
}

/// Sends fetch requests to the engine thread. Dropping every handle stops it.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Completion events coming back from the engine thread, in completion order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts the engine thread with its own tokio runtime.
    pub fn spawn(fetcher: Arc<dyn CharacterFetcher>) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
            catalog_debug!("Engine command channel closed; shutting down");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    /// Queues a fetch. Requests run concurrently and may complete out of order.
    pub fn fetch(&self, request_id: RequestId, params: Vec<(String, String)>) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { request_id, params });
    }
}

impl EngineEvents {
    /// Blocks until the next event. `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    fetcher: &dyn CharacterFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { request_id, params } => {
            catalog_debug!("Request {} started", request_id);
            let result = fetcher.fetch_page(&params).await;
            let _ = event_tx.send(EngineEvent::FetchCompleted { request_id, result });
        }
    }
}
