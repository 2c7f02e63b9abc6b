use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Result;
use catalog_core::{CharacterSummary, Effect, FetchFailure, Msg, ResultPage};
use catalog_engine::{
    CharacterFetcher, CharacterPage, EngineEvent, EngineEvents, EngineHandle, FailureKind,
    FetchError, ReqwestFetcher,
};
use catalog_logging::{catalog_debug, catalog_info};

use crate::app::AppEvent;
use crate::config::AppConfig;

/// Executes core effects on the engine and feeds completions back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let fetcher = ReqwestFetcher::new(config.fetch_settings())?;
        catalog_info!("Listing endpoint: {}", fetcher.endpoint());
        Self::with_fetcher(Arc::new(fetcher), event_tx)
    }

    pub fn with_fetcher(
        fetcher: Arc<dyn CharacterFetcher>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self> {
        let (engine, events) = EngineHandle::spawn(fetcher)?;
        spawn_event_loop(events, event_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCharacters {
                    request_id,
                    descriptor,
                } => {
                    catalog_info!(
                        "FetchCharacters request_id={} key={}",
                        request_id,
                        descriptor.cache_key()
                    );
                    let params = descriptor
                        .query_pairs()
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value))
                        .collect();
                    self.engine.fetch(request_id, params);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let msg = match event {
                EngineEvent::FetchCompleted { request_id, result } => Msg::FetchCompleted {
                    request_id,
                    result: result.map(map_page).map_err(|err| {
                        catalog_debug!("Engine error for request {}: {}", request_id, err);
                        map_failure(err)
                    }),
                },
            };
            if event_tx.send(AppEvent::Core(msg)).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_page(page: CharacterPage) -> ResultPage {
    ResultPage {
        total_count: page.info.count,
        entities: page
            .results
            .into_iter()
            .map(|character| CharacterSummary {
                id: character.id,
                name: character.name,
                status: character.status,
                species: character.species,
                origin: character.origin.name,
                location: character.location.name,
                image: character.image,
            })
            .collect(),
    }
}

pub(crate) fn map_failure(err: FetchError) -> FetchFailure {
    match err.kind {
        FailureKind::Timeout => FetchFailure::Timeout,
        FailureKind::HttpStatus(code) => FetchFailure::HttpStatus(code),
        FailureKind::TooLarge { .. } => FetchFailure::TooLarge,
        FailureKind::Decode => FetchFailure::MalformedResponse(err.message),
        FailureKind::InvalidUrl | FailureKind::Network => FetchFailure::Network(err.message),
    }
}
