use std::sync::{Arc, Mutex};
use std::time::Duration;

use catalog_engine::{
    CharacterFetcher, CharacterPage, EngineEvent, EngineHandle, FailureKind, FetchError, PageInfo,
};

/// Answers after a per-page delay so completion order can be forced.
struct DelayedFetcher {
    seen: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

#[async_trait::async_trait]
impl CharacterFetcher for DelayedFetcher {
    async fn fetch_page(&self, params: &[(String, String)]) -> Result<CharacterPage, FetchError> {
        self.seen.lock().unwrap().push(params.to_vec());
        let page: u64 = params
            .iter()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(1);
        if page == 99 {
            return Err(FetchError::new(FailureKind::Network, "unreachable"));
        }
        tokio::time::sleep(Duration::from_millis(if page == 1 { 200 } else { 10 })).await;
        Ok(CharacterPage {
            info: PageInfo {
                count: page,
                ..PageInfo::default()
            },
            results: Vec::new(),
        })
    }
}

fn page_params(page: &str) -> Vec<(String, String)> {
    vec![("page".to_string(), page.to_string())]
}

#[test]
fn completions_carry_their_request_ids_in_completion_order() {
    catalog_logging::initialize_for_tests();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let fetcher = Arc::new(DelayedFetcher { seen: seen.clone() });
    let (engine, events) = EngineHandle::spawn(fetcher).expect("engine");

    engine.fetch(1, page_params("1"));
    engine.fetch(2, page_params("2"));

    let timeout = Duration::from_secs(5);
    let first = events.recv_timeout(timeout).expect("first event");
    let second = events.recv_timeout(timeout).expect("second event");

    let ids: Vec<_> = [first, second]
        .into_iter()
        .map(|event| match event {
            EngineEvent::FetchCompleted { request_id, result } => {
                (request_id, result.map(|page| page.info.count))
            }
        })
        .collect();
    assert_eq!(ids, vec![(2, Ok(2)), (1, Ok(1))]);
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert!(events.try_recv().is_none());
}

#[test]
fn failures_are_reported_as_events() {
    let fetcher = Arc::new(DelayedFetcher {
        seen: Arc::new(Mutex::new(Vec::new())),
    });
    let (engine, events) = EngineHandle::spawn(fetcher).expect("engine");

    engine.fetch(7, page_params("99"));

    let EngineEvent::FetchCompleted { request_id, result } =
        events.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(request_id, 7);
    assert_eq!(result.unwrap_err().kind, FailureKind::Network);
}

#[test]
fn dropping_the_handle_ends_the_event_stream() {
    let fetcher = Arc::new(DelayedFetcher {
        seen: Arc::new(Mutex::new(Vec::new())),
    });
    let (engine, events) = EngineHandle::spawn(fetcher).expect("engine");
    drop(engine);

    assert!(events.recv().is_none());
}
