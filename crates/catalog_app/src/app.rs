use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Result;
use catalog_core::{update, AppState, FilterSet, Msg};
use catalog_logging::catalog_info;

use crate::cli::Args;
use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::ui;

/// Everything the dispatch loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Core(Msg),
    Help,
    Invalid(String),
    Quit,
}

pub fn run_app(args: Args, config: AppConfig) -> Result<()> {
    let state = initial_state(&args)?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&config, event_tx.clone())?;

    let mut app = CatalogApp::new(state, runner, io::stdout());
    app.start()?;
    spawn_input_reader(event_tx);

    while let Ok(event) = event_rx.recv() {
        if !app.handle_event(event)? {
            break;
        }
    }
    catalog_info!("Catalog closed");
    Ok(())
}

/// Query from the command line, applied before the first fetch.
fn initial_state(args: &Args) -> Result<AppState> {
    let filters = FilterSet::from_raw(
        args.status.as_deref().unwrap_or_default(),
        args.gender.as_deref().unwrap_or_default(),
    )?;
    Ok(AppState::with_query(
        args.search.clone().unwrap_or_default(),
        filters,
    ))
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(ui::commands::parse_line(&line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}

struct CatalogApp<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> CatalogApp<W> {
    fn new(state: AppState, runner: EffectRunner, out: W) -> Self {
        Self { state, runner, out }
    }

    fn start(&mut self) -> Result<()> {
        writeln!(self.out, "{}", ui::commands::HELP)?;
        self.dispatch_msg(Msg::Mounted)
    }

    /// Returns `false` once the user asked to quit.
    fn handle_event(&mut self, event: AppEvent) -> Result<bool> {
        match event {
            AppEvent::Core(msg) => self.dispatch_msg(msg)?,
            AppEvent::Help => writeln!(self.out, "{}", ui::commands::HELP)?,
            AppEvent::Invalid(message) => writeln!(self.out, "{message}")?,
            AppEvent::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn dispatch_msg(&mut self, msg: Msg) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            ui::render::render(&mut self.out, &view)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use catalog_engine::{CharacterFetcher, CharacterPage, FetchError, PageInfo};

    use super::*;

    #[derive(Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CharacterFetcher for CountingFetcher {
        async fn fetch_page(
            &self,
            _params: &[(String, String)],
        ) -> Result<CharacterPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CharacterPage {
                info: PageInfo {
                    count: 45,
                    ..PageInfo::default()
                },
                results: Vec::new(),
            })
        }
    }

    fn args(search: Option<&str>, status: Option<&str>) -> Args {
        Args {
            config: None,
            base_url: None,
            log: None,
            search: search.map(str::to_string),
            status: status.map(str::to_string),
            gender: None,
        }
    }

    #[test]
    fn initial_query_is_seeded_without_fetching() {
        let state = initial_state(&args(Some("Rick"), Some("alive"))).unwrap();

        assert_eq!(state.search(), "Rick");
        assert_eq!(
            state.filters(),
            FilterSet::new(Some(catalog_core::Status::Alive), None)
        );
        assert!(state.fetch().descriptor().is_none());
    }

    #[test]
    fn invalid_initial_filter_fails_start_up() {
        let err = initial_state(&args(None, Some("Zombie"))).unwrap_err();

        assert!(err.to_string().contains("Zombie"));
    }

    #[test]
    fn start_sends_a_single_request_for_the_seeded_query() {
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(CountingFetcher::default());
        let runner = EffectRunner::with_fetcher(fetcher.clone(), event_tx).unwrap();
        let state = initial_state(&args(Some("Rick"), Some("Dead"))).unwrap();
        let mut app = CatalogApp::new(state, runner, Vec::new());

        app.start().unwrap();
        let event = event_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(app.handle_event(event).unwrap());

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.state.fetch().active_request(), None);
        let text = String::from_utf8(app.out.clone()).unwrap();
        assert!(text.contains("Page 1 of 3 | 45 characters"));
    }

    #[test]
    fn dispatch_renders_and_round_trips_through_engine() {
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(CountingFetcher::default());
        let runner = EffectRunner::with_fetcher(fetcher, event_tx).unwrap();
        let mut app = CatalogApp::new(AppState::new(), runner, Vec::new());

        app.start().unwrap();
        let event = event_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(app.handle_event(event).unwrap());
        assert!(!app.handle_event(AppEvent::Quit).unwrap());

        let text = String::from_utf8(app.out.clone()).unwrap();
        assert!(text.contains("Loading..."));
        assert!(text.contains("Page 1 of 3 | 45 characters"));
    }
}
