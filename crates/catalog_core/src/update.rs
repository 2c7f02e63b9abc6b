use catalog_logging::{catalog_debug, catalog_info};

use crate::{AppState, CatalogError, Effect, FilterSet, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => fetch_effects(&mut state),
        Msg::SearchChanged(query) => {
            state.accept_input();
            if !state.set_search(query) {
                return (state, Vec::new());
            }
            // A new result set may not have the old page, so start over.
            state.pagination_mut().reset();
            fetch_effects(&mut state)
        }
        Msg::FiltersChanged { status, gender } => {
            let parsed = FilterSet::from_raw(&status, &gender);
            change_filters(&mut state, parsed)
        }
        Msg::StatusChanged(status) => {
            let parsed = state.filters().with_status_raw(&status);
            change_filters(&mut state, parsed)
        }
        Msg::GenderChanged(gender) => {
            let parsed = state.filters().with_gender_raw(&gender);
            change_filters(&mut state, parsed)
        }
        Msg::ClearQuery => {
            state.accept_input();
            let search_changed = state.set_search(String::new());
            let filters_changed = state.set_filters(FilterSet::default());
            if !search_changed && !filters_changed {
                return (state, Vec::new());
            }
            state.pagination_mut().reset();
            fetch_effects(&mut state)
        }
        Msg::PageRequested(page) => {
            let total_count = state.fetch().total_count();
            let outcome = state.pagination_mut().go_to_page(page, total_count);
            navigate(&mut state, outcome)
        }
        Msg::NextPage => {
            let total_count = state.fetch().total_count();
            let outcome = state.pagination_mut().next_page(total_count);
            navigate(&mut state, outcome)
        }
        Msg::PreviousPage => {
            let total_count = state.fetch().total_count();
            let outcome = state.pagination_mut().previous_page(total_count);
            navigate(&mut state, outcome)
        }
        Msg::RetryClicked => state.retry_fetch().map(Effect::from).into_iter().collect(),
        Msg::FetchCompleted { request_id, result } => {
            state.apply_fetch_result(request_id, result);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

/// Applies parsed filters; a parse error keeps the previous ones.
fn change_filters(state: &mut AppState, parsed: Result<FilterSet, CatalogError>) -> Vec<Effect> {
    match parsed {
        Ok(filters) => {
            state.accept_input();
            if !state.set_filters(filters) {
                return Vec::new();
            }
            state.pagination_mut().reset();
            fetch_effects(state)
        }
        Err(err) => {
            catalog_info!("Rejected filters: {}", err);
            state.reject(err);
            Vec::new()
        }
    }
}

fn navigate(state: &mut AppState, outcome: Result<bool, CatalogError>) -> Vec<Effect> {
    match outcome {
        Ok(changed) => {
            state.accept_input();
            if changed {
                fetch_effects(state)
            } else {
                Vec::new()
            }
        }
        Err(err) => {
            catalog_debug!("Rejected page change: {}", err);
            state.reject(err);
            Vec::new()
        }
    }
}

fn fetch_effects(state: &mut AppState) -> Vec<Effect> {
    state.sync_query().map(Effect::from).into_iter().collect()
}
