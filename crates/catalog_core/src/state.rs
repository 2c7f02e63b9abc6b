use crate::descriptor;
use crate::fetch::{FetchCoordinator, FetchTicket};
use crate::pagination::{page_links, Pagination};
use crate::view_model::CatalogViewModel;
use crate::{CatalogError, FetchFailure, FilterSet, RequestId, ResultPage};

/// Free-text name search as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    query: String,
}

impl SearchState {
    pub fn get(&self) -> &str {
        &self.query
    }

    /// Replaces the query. Returns whether it changed.
    pub fn set(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }
}

/// Currently selected dropdown filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    filters: FilterSet,
}

impl FilterState {
    pub fn get(&self) -> FilterSet {
        self.filters
    }

    /// Replaces the filters. Returns whether they changed.
    pub fn set(&mut self, filters: FilterSet) -> bool {
        if self.filters == filters {
            return false;
        }
        self.filters = filters;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    search: SearchState,
    filters: FilterState,
    pagination: Pagination,
    fetch: FetchCoordinator,
    last_rejection: Option<CatalogError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with a starting query. Nothing is fetched until
    /// `Msg::Mounted`.
    pub fn with_query(search: String, filters: FilterSet) -> Self {
        let mut state = Self::default();
        state.search.set(search);
        state.filters.set(filters);
        state
    }

    pub fn view(&self) -> CatalogViewModel {
        let total_count = self.fetch.total_count();
        let total_pages = self.pagination.total_pages(total_count);
        let current_page = self.pagination.page();
        let error = match self.fetch.state() {
            crate::FetchState::Error(failure) => Some(failure.to_string()),
            _ => None,
        };
        CatalogViewModel {
            is_loading: self.fetch.is_loading(),
            entities: self.fetch.data().map(|page| page.entities.clone()),
            total_count,
            current_page,
            total_pages,
            page_links: page_links(total_pages, current_page),
            search: self.search.get().to_string(),
            filters: self.filters.get(),
            error,
            last_rejection: self.last_rejection.clone(),
            dirty: self.dirty,
        }
    }

    pub fn search(&self) -> &str {
        self.search.get()
    }

    pub fn filters(&self) -> FilterSet {
        self.filters.get()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn fetch(&self) -> &FetchCoordinator {
        &self.fetch
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_search(&mut self, query: String) -> bool {
        self.search.set(query)
    }

    pub(crate) fn set_filters(&mut self, filters: FilterSet) -> bool {
        self.filters.set(filters)
    }

    pub(crate) fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    pub(crate) fn accept_input(&mut self) {
        if self.last_rejection.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn reject(&mut self, error: CatalogError) {
        self.last_rejection = Some(error);
        self.mark_dirty();
    }

    /// Recomputes the descriptor and hands it to the coordinator.
    pub(crate) fn sync_query(&mut self) -> Option<FetchTicket> {
        let descriptor = descriptor::build(
            self.pagination.page(),
            self.search.get(),
            &self.filters.get(),
        );
        if self.fetch.descriptor() == Some(&descriptor) {
            return None;
        }
        self.mark_dirty();
        self.fetch.request(descriptor)
    }

    pub(crate) fn retry_fetch(&mut self) -> Option<FetchTicket> {
        let ticket = self.fetch.retry();
        if ticket.is_some() {
            self.mark_dirty();
        }
        ticket
    }

    pub(crate) fn apply_fetch_result(
        &mut self,
        request_id: RequestId,
        result: Result<ResultPage, FetchFailure>,
    ) {
        if self.fetch.complete(request_id, result) {
            self.mark_dirty();
        }
    }
}
