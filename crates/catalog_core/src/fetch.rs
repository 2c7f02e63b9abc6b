use std::collections::HashMap;

use catalog_logging::{catalog_debug, catalog_warn};

use crate::{FetchFailure, QueryDescriptor, RequestId, ResultPage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(ResultPage),
    Error(FetchFailure),
}

/// A request the caller must hand to the fetch layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub request_id: RequestId,
    pub descriptor: QueryDescriptor,
}

/// Tracks the fetch state of the current descriptor.
///
/// Only the active request may write the state: completions of superseded
/// requests are dropped, so the last issued descriptor wins regardless of
/// completion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchCoordinator {
    current: Option<QueryDescriptor>,
    active: Option<RequestId>,
    next_id: RequestId,
    state: FetchState,
    /// Last success payload while the state is `Loading` or `Error`.
    previous: Option<ResultPage>,
    in_flight: HashMap<QueryDescriptor, RequestId>,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn descriptor(&self) -> Option<&QueryDescriptor> {
        self.current.as_ref()
    }

    pub fn active_request(&self) -> Option<RequestId> {
        self.active
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Latest result: the current success, or the previous one while a new
    /// request is loading or has failed.
    pub fn data(&self) -> Option<&ResultPage> {
        match &self.state {
            FetchState::Success(page) => Some(page),
            _ => self.previous.as_ref(),
        }
    }

    pub fn total_count(&self) -> Option<u64> {
        self.data().map(|page| page.total_count)
    }

    /// Makes `descriptor` current.
    ///
    /// Returns a ticket when a new request has to go out. Nothing is issued
    /// when the descriptor is unchanged, or when a request for it is still in
    /// flight (that request becomes active again instead).
    pub fn request(&mut self, descriptor: QueryDescriptor) -> Option<FetchTicket> {
        if self.current.as_ref() == Some(&descriptor) {
            return None;
        }
        self.enter_loading();
        self.current = Some(descriptor.clone());

        if let Some(&request_id) = self.in_flight.get(&descriptor) {
            catalog_debug!(
                "Re-adopting in-flight request {} for {}",
                request_id,
                descriptor.cache_key()
            );
            self.active = Some(request_id);
            return None;
        }
        Some(self.issue(descriptor))
    }

    /// Re-issues the current descriptor after a failure. No-op otherwise.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if !matches!(self.state, FetchState::Error(_)) {
            return None;
        }
        let descriptor = self.current.clone()?;
        self.state = FetchState::Loading;
        Some(self.issue(descriptor))
    }

    /// Applies a completion. Returns `false` when the request was superseded
    /// and its result discarded.
    pub fn complete(
        &mut self,
        request_id: RequestId,
        result: Result<ResultPage, FetchFailure>,
    ) -> bool {
        self.in_flight.retain(|_, id| *id != request_id);

        if self.active != Some(request_id) {
            catalog_debug!("Discarding stale response for request {}", request_id);
            return false;
        }
        self.active = None;

        match result {
            Ok(page) => {
                self.previous = None;
                self.state = FetchState::Success(page);
            }
            Err(failure) => {
                catalog_warn!("Request {} failed: {}", request_id, failure);
                self.state = FetchState::Error(failure);
            }
        }
        true
    }

    fn issue(&mut self, descriptor: QueryDescriptor) -> FetchTicket {
        self.next_id += 1;
        let request_id = self.next_id;
        self.active = Some(request_id);
        self.in_flight.insert(descriptor.clone(), request_id);
        FetchTicket {
            request_id,
            descriptor,
        }
    }

    fn enter_loading(&mut self) {
        let state = std::mem::replace(&mut self.state, FetchState::Loading);
        if let FetchState::Success(page) = state {
            self.previous = Some(page);
        }
    }
}
