//! Catalog core: pure query-state machine and view-model helpers.
pub mod descriptor;
mod effect;
mod error;
mod fetch;
mod filters;
mod model;
mod msg;
mod pagination;
mod state;
mod update;
mod view_model;

pub use descriptor::{QueryDescriptor, CHARACTER_ENDPOINT};
pub use effect::Effect;
pub use error::{CatalogError, FetchFailure, FilterField};
pub use fetch::{FetchCoordinator, FetchState, FetchTicket};
pub use filters::{FilterSet, Gender, Status};
pub use model::{CharacterSummary, RequestId, ResultPage};
pub use msg::Msg;
pub use pagination::{page_links, total_pages, PageNumber, Pagination, PAGE_SIZE};
pub use state::{AppState, FilterState, SearchState};
pub use update::update;
pub use view_model::CatalogViewModel;
