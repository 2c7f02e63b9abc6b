//! Catalog engine: listing API client and background fetch execution.
mod engine;
mod fetch;
mod types;

pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use fetch::{CharacterFetcher, FetchSettings, ReqwestFetcher, DEFAULT_BASE_URL};
pub use types::{
    Character, CharacterPage, EngineEvent, FailureKind, FetchError, NamedLink, PageInfo,
    RequestId,
};
