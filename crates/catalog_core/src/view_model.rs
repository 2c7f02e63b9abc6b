use crate::{CatalogError, CharacterSummary, FilterSet, PageNumber};

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogViewModel {
    pub is_loading: bool,
    /// Latest known results; during a reload these are the previous page's.
    pub entities: Option<Vec<CharacterSummary>>,
    pub total_count: Option<u64>,
    pub current_page: PageNumber,
    pub total_pages: u32,
    pub page_links: Vec<Option<u32>>,
    pub search: String,
    pub filters: FilterSet,
    pub error: Option<String>,
    pub last_rejection: Option<CatalogError>,
    pub dirty: bool,
}
