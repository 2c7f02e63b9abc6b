/// Request generation number. Every issued fetch gets a fresh one.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSummary {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub origin: String,
    pub location: String,
    pub image: String,
}

/// One page of results plus the total across all pages for the same
/// search and filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub entities: Vec<CharacterSummary>,
    pub total_count: u64,
}
