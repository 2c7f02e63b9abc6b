use url::form_urlencoded;

use crate::{FilterSet, Gender, PageNumber, Status};

/// Listing endpoint the descriptor's parameters are meant for.
pub const CHARACTER_ENDPOINT: &str = "character";

/// Canonical identity of one listing query.
///
/// Empty search text and unset filter fields are stored as `None`, so two
/// logically identical inputs always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    page: PageNumber,
    name: Option<String>,
    status: Option<Status>,
    gender: Option<Gender>,
}

/// Combines the three state slices into a descriptor.
///
/// Search text is taken verbatim; trimming is the caller's business.
pub fn build(page: PageNumber, search: &str, filters: &FilterSet) -> QueryDescriptor {
    QueryDescriptor {
        page,
        name: (!search.is_empty()).then(|| search.to_string()),
        status: filters.status,
        gender: filters.gender,
    }
}

impl QueryDescriptor {
    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn filters(&self) -> FilterSet {
        FilterSet::new(self.status, self.gender)
    }

    /// Request parameters in stable order: page, name, status, gender.
    /// Absent values are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.as_str().to_string()));
        }
        pairs
    }

    /// `character?page=2&name=Rick` style key, form-urlencoded.
    pub fn cache_key(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query_pairs())
            .finish();
        format!("{CHARACTER_ENDPOINT}?{query}")
    }
}
