#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The catalog view was opened; issues the initial fetch.
    Mounted,
    /// User edited the search box.
    SearchChanged(String),
    /// User applied dropdown filters. Empty strings mean "any".
    FiltersChanged { status: String, gender: String },
    /// User changed only the status dropdown; the gender stays as it is.
    StatusChanged(String),
    /// User changed only the gender dropdown; the status stays as it is.
    GenderChanged(String),
    /// User dropped both the search text and the filters.
    ClearQuery,
    /// User clicked a page button.
    PageRequested(u32),
    NextPage,
    PreviousPage,
    /// User asked to re-run a failed fetch.
    RetryClicked,
    /// Fetch layer finished a request.
    FetchCompleted {
        request_id: crate::RequestId,
        result: Result<crate::ResultPage, crate::FetchFailure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
}
