// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinate, ProviderService, Review, SearchFilters, SearchQuery, SearchResult, SearchResults,
    ServiceCategory, SortOrder,
};
pub use requests::{RecordReviewRequest, SearchRequest};
pub use responses::{
    ErrorResponse, HealthResponse, RecordReviewResponse, SearchParams, SearchResponse,
    ServiceWithDistance,
};
