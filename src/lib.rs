//! Search Hacker News stories: search session state, the search API client,
//! and the background fetcher that connects the two.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod hn_client;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod recency;
pub mod result_set;
pub mod session;

pub use error::{FetchError, FETCH_FAILED_MESSAGE};
pub use fetcher::{FetchOutcome, Fetcher, StorySource};
pub use hn_client::HackerNewsClient;
pub use models::{Page, SearchTerm, StoryItem};
pub use result_set::{SortDirection, SortField};
pub use session::{Effect, Event, FetchRequest, RequestId, Session, Status};
