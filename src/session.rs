//! The search session: what the user searched for, what came back, and
//! which request is still outstanding.
//!
//! [`Session::handle`] is the only way state changes. It takes an [`Event`]
//! (a user intent or a fetch resolution) and returns the [`Effect`]s the
//! caller has to carry out. Nothing in here touches the network, so every
//! transition can be driven directly from tests.

use tracing::{debug, info, warn};

use crate::error::{FetchError, FETCH_FAILED_MESSAGE};
use crate::models::{Page, SearchTerm, StoryItem};
use crate::pagination::PaginationCursor;
use crate::recency::RecencyTracker;
use crate::result_set::{ResultSet, SortDirection, SortField};

/// Identifies one issued request. Strictly increasing within a session.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

/// A search request the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub term: SearchTerm,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Search box submitted (Enter or the Submit button).
    Submit(String),
    /// The "More" button.
    RequestMore,
    FetchResolved {
        id: RequestId,
        outcome: Result<Vec<StoryItem>, FetchError>,
    },
    /// One of the last-searches buttons.
    SelectRecent(SearchTerm),
    Dismiss(String),
    SortBy(SortField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(FetchRequest),
    /// The request was superseded; its result must not be delivered.
    Cancel(RequestId),
}

#[derive(Debug)]
pub struct Session {
    cursor: PaginationCursor,
    results: ResultSet,
    recent: RecencyTracker,
    status: Status,
    in_flight: Option<FetchRequest>,
    next_request_id: RequestId,
    last_error: Option<FetchError>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            cursor: PaginationCursor::new(),
            results: ResultSet::new(),
            recent: RecencyTracker::new(),
            status: Status::Idle,
            in_flight: None,
            next_request_id: 1,
            last_error: None,
        }
    }

    /// Initial search performed when the application opens.
    pub fn start(&mut self, initial_term: &str) -> Vec<Effect> {
        self.handle(Event::Submit(initial_term.to_string()))
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Submit(input) => match SearchTerm::new(input) {
                Some(term) => self.search(term),
                None => {
                    debug!("ignoring empty search term");
                    Vec::new()
                }
            },
            Event::SelectRecent(term) => {
                if self.recent.contains(&term) {
                    self.search(term)
                } else {
                    debug!(term = %term, "ignoring selection of an untracked term");
                    Vec::new()
                }
            }
            Event::RequestMore => self.request_more(),
            Event::FetchResolved { id, outcome } => {
                self.resolve(id, outcome);
                Vec::new()
            }
            Event::Dismiss(id) => {
                if self.results.remove(&id) {
                    debug!(id = %id, "dismissed story");
                }
                Vec::new()
            }
            Event::SortBy(field) => {
                if self.status == Status::Success {
                    let direction = self.results.toggle_sort(field);
                    debug!(?field, ?direction, "sorted stories");
                }
                Vec::new()
            }
        }
    }

    fn search(&mut self, term: SearchTerm) -> Vec<Effect> {
        if let Some(previous) = self.cursor.term() {
            if *previous != term {
                let previous = previous.clone();
                self.recent.record(previous);
            }
        }

        info!(term = %term, "searching");
        let (term, page) = self.cursor.start_new_search(term);
        self.issue(term, page)
    }

    fn request_more(&mut self) -> Vec<Effect> {
        if !matches!(self.status, Status::Success | Status::Error) {
            return Vec::new();
        }
        match self.cursor.request_more() {
            Some((term, page)) => {
                info!(term = %term, page, "loading more stories");
                self.issue(term, page)
            }
            None => Vec::new(),
        }
    }

    fn issue(&mut self, term: SearchTerm, page: Page) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if let Some(stale) = self.in_flight.take() {
            debug!(id = stale.id, "cancelling superseded request");
            effects.push(Effect::Cancel(stale.id));
        }

        let request = FetchRequest {
            id: self.next_request_id,
            term,
            page,
        };
        self.next_request_id += 1;
        self.in_flight = Some(request.clone());
        self.status = Status::Loading;
        effects.push(Effect::Fetch(request));
        effects
    }

    fn resolve(&mut self, id: RequestId, outcome: Result<Vec<StoryItem>, FetchError>) {
        let request = match self.in_flight.take() {
            Some(request) if request.id == id && self.status == Status::Loading => request,
            other => {
                self.in_flight = other;
                debug!(id, "discarding stale response");
                return;
            }
        };

        match outcome {
            Ok(stories) => {
                info!(
                    term = %request.term,
                    page = request.page,
                    count = stories.len(),
                    "stories loaded"
                );
                if request.page == 0 {
                    self.results.replace(stories);
                } else {
                    self.results.append(stories);
                }
                self.cursor.mark_loaded(request.page);
                self.last_error = None;
                self.status = Status::Success;
            }
            Err(err) => {
                warn!(term = %request.term, page = request.page, error = %err, "search failed");
                self.last_error = Some(err);
                self.status = Status::Error;
            }
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn items(&self) -> &[StoryItem] {
        self.results.items()
    }

    pub fn recent_terms(&self) -> impl Iterator<Item = &SearchTerm> {
        self.recent.iter()
    }

    pub fn current_term(&self) -> Option<&SearchTerm> {
        self.cursor.term()
    }

    pub fn current_page(&self) -> Page {
        self.cursor.page()
    }

    pub fn active_sort(&self) -> Option<(SortField, SortDirection)> {
        self.results.active_sort()
    }

    pub fn in_flight(&self) -> Option<&FetchRequest> {
        self.in_flight.as_ref()
    }

    /// Whether the "More" control should be shown.
    pub fn can_request_more(&self) -> bool {
        self.status == Status::Success && !self.results.is_empty()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        (self.status == Status::Error).then_some(FETCH_FAILED_MESSAGE)
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
