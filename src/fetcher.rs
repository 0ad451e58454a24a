use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::FetchError;
use crate::hn_client::HackerNewsClient;
use crate::models::{Page, SearchTerm, StoryItem};
use crate::session::{Effect, Event, FetchRequest, RequestId};

/// Anything that can answer a search. Implemented by [`HackerNewsClient`].
pub trait StorySource: Send + Sync {
    fn search(&self, term: &SearchTerm, page: Page) -> Result<Vec<StoryItem>, FetchError>;
}

impl StorySource for HackerNewsClient {
    fn search(&self, term: &SearchTerm, page: Page) -> Result<Vec<StoryItem>, FetchError> {
        HackerNewsClient::search(self, term, page)
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub id: RequestId,
    pub result: Result<Vec<StoryItem>, FetchError>,
}

impl From<FetchOutcome> for Event {
    fn from(outcome: FetchOutcome) -> Self {
        Event::FetchResolved {
            id: outcome.id,
            outcome: outcome.result,
        }
    }
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// Runs search requests on background threads and hands their outcomes
/// back to the thread that owns the session.
pub struct Fetcher {
    source: Arc<dyn StorySource>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    pending: HashSet<RequestId>,
    cancelled: HashSet<RequestId>,
    notify: Option<Notify>,
}

impl Fetcher {
    pub fn new(source: Arc<dyn StorySource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            pending: HashSet::new(),
            cancelled: HashSet::new(),
            notify: None,
        }
    }

    /// `notify` runs on the worker thread after each outcome is sent,
    /// e.g. to wake up the UI.
    pub fn with_notifier(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => self.spawn(request),
                Effect::Cancel(id) => {
                    if self.pending.remove(&id) {
                        self.cancelled.insert(id);
                    }
                }
            }
        }
    }

    fn spawn(&mut self, request: FetchRequest) {
        let FetchRequest { id, term, page } = request;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        self.pending.insert(id);

        tracing::debug!(id, term = %term, page, "starting search request");
        thread::spawn(move || {
            let result = source.search(&term, page);
            // the receiver is gone once the app shuts down
            let _ = tx.send(FetchOutcome { id, result });
            if let Some(notify) = notify {
                notify();
            }
        });
    }

    /// Outcomes that arrived since the last call. Cancelled requests are dropped.
    pub fn poll(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(outcome) = self.accept(outcome) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Blocks until the next outcome that was not cancelled, or until `timeout`.
    pub fn wait(&mut self, timeout: Duration) -> Option<FetchOutcome> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    if let Some(outcome) = self.accept(outcome) {
                        return Some(outcome);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    fn accept(&mut self, outcome: FetchOutcome) -> Option<FetchOutcome> {
        if self.cancelled.remove(&outcome.id) {
            tracing::debug!(id = outcome.id, "dropping result of cancelled request");
            return None;
        }
        self.pending.remove(&outcome.id);
        Some(outcome)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers from a fixed table; blocks requests for "slow" until released.
    struct FakeSource {
        gate: Mutex<Option<Receiver<()>>>,
    }

    impl StorySource for FakeSource {
        fn search(&self, term: &SearchTerm, page: Page) -> Result<Vec<StoryItem>, FetchError> {
            if term.as_str() == "slow" {
                if let Some(gate) = self.gate.lock().unwrap().take() {
                    let _ = gate.recv();
                }
            }
            if term.as_str() == "broken" {
                return Err(FetchError::Status(500));
            }
            Ok(vec![StoryItem {
                id: format!("{}-{}", term, page),
                title: term.to_string(),
                url: String::new(),
                author: "someone".into(),
                num_comments: 0,
                points: 0,
                created_at: None,
            }])
        }
    }

    fn request(id: RequestId, term: &str, page: Page) -> Effect {
        Effect::Fetch(FetchRequest {
            id,
            term: SearchTerm::new(term).unwrap(),
            page,
        })
    }

    fn fetcher() -> (Fetcher, Sender<()>) {
        let (release, gate) = mpsc::channel();
        let source = FakeSource {
            gate: Mutex::new(Some(gate)),
        };
        (Fetcher::new(Arc::new(source)), release)
    }

    #[test]
    fn delivers_outcome_tagged_with_request_id() {
        let (mut fetcher, _release) = fetcher();
        fetcher.apply(vec![request(1, "React", 2)]);
        assert!(fetcher.has_pending());

        let outcome = fetcher.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.id, 1);
        assert_eq!(outcome.result.unwrap()[0].id, "React-2");
        assert!(!fetcher.has_pending());
    }

    #[test]
    fn failures_are_delivered_too() {
        let (mut fetcher, _release) = fetcher();
        fetcher.apply(vec![request(3, "broken", 0)]);
        let outcome = fetcher.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.result.unwrap_err(), FetchError::Status(500));
    }

    #[test]
    fn cancelled_request_never_surfaces() {
        let (mut fetcher, release) = fetcher();
        fetcher.apply(vec![request(1, "slow", 0)]);
        fetcher.apply(vec![Effect::Cancel(1), request(2, "Rust", 0)]);

        let outcome = fetcher.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.id, 2);

        release.send(()).unwrap();
        assert!(fetcher.wait(Duration::from_millis(500)).is_none());
        assert!(fetcher.poll().is_empty());
    }

    #[test]
    fn notifier_runs_for_each_outcome() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let (fetcher, _release) = fetcher();
        let mut fetcher = fetcher.with_notifier(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        fetcher.apply(vec![request(1, "a", 0)]);
        fetcher.wait(Duration::from_secs(5)).unwrap();
        fetcher.apply(vec![request(2, "b", 0)]);
        fetcher.wait(Duration::from_secs(5)).unwrap();

        // the notifier runs right after the send, so give it a moment
        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
