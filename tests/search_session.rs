//! Drives a session through the real client and fetcher against a local
//! mock of the search API.

use std::sync::Arc;
use std::time::Duration;

use hacker_stories::{
    Effect, Event, Fetcher, HackerNewsClient, Session, SortField, Status, FETCH_FAILED_MESSAGE,
};
use mockito::{Matcher, Mock, Server};

const WAIT: Duration = Duration::from_secs(10);

fn hits_body(prefix: &str, count: usize) -> String {
    let hits: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "objectID": format!("{}-{}", prefix, i),
                "title": format!("{} story {}", prefix, i),
                "url": format!("https://example.com/{}/{}", prefix, i),
                "author": format!("author{}", i),
                "num_comments": i,
                "points": 100 + i,
                "created_at": "2024-01-01T00:00:00.000Z"
            })
        })
        .collect();
    serde_json::json!({ "hits": hits }).to_string()
}

fn mock_page(server: &mut Server, term: &str, page: u32, body: String) -> Mock {
    server
        .mock("GET", "/api/v1/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), term.into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
}

struct Harness {
    session: Session,
    fetcher: Fetcher,
}

impl Harness {
    fn new(server: &Server) -> Self {
        let client = HackerNewsClient::with_options(
            format!("{}/api/v1/search", server.url()),
            Duration::from_secs(5),
            "hacker_stories-tests",
        )
        .unwrap();
        Self {
            session: Session::new(),
            fetcher: Fetcher::new(Arc::new(client)),
        }
    }

    /// Handles `event` and, if it issued a request, waits for its resolution.
    fn run(&mut self, event: Event) {
        let effects = self.session.handle(event);
        let fetched = effects.iter().any(|e| matches!(e, Effect::Fetch(_)));
        self.fetcher.apply(effects);
        if fetched {
            let outcome = self.fetcher.wait(WAIT).expect("search did not finish");
            self.session.handle(outcome.into());
        }
    }

    fn submit(&mut self, term: &str) {
        self.run(Event::Submit(term.to_string()));
    }

    fn recent(&self) -> Vec<String> {
        self.session.recent_terms().map(|t| t.to_string()).collect()
    }
}

#[test]
fn shows_twenty_stories_then_forty_after_more() {
    let mut server = Server::new();
    let first = mock_page(&mut server, "React", 0, hits_body("p0", 20)).create();
    let second = mock_page(&mut server, "React", 1, hits_body("p1", 20)).create();

    let mut harness = Harness::new(&server);
    harness.submit("React");
    assert_eq!(harness.session.items().len(), 20);
    assert!(harness.session.can_request_more());

    harness.run(Event::RequestMore);
    assert_eq!(harness.session.items().len(), 40);
    assert_eq!(harness.session.status(), Status::Success);

    first.assert();
    second.assert();
}

#[test]
fn searches_again_via_the_last_searched_term() {
    let mut server = Server::new();
    let react = mock_page(&mut server, "React", 0, hits_body("React", 20))
        .expect(2)
        .create();
    let _cypress = mock_page(&mut server, "Cypress", 0, hits_body("Cypress", 2)).create();

    let mut harness = Harness::new(&server);
    harness.submit("React");
    harness.submit("Cypress");
    assert_eq!(harness.session.items().len(), 2);
    assert_eq!(harness.recent(), vec!["React"]);

    let react_term = harness.session.recent_terms().next().cloned().unwrap();
    harness.run(Event::SelectRecent(react_term));

    assert_eq!(harness.session.items().len(), 20);
    assert!(harness.session.items()[0].title.contains("React"));
    assert!(harness.recent().contains(&"Cypress".to_string()));
    react.assert();
}

#[test]
fn keeps_at_most_five_last_searched_terms() {
    let mut server = Server::new();
    let _any = server
        .mock("GET", "/api/v1/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"hits": []}"#)
        .create();

    let mut harness = Harness::new(&server);
    harness.submit("React");
    for word in ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"] {
        harness.submit(word);
    }

    assert_eq!(
        harness.recent(),
        vec!["alpha", "bravo", "charlie", "delta", "echo"]
    );
}

#[test]
fn empty_result_has_nothing_to_dismiss() {
    let mut server = Server::new();
    let _empty = mock_page(&mut server, "React", 0, r#"{"hits": []}"#.to_string()).create();

    let mut harness = Harness::new(&server);
    harness.submit("React");
    assert_eq!(harness.session.status(), Status::Success);
    assert!(harness.session.items().is_empty());
    assert!(!harness.session.can_request_more());
}

#[test]
fn dismiss_and_sort_work_on_loaded_stories() {
    let mut server = Server::new();
    let _stories = mock_page(&mut server, "React", 0, hits_body("s", 2)).create();

    let mut harness = Harness::new(&server);
    harness.submit("React");

    harness.run(Event::SortBy(SortField::Points));
    assert_eq!(harness.session.items()[0].id, "s-0");
    harness.run(Event::SortBy(SortField::Points));
    assert_eq!(harness.session.items()[0].id, "s-1");

    harness.run(Event::Dismiss("s-1".into()));
    assert_eq!(harness.session.items().len(), 1);
    assert_eq!(harness.session.items()[0].id, "s-0");
}

#[test]
fn server_failure_shows_generic_message() {
    let mut server = Server::new();
    let _failure = server
        .mock("GET", "/api/v1/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let mut harness = Harness::new(&server);
    harness.submit("React");
    assert_eq!(harness.session.status(), Status::Error);
    assert_eq!(harness.session.error_message(), Some(FETCH_FAILED_MESSAGE));
    assert_eq!(FETCH_FAILED_MESSAGE, "Something went wrong ...");
}

#[test]
fn network_failure_shows_generic_message() {
    let client = HackerNewsClient::with_options(
        "http://127.0.0.1:9/api/v1/search",
        Duration::from_secs(2),
        "hacker_stories-tests",
    )
    .unwrap();
    let mut session = Session::new();
    let mut fetcher = Fetcher::new(Arc::new(client));

    fetcher.apply(session.start("React"));
    let outcome = fetcher.wait(WAIT).expect("search did not finish");
    session.handle(outcome.into());

    assert_eq!(session.status(), Status::Error);
    assert_eq!(session.error_message(), Some("Something went wrong ..."));
}
