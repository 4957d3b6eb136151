use httpmock::prelude::*;
use httpmock::{
    Mock,
    Then,
    When,
};
use serde_json::json;

type HandlerFn = Box<dyn Fn(When, Then)>;

struct Handler {
    expected_hits: usize,
    f: HandlerFn,
}

// Fake HTTP endpoint (API server or GitHub) whose handlers are registered up front and checked
// for exact hit counts at the end of the test
pub struct MockServerBuilder {
    server: MockServer,
    handlers: Vec<Handler>,
    registered: Vec<(usize, usize)>,
}

fn log_request(req: &HttpMockRequest) -> bool {
    // println, not tracing: this runs on the mock server's threads
    println!("    request: {} {}", req.method(), req.uri().path());
    true
}

impl MockServerBuilder {
    pub fn new() -> MockServerBuilder {
        MockServerBuilder { server: MockServer::start(), handlers: vec![], registered: vec![] }
    }

    pub fn handle<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.handle_multiple(f, 1)
    }

    pub fn handle_multiple<F: Fn(When, Then) + 'static>(&mut self, f: F, hits: usize) -> &mut Self {
        let f: HandlerFn = Box::new(move |when, then| f(when.matches(log_request), then));
        self.handlers.push(Handler { expected_hits: hits, f });
        self
    }

    // Matches on path only, so a GET and a DELETE for the same object both get the 404
    pub fn handle_not_found(&mut self, path: String) -> &mut Self {
        self.handle(move |when, then| {
            when.path(&path);
            then.status(404).json_body(status_not_found());
        })
    }

    pub fn build(&mut self) {
        for handler in &self.handlers {
            let id = self.server.mock(&handler.f).id;
            self.registered.push((id, handler.expected_hits));
        }

        // catch-all goes last so it only sees requests nothing else matched
        self.server.mock(|when, _| {
            when.matches(log_request);
        });
    }

    pub fn assert(&self) {
        for (id, hits) in &self.registered {
            println!("checking mock {id} was hit {hits} time(s)");
            Mock::new(*id, &self.server).assert_hits(*hits);
        }
    }

    pub fn url(&self) -> http::Uri {
        http::Uri::try_from(self.server.url("/")).unwrap()
    }

    pub fn base_url(&self) -> String {
        self.server.base_url()
    }
}

impl Default for MockServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn make_fake_apiserver() -> (MockServerBuilder, kube::Client) {
    let builder = MockServerBuilder::new();
    let client = kube::Client::try_from(kube::Config::new(builder.url())).unwrap();
    (builder, client)
}

fn status_body(code: u16, reason: Option<&str>, message: Option<&str>) -> serde_json::Value {
    let mut status = json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": if code < 400 { "Success" } else { "Failure" },
        "code": code,
    });
    if let Some(reason) = reason {
        status["reason"] = json!(reason);
    }
    if let Some(message) = message {
        status["message"] = json!(message);
    }
    status
}

pub fn status_ok() -> serde_json::Value {
    status_body(200, None, None)
}

pub fn status_not_found() -> serde_json::Value {
    status_body(404, Some("NotFound"), None)
}

pub fn status_conflict() -> serde_json::Value {
    status_body(
        409,
        Some("Conflict"),
        Some("the object has been modified; please apply your changes to the latest version and try again"),
    )
}

pub fn server_version(major: &str, minor: &str) -> serde_json::Value {
    json!({
        "major": major,
        "minor": minor,
        "gitVersion": format!("v{major}.{}.0", minor.trim_end_matches('+')),
        "gitCommit": "0000000000000000000000000000000000000000",
        "gitTreeState": "clean",
        "buildDate": "2024-01-01T00:00:00Z",
        "goVersion": "go1.22.0",
        "compiler": "gc",
        "platform": "linux/amd64"
    })
}
