//! In-memory transport for tests and offline demos.
//!
//! Routes are matched by URL prefix in registration order. Every request is recorded so
//! tests can assert on what was (or was not) sent.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Result, SourceError,
    transport::{HttpRequest, HttpResponse, HttpTransport},
};

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync>;

struct Route {
    prefix: String,
    respond: Responder,
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    routes: Arc<Mutex<Vec<Route>>>,
    log: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request whose URL starts with `prefix` with a 200 and `body`.
    pub fn respond_json(self, prefix: &str, body: &str) -> Self {
        let body = body.to_owned();
        self.route(prefix, move |_| Ok(HttpResponse::ok(body.clone())))
    }

    pub fn respond_status(self, prefix: &str, status: u16) -> Self {
        self.route(prefix, move |_| Ok(HttpResponse::with_status(status, "")))
    }

    /// Simulate a connection-level failure.
    pub fn fail(self, prefix: &str, message: &str) -> Self {
        let message = message.to_owned();
        self.route(prefix, move |_| Err(SourceError::Transport(message.clone())))
    }

    pub fn route<F>(self, prefix: &str, respond: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Route {
                prefix: prefix.to_owned(),
                respond: Box::new(respond),
            });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.starts_with(prefix))
            .collect()
    }

    fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
        routes
            .iter()
            .find(|route| request.url.starts_with(&route.prefix))
            .map_or_else(
                || Ok(HttpResponse::with_status(404, "no route")),
                |route| (route.respond)(request),
            )
    }
}

impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        self.dispatch(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_by_prefix_and_records() {
        let transport = ScriptedTransport::new()
            .respond_json("https://a.example/", "{\"a\":1}")
            .respond_status("https://b.example/", 503)
            .fail("https://c.example/", "connection reset");

        let a = transport
            .send(HttpRequest::get("https://a.example/x"))
            .await
            .unwrap();
        assert_eq!(a.body, "{\"a\":1}");

        let b = transport
            .send(HttpRequest::get("https://b.example/"))
            .await
            .unwrap();
        assert_eq!(b.status, 503);

        assert!(
            transport
                .send(HttpRequest::get("https://c.example/"))
                .await
                .is_err()
        );

        let unrouted = transport
            .send(HttpRequest::get("https://d.example/"))
            .await
            .unwrap();
        assert_eq!(unrouted.status, 404);

        assert_eq!(transport.requests().len(), 4);
        assert_eq!(transport.requests_to("https://a.example/").len(), 1);
    }
}
