//! Scripted HTTP transport shared by the integration tests.
#![allow(dead_code)]

use reqwest::StatusCode;
use seasonarr::TransportError;
use seasonarr::clients::{HttpResponse, HttpTransport};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const MOCK_JIKAN: &str = "http://jikan.test/v4";

#[derive(Clone)]
pub enum Scripted {
    Respond(HttpResponse),
    Delayed(Duration, HttpResponse),
    Fail(String),
}

impl Scripted {
    pub fn ok(content_type: &str, body: &str) -> Self {
        Self::Respond(HttpResponse::new(StatusCode::OK, Some(content_type), body))
    }

    pub fn status(status: StatusCode, content_type: &str) -> Self {
        Self::Respond(HttpResponse::new(status, Some(content_type), ""))
    }
}

#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Scripted>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, scripted: Scripted) -> Self {
        self.routes.insert(url.to_string(), scripted);
        self
    }

    pub fn season(self, year: i32, season: &str, body: &str) -> Self {
        self.route(
            &format!("{MOCK_JIKAN}/seasons/{year}/{season}"),
            Scripted::ok("application/json", body),
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        match self.routes.get(url).cloned() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Delayed(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(Scripted::Fail(message)) => Err(TransportError::connection(message)),
            None => Err(TransportError::connection(format!("no route for {url}"))),
        }
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.respond(url).await
    }

    async fn probe(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.respond(url).await.map(|mut response| {
            response.body.clear();
            response
        })
    }
}

pub fn season_entry(title: &str, members: u64) -> serde_json::Value {
    serde_json::json!({
        "mal_id": members,
        "title": title,
        "members": members,
        "genres": [{"mal_id": 1, "name": "Action"}, {"mal_id": 10, "name": "Fantasy"}],
        "synopsis": format!("{title} synopsis."),
        "aired": {"from": "2024-01-07T00:00:00+00:00", "to": null},
        "score": 8.5,
        "episodes": 12,
        "status": "Currently Airing",
        "images": {"jpg": {"image_url": format!("https://cdn.test/{members}.jpg")}}
    })
}

pub fn season_body(entries: &[serde_json::Value]) -> String {
    serde_json::json!({
        "pagination": {"last_visible_page": 1, "has_next_page": false},
        "data": entries
    })
    .to_string()
}
