use std::sync::mpsc::Sender;
use std::thread;

use thiserror::Error;

use crate::runtime::AppEvent;

/// Plain-text paragraph source. Fixed query constants control content
/// length and format.
pub const DEFAULT_ENDPOINT: &str = "https://baconipsum.com/api/?type=all-meat&paras=1&format=text";

/// Used as the reference text when a paragraph can't be fetched.
pub const FALLBACK_TEXT: &str = "Could not load paragraph. Check your internet.";

#[derive(Debug, Error)]
pub enum TextFetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("empty response body")]
    EmptyBody,
}

pub trait TextProvider: Send + 'static {
    fn fetch_text(&self) -> Result<String, TextFetchError>;
}

/// Fetches a paragraph with a blocking GET. No retries and no request
/// timeout: a hanging endpoint leaves the app on the loading screen until
/// the user quits.
pub struct HttpTextProvider {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTextProvider {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TextFetchError> {
        let client = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl TextProvider for HttpTextProvider {
    fn fetch_text(&self) -> Result<String, TextFetchError> {
        let body = self
            .client
            .get(&self.endpoint)
            .send()?
            .error_for_status()?
            .text()?;

        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(TextFetchError::EmptyBody);
        }
        Ok(trimmed.to_string())
    }
}

/// The fetch boundary: failures never escape, they become the fixed
/// fallback string and the session resets with that as reference text.
pub fn resolve_reference(result: Result<String, TextFetchError>) -> String {
    result.unwrap_or_else(|_| FALLBACK_TEXT.to_string())
}

/// Run a fetch on a worker thread and deliver the outcome as an event, so
/// a slow request never blocks ticks or keystrokes.
pub fn spawn_fetch<P: TextProvider>(provider: P, tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let reference = resolve_reference(provider.fetch_text());
        let _ = tx.send(AppEvent::Text(reference));
    });
}
