//! Flavor text ("wisdom")
//!
//! One short poetic line per case, requested from the Gemini
//! `generateContent` endpoint whenever the level changes. Requests run on a
//! background thread and are polled each frame; the previous line stays on
//! screen until a fresh one arrives. Responses for a level that is no longer
//! current are dropped.

use macroquad::logging::{info, warn};

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// Shown before the first response and whenever requests are unavailable
pub const DEFAULT_WISDOM: &str =
    "Master, still the mind and steady the breath. The channels are rivers of life; neglect none.";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
#[cfg(not(target_arch = "wasm32"))]
const MODEL: &str = "gemini-3-flash-preview";
#[cfg(not(target_arch = "wasm32"))]
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Errors from a wisdom request
#[derive(Debug)]
pub enum WisdomError {
    /// GEMINI_API_KEY is not set
    MissingKey,
    /// No HTTP bridge on this platform
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    Unsupported,
    Http(String),
    /// Response did not have the expected shape
    Malformed(String),
    EmptyText,
    /// Worker thread went away without answering
    Disconnected,
}

impl std::fmt::Display for WisdomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WisdomError::MissingKey => write!(f, "{} is not set", API_KEY_ENV),
            WisdomError::Unsupported => write!(f, "wisdom requests are not available on this platform"),
            WisdomError::Http(e) => write!(f, "HTTP error: {}", e),
            WisdomError::Malformed(e) => write!(f, "Malformed response: {}", e),
            WisdomError::EmptyText => write!(f, "Response contained no text"),
            WisdomError::Disconnected => write!(f, "Request worker disconnected"),
        }
    }
}

impl std::error::Error for WisdomError {}

impl WisdomError {
    /// Running without a key or HTTP bridge. `Oracle::new` reports this
    /// once at startup, so individual requests stay quiet.
    pub fn is_offline(&self) -> bool {
        matches!(self, WisdomError::MissingKey | WisdomError::Unsupported)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<ureq::Error> for WisdomError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => WisdomError::Http(format!("status {}", code)),
            ureq::Error::Transport(t) => WisdomError::Http(t.to_string()),
        }
    }
}

/// Prompt for a case's symptoms
pub fn build_prompt(symptoms: &str) -> String {
    format!(
        "Give one short, poetic line of advice in the spirit of traditional Chinese medicine for these symptoms: {}",
        symptoms
    )
}

/// Request body for `generateContent`
pub fn request_body(prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

/// Pull the first candidate's text out of a `generateContent` response
pub fn extract_text(response: &serde_json::Value) -> Result<String, WisdomError> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| WisdomError::Malformed("missing candidates[0].content.parts".into()))?;
    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();
    if text.is_empty() {
        return Err(WisdomError::EmptyText);
    }
    Ok(text.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_blocking(api_key: &str, symptoms: &str) -> Result<String, WisdomError> {
    let url = format!("{}/{}:generateContent", ENDPOINT, MODEL);
    let response = ureq::post(&url)
        .set("x-goog-api-key", api_key)
        .set("Content-Type", "application/json")
        .send_json(request_body(&build_prompt(symptoms)))?;
    let json: serde_json::Value = response
        .into_json()
        .map_err(|e| WisdomError::Malformed(e.to_string()))?;
    extract_text(&json)
}

/// A request in flight for one level
pub struct PendingWisdom {
    level: usize,
    #[cfg(not(target_arch = "wasm32"))]
    receiver: Receiver<Result<String, WisdomError>>,
    #[cfg(target_arch = "wasm32")]
    result: Option<Result<String, WisdomError>>,
}

impl PendingWisdom {
    /// Finished result, if any. Takes it out of the handle.
    fn poll(&mut self) -> Option<Result<String, WisdomError>> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(WisdomError::Disconnected)),
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            self.result.take()
        }
    }
}

/// Start a request for `level`. Resolves immediately when no key is given
/// or the platform cannot make requests.
pub fn request(level: usize, symptoms: &str, api_key: Option<String>) -> PendingWisdom {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let (sender, receiver) = channel();
        match api_key {
            Some(key) => {
                let symptoms = symptoms.to_string();
                thread::spawn(move || {
                    let _ = sender.send(fetch_blocking(&key, &symptoms));
                });
            }
            None => {
                let _ = sender.send(Err(WisdomError::MissingKey));
            }
        }
        PendingWisdom { level, receiver }
    }
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (symptoms, api_key);
        PendingWisdom { level, result: Some(Err(WisdomError::Unsupported)) }
    }
}

/// Key from the environment (native only)
pub fn api_key_from_env() -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())
    }
    #[cfg(target_arch = "wasm32")]
    {
        None
    }
}

/// The line shown in the HUD plus the request currently in flight
pub struct Oracle {
    text: String,
    pending: Option<PendingWisdom>,
    api_key: Option<String>,
}

impl Oracle {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            info!("{} not set, using built-in wisdom", API_KEY_ENV);
        }
        Self {
            text: DEFAULT_WISDOM.to_string(),
            pending: None,
            api_key,
        }
    }

    /// Ask for a new line. Replaces any request still in flight.
    pub fn request(&mut self, level: usize, symptoms: &str) {
        self.pending = Some(request(level, symptoms, self.api_key.clone()));
    }

    /// Accept a finished response if it is still for `current_level`
    pub fn poll(&mut self, current_level: usize) {
        let Some(pending) = self.pending.as_mut() else { return };
        let Some(result) = pending.poll() else { return };
        let level = pending.level;
        self.pending = None;

        if level != current_level {
            info!("Discarding stale wisdom for level {}", level + 1);
            return;
        }
        match result {
            Ok(text) => self.text = text,
            Err(e) if e.is_offline() => {}
            Err(e) => warn!("Wisdom request failed: {}", e),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[cfg(test)]
    fn inject(&mut self, level: usize, result: Result<String, WisdomError>) {
        let (sender, receiver) = channel();
        let _ = sender.send(result);
        self.pending = Some(PendingWisdom { level, receiver });
    }
}
