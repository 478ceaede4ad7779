//! Coach tips
//!
//! A short remark from a remote text-generation endpoint about the current
//! session. Purely decorative: any failure turns into a canned line and the
//! game never waits on it.

use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;
use serde_json::json;

use crate::sim::GameState;

/// Shown when the request fails outright
pub const FALLBACK_TIP: &str = "Keep practicing! Every shot counts.";
/// Shown when the reply carries no text
pub const EMPTY_REPLY_TIP: &str = "Looking good on the court!";
/// Label on the coach button while a request is in flight
pub const THINKING_LABEL: &str = "Coach Thinking...";

/// The prompt pair sent to the endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CoachPrompt {
    pub system: String,
    pub user: String,
}

impl CoachPrompt {
    pub fn new(score: u32, misses: u32, skin: &str) -> Self {
        let system = format!(
            "You are an expert basketball coach and a witty commentator for a 2D physics game.\n\
             Current Stats: Score: {score}, Misses: {misses}.\n\
             Current Ball Skin: {skin}.\n\
             Rules:\n\
             1. Keep it short (max 2 sentences).\n\
             2. Give a specific comment about their choice of ball skin if appropriate.\n\
             3. If misses > score, give a 'pro tip' about aiming or arcs.\n\
             4. Tone: Energetic, encouraging, and smart."
        );
        let user = format!("Hey coach, how am I doing with this {skin} ball?");
        Self { system, user }
    }

    pub fn for_state(state: &GameState) -> Self {
        Self::new(state.score, state.misses, state.theme().name)
    }

    /// JSON body for a generateContent request
    pub fn request_body(&self) -> serde_json::Value {
        json!({
            "contents": [{ "parts": [{ "text": self.user }] }],
            "systemInstruction": { "parts": [{ "text": self.system }] }
        })
    }
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Pull the first candidate's text out of a reply body
pub fn parse_reply(body: &str) -> Result<String, serde_json::Error> {
    let reply: Reply = serde_json::from_str(body)?;
    let text = reply
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty());
    Ok(text.unwrap_or_else(|| EMPTY_REPLY_TIP.to_string()))
}

/// Turn a transport outcome into the tip to show.
///
/// `Ok(body)` is a successful HTTP response body; `Err` covers non-success
/// status and network errors. Never fails, never retries.
pub fn tip_from_response<E: std::fmt::Display>(response: Result<String, E>) -> String {
    match response {
        Ok(body) => parse_reply(&body).unwrap_or_else(|e| {
            log::warn!("Coach reply unreadable: {e}");
            FALLBACK_TIP.to_string()
        }),
        Err(e) => {
            log::warn!("Coach request failed: {e}");
            FALLBACK_TIP.to_string()
        }
    }
}

/// Single-flight gate for the coach button.
///
/// `try_begin` hands out a ticket while no request is running; dropping the
/// ticket reopens the gate, whether the request succeeded, failed or panicked.
#[derive(Debug, Clone, Default)]
pub struct CoachGate {
    busy: Rc<Cell<bool>>,
}

impl CoachGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn try_begin(&self) -> Option<CoachTicket> {
        if self.busy.replace(true) {
            return None;
        }
        Some(CoachTicket {
            busy: Rc::clone(&self.busy),
        })
    }
}

/// Held for the lifetime of one coach request
#[derive(Debug)]
pub struct CoachTicket {
    busy: Rc<Cell<bool>>,
}

impl Drop for CoachTicket {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Viewport;

    #[test]
    fn test_prompt_mentions_stats_and_skin() {
        let p = CoachPrompt::new(3, 5, "Mars");
        assert!(p.system.contains("Score: 3, Misses: 5"));
        assert!(p.system.contains("Current Ball Skin: Mars."));
        assert_eq!(p.user, "Hey coach, how am I doing with this Mars ball?");
    }

    #[test]
    fn test_prompt_for_state_uses_selected_skin() {
        let mut s = GameState::new(Viewport::new(800.0, 600.0), &Settings::default());
        s.select_skin(2);
        let p = CoachPrompt::for_state(&s);
        assert!(p.user.contains("Toxic"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = CoachPrompt::new(0, 0, "Classic").request_body();
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Hey coach, how am I doing with this Classic ball?"
        );
        assert!(body["systemInstruction"]["parts"][0]["text"].is_string());
    }

    #[test]
    fn test_parse_reply_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Nice arc!"}]}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Nice arc!");
    }

    #[test]
    fn test_parse_reply_without_text() {
        assert_eq!(parse_reply(r#"{"candidates":[]}"#).unwrap(), EMPTY_REPLY_TIP);
        assert_eq!(parse_reply("{}").unwrap(), EMPTY_REPLY_TIP);
        let body = r#"{"candidates":[{"content":{"parts":[{}]}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), EMPTY_REPLY_TIP);
    }

    #[test]
    fn test_failures_fall_back() {
        assert_eq!(tip_from_response::<String>(Err("HTTP 500".into())), FALLBACK_TIP);
        assert_eq!(tip_from_response::<String>(Ok("<html>".into())), FALLBACK_TIP);
        let ok = r#"{"candidates":[{"content":{"parts":[{"text":"Swish city."}]}}]}"#;
        assert_eq!(tip_from_response::<String>(Ok(ok.into())), "Swish city.");
    }

    #[test]
    fn test_gate_reopens_on_drop() {
        let gate = CoachGate::new();
        let ticket = gate.try_begin().expect("gate open");
        assert!(gate.is_busy());
        assert!(gate.try_begin().is_none());
        drop(ticket);
        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_some());
    }
}
