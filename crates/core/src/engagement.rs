//! Behavioral triggers for the landing page (exit-intent offer, sticky
//! call-to-action banner). Session state is owned by the caller and passed in
//! explicitly; nothing here is shared between sessions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const EXIT_INTENT_SHOWN_KEY: &str = "exitIntentShown";

/// Portion of the scrollable range after which the banner appears.
pub const SCROLL_BANNER_THRESHOLD_PERCENT: f64 = 50.0;

/// Per-session key/value flags, e.g. browser session storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState(BTreeMap<String, String>);

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_flag_set(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }
}

/// Decides whether the exit-intent offer opens for a pointer leaving the page
/// at `pointer_y`. Fires at most once per session.
pub fn exit_intent(session: &mut SessionState, pointer_y: f64) -> bool {
    if pointer_y > 0.0 || session.is_flag_set(EXIT_INTENT_SHOWN_KEY) {
        return false;
    }
    session.set(EXIT_INTENT_SHOWN_KEY, "true");
    true
}

pub fn scroll_banner_visible(scroll_y: f64, document_height: f64, viewport_height: f64) -> bool {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return false;
    }
    scroll_y / scrollable * 100.0 > SCROLL_BANNER_THRESHOLD_PERCENT
}

#[cfg(test)]
mod tests {
    use super::{exit_intent, scroll_banner_visible, SessionState, EXIT_INTENT_SHOWN_KEY};

    #[test]
    fn exit_intent_fires_once_per_session() {
        let mut session = SessionState::new();

        assert!(!exit_intent(&mut session, 120.0));
        assert!(exit_intent(&mut session, 0.0));
        assert_eq!(session.get(EXIT_INTENT_SHOWN_KEY), Some("true"));
        assert!(!exit_intent(&mut session, -4.0));
    }

    #[test]
    fn sessions_do_not_share_flags() {
        let mut first = SessionState::new();
        let mut second = SessionState::new();

        assert!(exit_intent(&mut first, 0.0));
        assert!(exit_intent(&mut second, -1.0));
    }

    #[test]
    fn session_state_serializes_as_plain_map() {
        let mut session = SessionState::new();
        session.set(EXIT_INTENT_SHOWN_KEY, "true");

        let json = serde_json::to_value(&session).expect("serialize");
        assert_eq!(json, serde_json::json!({ "exitIntentShown": "true" }));
    }

    #[test]
    fn banner_appears_past_half_of_scrollable_range() {
        assert!(!scroll_banner_visible(0.0, 3000.0, 1000.0));
        assert!(!scroll_banner_visible(1000.0, 3000.0, 1000.0));
        assert!(scroll_banner_visible(1001.0, 3000.0, 1000.0));
        assert!(!scroll_banner_visible(10.0, 800.0, 1000.0));
    }
}
