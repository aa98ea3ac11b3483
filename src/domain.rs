use crate::config::Credentials;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::pushover::{AppToken, UserKey};

const TITLE_PREFIX: &str = "sms event:";

pub fn title_for(event: &str) -> String {
    format!("{}{}", TITLE_PREFIX, event)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub token: AppToken,
    pub user: UserKey,
    pub message: String,
    pub title: String,
}

impl OutgoingMessage {
    pub fn for_event(credentials: &Credentials, event: &str, body: impl Into<String>) -> Self {
        let Credentials { user, token } = credentials;

        Self {
            token: token.clone(),
            user: user.clone(),
            message: body.into(),
            title: title_for(event),
        }
    }

    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

/// Displays a message without its credentials.
pub struct Redacted<'a>(&'a OutgoingMessage);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let OutgoingMessage { title, message, .. } = self.0;
        write!(f, "title={:?} message={:?}", title, message)
    }
}
