//! A single line of child output

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Which output stream of the child a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Stdout,
    Stderr,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Stdout => "stdout",
            Channel::Stderr => "stderr",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line read from a child, without its line terminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLine {
    pub session_id: Uuid,
    pub channel: Channel,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl OutputLine {
    pub fn new(session_id: Uuid, channel: Channel, text: impl Into<String>) -> Self {
        Self {
            session_id,
            channel,
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}
