//! State of an outstanding request, and the guard against applying stale responses.
use log::debug;

/// Result slot of a request issued by a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    /// No request has been issued yet.
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// The request failed; the reason is shown next to a retry control.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FetchState::Ready(value),
            Err(err) => FetchState::Failed(err.to_string()),
        }
    }
}

/// Identifies the intent a request was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    /// What the request was for, e.g. the entry id. Only used for logging.
    pub key: String,
}

/// Hands out tickets and tells whether a ticket still matches the latest intent.
#[derive(Debug, Default)]
pub struct Generations {
    current: u64,
}

impl Generations {
    /// Starts a new intent, making every previously issued ticket stale.
    pub fn issue(&mut self, key: impl Into<String>) -> Ticket {
        self.current += 1;
        Ticket {
            generation: self.current,
            key: key.into(),
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        if ticket.generation == self.current {
            return true;
        }

        debug!(
            "discarding stale response for `{}` (generation {}, current {})",
            ticket.key, ticket.generation, self.current
        );
        false
    }
}
