//! User-facing notifications
//!
//! Page actions never fail loudly: each outcome becomes a short
//! notification handed to a [`Notifier`].

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::Error;

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// A transient, non-blocking message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub variant: Variant,
}

impl Notification {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            variant: Variant::Default,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn destructive(mut self) -> Self {
        self.variant = Variant::Destructive;
        self
    }

    /// A success message
    pub fn success(description: impl Into<String>) -> Self {
        Self::new("Success").with_description(description)
    }

    /// Describe `error`.
    ///
    /// `title` and `fallback` are used for errors that carry no
    /// user-facing text of their own.
    pub fn from_error(title: &str, fallback: &str, error: &Error) -> Self {
        match error {
            Error::AccessDenied(msg) => Self::new("Access Denied")
                .with_description(msg.clone())
                .destructive(),
            Error::NoData(msg) => Self::new("No Data").with_description(msg.clone()),
            Error::Unauthenticated => Self::new("Authentication Required")
                .with_description("Please log in to continue."),
            Error::InvalidImport(_) => Self::new("Import Failed")
                .with_description("Could not import data. Check file format and try again.")
                .destructive(),
            _ => Self::new(title).with_description(fallback).destructive(),
        }
    }
}

/// Destination for notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        let description = n.description.as_deref().unwrap_or("");
        match n.variant {
            Variant::Default => tracing::info!(title = %n.title, "{}", description),
            Variant::Destructive => tracing::warn!(title = %n.title, "{}", description),
        }
    }
}

/// Keeps notifications until they are drained
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    inbox: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification received so far
    pub fn drain(&self) -> Vec<Notification> {
        let mut inbox = self.inbox.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *inbox)
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
