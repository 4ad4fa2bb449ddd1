//! Push notifications for snowalert
//!
//! Sends emergency-priority Pushover messages: the alert stays on the
//! phone until acknowledged, with the provider re-delivering it on the
//! configured retry interval until the expiry elapses.

pub mod client;
pub mod error;

pub use client::{Notification, NotifyClient};
pub use error::NotifyError;
