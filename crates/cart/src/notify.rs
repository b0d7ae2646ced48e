//! User-visible notifications emitted by cart operations.
//!
//! How a notification reaches the user (toast, terminal line, log entry)
//! is the front end's business; the store only emits the events.

use std::fmt;

use tracing::warn;

/// Informational and error events surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Requested quantity exceeds the remotely available stock.
    OutOfStock,
    /// Adding a product to the cart failed.
    AddFailed,
    /// Removing a product from the cart failed.
    RemoveFailed,
    /// Changing a product's quantity failed.
    UpdateFailed,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::OutOfStock => "Requested quantity is out of stock",
            Self::AddFailed => "Could not add the product to the cart",
            Self::RemoveFailed => "Could not remove the product from the cart",
            Self::UpdateFailed => "Could not change the product quantity",
        };
        f.write_str(message)
    }
}

/// Sink for user-visible notifications.
///
/// Implementations are synchronous and fire-and-forget: the store never
/// waits on, or fails because of, a notifier.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier> Notifier for std::sync::Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Notifier that logs each notification as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        warn!(%notification, "cart notification");
    }
}

/// Notifier that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}
