use leptos::*;
use once_cell::unsync::Lazy;
use strum::Display as StrumDisplay;

use crate::event_utils::Debouncer;
use crate::global_state;

/// How long a transient notification stays on screen.
pub const NOTIFICATION_DISMISS_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum NotificationLevel {
    #[strum(serialize = "success")]
    Success,
    #[strum(serialize = "warning")]
    Warning,
    #[strum(serialize = "error")]
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

thread_local! {
    static DISMISS: Lazy<Debouncer> = Lazy::new(|| Debouncer::new(NOTIFICATION_DISMISS_MS));
}

/// Show a transient notification; it auto-dismisses after ~3s. A newer
/// notification restarts the dismiss timer.
pub fn show_notification(message: impl Into<String>, level: NotificationLevel) {
    global_state::notification().set(Some(Notification { message: message.into(), level }));
    DISMISS.with(|dismiss| {
        dismiss.schedule(|| global_state::notification().set(None));
    });
}

/// Transient notification banner.
#[component]
pub fn NotificationArea() -> impl IntoView {
    let notification = global_state::notification();
    view! {
        <div id="notification-area">
            {move || {
                notification.get().map(|n| {
                    view! {
                        <div class=format!("notification {}", n.level)>{n.message}</div>
                    }
                })
            }}
        </div>
    }
}
