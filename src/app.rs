use leptos::*;

use crate::application::use_cases::{spawn_create_annotation, spawn_delete_last};
use crate::domain::annotation::{style_for, Signal};
use crate::domain::logging::{
    get_logger, get_time_provider, LogComponent, LogEntry, Logger,
};
use crate::global_state;
use crate::infrastructure::services::ConsoleLogger;
use crate::presentation::notifications::NotificationArea;
use crate::presentation::table::AnnotationsTable;

/// Oldest lines are dropped once the debug console exceeds this.
const LOG_HISTORY_LIMIT: usize = 100;

/// Bridge logger: forwards to the browser console and mirrors lines into the
/// debug console signal.
pub struct LeptosLogger {
    console: ConsoleLogger,
}

impl LeptosLogger {
    pub fn new() -> Self {
        Self { console: ConsoleLogger::new_development() }
    }
}

impl Default for LeptosLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for LeptosLogger {
    fn log(&self, entry: LogEntry) {
        let line = format!(
            "[{}] {} {}: {}",
            get_time_provider().format_timestamp(entry.timestamp),
            entry.level,
            entry.component,
            entry.message
        );
        self.console.log(entry);
        if !global_state::log_paused().get_untracked() {
            global_state::logs().update(|lines| {
                lines.push(line);
                while lines.len() > LOG_HISTORY_LIMIT {
                    lines.remove(0);
                }
            });
        }
    }
}

/// Root component: header, annotation controls, table, detail panel and the
/// debug console. The chart surface itself lives outside this tree and talks
/// to us through the wasm API.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .annotator-app {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
                padding: 16px;
                color: #212529;
            }

            .header {
                display: flex;
                align-items: baseline;
                gap: 16px;
                margin-bottom: 12px;
            }

            .header h1 {
                font-size: 20px;
                margin: 0;
            }

            .status {
                font-size: 13px;
                font-weight: 600;
            }

            .status.connected { color: #2ca02c; }
            .status.disconnected { color: #d62728; }

            .selection-info {
                font-size: 13px;
                color: #6c757d;
            }

            .toolbar {
                display: flex;
                align-items: center;
                gap: 8px;
                margin-bottom: 12px;
                flex-wrap: wrap;
            }

            .toolbar input {
                padding: 5px 8px;
                border: 1px solid #ced4da;
                border-radius: 4px;
                min-width: 220px;
            }

            .btn {
                border: none;
                border-radius: 4px;
                padding: 6px 10px;
                cursor: pointer;
                font-size: 13px;
            }

            .signal-btn { color: white; }

            .delete-last-btn {
                background: #6c757d;
                color: white;
            }

            .annotations-table {
                width: 100%;
                border-collapse: collapse;
                font-size: 13px;
                margin-bottom: 12px;
            }

            .annotations-table th,
            .annotations-table td {
                border: 1px solid #dee2e6;
                padding: 6px 8px;
                text-align: left;
            }

            .annotations-table .text-center { text-align: center; }

            .badge {
                display: inline-block;
                padding: 2px 6px;
                border-radius: 4px;
                color: white;
                font-size: 11px;
            }

            .badge.bg-success { background: #2ca02c; }
            .badge.bg-primary { background: #1f77b4; }
            .badge.bg-danger { background: #d62728; }
            .badge.bg-warning { background: #ff7f0e; }
            .badge.bg-secondary { background: #7f7f7f; }

            .view-ann-btn { background: #1f77b4; color: white; margin-right: 4px; }
            .delete-ann-btn { background: #d62728; color: white; }

            #notification-area {
                position: fixed;
                top: 16px;
                right: 16px;
                z-index: 2000;
            }

            .notification {
                padding: 10px 14px;
                border-radius: 6px;
                color: white;
                box-shadow: 0 2px 8px rgba(0, 0, 0, 0.2);
            }

            .notification.success { background: #2ca02c; }
            .notification.warning { background: #ff7f0e; }
            .notification.error { background: #d62728; }

            .detail-panel {
                border: 1px solid #dee2e6;
                border-radius: 6px;
                padding: 12px;
                margin-bottom: 12px;
                max-width: 480px;
            }

            .detail-panel h3 { margin: 0 0 8px 0; font-size: 15px; }
            .detail-panel dl { margin: 0; font-size: 13px; }
            .detail-panel dt { font-weight: 600; margin-top: 6px; }
            .detail-panel dd { margin: 0; }

            .debug-console {
                background: rgba(0, 0, 0, 0.85);
                border-radius: 6px;
                padding: 10px;
                max-height: 240px;
                overflow-y: auto;
            }

            .debug-header {
                display: flex;
                justify-content: space-between;
                align-items: center;
                margin-bottom: 8px;
                color: #72c685;
                font-weight: bold;
                font-size: 13px;
            }

            .debug-btn {
                background: #4a5d73;
                color: white;
                border: none;
                padding: 3px 8px;
                border-radius: 4px;
                cursor: pointer;
                font-size: 11px;
                margin-left: 4px;
            }

            .debug-log {
                font-family: 'Courier New', monospace;
                font-size: 11px;
                line-height: 1.3;
            }

            .log-line { color: #e0e0e0; margin: 2px 0; }
            "#}
        </style>
        <div class="annotator-app">
            <NotificationArea />
            <Header />
            <AnnotationToolbar />
            <DetailPanel />
            <AnnotationsTable />
            <DebugConsole />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let is_connected = global_state::is_connected();
    let count = global_state::annotation_count();
    let selection = global_state::selection();

    view! {
        <div class="header">
            <h1>"Chart Annotations"</h1>
            <span class=move || {
                if is_connected.get() { "status connected" } else { "status disconnected" }
            }>
                {move || if is_connected.get() { "Live" } else { "Offline" }}
            </span>
            <span class="selection-info">
                {move || {
                    let filter = selection.get();
                    match (filter.stock, filter.date) {
                        (Some(stock), Some(date)) => format!("{stock} on {date}"),
                        (Some(stock), None) => stock,
                        _ => "No stock selected".to_string(),
                    }
                }}
            </span>
            <span class="selection-info">
                {move || format!("{} total", count.get())}
            </span>
        </div>
    }
}

/// One create button per signal kind, plus a shared reason field and the
/// delete-last shortcut. Buttons act on the currently selected chart point.
#[component]
fn AnnotationToolbar() -> impl IntoView {
    let (reason, set_reason) = create_signal(String::new());
    let selected_point = global_state::selected_point();

    let signals = [Signal::LongEntry, Signal::LongExit, Signal::ShortEntry, Signal::ShortExit];

    view! {
        <div class="toolbar">
            <input
                type="text"
                placeholder="Reason (optional)"
                prop:value=move || reason.get()
                on:input=move |ev| set_reason.set(event_target_value(&ev))
            />
            {signals
                .into_iter()
                .map(|signal| view! { <SignalButton signal reason set_reason /> })
                .collect_view()}
            <button class="btn delete-last-btn" on:click=move |_| spawn_delete_last()>
                "Delete Last"
            </button>
            <span class="selection-info">
                {move || match selected_point.get() {
                    Some(point) => format!("Point: {} @ {:.2}", point.timestamp, point.price),
                    None => "Click the chart to select a point".to_string(),
                }}
            </span>
        </div>
    }
}

#[component]
fn SignalButton(
    signal: Signal,
    reason: ReadSignal<String>,
    set_reason: WriteSignal<String>,
) -> impl IntoView {
    let style = style_for(&signal);
    let caption = format!("{} {}", style.glyph.symbol(), style.label);
    let background = format!("background: {}", style.color);
    let on_click = move |_| {
        spawn_create_annotation(signal.clone(), reason.get_untracked());
        set_reason.set(String::new());
    };

    view! {
        <button class="btn signal-btn" style=background on:click=on_click>
            {caption}
        </button>
    }
}

/// Shown when a marker or a table row is opened; closes back to nothing.
#[component]
fn DetailPanel() -> impl IntoView {
    let detail = global_state::detail();

    view! {
        {move || {
            detail.get().map(|annotation| {
                let style = style_for(&annotation.signal);
                view! {
                    <div class="detail-panel">
                        <h3>
                            {annotation.stock.clone()}
                            " "
                            <span class=format!("badge {}", style.badge_class)>
                                {annotation.signal.to_string()}
                            </span>
                        </h3>
                        <dl>
                            <dt>"Time"</dt>
                            <dd>{annotation.display_timestamp()}</dd>
                            <dt>"Price"</dt>
                            <dd>{annotation.display_price()}</dd>
                            <dt>"Reason"</dt>
                            <dd>{annotation.display_reason()}</dd>
                        </dl>
                        <button
                            class="btn delete-last-btn"
                            on:click=move |_| global_state::detail().set(None)
                        >
                            "Close"
                        </button>
                    </div>
                }
            })
        }}
    }
}

#[component]
fn DebugConsole() -> impl IntoView {
    let logs = global_state::logs();
    let is_paused = global_state::log_paused();

    view! {
        <div class="debug-console">
            <div class="debug-header">
                <span>"Debug Console"</span>
                <span>
                    <button
                        class="debug-btn"
                        on:click=move |_| {
                            is_paused.update(|p| *p = !*p);
                            let state = if is_paused.get_untracked() { "paused" } else { "resumed" };
                            get_logger().info(
                                LogComponent::Presentation("DebugConsole"),
                                &format!("Logging {state}"),
                            );
                        }
                    >
                        {move || if is_paused.get() { "Resume" } else { "Pause" }}
                    </button>
                    <button
                        class="debug-btn"
                        on:click=move |_| logs.set(Vec::new())
                    >
                        "Clear"
                    </button>
                </span>
            </div>
            <div class="debug-log">
                <For
                    each={move || logs.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key=|(index, line)| format!("{index}-{line}")
                    children=move |(_, line)| view! { <div class="log-line">{line}</div> }
                />
            </div>
        </div>
    }
}
