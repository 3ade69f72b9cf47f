use leptos::*;

use crate::application::use_cases::spawn_delete_annotation;
use crate::domain::annotation::{style_for, Annotation};
use crate::global_state;
use crate::presentation::notifications::{show_notification, NotificationLevel};

/// Ascending by parsed timestamp; stable, so ties keep input order.
/// Unparseable timestamps sort last (they still get a placeholder row).
pub fn sort_by_timestamp(annotations: &[Annotation]) -> Vec<Annotation> {
    let mut sorted = annotations.to_vec();
    sorted.sort_by(|a, b| {
        let ka = a.epoch_seconds().unwrap_or(f64::INFINITY);
        let kb = b.epoch_seconds().unwrap_or(f64::INFINITY);
        ka.total_cmp(&kb)
    });
    sorted
}

/// Filtered annotation list as a sortable table with row actions.
#[component]
pub fn AnnotationsTable() -> impl IntoView {
    let annotations = global_state::filtered_annotations();
    let rows = move || {
        sort_by_timestamp(&annotations.get()).into_iter().enumerate().collect::<Vec<_>>()
    };

    view! {
        <table class="annotations-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Stock"</th>
                    <th>"Time"</th>
                    <th>"Signal"</th>
                    <th>"Price"</th>
                    <th>"Reason"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody id="annotations-table-body">
                <Show
                    when=move || !annotations.get().is_empty()
                    fallback=|| view! {
                        <tr>
                            <td colspan="7" class="text-center">"No annotations available"</td>
                        </tr>
                    }
                >
                    <For
                        each=rows
                        key=|(index, a)| {
                            let id = a.id.as_ref().map(|id| id.as_key()).unwrap_or_default();
                            format!("{id}-{index}-{}", a.timestamp)
                        }
                        children=move |(index, annotation)| {
                            view! { <AnnotationRow index annotation /> }
                        }
                    />
                </Show>
            </tbody>
        </table>
    }
}

#[component]
fn AnnotationRow(index: usize, annotation: Annotation) -> impl IntoView {
    let style = style_for(&annotation.signal);
    let id_key = annotation.id.as_ref().map(|id| id.as_key());
    let display_id = id_key.clone().unwrap_or_else(|| (index + 1).to_string());
    let signal_text = annotation.signal.to_string();

    let view_target = annotation.clone();
    let on_view = move |_| global_state::detail().set(Some(view_target.clone()));

    let on_delete = move |_| {
        let Some(id) = id_key.clone() else {
            show_notification("Annotation is not persisted yet", NotificationLevel::Warning);
            return;
        };
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Are you sure you want to delete this annotation?").ok()
            })
            .unwrap_or(false);
        if confirmed {
            spawn_delete_annotation(id);
        }
    };

    view! {
        <tr>
            <td>{display_id}</td>
            <td>{annotation.stock.clone()}</td>
            <td>{annotation.display_timestamp()}</td>
            <td>
                <span class=format!("badge {}", style.badge_class)>{signal_text}</span>
            </td>
            <td>{annotation.display_price()}</td>
            <td class="reason-cell">{annotation.display_reason()}</td>
            <td>
                <button class="btn view-ann-btn" on:click=on_view>"View"</button>
                <button class="btn delete-ann-btn" on:click=on_delete>"Delete"</button>
            </td>
        </tr>
    }
}
