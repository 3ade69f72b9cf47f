use leptos::*;
use once_cell::sync::OnceCell;

use crate::domain::annotation::{Annotation, SelectedPoint, SelectionFilter};
use crate::global_signals;
use crate::presentation::notifications::Notification;

pub struct Globals {
    pub filtered_annotations: RwSignal<Vec<Annotation>>,
    pub selection: RwSignal<SelectionFilter>,
    pub selected_point: RwSignal<Option<SelectedPoint>>,
    pub notification: RwSignal<Option<Notification>>,
    pub detail: RwSignal<Option<Annotation>>,
    pub is_connected: RwSignal<bool>,
    pub annotation_count: RwSignal<usize>,
    pub logs: RwSignal<Vec<String>>,
    pub log_paused: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        filtered_annotations: create_rw_signal(Vec::new()),
        selection: create_rw_signal(SelectionFilter::default()),
        selected_point: create_rw_signal(None),
        notification: create_rw_signal(None),
        detail: create_rw_signal(None),
        is_connected: create_rw_signal(false),
        annotation_count: create_rw_signal(0),
        logs: create_rw_signal(Vec::new()),
        log_paused: create_rw_signal(false),
    })
}

global_signals! {
    pub filtered_annotations => filtered_annotations: Vec<Annotation>,
    pub selection => selection: SelectionFilter,
    pub selected_point => selected_point: Option<SelectedPoint>,
    pub notification => notification: Option<Notification>,
    pub detail => detail: Option<Annotation>,
    pub is_connected => is_connected: bool,
    pub annotation_count => annotation_count: usize,
    pub logs => logs: Vec<String>,
    pub log_paused => log_paused: bool,
}
