use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::overlay::{MarkerElement, MarkerFactory};
use crate::domain::annotation::{Annotation, SignalStyle};
use crate::domain::logging::{get_logger, LogComponent};

/// DOM node sizes and layers for overlay markers.
const MARKER_Z_INDEX: &str = "1000";
const TOOLTIP_Z_INDEX: &str = "1002";
const MARKER_FONT_SIZE: &str = "24px";

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn create_div(document: &Document) -> Option<HtmlElement> {
    document.create_element("div").ok()?.dyn_into::<HtmlElement>().ok()
}

/// A marker div attached to the chart container.
///
/// Event listeners are owned by the marker, so removing it also tears down
/// its click and hover wiring.
pub struct DomMarker {
    node: HtmlElement,
    _listeners: Vec<EventListener>,
}

impl MarkerElement for DomMarker {
    fn set_position(&self, x: f64, y: f64) {
        let style = self.node.style();
        let _ = style.set_property("left", &format!("{x}px"));
        let _ = style.set_property("top", &format!("{y}px"));
    }

    fn set_hidden(&self, hidden: bool) {
        let value = if hidden { "none" } else { "block" };
        let _ = self.node.style().set_property("display", value);
    }

    fn remove(&self) {
        self.node.remove();
    }
}

/// Builds marker divs inside the retained chart's container element.
pub struct DomMarkerFactory {
    container: HtmlElement,
    on_select: Rc<dyn Fn(Annotation)>,
}

impl DomMarkerFactory {
    pub fn new(container: HtmlElement, on_select: Rc<dyn Fn(Annotation)>) -> Self {
        // Overlay children are positioned against the container.
        let _ = container.style().set_property("position", "relative");
        Self { container, on_select }
    }

    /// Look up the chart container by element id.
    pub fn for_container_id(id: &str, on_select: Rc<dyn Fn(Annotation)>) -> Option<Self> {
        let container = document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self::new(container, on_select))
    }

    fn build_marker_node(&self, annotation: &Annotation, style: &SignalStyle) -> Option<HtmlElement> {
        let doc = document()?;
        let node = create_div(&doc)?;
        node.set_class_name("annotation-marker");
        let css = node.style();
        let _ = css.set_property("position", "absolute");
        let _ = css.set_property("z-index", MARKER_Z_INDEX);
        let _ = css.set_property("pointer-events", "auto");
        let _ = css.set_property("cursor", "pointer");
        let _ = css.set_property("font-size", MARKER_FONT_SIZE);
        let _ = css.set_property("color", style.color);
        let _ = css.set_property("text-shadow", "0px 0px 3px white");
        let _ = css.set_property("transform", "translate(-50%, -50%)");
        node.set_text_content(Some(style.glyph.symbol()));
        node.set_title(&format!("{} at {}", annotation.signal, annotation.display_price()));

        // Style label pinned above the glyph.
        let label = create_div(&doc)?;
        label.set_class_name("annotation-label");
        let label_css = label.style();
        let _ = label_css.set_property("position", "absolute");
        let _ = label_css.set_property("bottom", "100%");
        let _ = label_css.set_property("left", "50%");
        let _ = label_css.set_property("transform", "translateX(-50%)");
        let _ = label_css.set_property("background-color", "rgba(255,255,255,0.8)");
        let _ = label_css.set_property("color", style.color);
        let _ = label_css.set_property("padding", "2px 4px");
        let _ = label_css.set_property("border-radius", "3px");
        let _ = label_css.set_property("font-size", "10px");
        let _ = label_css.set_property("font-weight", "bold");
        let _ = label_css.set_property("white-space", "nowrap");
        label.set_text_content(Some(&style.label));
        node.append_child(&label).ok()?;
        Some(node)
    }

    fn build_tooltip_node(annotation: &Annotation) -> Option<HtmlElement> {
        let doc = document()?;
        let tooltip = create_div(&doc)?;
        tooltip.set_class_name("annotation-tooltip");
        let css = tooltip.style();
        let _ = css.set_property("position", "absolute");
        let _ = css.set_property("background-color", "white");
        let _ = css.set_property("border", "1px solid #ccc");
        let _ = css.set_property("padding", "8px");
        let _ = css.set_property("border-radius", "4px");
        let _ = css.set_property("box-shadow", "0 2px 5px rgba(0,0,0,0.2)");
        let _ = css.set_property("z-index", TOOLTIP_Z_INDEX);
        tooltip.set_inner_html(&format!(
            "<div><strong>{}</strong></div>\
             <div>Time: {}</div>\
             <div>Price: {}</div>\
             <div>Reason: {}</div>",
            annotation.signal,
            annotation.display_timestamp(),
            annotation.display_price(),
            annotation.display_reason(),
        ));
        Some(tooltip)
    }
}

impl MarkerFactory for DomMarkerFactory {
    type Element = DomMarker;

    fn create(&self, annotation: &Annotation, style: &SignalStyle) -> Option<DomMarker> {
        let node = self.build_marker_node(annotation, style)?;
        let mut listeners = Vec::with_capacity(3);

        // Click opens the detail view; stop propagation so the chart does not
        // also treat it as a point selection.
        {
            let on_select = self.on_select.clone();
            let selected = annotation.clone();
            listeners.push(EventListener::new(&node, "click", move |event| {
                event.stop_propagation();
                on_select(selected.clone());
            }));
        }

        // Hover shows a floating tooltip next to the marker.
        {
            let tooltip_slot: Rc<RefCell<Option<HtmlElement>>> = Rc::new(RefCell::new(None));
            let container = self.container.clone();
            let marker_node = node.clone();
            let hovered = annotation.clone();
            let slot = tooltip_slot.clone();
            listeners.push(EventListener::new(&node, "mouseenter", move |_| {
                if slot.borrow().is_some() {
                    return;
                }
                if let Some(tooltip) = Self::build_tooltip_node(&hovered) {
                    let marker_css = marker_node.style();
                    let left = marker_css.get_property_value("left").unwrap_or_default();
                    let top = marker_css.get_property_value("top").unwrap_or_default();
                    let css = tooltip.style();
                    let _ = css.set_property("left", &left);
                    let _ = css.set_property("top", &format!("calc({top} + 25px)"));
                    if container.append_child(&tooltip).is_ok() {
                        *slot.borrow_mut() = Some(tooltip);
                    }
                }
            }));
            let slot = tooltip_slot;
            listeners.push(EventListener::new(&node, "mouseleave", move |_| {
                if let Some(tooltip) = slot.borrow_mut().take() {
                    tooltip.remove();
                }
            }));
        }

        if self.container.append_child(&node).is_err() {
            get_logger().error(
                LogComponent::Infrastructure("OverlayMarkers"),
                "Failed to attach marker to chart container",
            );
            return None;
        }
        Some(DomMarker { node, _listeners: listeners })
    }
}
