pub mod entities;
pub mod store;
pub mod value_objects;

pub use entities::{Annotation, AnnotationId};
pub use store::AnnotationStore;
pub use value_objects::{style_for, Glyph, SelectedPoint, SelectionFilter, Signal, SignalStyle};
