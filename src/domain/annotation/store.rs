use super::entities::Annotation;
use super::value_objects::SelectionFilter;

/// Authoritative in-memory annotation collection.
///
/// The raw list is always replaced wholesale from a server snapshot; the
/// client never merges. Deletion is realized by asking the server and waiting
/// for the next push, so the store needs no incremental mutation beyond
/// [`AnnotationStore::remove_by_id`], which exists for id-equality semantics
/// and is not part of the canonical delete flow.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    raw: Vec<Annotation>,
    filter: SelectionFilter,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full raw collection with a server snapshot.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.raw = annotations;
    }

    /// Update the (stock, date) selection.
    pub fn set_filter(&mut self, stock: Option<String>, date: Option<String>) {
        self.filter = SelectionFilter::new(stock, date);
    }

    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    pub fn raw(&self) -> &[Annotation] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Annotations matching the current selection.
    ///
    /// Stock must match exactly and the `YYYY-MM-DD` prefix of the timestamp
    /// must equal the selected date. Empty when either half is unset.
    pub fn filtered(&self) -> Vec<Annotation> {
        let (stock, date) = match (&self.filter.stock, &self.filter.date) {
            (Some(stock), Some(date)) => (stock, date),
            _ => return Vec::new(),
        };
        self.raw
            .iter()
            .filter(|a| a.stock == *stock && a.date_part() == Some(date.as_str()))
            .cloned()
            .collect()
    }

    /// Look up an annotation by id key (numeric or string form).
    pub fn find_by_id(&self, key: &str) -> Option<&Annotation> {
        self.raw.iter().find(|a| a.id_matches(key))
    }

    /// Drop every annotation whose id matches `key`; returns the removed count.
    pub fn remove_by_id(&mut self, key: &str) -> usize {
        let before = self.raw.len();
        self.raw.retain(|a| !a.id_matches(key));
        before - self.raw.len()
    }

    /// Most recent annotation by parsed timestamp, for the delete-last preview.
    /// Unparseable timestamps sort first so they are never reported as latest.
    pub fn last_by_timestamp(&self) -> Option<&Annotation> {
        self.raw.iter().max_by(|a, b| {
            let ka = a.epoch_seconds().unwrap_or(f64::NEG_INFINITY);
            let kb = b.epoch_seconds().unwrap_or(f64::NEG_INFINITY);
            ka.total_cmp(&kb)
        })
    }
}
