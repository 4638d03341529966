use std::collections::BTreeSet;

/// Open/closed flags for a list of collapsible sections. Sections toggle
/// independently; all start collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionState {
    len: usize,
    open: BTreeSet<usize>,
}

impl AccordionState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            open: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Flips one section. Indexes past the end are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        if !self.open.remove(&index) {
            self.open.insert(index);
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.contains(&index)
    }

    pub fn open_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.open.iter().copied()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn collapse_all(&mut self) {
        self.open.clear();
    }

    /// Replays a sequence of toggles, e.g. from a `?open=0,2` query.
    pub fn apply_toggles(&mut self, toggles: impl IntoIterator<Item = usize>) {
        for index in toggles {
            self.toggle(index);
        }
    }
}
