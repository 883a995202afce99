use crate::Suggestion;

/// Result of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do.
    Stay,
    /// Drop the highlight and go back to the typed value.
    Clear,
    /// Highlight this row.
    To(usize),
}

/// Highlighted row, committed value and confirmed selection.
#[derive(Debug, Default)]
pub struct SelectionState {
    current_value: String,
    selected_index: Option<usize>,
    selection: Option<Suggestion>,
}

impl SelectionState {
    pub fn new(initial_value: &str) -> Self {
        Self {
            current_value: initial_value.to_string(),
            ..Default::default()
        }
    }

    pub fn current_value(&self) -> &str {
        &self.current_value
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selection(&self) -> Option<&Suggestion> {
        self.selection.as_ref()
    }

    /// Record a new typed value. Returns true when this invalidated an active
    /// selection.
    pub fn update_value(&mut self, value: &str) -> bool {
        let invalidated = self.selection.is_some() && self.current_value != value;
        if invalidated {
            self.selection = None;
        }
        self.current_value = value.to_string();
        self.selected_index = None;
        invalidated
    }

    /// Highlight `index` if it addresses one of `len` rows, otherwise clear.
    pub fn set_index(&mut self, index: usize, len: usize) -> bool {
        self.selected_index = (index < len).then_some(index);
        self.selected_index.is_some()
    }

    pub fn clear_index(&mut self) {
        self.selected_index = None;
    }

    pub fn step_down(&self, len: usize) -> Step {
        let next = self.selected_index.map_or(0, |i| i + 1);
        if next < len {
            Step::To(next)
        } else {
            Step::Stay
        }
    }

    pub fn step_up(&self) -> Step {
        match self.selected_index {
            None => Step::Stay,
            Some(0) => Step::Clear,
            Some(i) => Step::To(i - 1),
        }
    }

    /// Durable confirmation of `suggestion`.
    pub fn commit(&mut self, suggestion: Suggestion) {
        self.current_value = suggestion.value.clone();
        self.selection = Some(suggestion);
        self.selected_index = None;
    }

    /// Forget the committed value (the widget's `clear` operation).
    pub fn reset(&mut self) {
        self.current_value.clear();
        self.selected_index = None;
    }
}
