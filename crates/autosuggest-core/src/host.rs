/// Capabilities the host environment exposes to one widget instance.
pub trait Host {
    /// Live text of the input.
    fn value(&self) -> String;

    fn set_value(&mut self, value: &str);

    /// Caret position in chars, None when the host cannot tell.
    fn caret(&self) -> Option<usize> {
        None
    }

    /// Start or stop delivering document clicks outside the suggestion
    /// container to this instance (`InputController::outside_click`).
    fn capture_outside_clicks(&mut self, _enabled: bool) {}
}

/// In-memory text field. Good enough for terminal front-ends and tests.
#[derive(Debug, Default, Clone)]
pub struct TextField {
    value: String,
    /// Caret in chars.
    caret: usize,
    outside_clicks: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            caret: value.chars().count(),
            outside_clicks: false,
        }
    }

    /// Insert `text` at the caret.
    pub fn type_str(&mut self, text: &str) {
        let at = self.byte_offset(self.caret);
        self.value.insert_str(at, text);
        self.caret += text.chars().count();
    }

    /// Delete the char before the caret.
    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let at = self.byte_offset(self.caret - 1);
        self.value.remove(at);
        self.caret -= 1;
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.value.chars().count());
    }

    pub fn capturing_outside_clicks(&self) -> bool {
        self.outside_clicks
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

impl Host for TextField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.caret = self.value.chars().count();
    }

    fn caret(&self) -> Option<usize> {
        Some(self.caret)
    }

    fn capture_outside_clicks(&mut self, enabled: bool) {
        self.outside_clicks = enabled;
    }
}
