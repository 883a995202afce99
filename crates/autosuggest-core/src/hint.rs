use crate::Suggestion;

/// Manages the inline ahead-of-cursor completion.
#[derive(Debug, Default)]
pub struct HintEngine {
    /// The suggestion the hint was built from.
    hint: Option<Suggestion>,
    /// Full hint text, committed value included. Empty when no hint.
    hint_value: String,
}

impl HintEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// First suggestion whose value starts with `live_value`, ignoring case.
    /// An empty live value never has a hint.
    pub fn find_best_hint<'a>(suggestions: &'a [Suggestion], live_value: &str) -> Option<&'a Suggestion> {
        if live_value.is_empty() {
            return None;
        }
        let needle = live_value.to_lowercase();
        suggestions
            .iter()
            .find(|s| s.value.to_lowercase().starts_with(&needle))
    }

    /// Make `candidate` the active hint relative to `current_value`.
    /// Returns the new hint text only when it differs from the last one
    /// signaled, so callers notify exactly on change.
    pub fn signal(&mut self, candidate: Option<&Suggestion>, current_value: &str) -> Option<&str> {
        let hint_value = match candidate {
            Some(s) => compose(current_value, &s.value),
            None => String::new(),
        };
        if hint_value == self.hint_value {
            return None;
        }
        self.hint_value = hint_value;
        self.hint = candidate.cloned();
        Some(&self.hint_value)
    }

    pub fn hint(&self) -> Option<&Suggestion> {
        self.hint.as_ref()
    }

    pub fn hint_value(&self) -> &str {
        &self.hint_value
    }
}

/// Keep what the user typed verbatim and append the rest of the suggestion.
fn compose(current_value: &str, suggestion: &str) -> String {
    let typed = current_value.chars().count();
    let mut out = current_value.to_string();
    out.extend(suggestion.chars().skip(typed));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestions() -> Vec<Suggestion> {
        vec![
            Suggestion::new("Bosnia and Herzegovina"),
            Suggestion::new("Botswana"),
            Suggestion::new("Brazil"),
        ]
    }

    #[test]
    fn test_find_best_hint_first_prefix_wins() {
        let s = suggestions();
        let best = HintEngine::find_best_hint(&s, "bo").unwrap();
        assert_eq!(best.value, "Bosnia and Herzegovina");
    }

    #[test]
    fn test_find_best_hint_skips_non_prefix() {
        let s = suggestions();
        let best = HintEngine::find_best_hint(&s, "BOT").unwrap();
        assert_eq!(best.value, "Botswana");
        assert!(HintEngine::find_best_hint(&s, "razil").is_none());
    }

    #[test]
    fn test_find_best_hint_empty_input() {
        assert!(HintEngine::find_best_hint(&suggestions(), "").is_none());
    }

    #[test]
    fn test_signal_keeps_typed_case() {
        let mut h = HintEngine::new();
        let s = Suggestion::new("Botswana");
        assert_eq!(h.signal(Some(&s), "bot"), Some("botswana"));
        assert_eq!(h.hint_value(), "botswana");
        assert_eq!(h.hint(), Some(&s));
    }

    #[test]
    fn test_signal_dedups_same_value() {
        let mut h = HintEngine::new();
        let s = Suggestion::new("Brazil");
        assert!(h.signal(Some(&s), "Br").is_some());
        assert!(h.signal(Some(&s), "Br").is_none());
        assert_eq!(h.signal(None, "Br"), Some(""));
        assert!(h.signal(None, "Br").is_none());
        assert!(h.hint().is_none());
    }

    #[test]
    fn test_compose_multibyte() {
        assert_eq!(compose("Åla", "Åland Islands"), "Åland Islands");
        assert_eq!(compose("ćo", "Ćote"), "ćote");
    }

    #[test]
    fn test_compose_suggestion_shorter_than_input() {
        assert_eq!(compose("abcdef", "abc"), "abcdef");
    }
}
