use crate::hint::HintEngine;
use crate::options::{Options, OptionsUpdate};
use crate::render::{Row, View};
use crate::selection::{SelectionState, Step};
use crate::source::{filter_local, FetchTicket, Lookup};
use crate::{Host, Suggestion, WidgetSettings};
use autosuggest_common::suggestion::parse_payload;
use serde_json::Value;

/// Coarse visibility state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Hidden, nothing rendered.
    Idle,
    /// Suggestion rows on screen.
    Open,
    /// Empty-result notice on screen.
    NoResults,
}

/// Coordinates the suggestion source, the highlighted row and the hint for a
/// single input.
///
/// Lifecycle per typed value:
/// 1. `on_value_change()` commits the live value and may fetch
/// 2. static lookups answer immediately; remote ones hand a `FetchTicket` to
///    the source, which comes back through `deliver()`
/// 3. `suggest()` decides between auto-select, the notice, or the list
/// 4. navigation previews rows; `select()` commits one
pub struct SuggestionEngine<H: Host> {
    host: H,
    options: Options,
    state: SelectionState,
    hint: HintEngine,
    suggestions: Vec<Suggestion>,
    visible: bool,
    notice_shown: bool,
    disabled: bool,
    disposed: bool,
    /// Bumped whenever earlier fetches stop being relevant.
    generation: u64,
    /// Generation of the fetch we are waiting for, if any.
    pending: Option<u64>,
    capturing_clicks: bool,
}

impl<H: Host> SuggestionEngine<H> {
    pub fn new(host: H, options: Options) -> Self {
        let state = SelectionState::new(&host.value());
        Self {
            host,
            options,
            state,
            hint: HintEngine::new(),
            suggestions: Vec::new(),
            visible: false,
            notice_shown: false,
            disabled: false,
            disposed: false,
            generation: 0,
            pending: None,
            capturing_clicks: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.options.settings
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn current_value(&self) -> &str {
        self.state.current_value()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected_index()
    }

    pub fn selection(&self) -> Option<&Suggestion> {
        self.state.selection()
    }

    pub fn hint(&self) -> Option<&Suggestion> {
        self.hint.hint()
    }

    pub fn hint_value(&self) -> &str {
        self.hint.hint_value()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// True while a remote fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        match (self.visible, self.notice_shown) {
            (false, _) => Phase::Idle,
            (true, true) => Phase::NoResults,
            (true, false) => Phase::Open,
        }
    }

    /// Hint acceptance is only offered when the listener renders hints.
    pub fn hint_acceptable(&self) -> bool {
        self.hint.hint().is_some() && self.options.listener.accepts_hints()
    }

    // -----------------------------------------------------------------------
    // Public operations
    // -----------------------------------------------------------------------

    pub fn set_options(&mut self, update: OptionsUpdate) {
        if let Some(lookup) = update.lookup {
            self.options.lookup.cancel();
            self.invalidate_pending();
            self.options.lookup = lookup;
        }
        if let Some(filter) = update.lookup_filter {
            if !self.options.lookup.set_filter(filter) {
                tracing::debug!("lookup_filter ignored: lookup is remote");
            }
        }
        if let Some(f) = update.format_result {
            self.options.format_result = f;
        }
        if let Some(listener) = update.listener {
            self.options.listener = listener;
        }
        self.options.settings.apply(update.settings);
        tracing::debug!(
            "options updated: local={} min_chars={} orientation={}",
            self.options.lookup.is_local(),
            self.options.settings.min_chars,
            self.options.settings.orientation.as_str()
        );
    }

    /// Forget the committed value and the current suggestions.
    pub fn clear(&mut self) {
        self.invalidate_pending();
        self.state.reset();
        self.suggestions.clear();
    }

    pub fn disable(&mut self) {
        self.disabled = true;
    }

    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Detach from the host. Nothing is signaled; later events are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.invalidate_pending();
        self.set_outside_capture(false);
        self.visible = false;
        self.notice_shown = false;
        self.suggestions.clear();
        self.state.clear_index();
        self.disposed = true;
        tracing::debug!("autocomplete disposed");
    }

    // -----------------------------------------------------------------------
    // Reactive core
    // -----------------------------------------------------------------------

    /// Commit the live value of the input and react to it.
    pub fn on_value_change(&mut self) {
        if self.disposed {
            return;
        }
        let value = self.host.value();

        if self.state.update_value(&value) {
            tracing::debug!("selection invalidated by {:?}", value);
            self.options.listener.on_invalidate_selection();
        }
        self.invalidate_pending();

        if self.options.settings.trigger_select_on_valid_input && self.is_exact_match(&value) {
            self.select(0);
            return;
        }

        if value.chars().count() < self.options.settings.min_chars {
            self.hide();
        } else {
            self.fetch(value);
        }
    }

    fn fetch(&mut self, query: String) {
        let limit = self.options.settings.lookup_limit;
        match &mut self.options.lookup {
            Lookup::Static {
                suggestions,
                filter,
            } => {
                let found = filter_local(suggestions, filter, &query, limit);
                self.apply_suggestions(found);
            }
            Lookup::Remote(remote) => {
                self.pending = Some(self.generation);
                tracing::debug!("remote fetch {:?} gen={}", query, self.generation);
                remote.request(&query, FetchTicket::new(self.generation));
            }
        }
    }

    /// Hand back a remote response. Stale tickets and malformed payloads are
    /// dropped without touching state.
    pub fn deliver(&mut self, ticket: FetchTicket, payload: &Value) {
        if !self.accept_ticket(&ticket) {
            return;
        }
        match parse_payload(payload) {
            Some(suggestions) => self.apply_suggestions(suggestions),
            None => tracing::debug!("ignoring malformed suggestion payload"),
        }
    }

    /// Like `deliver`, for sources that already produce suggestions.
    pub fn deliver_suggestions(&mut self, ticket: FetchTicket, suggestions: Vec<Suggestion>) {
        if self.accept_ticket(&ticket) {
            self.apply_suggestions(suggestions);
        }
    }

    fn accept_ticket(&mut self, ticket: &FetchTicket) -> bool {
        if self.disposed || self.pending != Some(ticket.generation()) {
            tracing::debug!(
                "dropping stale response gen={} pending={:?}",
                ticket.generation(),
                self.pending
            );
            return false;
        }
        self.pending = None;
        true
    }

    fn apply_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.state.clear_index();
        self.suggest();
    }

    /// Show the current suggestions, or the notice, or nothing.
    pub fn suggest(&mut self) {
        if self.disposed {
            return;
        }
        if self.suggestions.is_empty() {
            if self.options.settings.show_no_suggestion_notice {
                self.show_notice();
            } else {
                self.hide();
            }
            return;
        }

        let value = self.state.current_value().to_string();
        if self.options.settings.trigger_select_on_valid_input && self.is_exact_match(&value) {
            self.select(0);
            return;
        }

        self.options.listener.before_render(&self.suggestions);
        self.notice_shown = false;
        if self.options.settings.auto_select_first {
            self.state.set_index(0, self.suggestions.len());
        }
        self.visible = true;
        self.find_best_hint();
    }

    fn show_notice(&mut self) {
        self.notice_shown = true;
        self.visible = true;
    }

    /// Hide the container. A fetch in flight still lands.
    pub fn hide(&mut self) {
        if self.visible {
            self.options.listener.on_hide();
        }
        self.visible = false;
        self.notice_shown = false;
        self.state.clear_index();
        self.signal_hint(None);
    }

    /// Hide and drop whatever fetch is in flight (Escape, blur).
    pub fn dismiss(&mut self) {
        self.invalidate_pending();
        self.hide();
    }

    /// Commit the suggestion at `index`. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            tracing::debug!("select({}) out of range", index);
            return;
        };
        self.hide();

        self.state.commit(suggestion.clone());
        let committed = self.state.current_value();
        if !self.options.settings.preserve_input && self.host.value() != committed {
            self.host.set_value(committed);
        }

        self.signal_hint(None);
        self.suggestions.clear();
        self.invalidate_pending();
        self.set_outside_capture(false);
        tracing::debug!("selected {:?}", suggestion.value);
        self.options.listener.on_select(&suggestion);
    }

    /// Commit the suggestion the active hint came from.
    pub fn select_hint(&mut self) {
        let index = self
            .hint
            .hint()
            .and_then(|hint| self.suggestions.iter().position(|s| s == hint));
        if let Some(i) = index {
            self.select(i);
        }
    }

    fn is_exact_match(&self, query: &str) -> bool {
        self.suggestions.len() == 1 && self.suggestions[0].matches_exactly(query)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn move_down(&mut self) {
        if let Step::To(i) = self.state.step_down(self.suggestions.len()) {
            self.preview(i);
        }
    }

    pub fn move_up(&mut self) {
        match self.state.step_up() {
            Step::Stay => {}
            Step::Clear => {
                self.state.clear_index();
                let current = self.state.current_value().to_string();
                self.host.set_value(&current);
                self.find_best_hint();
            }
            Step::To(i) => self.preview(i),
        }
    }

    /// Highlight a row without touching the input (mouse-over).
    pub fn activate(&mut self, index: usize) -> bool {
        self.state.set_index(index, self.suggestions.len())
    }

    /// Drop the highlight (mouse left the container).
    pub fn deactivate(&mut self) {
        self.state.clear_index();
    }

    fn preview(&mut self, index: usize) {
        if !self.activate(index) {
            return;
        }
        if !self.options.settings.preserve_input {
            let value = self.suggestions[index].value.clone();
            self.host.set_value(&value);
        }
        self.signal_hint(None);
    }

    // -----------------------------------------------------------------------
    // Hint
    // -----------------------------------------------------------------------

    /// Recompute the hint against the live input and build it from that
    /// input, which may not extend `current_value` yet. An empty input leaves
    /// the current hint alone.
    pub fn find_best_hint(&mut self) {
        let live = self.host.value();
        if live.is_empty() {
            return;
        }
        let best = HintEngine::find_best_hint(&self.suggestions, &live).cloned();
        if let Some(hint_value) = self.hint.signal(best.as_ref(), &live) {
            self.options.listener.on_hint(hint_value);
        }
    }

    fn signal_hint(&mut self, candidate: Option<&Suggestion>) {
        if let Some(hint_value) = self.hint.signal(candidate, self.state.current_value()) {
            self.options.listener.on_hint(hint_value);
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Anything in flight belongs to an older value from now on.
    fn invalidate_pending(&mut self) {
        self.generation += 1;
        if self.pending.take().is_some() {
            self.options.lookup.cancel();
        }
    }

    pub(crate) fn set_outside_capture(&mut self, enabled: bool) {
        if self.capturing_clicks != enabled {
            self.capturing_clicks = enabled;
            self.host.capture_outside_clicks(enabled);
        }
    }

    /// What the container should show.
    pub fn view(&self) -> View {
        if !self.visible {
            return View::Hidden;
        }
        if self.notice_shown {
            return View::Notice(self.options.settings.no_suggestion_notice.clone());
        }
        let query = self.state.current_value();
        let selected = self.state.selected_index();
        View::Suggestions(
            self.suggestions
                .iter()
                .enumerate()
                .map(|(index, s)| Row {
                    index,
                    markup: (self.options.format_result)(s, query),
                    selected: selected == Some(index),
                })
                .collect(),
        )
    }
}
