use crate::render::{format_result, FormatResult};
use crate::source::{Lookup, LookupFilter};
use crate::{SettingsUpdate, Suggestion, WidgetSettings};
use std::fmt;

/// Lifecycle callbacks. Every method defaults to a no-op.
pub trait Listener {
    fn on_select(&mut self, _suggestion: &Suggestion) {}

    /// Called with the full hint text, or "" when the hint goes away.
    fn on_hint(&mut self, _hint: &str) {}

    fn on_hide(&mut self) {}

    fn on_invalidate_selection(&mut self) {}

    fn before_render(&mut self, _suggestions: &[Suggestion]) {}

    /// Hosts that display the hint return true so Tab and Right can accept it.
    fn accepts_hints(&self) -> bool {
        false
    }
}

impl Listener for () {}

pub struct Options {
    pub lookup: Lookup,
    pub format_result: FormatResult,
    pub listener: Box<dyn Listener>,
    pub settings: WidgetSettings,
}

impl Options {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            format_result: Box::new(format_result),
            listener: Box::new(()),
            settings: WidgetSettings::default(),
        }
    }

    pub fn listener(mut self, listener: impl Listener + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    pub fn settings(mut self, settings: WidgetSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn format_result(mut self, f: impl Fn(&Suggestion, &str) -> String + 'static) -> Self {
        self.format_result = Box::new(f);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options::new(Lookup::default())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("lookup", &self.lookup)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Partial update for `set_options`; unset fields are left alone.
#[derive(Default)]
pub struct OptionsUpdate {
    pub lookup: Option<Lookup>,
    pub lookup_filter: Option<LookupFilter>,
    pub format_result: Option<FormatResult>,
    pub listener: Option<Box<dyn Listener>>,
    pub settings: SettingsUpdate,
}

impl OptionsUpdate {
    pub fn settings(settings: SettingsUpdate) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn lookup(mut self, lookup: Lookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn lookup_filter(mut self, filter: impl Fn(&Suggestion, &str, &str) -> bool + 'static) -> Self {
        self.lookup_filter = Some(Box::new(filter));
        self
    }

    pub fn listener(mut self, listener: impl Listener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn format_result(mut self, f: impl Fn(&Suggestion, &str) -> String + 'static) -> Self {
        self.format_result = Some(Box::new(f));
        self
    }
}
