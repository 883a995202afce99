//! Headless autocomplete engine.
//!
//! A host owns the real text field and forwards its events to an
//! [`InputController`]; the engine decides what to fetch, what to show and
//! what the user committed. The host paints [`SuggestionEngine::view`].

pub mod controller;
pub mod engine;
pub mod hint;
pub mod host;
pub mod options;
pub mod placement;
pub mod registry;
pub mod render;
pub mod selection;
pub mod source;

pub use autosuggest_common::config::{Orientation, SettingsUpdate, WidgetSettings, Width};
pub use autosuggest_common::suggestion::Suggestion;
pub use controller::{InputController, Key, KeyOutcome};
pub use engine::{Phase, SuggestionEngine};
pub use host::{Host, TextField};
pub use options::{Listener, Options, OptionsUpdate};
pub use registry::Registry;
pub use render::View;
pub use source::{FetchTicket, Lookup, RemoteLookup};
