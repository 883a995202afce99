use crate::Suggestion;
use std::fmt;

/// Static filter predicate: `(suggestion, raw_query, lowercased_query)`.
pub type LookupFilter = Box<dyn Fn(&Suggestion, &str, &str) -> bool>;

/// Default filter: case-insensitive substring containment on `value`.
pub fn contains_ignore_case(suggestion: &Suggestion, _query: &str, query_lower: &str) -> bool {
    suggestion.value.to_lowercase().contains(query_lower)
}

/// Proof that the engine asked for a fetch. Handed back with the response;
/// it cannot be cloned, so each request is answered at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub(crate) fn new(generation: u64) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Asynchronous suggestion source supplied by the host.
pub trait RemoteLookup {
    /// Start fetching suggestions for `query`. The result goes back through
    /// `SuggestionEngine::deliver` together with `ticket`.
    fn request(&mut self, query: &str, ticket: FetchTicket);

    /// Abandon whatever is in flight. Late answers are dropped by the engine
    /// anyway; this only saves the work.
    fn cancel(&mut self) {}
}

/// Where suggestions come from, fixed when options are set.
pub enum Lookup {
    Static {
        suggestions: Vec<Suggestion>,
        filter: LookupFilter,
    },
    Remote(Box<dyn RemoteLookup>),
}

impl Lookup {
    /// Static list with the default filter. Plain strings become suggestions
    /// without data.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Suggestion>,
    {
        Lookup::Static {
            suggestions: items.into_iter().map(Into::into).collect(),
            filter: Box::new(contains_ignore_case),
        }
    }

    pub fn remote(lookup: impl RemoteLookup + 'static) -> Self {
        Lookup::Remote(Box::new(lookup))
    }

    /// Replace the filter of a static lookup. Returns false for a remote one.
    pub fn set_filter(&mut self, new_filter: LookupFilter) -> bool {
        match self {
            Lookup::Static { filter, .. } => {
                *filter = new_filter;
                true
            }
            Lookup::Remote(_) => false,
        }
    }

    pub fn with_filter(mut self, filter: impl Fn(&Suggestion, &str, &str) -> bool + 'static) -> Self {
        self.set_filter(Box::new(filter));
        self
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Lookup::Static { .. })
    }

    pub(crate) fn cancel(&mut self) {
        if let Lookup::Remote(remote) = self {
            remote.cancel();
        }
    }
}

impl Default for Lookup {
    fn default() -> Self {
        Lookup::list(Vec::<Suggestion>::new())
    }
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Static { suggestions, .. } => f
                .debug_struct("Static")
                .field("suggestions", &suggestions.len())
                .finish_non_exhaustive(),
            Lookup::Remote(_) => f.write_str("Remote"),
        }
    }
}

/// Run `filter` over `suggestions`, keeping source order, truncated to `limit`.
pub fn filter_local(
    suggestions: &[Suggestion],
    filter: &LookupFilter,
    query: &str,
    limit: Option<usize>,
) -> Vec<Suggestion> {
    let query_lower = query.to_lowercase();
    let matches = suggestions
        .iter()
        .filter(|s| filter(*s, query, &query_lower))
        .cloned();
    match limit {
        Some(n) => matches.take(n).collect(),
        None => matches.collect(),
    }
}
