use crate::controller::InputController;
use crate::options::Options;
use crate::Host;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// One widget per input, keyed by whatever identifies inputs on the host
/// (element id, field name).
pub struct Registry<K, H: Host> {
    widgets: HashMap<K, InputController<H>>,
}

impl<K, H> Registry<K, H>
where
    K: Eq + Hash + Debug,
    H: Host,
{
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }

    /// Attach a widget to `key`. An instance already attached there is
    /// disposed first so no timers or click captures outlive it.
    pub fn attach(&mut self, key: K, host: H, options: Options) -> &mut InputController<H> {
        if let Some(mut previous) = self.widgets.remove(&key) {
            tracing::debug!("reattaching autocomplete to {:?}", key);
            previous.dispose();
        }
        self.widgets
            .entry(key)
            .or_insert_with(|| InputController::new(host, options))
    }

    pub fn get(&self, key: &K) -> Option<&InputController<H>> {
        self.widgets.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut InputController<H>> {
        self.widgets.get_mut(key)
    }

    /// Dispose the widget on `key` and give its host back.
    pub fn detach(&mut self, key: &K) -> Option<H> {
        let mut widget = self.widgets.remove(key)?;
        widget.dispose();
        Some(widget.into_host())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl<K, H> Default for Registry<K, H>
where
    K: Eq + Hash + Debug,
    H: Host,
{
    fn default() -> Self {
        Self::new()
    }
}
