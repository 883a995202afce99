use crate::engine::SuggestionEngine;
use crate::options::{Options, OptionsUpdate};
use crate::source::FetchTicket;
use crate::Host;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Return,
    Left,
    Up,
    Right,
    Down,
    Other,
}

impl Key {
    /// Map a DOM `keyCode`.
    pub fn from_code(code: u32) -> Self {
        match code {
            27 => Key::Escape,
            9 => Key::Tab,
            13 => Key::Return,
            37 => Key::Left,
            38 => Key::Up,
            39 => Key::Right,
            40 => Key::Down,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Let the host run its default handling.
    PassThrough,
    /// The widget handled the key; suppress default handling and propagation.
    Consumed,
}

/// Deferred hide armed on blur.
#[derive(Debug)]
pub struct KillTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl KillTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm from `now`, replacing any pending deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}

/// Translates raw input, pointer and focus events into engine calls.
///
/// Event mapping (the host wires its native events to these methods):
/// - keydown -> `key_down()`; the return value says whether to swallow it
/// - keyup / input / change -> `key_up()` / `input()`
/// - focus / blur -> `focus()` / `blur()`
/// - pointer-down inside the container -> `container_pointer_down()`
/// - mouse over / out / click on rows -> `mouse_over()` / `mouse_out()` / `click()`
/// - document click outside, while captured -> `outside_click()`
/// - periodic loop -> `tick()` drives the kill timer
pub struct InputController<H: Host> {
    engine: SuggestionEngine<H>,
    kill: KillTimer,
}

impl<H: Host> InputController<H> {
    pub fn new(host: H, options: Options) -> Self {
        let delay = Duration::from_millis(options.settings.kill_delay_ms);
        Self {
            engine: SuggestionEngine::new(host, options),
            kill: KillTimer::new(delay),
        }
    }

    pub fn engine(&self) -> &SuggestionEngine<H> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SuggestionEngine<H> {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        self.engine.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.engine.host_mut()
    }

    pub fn kill_timer(&self) -> &KillTimer {
        &self.kill
    }

    pub fn key_down(&mut self, key: Key) -> KeyOutcome {
        let e = &mut self.engine;
        if e.is_disposed() {
            return KeyOutcome::PassThrough;
        }

        // Down on a closed list re-opens it.
        if !e.is_disabled() && !e.is_visible() && key == Key::Down && !e.current_value().is_empty() {
            e.suggest();
            return KeyOutcome::PassThrough;
        }

        if e.is_disabled() || !e.is_visible() {
            return KeyOutcome::PassThrough;
        }

        match key {
            Key::Escape => {
                let current = e.current_value().to_string();
                e.host_mut().set_value(&current);
                e.dismiss();
            }
            Key::Right => {
                if e.hint_acceptable() && caret_at_end(e.host()) {
                    e.select_hint();
                } else {
                    return KeyOutcome::PassThrough;
                }
            }
            Key::Tab => {
                if e.hint_acceptable() {
                    e.select_hint();
                    return KeyOutcome::PassThrough;
                }
                let Some(index) = e.selected_index() else {
                    e.hide();
                    return KeyOutcome::PassThrough;
                };
                e.select(index);
                if !e.settings().tab_disabled {
                    return KeyOutcome::PassThrough;
                }
            }
            Key::Return => {
                let Some(index) = e.selected_index() else {
                    e.hide();
                    return KeyOutcome::PassThrough;
                };
                e.select(index);
            }
            Key::Up => e.move_up(),
            Key::Down => e.move_down(),
            Key::Left | Key::Other => return KeyOutcome::PassThrough,
        }
        KeyOutcome::Consumed
    }

    /// Re-evaluate after the input may have changed.
    pub fn key_up(&mut self, key: Key) {
        let e = &mut self.engine;
        if e.is_disabled() || e.is_disposed() {
            return;
        }
        // Navigation already rewrote the input as a preview.
        if matches!(key, Key::Up | Key::Down) {
            return;
        }
        if e.current_value() != e.host().value() {
            e.find_best_hint();
            e.on_value_change();
        }
    }

    /// `input` and `change` events.
    pub fn input(&mut self) {
        self.key_up(Key::Other);
    }

    pub fn focus(&mut self) {
        if self.engine.is_disposed() {
            return;
        }
        self.kill.cancel();
        let e = &mut self.engine;
        if e.host().value().chars().count() >= e.settings().min_chars {
            e.on_value_change();
        }
    }

    pub fn blur(&mut self) {
        self.blur_at(Instant::now());
    }

    pub fn blur_at(&mut self, now: Instant) {
        if self.engine.is_disposed() {
            return;
        }
        self.engine.set_outside_capture(true);
        self.kill.arm(now);
    }

    /// A document click landed outside the container.
    pub fn outside_click(&mut self) {
        self.outside_click_at(Instant::now());
    }

    pub fn outside_click_at(&mut self, now: Instant) {
        if self.engine.is_disposed() {
            return;
        }
        self.kill.arm(now);
        self.engine.set_outside_capture(false);
    }

    /// Any pointer-down inside the container keeps the list alive.
    pub fn container_pointer_down(&mut self) {
        self.kill.cancel();
    }

    pub fn mouse_over(&mut self, index: usize) {
        self.engine.activate(index);
    }

    pub fn mouse_out(&mut self) {
        self.engine.deactivate();
    }

    pub fn click(&mut self, index: usize) {
        self.kill.cancel();
        self.engine.select(index);
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Fire the kill timer if it is due.
    pub fn tick_at(&mut self, now: Instant) {
        if !self.kill.fire(now) {
            return;
        }
        let e = &mut self.engine;
        if e.is_visible() && !e.settings().preserve_input {
            let current = e.current_value().to_string();
            e.host_mut().set_value(&current);
        }
        e.dismiss();
    }

    pub fn deliver(&mut self, ticket: FetchTicket, payload: &Value) {
        self.engine.deliver(ticket, payload);
    }

    pub fn set_options(&mut self, update: OptionsUpdate) {
        if let Some(ms) = update.settings.kill_delay_ms {
            self.kill.set_delay(Duration::from_millis(ms));
        }
        self.engine.set_options(update);
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    pub fn disable(&mut self) {
        self.engine.disable();
    }

    pub fn enable(&mut self) {
        self.engine.enable();
    }

    pub fn dispose(&mut self) {
        self.kill.cancel();
        self.engine.dispose();
    }

    pub fn into_host(self) -> H {
        self.engine.into_host()
    }
}

/// Unknown caret positions count as "at end".
fn caret_at_end<H: Host>(host: &H) -> bool {
    match host.caret() {
        Some(caret) => caret == host.value().chars().count(),
        None => true,
    }
}
