use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Milliseconds between two typed characters.
pub const TYPING_INTERVAL_MS: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingState {
    full_text: String,
    total: usize,
    visible: usize,
    complete: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// One more character is visible.
    Typed,
    /// This tick finished the message.
    Completed,
    /// Nothing left to do; the timer should already be gone.
    Idle,
}

impl TypingState {
    /// Without `animate` the whole text is visible at once and no timer is needed.
    pub fn new(text: impl Into<String>, animate: bool) -> Self {
        let full_text = text.into();
        let total = full_text.chars().count();
        let instant = !animate || total == 0;
        Self {
            full_text,
            total,
            visible: if instant { total } else { 0 },
            complete: instant,
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.complete {
            return Tick::Idle;
        }
        self.visible += 1;
        if self.visible >= self.total {
            self.visible = self.total;
            self.complete = true;
            Tick::Completed
        } else {
            Tick::Typed
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn visible_len(&self) -> usize {
        self.visible
    }

    pub fn needs_timer(&self) -> bool {
        !self.complete
    }

    pub fn visible_text(&self) -> &str {
        match self.full_text.char_indices().nth(self.visible) {
            Some((end, _)) => &self.full_text[..end],
            None => &self.full_text,
        }
    }
}

/// Types `text` out one character per tick. Restarts when `text` or
/// `animate` change; the interval is dropped on completion or unmount.
#[hook]
pub fn use_typing_effect(text: AttrValue, animate: bool) -> TypingState {
    let state = use_state(|| TypingState::new(text.to_string(), animate));

    {
        let state = state.clone();
        use_effect_with_deps(
            move |(text, animate)| {
                let initial = TypingState::new(text.to_string(), *animate);
                let needs_timer = initial.needs_timer();
                state.set(initial.clone());

                let interval_handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));

                if needs_timer {
                    let typing = Rc::new(RefCell::new(initial));
                    let handle = Rc::clone(&interval_handle);
                    let interval = Interval::new(TYPING_INTERVAL_MS, move || {
                        let tick = typing.borrow_mut().tick();
                        match tick {
                            Tick::Typed => state.set(typing.borrow().clone()),
                            Tick::Completed | Tick::Idle => {
                                state.set(typing.borrow().clone());
                                // The interval cannot be dropped from inside its own callback.
                                if let Some(interval) = handle.borrow_mut().take() {
                                    spawn_local(async move { drop(interval) });
                                }
                            }
                        }
                    });
                    *interval_handle.borrow_mut() = Some(interval);
                }

                move || {
                    if let Some(interval) = interval_handle.borrow_mut().take() {
                        drop(interval);
                    }
                }
            },
            (text, animate),
        );
    }

    (*state).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displayed_length_tracks_ticks() {
        let text = "Hello there";
        let len = text.chars().count();
        let mut state = TypingState::new(text, true);
        assert_eq!(state.visible_text(), "");
        let mut completions = 0;
        for k in 1..=len + 5 {
            if state.tick() == Tick::Completed {
                completions += 1;
                assert!(k >= len);
            }
            assert_eq!(state.visible_len(), k.min(len));
        }
        assert_eq!(completions, 1);
        assert!(state.is_complete());
        assert_eq!(state.visible_text(), text);
    }

    #[test]
    fn no_animation_shows_everything_without_a_timer() {
        let state = TypingState::new("Instant reply", false);
        assert!(state.is_complete());
        assert!(!state.needs_timer());
        assert_eq!(state.visible_text(), "Instant reply");

        let again = TypingState::new("Instant reply", false);
        assert_eq!(state, again);
    }

    #[test]
    fn multibyte_text_is_typed_by_character() {
        let mut state = TypingState::new("Hi 👋!", true);
        for _ in 0..4 {
            state.tick();
        }
        assert_eq!(state.visible_text(), "Hi 👋");
        assert!(!state.is_complete());
        assert_eq!(state.tick(), Tick::Completed);
        assert_eq!(state.visible_text(), "Hi 👋!");
    }

    #[test]
    fn empty_text_is_complete_immediately() {
        let mut state = TypingState::new("", true);
        assert!(state.is_complete());
        assert_eq!(state.tick(), Tick::Idle);
    }

    #[test]
    fn ticks_after_completion_are_idle() {
        let mut state = TypingState::new("ok", true);
        state.tick();
        assert_eq!(state.tick(), Tick::Completed);
        assert_eq!(state.tick(), Tick::Idle);
        assert_eq!(state.visible_len(), 2);
    }
}
