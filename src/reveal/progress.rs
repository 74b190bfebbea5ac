//! Scroll-linked progress for pinned sections.
//!
//! A [`ScrollProgressBinder`] turns "where is this section relative to the
//! top of the viewport" into a scalar in `[0, 1]` and publishes it into a
//! shared [`ProgressCell`]. Browser access goes through [`ViewportSource`]
//! and [`FrameScheduler`] so the math runs without a DOM.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::NodeRef;

/// Pixels of scrolling, once the section is pinned, needed for a full reveal.
pub const DEFAULT_REVEAL_DISTANCE: f64 = 420.0;

/// Progress for a section whose top edge sits `top` pixels below the viewport top.
pub fn progress_for(top: f64, reveal_distance: f64) -> f64 {
    if top.is_nan() || top > 0.0 {
        return 0.0;
    }
    // Zero, negative or NaN distances reveal everything at the pin point.
    if !(reveal_distance > 0.0) {
        return 1.0;
    }
    (top.abs() / reveal_distance).min(1.0)
}

type Subscriber = dyn Fn(f64);

/// Observable progress value. Subscribers are held weakly; keep the returned
/// [`Subscription`] alive for as long as updates are wanted.
pub struct ProgressCell {
    value: Cell<f64>,
    subscribers: RefCell<Vec<Weak<Subscriber>>>,
}

#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    _callback: Rc<Subscriber>,
}

impl ProgressCell {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            value: Cell::new(0.0),
            subscribers: RefCell::new(Vec::new()),
        })
    }

    pub fn get(&self) -> f64 {
        self.value.get()
    }

    pub fn subscribe(&self, callback: impl Fn(f64) + 'static) -> Subscription {
        let callback: Rc<Subscriber> = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&callback));
        Subscription { _callback: callback }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }

    /// Stores `value` (clamped to `[0, 1]`) and notifies live subscribers if it changed.
    pub fn publish(&self, value: f64) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        if value == self.value.get() {
            return;
        }
        self.value.set(value);

        // Callbacks may subscribe or drop subscriptions, so release the borrow first.
        let live: Vec<Rc<Subscriber>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|s| s.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in live {
            callback(value);
        }
    }
}

/// Where the tracked section currently is.
pub trait ViewportSource {
    /// Top edge of the section relative to the viewport, `None` once it is gone.
    fn section_top(&self) -> Option<f64>;
}

/// Defers work to the next animation frame. Dropping the returned frame
/// guard cancels the request if it has not run yet.
pub trait FrameScheduler {
    type Frame;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Self::Frame;
}

pub struct ScrollProgressBinder<V, S: FrameScheduler> {
    source: V,
    scheduler: S,
    reveal_distance: f64,
    progress: Rc<ProgressCell>,
    pending: RefCell<Option<S::Frame>>,
}

impl<V: ViewportSource, S: FrameScheduler> ScrollProgressBinder<V, S> {
    pub fn new(source: V, scheduler: S, reveal_distance: f64, progress: Rc<ProgressCell>) -> Self {
        Self {
            source,
            scheduler,
            reveal_distance,
            progress,
            pending: RefCell::new(None),
        }
    }

    /// Handles one scroll/resize event. At most one publish per frame; a newer
    /// event replaces (and cancels) the frame requested by an older one.
    pub fn on_viewport_change(&self) {
        let Some(top) = self.source.section_top() else {
            self.detach();
            return;
        };
        let value = progress_for(top, self.reveal_distance);
        let progress = Rc::clone(&self.progress);
        let frame = self
            .scheduler
            .request_frame(Box::new(move || progress.publish(value)));
        let previous = self.pending.replace(Some(frame));
        drop(previous);
    }

    /// Cancels any frame still waiting to publish.
    pub fn detach(&self) {
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

/// Reads the bounding rect of a rendered element.
pub struct ElementViewport {
    node: NodeRef,
}

impl ElementViewport {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }
}

impl ViewportSource for ElementViewport {
    fn section_top(&self) -> Option<f64> {
        self.node
            .cast::<Element>()
            .map(|el| el.get_bounding_client_rect().top())
    }
}

/// `requestAnimationFrame` on the global window.
pub struct AnimationFrameScheduler;

pub struct AnimationFrame {
    id: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.id, web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Frame = AnimationFrame;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> AnimationFrame {
        let closure: Closure<dyn FnMut()> = Closure::once(move || callback());
        let id = web_sys::window().and_then(|window| {
            window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok()
        });
        if id.is_none() {
            log::warn!("requestAnimationFrame unavailable, progress update dropped");
        }
        AnimationFrame { id, _closure: closure }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct ScriptedViewport {
        tops: RefCell<VecDeque<Option<f64>>>,
    }

    impl ScriptedViewport {
        fn new(tops: &[Option<f64>]) -> Self {
            Self { tops: RefCell::new(tops.iter().copied().collect()) }
        }
    }

    impl ViewportSource for &ScriptedViewport {
        fn section_top(&self) -> Option<f64> {
            self.tops.borrow_mut().pop_front().flatten()
        }
    }

    type Slot = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

    #[derive(Default)]
    struct ManualFrames {
        queue: RefCell<Vec<Slot>>,
    }

    struct ManualFrame(Slot);

    impl Drop for ManualFrame {
        fn drop(&mut self) {
            self.0.borrow_mut().take();
        }
    }

    impl ManualFrames {
        fn run(&self) -> usize {
            let slots: Vec<Slot> = self.queue.borrow_mut().drain(..).collect();
            let mut ran = 0;
            for slot in slots {
                let callback = slot.borrow_mut().take();
                if let Some(callback) = callback {
                    callback();
                    ran += 1;
                }
            }
            ran
        }
    }

    impl FrameScheduler for &ManualFrames {
        type Frame = ManualFrame;

        fn request_frame(&self, callback: Box<dyn FnOnce()>) -> ManualFrame {
            let slot: Slot = Rc::new(RefCell::new(Some(callback)));
            self.queue.borrow_mut().push(Rc::clone(&slot));
            ManualFrame(slot)
        }
    }

    #[test]
    fn progress_follows_pinned_offset() {
        let tops = [50.0, 0.0, -100.0, -400.0, -500.0];
        let got: Vec<f64> = tops.iter().map(|&t| progress_for(t, 400.0)).collect();
        assert_eq!(got, vec![0.0, 0.0, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn degenerate_distance_completes_once_pinned() {
        assert_eq!(progress_for(10.0, 0.0), 0.0);
        assert_eq!(progress_for(0.0, 0.0), 1.0);
        assert_eq!(progress_for(-3.0, -20.0), 1.0);
        assert_eq!(progress_for(-3.0, f64::NAN), 1.0);
        assert_eq!(progress_for(f64::NAN, 400.0), 0.0);
        assert_eq!(progress_for(-3.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn binder_publishes_once_per_frame() {
        let viewport = ScriptedViewport::new(&[
            Some(50.0),
            Some(0.0),
            Some(-100.0),
            Some(-400.0),
            Some(-500.0),
        ]);
        let frames = ManualFrames::default();
        let cell = ProgressCell::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            cell.subscribe(move |p| seen.borrow_mut().push(p))
        };
        let binder = ScrollProgressBinder::new(&viewport, &frames, 400.0, Rc::clone(&cell));

        let mut published = Vec::new();
        for _ in 0..5 {
            binder.on_viewport_change();
            frames.run();
            published.push(cell.get());
        }
        assert_eq!(published, vec![0.0, 0.0, 0.25, 1.0, 1.0]);
        // Unchanged values are not re-announced.
        assert_eq!(*seen.borrow(), vec![0.25, 1.0]);
    }

    #[test]
    fn newer_event_cancels_pending_frame() {
        let viewport = ScriptedViewport::new(&[Some(-100.0), Some(-200.0), Some(-300.0)]);
        let frames = ManualFrames::default();
        let cell = ProgressCell::new();
        let binder = ScrollProgressBinder::new(&viewport, &frames, 400.0, Rc::clone(&cell));

        binder.on_viewport_change();
        binder.on_viewport_change();
        binder.on_viewport_change();
        assert_eq!(frames.run(), 1);
        assert_eq!(cell.get(), 0.75);
    }

    #[test]
    fn detached_element_cancels_and_publishes_nothing() {
        let viewport = ScriptedViewport::new(&[Some(-200.0), None]);
        let frames = ManualFrames::default();
        let cell = ProgressCell::new();
        let binder = ScrollProgressBinder::new(&viewport, &frames, 400.0, Rc::clone(&cell));

        binder.on_viewport_change();
        binder.on_viewport_change();
        assert_eq!(frames.run(), 0);
        assert_eq!(cell.get(), 0.0);
    }

    #[test]
    fn dropped_subscription_stops_updates() {
        let cell = ProgressCell::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            cell.subscribe(move |_| hits.set(hits.get() + 1))
        };
        cell.publish(0.5);
        assert_eq!(cell.subscriber_count(), 1);
        drop(sub);
        cell.publish(0.9);
        assert_eq!(hits.get(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn publish_clamps_out_of_range_values() {
        let cell = ProgressCell::new();
        cell.publish(1.7);
        assert_eq!(cell.get(), 1.0);
        cell.publish(-0.2);
        assert_eq!(cell.get(), 0.0);
    }
}
