use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlImageElement};
use yew::prelude::*;

const LOADER_TEXT: &str = "CareLoopAI";
/// Pause after the last image settles so the loader does not flash away.
const SETTLE_DELAY_MS: u32 = 300;

pub fn letter_delay(index: usize) -> f64 {
    0.1 + index as f64 * 0.105
}

/// Counts images that finished loading or failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoadTracker {
    total: usize,
    settled: usize,
}

impl ImageLoadTracker {
    pub fn new(total: usize) -> Self {
        Self { total, settled: 0 }
    }

    pub fn is_done(&self) -> bool {
        self.settled >= self.total
    }

    /// Records one settled image. True exactly once, when the last one lands.
    pub fn settle_one(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.settled += 1;
        self.is_done()
    }
}

struct ImageListener {
    image: HtmlImageElement,
    callback: Closure<dyn FnMut()>,
}

impl Drop for ImageListener {
    fn drop(&mut self) {
        for event in ["load", "error"] {
            let _ = self
                .image
                .remove_event_listener_with_callback(event, self.callback.as_ref().unchecked_ref());
        }
    }
}

fn watch_images(document: &Document, loading: UseStateHandle<bool>) -> Vec<ImageListener> {
    let images = document.images();
    let total = images.length() as usize;
    if total == 0 {
        loading.set(false);
        return Vec::new();
    }
    log::debug!("Waiting on {} images before revealing the page", total);

    let tracker = RefCell::new(ImageLoadTracker::new(total));
    let settle: Rc<dyn Fn()> = Rc::new(move || {
        if tracker.borrow_mut().settle_one() {
            let loading = loading.clone();
            spawn_local(async move {
                TimeoutFuture::new(SETTLE_DELAY_MS).await;
                loading.set(false);
            });
        }
    });

    let mut listeners = Vec::new();
    for index in 0..images.length() {
        let image = match images.item(index).and_then(|e| e.dyn_into::<HtmlImageElement>().ok()) {
            Some(image) if !image.complete() => image,
            _ => {
                settle();
                continue;
            }
        };
        let callback = {
            let settle = Rc::clone(&settle);
            Closure::wrap(Box::new(move || settle()) as Box<dyn FnMut()>)
        };
        for event in ["load", "error"] {
            let _ = image.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        }
        listeners.push(ImageListener { image, callback });
    }
    listeners
}

/// True until the window has loaded and every image on the page settled.
#[hook]
pub fn use_page_loader() -> bool {
    let loading = use_state(|| true);

    {
        let loading = loading.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let image_listeners: Rc<RefCell<Vec<ImageListener>>> = Rc::default();

                let handle_load = {
                    let image_listeners = Rc::clone(&image_listeners);
                    move || match web_sys::window().and_then(|w| w.document()) {
                        Some(document) => {
                            *image_listeners.borrow_mut() = watch_images(&document, loading);
                        }
                        None => loading.set(false),
                    }
                };

                let ready = window
                    .as_ref()
                    .and_then(|w| w.document())
                    .map_or(true, |d| d.ready_state() == "complete");

                let mut load_listener: Option<Closure<dyn FnMut()>> = None;
                if ready {
                    handle_load();
                } else if let Some(window) = &window {
                    let closure = Closure::once(handle_load);
                    let _ = window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
                    load_listener = Some(closure);
                }

                move || {
                    if let (Some(window), Some(closure)) = (&window, &load_listener) {
                        let _ = window.remove_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
                    }
                    image_listeners.borrow_mut().clear();
                }
            },
            (),
        );
    }

    *loading
}

#[function_component(FullScreenLoader)]
pub fn full_screen_loader() -> Html {
    html! {
        <div class="fullscreen-loader">
            <div class="loader-wrapper">
                { for LOADER_TEXT.chars().enumerate().map(|(index, letter)| html! {
                    <span
                        key={index}
                        class="loader-letter"
                        style={format!("animation-delay: {:.3}s;", letter_delay(index))}
                    >
                        {letter}
                    </span>
                }) }
                <div class="loader-effect"></div>
            </div>
            <style>
                {r#"
                .fullscreen-loader {
                    position: fixed;
                    inset: 0;
                    z-index: 9999;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    background: #000;
                }
                .loader-wrapper {
                    position: relative;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    height: 120px;
                    transform: scale(2);
                    font-size: 1.6em;
                    font-weight: 600;
                    color: #fff;
                    user-select: none;
                }
                .loader-letter {
                    display: inline-block;
                    opacity: 0.4;
                    animation: loaderLetter 2s infinite;
                    z-index: 1;
                }
                .loader-effect {
                    position: absolute;
                    inset: 0;
                    border-radius: 50%;
                    animation: loaderRotate 2s linear infinite;
                }
                @keyframes loaderLetter {
                    0%, 100% { opacity: 0.4; transform: translateY(0); }
                    20% { opacity: 1; transform: scale(1.15); }
                    40% { opacity: 0.7; transform: translateY(0); }
                }
                @keyframes loaderRotate {
                    0% { transform: rotate(90deg); box-shadow: 0 10px 20px 0 #fff inset, 0 20px 30px 0 #F9D000 inset, 0 60px 60px 0 #005C9E inset; }
                    50% { transform: rotate(270deg); box-shadow: 0 10px 20px 0 #fff inset, 0 20px 10px 0 #F2AA00 inset, 0 40px 60px 0 #00B6C7 inset; }
                    100% { transform: rotate(450deg); box-shadow: 0 10px 20px 0 #fff inset, 0 20px 30px 0 #F9D000 inset, 0 60px 60px 0 #005C9E inset; }
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_images_means_done_immediately() {
        let mut tracker = ImageLoadTracker::new(0);
        assert!(tracker.is_done());
        assert!(!tracker.settle_one());
    }

    #[test]
    fn last_image_reports_done_once() {
        let mut tracker = ImageLoadTracker::new(3);
        assert!(!tracker.settle_one());
        assert!(!tracker.settle_one());
        assert!(tracker.settle_one());
        assert!(tracker.is_done());
        // a late error event after the load must not fire again
        assert!(!tracker.settle_one());
    }

    #[test]
    fn letters_are_staggered() {
        assert!((letter_delay(0) - 0.1).abs() < 1e-9);
        assert!((letter_delay(9) - 1.045).abs() < 1e-9);
        assert_eq!(LOADER_TEXT.chars().count(), 10);
    }
}
