use web_sys::window;
use yew::prelude::*;

/// Stops the page behind an open popover from scrolling.
pub fn set_body_scroll_locked(locked: bool) {
    let body = window().and_then(|w| w.document()).and_then(|d| d.body());
    if let Some(body) = body {
        let value = if locked { "hidden" } else { "" };
        if body.style().set_property("overflow", value).is_err() {
            log::warn!("could not toggle body scrolling");
        }
    }
}

#[hook]
pub fn use_body_scroll_lock(locked: bool) {
    use_effect_with_deps(
        move |locked| {
            let locked = *locked;
            if locked {
                set_body_scroll_locked(true);
            }
            move || {
                if locked {
                    set_body_scroll_locked(false);
                }
            }
        },
        locked,
    );
}
