use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::AddEventListenerOptions;
use yew::prelude::*;

use crate::reveal::progress::{
    AnimationFrameScheduler, ElementViewport, ProgressCell, ScrollProgressBinder,
    DEFAULT_REVEAL_DISTANCE,
};
use crate::reveal::words::{reveal_ranges, split_words};

/// Progress of the element behind `node` through its pinned scroll range.
/// Listeners and any pending frame are released when the component unmounts.
#[hook]
pub fn use_scroll_progress(node: NodeRef, reveal_distance: f64) -> f64 {
    let progress = use_state(|| 0.0_f64);

    {
        let progress = progress.clone();
        use_effect_with_deps(
            move |(node, reveal_distance)| {
                let cell = ProgressCell::new();
                let subscription = cell.subscribe(move |p| progress.set(p));
                let binder = Rc::new(ScrollProgressBinder::new(
                    ElementViewport::new(node.clone()),
                    AnimationFrameScheduler,
                    *reveal_distance,
                    cell,
                ));

                let on_change = {
                    let binder = Rc::clone(&binder);
                    Closure::wrap(Box::new(move || binder.on_viewport_change()) as Box<dyn FnMut()>)
                };

                let window = web_sys::window();
                if let Some(window) = &window {
                    let options = AddEventListenerOptions::new();
                    options.set_passive(true);
                    if window
                        .add_event_listener_with_callback_and_add_event_listener_options(
                            "scroll",
                            on_change.as_ref().unchecked_ref(),
                            &options,
                        )
                        .is_err()
                    {
                        log::warn!("could not attach scroll listener");
                    }
                    let _ = window
                        .add_event_listener_with_callback("resize", on_change.as_ref().unchecked_ref());
                }

                // Initial check
                binder.on_viewport_change();

                move || {
                    if let Some(window) = &window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            on_change.as_ref().unchecked_ref(),
                        );
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            on_change.as_ref().unchecked_ref(),
                        );
                    }
                    binder.detach();
                    drop(subscription);
                }
            },
            (node, reveal_distance),
        );
    }

    *progress
}

#[derive(Properties, PartialEq)]
pub struct TextRevealProps {
    pub text: AttrValue,
    #[prop_or(DEFAULT_REVEAL_DISTANCE)]
    pub reveal_distance: f64,
    #[prop_or_default]
    pub class: Classes,
}

/// Pinned paragraph whose words light up left to right as the page scrolls.
#[function_component(TextReveal)]
pub fn text_reveal(props: &TextRevealProps) -> Html {
    let container = use_node_ref();
    let progress = use_scroll_progress(container.clone(), props.reveal_distance);

    let words = split_words(&props.text);
    let ranges = reveal_ranges(words.len());

    html! {
        <div ref={container} class={classes!("text-reveal", props.class.clone())}>
            <div class="text-reveal-sticky">
                <span class="text-reveal-words">
                    { for words.iter().zip(ranges).map(|(word, range)| html! {
                        <RevealWord
                            word={AttrValue::from(word.to_string())}
                            style={AttrValue::from(range.style_at(progress).to_css())}
                        />
                    }) }
                </span>
            </div>
            <style>
                {r#"
                .text-reveal {
                    position: relative;
                    z-index: 0;
                    width: 100%;
                    min-height: 100vh;
                }
                .text-reveal-sticky {
                    position: sticky;
                    top: 0;
                    display: flex;
                    align-items: center;
                    height: 100vh;
                    margin: 0 auto;
                    padding: 3rem 1.5rem;
                    overflow: hidden;
                }
                .text-reveal-words {
                    display: flex;
                    flex-wrap: wrap;
                    justify-content: center;
                    gap: 0.5rem;
                    font-size: 2.25rem;
                    font-weight: 700;
                }
                .reveal-word {
                    position: relative;
                    display: inline-block;
                    margin: 0 0.3rem;
                    overflow: hidden;
                }
                .reveal-word-ghost {
                    position: absolute;
                    inset: 0;
                    opacity: 0.3;
                    color: #737373;
                }
                .reveal-word-lit {
                    position: relative;
                    display: inline-block;
                    background: linear-gradient(to right, #F9D000, #F2AA00);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }
                @media (max-width: 768px) {
                    .text-reveal-words {
                        font-size: 15px;
                        justify-content: flex-start;
                    }
                }
                "#}
            </style>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RevealWordProps {
    word: AttrValue,
    style: AttrValue,
}

#[function_component(RevealWord)]
fn reveal_word(props: &RevealWordProps) -> Html {
    html! {
        <span class="reveal-word">
            <span class="reveal-word-ghost">{ props.word.clone() }</span>
            <span class="reveal-word-lit" style={props.style.clone()}>{ props.word.clone() }</span>
        </span>
    }
}
