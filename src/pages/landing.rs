use chrono::{Datelike, Local};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;
use yew::prelude::*;

use crate::components::chatbot::ChatbotPopover;
use crate::components::faq_popover::FaqSystem;
use crate::components::login_modal::EmailLoginForm;
use crate::content::{FeatureCard, FEATURES, HERO_TAGLINE, VISION_TEXT};
use crate::reveal::text_reveal::{use_scroll_progress, TextReveal};
use crate::reveal::words::{interpolate, RevealRange};

/// Each card behind the top one shrinks by this much per remaining card.
const CARD_SCALE_STEP: f64 = 0.05;

/// Scale of card `index` out of `count` once the stack is fully scrolled.
pub fn card_target_scale(index: usize, count: usize) -> f64 {
    1.0 - count.saturating_sub(index) as f64 * CARD_SCALE_STEP
}

/// Card `index` starts shrinking at `index / count`, so every range stays non-empty.
pub fn card_scale(progress: f64, index: usize, count: usize) -> f64 {
    let range = RevealRange {
        start: index as f64 / count.max(1) as f64,
        end: 1.0,
    };
    interpolate(progress, range, 1.0, card_target_scale(index, count))
}

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(800.0)
}

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub logged_in: bool,
    #[prop_or_default]
    pub on_login: Callback<()>,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    html! {
        <div class="landing-page">
            <HeroSection logged_in={props.logged_in} on_login={props.on_login.clone()} />
            <AboutSection />
            <StackingFeatures />
            <FinalCta />
            <Footer />
            <ChatbotPopover />
            <FaqSystem />
            <style>
                {r#"
                .landing-page {
                    position: relative;
                    overflow-x: hidden;
                    background: #000;
                    color: #fff;
                    font-family: system-ui, sans-serif;
                }
                .accent { color: #F9D000; }
                .gradient-text {
                    background: linear-gradient(to right, #F9D000, #F2AA00);
                    -webkit-background-clip: text;
                    background-clip: text;
                    color: transparent;
                }
                .loading-spinner {
                    display: inline-block;
                    width: 1rem;
                    height: 1rem;
                    border: 2px solid rgba(255, 255, 255, 0.4);
                    border-top-color: #fff;
                    border-radius: 50%;
                    animation: spin 0.8s linear infinite;
                }
                .loading-spinner.dark { border-color: rgba(0, 0, 0, 0.2); border-top-color: #374151; }
                @keyframes spin { to { transform: rotate(360deg); } }
                "#}
            </style>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    logged_in: bool,
    on_login: Callback<()>,
}

#[function_component(HeroSection)]
fn hero_section(props: &HeroProps) -> Html {
    let pills = [
        ("📋", "AI Prescription", "Validation"),
        ("📍", "Local Helper", "Network"),
        ("💜", "Personalized", "Wellness Tips"),
    ];

    html! {
        <section class="hero">
            <div class="hero-overlay"></div>
            <main class="hero-content">
                <h1 class="hero-title">
                    {"Your Local "}<span class="accent">{"Health Companion:"}</span>
                    {" Access Care, Medicine, and Human Help — "}<span class="accent">{"Effortlessly."}</span>
                </h1>
                <p class="hero-subtitle">{HERO_TAGLINE}</p>
                <div class="hero-pills">
                    { for pills.iter().map(|(icon, title, subtitle)| html! {
                        <div class="hero-pill">
                            <span class="hero-pill-icon">{*icon}</span>
                            <div>
                                <div class="hero-pill-title">{*title}</div>
                                <div class="hero-pill-subtitle">{*subtitle}</div>
                            </div>
                        </div>
                    }) }
                </div>
                if props.logged_in {
                    <div class="hero-logged-in">{"🎉 You're logged in! Thank you for joining us."}</div>
                } else {
                    <EmailLoginForm on_success={props.on_login.clone()} />
                }
            </main>
            <style>
                {r#"
                .hero { position: relative; min-height: 100vh; overflow: hidden; }
                .hero-overlay { position: absolute; inset: 0; background: rgba(10, 14, 26, 0.4); }
                .hero-content {
                    position: relative;
                    z-index: 1;
                    max-width: 80rem;
                    margin: 0 auto;
                    min-height: calc(100vh - 80px);
                    padding: 8rem 1rem 0;
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    text-align: center;
                }
                .hero-title { font-size: clamp(2.25rem, 5vw, 4rem); font-weight: 900; line-height: 1.15; margin: 0 0 0.5rem; text-shadow: 0 4px 20px rgba(0,0,0,0.8); }
                .hero-subtitle { max-width: 56rem; color: #9ca3af; font-size: 1.15rem; line-height: 1.6; margin-bottom: 1.5rem; }
                .hero-pills { display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; margin-bottom: 2.5rem; }
                .hero-pill { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.25rem; border-radius: 9999px; border: 1px solid rgba(255,255,255,0.2); background: rgba(0,0,0,0.6); text-align: left; }
                .hero-pill-icon { font-size: 1.5rem; }
                .hero-pill-title { font-size: 0.875rem; font-weight: 700; color: #fb923c; }
                .hero-pill-subtitle { font-size: 0.75rem; color: #d1d5db; }
                .email-login-form { display: flex; flex-wrap: wrap; width: 100%; max-width: 48rem; }
                .email-login-form input {
                    flex: 1;
                    min-width: 14rem;
                    padding: 1rem 1.5rem;
                    background: rgba(0,0,0,0.5);
                    border: 2px solid rgba(234,179,8,0.7);
                    border-radius: 9999px 0 0 9999px;
                    color: #fff;
                }
                .email-login-form button {
                    padding: 1rem 2rem;
                    border: none;
                    border-radius: 0 9999px 9999px 0;
                    background: linear-gradient(to right, #005C9E, #F9D000);
                    color: #fff;
                    font-weight: 700;
                    cursor: pointer;
                    white-space: nowrap;
                }
                .email-login-form .error-message, .email-login-form .success-message { width: 100%; margin-top: 0.75rem; }
                .success-message { color: #F9D000; }
                .hero-logged-in {
                    width: 100%;
                    max-width: 48rem;
                    padding: 1rem 1.5rem;
                    border-radius: 9999px;
                    border: 2px solid rgba(253,224,71,0.5);
                    background: linear-gradient(to right, #005C9E, #F9D000);
                    font-weight: 600;
                    box-shadow: 0 0 20px rgba(249,208,0,0.35);
                }
                "#}
            </style>
        </section>
    }
}

#[function_component(AboutSection)]
fn about_section() -> Html {
    html! {
        <section id="about" class="about-section">
            <span class="section-badge"><span class="gradient-text">{"Our Vision"}</span></span>
            <TextReveal text={VISION_TEXT} class="vision-text" />
            <style>
                {r#"
                .about-section { position: relative; padding: 6rem 1.5rem 0; }
                .section-badge {
                    display: block;
                    width: fit-content;
                    margin: 0 auto 1.5rem;
                    padding: 0.25rem 1rem;
                    border-radius: 9999px;
                    border: 1px solid rgba(163,230,53,0.3);
                    font-size: 0.875rem;
                    font-weight: 600;
                }
                "#}
            </style>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct StackedCardProps {
    index: usize,
    scale: f64,
}

#[function_component(StackedCard)]
fn stacked_card(props: &StackedCardProps) -> Html {
    let FeatureCard { title, subtitle, description, image, color } = &FEATURES[props.index];
    let style = format!(
        "background: {}; top: calc(-5vh + {}px); transform: scale({:.4});",
        color,
        props.index * 25,
        props.scale
    );

    html! {
        <div class="stack-slot">
            <div class="stack-card" style={style}>
                <h2>{*title}</h2>
                <div class="stack-card-body">
                    <div class="stack-card-text">
                        <h3>{*subtitle}</h3>
                        <p>{*description}</p>
                    </div>
                    <div class="stack-card-image">
                        <img src={*image} alt={*title} />
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Feature cards pinned on top of each other; earlier cards shrink as the
/// user scrolls through the stack.
#[function_component(StackingFeatures)]
fn stacking_features() -> Html {
    let container = use_node_ref();
    let count = FEATURES.len();
    let distance = use_state(|| viewport_height() * count.saturating_sub(1) as f64);

    {
        let distance = distance.clone();
        use_effect_with_deps(
            move |_| {
                let listener = listen_resize(move || {
                    distance.set(viewport_height() * count.saturating_sub(1) as f64);
                });
                move || drop(listener)
            },
            (),
        );
    }

    let progress = use_scroll_progress(container.clone(), *distance);

    html! {
        <section id="features" class="stacking-features" ref={container}>
            <div class="stacking-intro">
                <span class="section-badge"><span class="gradient-text">{"Our Services"}</span></span>
                <h1>
                    {"HOW CAN WE "}<span class="gradient-text">{"HELP?"}</span><br />
                    <span class="gradient-text">{"core pillars"}</span>{" of CareLoop.👇"}
                </h1>
            </div>
            { for (0..count).map(|index| html! {
                <StackedCard key={index} index={index} scale={card_scale(progress, index, count)} />
            }) }
            <style>
                {r#"
                .stacking-features { position: relative; z-index: 5; background: #000; }
                .stacking-intro { height: 70vh; display: grid; place-content: center; text-align: center; padding: 0 2rem; }
                .stacking-intro h1 { font-size: clamp(2.5rem, 5vw, 4.5rem); font-weight: 600; letter-spacing: -0.02em; line-height: 1.2; }
                .stack-slot { position: sticky; top: 0; height: 100vh; display: flex; align-items: center; justify-content: center; }
                .stack-card {
                    position: relative;
                    width: min(70%, 72rem);
                    height: 450px;
                    padding: 2.5rem;
                    border-radius: 0.75rem;
                    display: flex;
                    flex-direction: column;
                    transform-origin: top;
                }
                .stack-card h2 { margin: 0; text-align: center; font-size: 1.5rem; font-weight: 600; }
                .stack-card-body { display: flex; gap: 2.5rem; height: 100%; margin-top: 1.25rem; }
                .stack-card-text { width: 40%; position: relative; top: 10%; }
                .stack-card-text h3 { margin-top: 0; }
                .stack-card-text p { font-size: 0.9rem; line-height: 1.6; }
                .stack-card-image { position: relative; width: 60%; height: 100%; border-radius: 0.5rem; overflow: hidden; }
                .stack-card-image img { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; }
                @media (max-width: 768px) {
                    .stack-card { width: 90%; height: auto; }
                    .stack-card-body { flex-direction: column; }
                    .stack-card-text, .stack-card-image { width: 100%; }
                    .stack-card-image { height: 12rem; }
                }
                "#}
            </style>
        </section>
    }
}

struct ResizeListener {
    window: Window,
    closure: Closure<dyn Fn()>,
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}

fn listen_resize(callback: impl Fn() + 'static) -> Option<ResizeListener> {
    let window = web_sys::window()?;
    let closure = Closure::wrap(Box::new(callback) as Box<dyn Fn()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok()?;
    Some(ResizeListener { window, closure })
}

#[function_component(FinalCta)]
fn final_cta() -> Html {
    let back_to_top = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    });

    html! {
        <section class="final-cta">
            <h2>{"Why don't you "}<span class="gradient-text">{"start today?"}</span></h2>
            <p>{"Join the waitlist and be the first to experience care that comes to you."}</p>
            <button class="final-cta-button" onclick={back_to_top}>{"Get Early Access"}</button>
            <style>
                {r#"
                .final-cta { padding: 8rem 1.5rem; text-align: center; }
                .final-cta h2 { font-size: clamp(2rem, 4vw, 3.5rem); margin: 0 0 1rem; }
                .final-cta p { color: #9ca3af; margin-bottom: 2rem; }
                .final-cta-button {
                    padding: 1rem 2.5rem;
                    border: 2px solid #F9D000;
                    border-radius: 9999px;
                    background: none;
                    color: #fff;
                    font-weight: 700;
                    cursor: pointer;
                    transition: all 0.3s ease;
                }
                .final-cta-button:hover { background: #F9D000; color: #000; }
                "#}
            </style>
        </section>
    }
}

pub fn copyright_line(year: i32) -> String {
    format!("© {} CareLoop. All rights reserved.", year)
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <div class="footer-brand">{"Care"}<span class="accent">{"Loop"}</span>{" AI"}</div>
            <p class="footer-copy">{copyright_line(Local::now().year())}</p>
            <style>
                {r#"
                .site-footer { padding: 3rem 1.5rem; border-top: 1px solid #27272a; text-align: center; }
                .footer-brand { font-size: 1.5rem; font-weight: 800; margin-bottom: 0.5rem; }
                .footer-copy { color: #71717a; font-size: 0.85rem; margin: 0; }
                "#}
            </style>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_start_at_full_size() {
        for index in 0..FEATURES.len() {
            assert_eq!(card_scale(0.0, index, FEATURES.len()), 1.0);
        }
    }

    #[test]
    fn deeper_cards_shrink_less() {
        let count = 6;
        assert!((card_target_scale(0, count) - 0.70).abs() < 1e-9);
        assert!((card_target_scale(5, count) - 0.95).abs() < 1e-9);
        assert!((card_scale(1.0, 0, count) - 0.70).abs() < 1e-9);
    }

    #[test]
    fn later_cards_wait_for_their_turn() {
        // card 3 of 6 starts shrinking at progress 0.5
        assert_eq!(card_scale(0.5, 3, 6), 1.0);
        assert!(card_scale(0.75, 3, 6) < 1.0);
    }

    #[test]
    fn every_card_shrinks_smoothly_into_place() {
        let count = FEATURES.len();
        for index in 0..count {
            let target = card_target_scale(index, count);
            let near_end = card_scale(0.999, index, count);
            assert!(near_end < 1.0, "card {index} has not started by 0.999");
            assert!((near_end - target).abs() < 0.01, "card {index} jumps at the end");
            assert!((card_scale(1.0, index, count) - target).abs() < 1e-9);

            let mut last = 1.0;
            for step in 0..=1000 {
                let scale = card_scale(step as f64 / 1000.0, index, count);
                assert!(scale <= last + 1e-12);
                assert!(last - scale < 0.02, "card {index} jumps near step {step}");
                last = scale;
            }
        }
    }

    #[test]
    fn footer_names_the_year() {
        assert_eq!(copyright_line(2025), "© 2025 CareLoop. All rights reserved.");
    }
}
