use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::api::auth::{self, LoginStatus};
use crate::api::faq::is_valid_email;
use crate::components::confetti::{Confetti, CONFETTI_DURATION_MS};
use crate::session::{self, LocalStorage};

#[derive(Properties, PartialEq)]
pub struct EmailLoginFormProps {
    #[prop_or_default]
    pub on_success: Callback<()>,
    #[prop_or(AttrValue::from("Join the Waitlist for Early Access"))]
    pub button_label: AttrValue,
}

/// Email field plus submit button posting to the email login endpoint.
#[function_component(EmailLoginForm)]
pub fn email_login_form(props: &EmailLoginFormProps) -> Html {
    let email = use_state(String::new);
    let status = use_state(|| LoginStatus::Idle);

    let on_submit = {
        let email = email.clone();
        let status = status.clone();
        let on_success = props.on_success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *status == LoginStatus::Loading {
                return;
            }
            let address = email.trim().to_string();
            if !is_valid_email(&address) {
                status.set(LoginStatus::Error("Please enter a valid email address".to_string()));
                return;
            }
            status.set(LoginStatus::Loading);
            let status = status.clone();
            let on_success = on_success.clone();
            spawn_local(async move {
                log::info!("Email submitted for early access");
                let result = auth::login_with_email(&address).await;
                let outcome = auth::finish_email_login(&LocalStorage, result);
                let succeeded = outcome == LoginStatus::Success;
                status.set(outcome);
                if succeeded {
                    on_success.emit(());
                }
            });
        })
    };

    let loading = *status == LoginStatus::Loading;

    html! {
        <form class="email-login-form" onsubmit={on_submit}>
            <input
                type="email"
                placeholder="Enter your email"
                value={(*email).clone()}
                disabled={loading}
                oninput={
                    let email = email.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        email.set(input.value());
                    })
                }
            />
            <button type="submit" disabled={loading}>
                if loading {
                    <span class="loading-spinner"></span>{" Signing in..."}
                } else {
                    { props.button_label.clone() }
                }
            </button>
            {
                match &*status {
                    LoginStatus::Error(message) => html! {
                        <div class="error-message">{message.clone()}</div>
                    },
                    LoginStatus::Success => html! {
                        <div class="success-message">{"🎉 You're logged in! Thank you for joining us."}</div>
                    },
                    _ => html! {},
                }
            }
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoginModalProps {
    pub is_open: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_login: Callback<()>,
}

fn strip_query_string() {
    if let Some(window) = window() {
        let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
        }
    }
}

#[function_component(LoginModal)]
pub fn login_modal(props: &LoginModalProps) -> Html {
    let status = use_state(|| LoginStatus::Idle);
    let login_param = use_search_param("login".to_string());

    // Returning from the Google redirect with ?login=success
    {
        let status = status.clone();
        let on_close = props.on_close.clone();
        let on_login = props.on_login.clone();
        use_effect_with_deps(
            move |login_param| {
                if login_param.as_deref() == Some("success") {
                    status.set(LoginStatus::Success);
                    match session::adopt_cookie_login(&LocalStorage, &session::document_cookies()) {
                        Ok(true) => log::info!("Google login completed"),
                        Ok(false) => log::warn!("login=success without a userId cookie"),
                        Err(e) => log::error!("Could not persist Google login: {}", e),
                    }
                    strip_query_string();
                    on_login.emit(());

                    Timeout::new(CONFETTI_DURATION_MS, move || {
                        on_close.emit(());
                        status.set(LoginStatus::Idle);
                        if let Some(window) = window() {
                            let _ = window.location().reload();
                        }
                    })
                    .forget();
                }
                || ()
            },
            login_param,
        );
    }

    let success = *status == LoginStatus::Success;
    if !props.is_open && !success {
        return html! {};
    }

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let google_login = {
        let status = status.clone();
        Callback::from(move |_: MouseEvent| {
            status.set(LoginStatus::Loading);
            auth::begin_google_login();
        })
    };
    let on_email_login = {
        let on_login = props.on_login.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |_: ()| {
            on_login.emit(());
            on_close.emit(());
        })
    };

    html! {
        <div class="login-modal-backdrop" onclick={close.clone()}>
            if success {
                <Confetti />
            }
            <div class="login-modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                if success {
                    <div class="login-success">
                        <div class="login-success-check">{"✓"}</div>
                        <h3>{"Welcome Back! 🎉"}</h3>
                        <p>{"Login successful. Preparing your dashboard..."}</p>
                        <div class="login-dots"><span></span><span></span><span></span></div>
                    </div>
                } else {
                    <h3>{"Step Into the Future of Health!"}</h3>
                    <p>{"Sign in to preview features and stay connected as we prepare for full launch."}</p>
                    <button
                        class="google-login-button"
                        onclick={google_login}
                        disabled={*status == LoginStatus::Loading}
                    >
                        if *status == LoginStatus::Loading {
                            <span class="loading-spinner dark"></span>{" Redirecting..."}
                        } else {
                            {"Sign in with Google"}
                        }
                    </button>
                    <div class="login-divider"><span>{"or"}</span></div>
                    <EmailLoginForm on_success={on_email_login} button_label="Continue with email" />
                    <button class="login-modal-close" onclick={close}>{"✕"}</button>
                }
            </div>
            <style>
                {r#"
                .login-modal-backdrop {
                    position: fixed;
                    inset: 0;
                    z-index: 70;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    padding: 1rem;
                    background: rgba(0, 0, 0, 0.5);
                    backdrop-filter: blur(4px);
                }
                .login-modal {
                    position: relative;
                    width: 100%;
                    max-width: 24rem;
                    padding: 3rem;
                    border-radius: 0.75rem;
                    background: #fff;
                    color: #1f2937;
                    text-align: center;
                    box-shadow: 0 25px 50px rgba(0, 0, 0, 0.25);
                }
                .login-modal h3 { font-size: 1.8rem; margin: 0 0 0.75rem; }
                .login-modal p { color: #4b5563; margin-bottom: 2rem; }
                .google-login-button {
                    width: 100%;
                    padding: 0.75rem 1.5rem;
                    border: 1px solid #d1d5db;
                    border-radius: 0.5rem;
                    background: #fff;
                    color: #374151;
                    font-weight: 500;
                    cursor: pointer;
                }
                .google-login-button:disabled { opacity: 0.5; cursor: not-allowed; }
                .login-divider { margin: 1rem 0; color: #9ca3af; font-size: 0.8rem; }
                .login-modal-close { position: absolute; top: 0.75rem; right: 0.75rem; background: none; border: none; color: #9ca3af; cursor: pointer; font-size: 1.2rem; }
                .login-success-check { margin: 0 auto 1rem; width: 4rem; height: 4rem; border-radius: 50%; background: #dcfce7; color: #16a34a; font-size: 2rem; display: flex; align-items: center; justify-content: center; animation: bounce 1s infinite; }
                .login-dots { display: flex; justify-content: center; gap: 0.25rem; }
                .login-dots span { width: 0.5rem; height: 0.5rem; border-radius: 50%; background: #F9D000; animation: bounce 1s infinite; }
                .login-dots span:nth-child(2) { animation-delay: 150ms; }
                .login-dots span:nth-child(3) { animation-delay: 300ms; }
                @keyframes bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-25%); } }
                "#}
            </style>
        </div>
    }
}
