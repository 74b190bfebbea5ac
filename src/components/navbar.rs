use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MouseEvent, Node};
use yew::prelude::*;

use crate::api::auth;
use crate::session::UserData;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub logged_in: bool,
    pub user: UserData,
    pub on_login_click: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let NavbarProps { logged_in, user, on_login_click } = props;
    let show_dropdown = use_state(|| false);
    let logging_out = use_state(|| false);
    let is_scrolled = use_state(|| false);
    let dropdown_ref = use_node_ref();

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();
            let scroll_callback = {
                let window = window.clone();
                Closure::wrap(Box::new(move || {
                    let scroll_y = window.as_ref().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                    is_scrolled.set(scroll_y > 80.0);
                }) as Box<dyn FnMut()>)
            };
            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
            }
            move || {
                if let Some(window) = &window {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    // Close the dropdown on clicks outside of it
    {
        let show_dropdown = show_dropdown.clone();
        let dropdown_ref = dropdown_ref.clone();
        use_effect_with_deps(move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let on_mouse_down = Closure::wrap(Box::new(move |event: MouseEvent| {
                let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                if let Some(dropdown) = dropdown_ref.cast::<Element>() {
                    if !dropdown.contains(target.as_ref()) {
                        show_dropdown.set(false);
                    }
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            if let Some(document) = &document {
                let _ = document.add_event_listener_with_callback("mousedown", on_mouse_down.as_ref().unchecked_ref());
            }
            move || {
                if let Some(document) = &document {
                    let _ = document.remove_event_listener_with_callback("mousedown", on_mouse_down.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_dropdown = {
        let show_dropdown = show_dropdown.clone();
        Callback::from(move |_: MouseEvent| show_dropdown.set(!*show_dropdown))
    };

    let handle_logout = {
        let logging_out = logging_out.clone();
        Callback::from(move |_: MouseEvent| {
            if *logging_out {
                return;
            }
            logging_out.set(true);
            let logging_out = logging_out.clone();
            spawn_local(async move {
                auth::logout().await;
                // Only reached when the redirect did not unload the page
                logging_out.set(false);
            });
        })
    };

    let open_login = {
        let on_login_click = on_login_click.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_login_click.emit(());
        })
    };

    html! {
        <header class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <h1 class="nav-logo">{"Care"}<span class="accent">{"Loop"}</span>{" AI"}</h1>
                {
                    if *logged_in {
                        html! {
                            <div class="nav-user" ref={dropdown_ref}>
                                <button class="nav-avatar-button" onclick={toggle_dropdown}>
                                    <img class="nav-avatar" src={user.avatar_url()} alt={user.display_name().to_string()} />
                                </button>
                                if *show_dropdown {
                                    <div class="nav-dropdown">
                                        <div class="nav-dropdown-profile">
                                            <img src={user.avatar_url()} alt={user.display_name().to_string()} />
                                            <div>
                                                <p class="nav-dropdown-name">{user.display_name().to_string()}</p>
                                                <p class="nav-dropdown-id">
                                                    {format!("ID: {}", user.user_id.as_deref().unwrap_or("-"))}
                                                </p>
                                            </div>
                                        </div>
                                        <button class="nav-logout-button" onclick={handle_logout} disabled={*logging_out}>
                                            { if *logging_out { "Logging out..." } else { "🚪 Logout" } }
                                        </button>
                                    </div>
                                }
                            </div>
                        }
                    } else {
                        html! {
                            <button class="nav-login-button" onclick={open_login}>{"Login"}</button>
                        }
                    }
                }
            </div>
            <style>
                {r#"
                .top-nav {
                    position: fixed;
                    top: 0;
                    left: 0;
                    right: 0;
                    z-index: 50;
                    padding: 1rem 2rem;
                    transition: background 0.3s ease;
                }
                .top-nav.scrolled {
                    background: rgba(0, 0, 0, 0.7);
                    backdrop-filter: blur(10px);
                }
                .nav-content { max-width: 100rem; margin: 0 auto; display: flex; justify-content: space-between; align-items: center; }
                .nav-logo { margin: 0; font-size: 1.9rem; font-weight: 800; color: #fff; letter-spacing: -0.02em; }
                .accent { color: #F9D000; }
                .nav-login-button {
                    padding: 0.5rem 1rem;
                    border: 2px solid #F9D000;
                    border-radius: 0.5rem;
                    background: none;
                    color: #fff;
                    font-weight: 600;
                    cursor: pointer;
                    transition: all 0.3s ease;
                }
                .nav-login-button:hover { background: #F9D000; color: #0a0a0a; transform: scale(1.05); }
                .nav-user { position: relative; }
                .nav-avatar-button { background: none; border: none; cursor: pointer; }
                .nav-avatar { width: 2.5rem; height: 2.5rem; border-radius: 50%; border: 2px solid #d1d5db; object-fit: cover; }
                .nav-dropdown { position: absolute; right: 0; margin-top: 0.5rem; width: 16rem; padding: 0.5rem 0; background: #fff; border: 1px solid #e5e7eb; border-radius: 0.5rem; box-shadow: 0 20px 25px rgba(0,0,0,0.15); }
                .nav-dropdown-profile { display: flex; gap: 0.75rem; align-items: center; padding: 0.75rem 1rem; border-bottom: 1px solid #e5e7eb; }
                .nav-dropdown-profile img { width: 3rem; height: 3rem; border-radius: 50%; object-fit: cover; }
                .nav-dropdown-name { margin: 0; font-size: 0.875rem; font-weight: 600; color: #111827; }
                .nav-dropdown-id { margin: 0; font-size: 0.75rem; color: #6b7280; }
                .nav-logout-button { width: 100%; text-align: left; padding: 0.5rem 1rem; background: none; border: none; color: #dc2626; font-weight: 500; cursor: pointer; }
                .nav-logout-button:hover { background: #fef2f2; }
                .nav-logout-button:disabled { opacity: 0.5; cursor: not-allowed; }
                "#}
            </style>
        </header>
    }
}
