use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod config;
mod content;
mod error;
mod session;
mod typing;
mod reveal {
    pub mod progress;
    pub mod words;
    pub mod text_reveal;
}
mod api {
    pub mod http;
    pub mod auth;
    pub mod chatbot;
    pub mod faq;
}
mod components {
    pub mod scroll_lock;
    pub mod confetti;
    pub mod chat_message;
    pub mod chatbot;
    pub mod faq_popover;
    pub mod login_modal;
    pub mod navbar;
    pub mod loader;
}
mod pages {
    pub mod landing;
}

use components::{
    loader::{use_page_loader, FullScreenLoader},
    login_modal::LoginModal,
    navbar::Navbar,
};
use pages::landing::Landing;
use session::{current_user, is_logged_in};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route, logged_in: bool, on_login: Callback<()>) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing logged_in={logged_in} on_login={on_login} /> }
        }
        Route::NotFound => {
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let logged_in = use_state(is_logged_in);
    let user = use_state(current_user);
    let login_open = use_state(|| false);
    let page_loading = use_page_loader();

    // Re-read storage after either login path completes
    let on_login = {
        let logged_in = logged_in.clone();
        let user = user.clone();
        Callback::from(move |_: ()| {
            logged_in.set(is_logged_in());
            user.set(current_user());
        })
    };
    let open_login = {
        let login_open = login_open.clone();
        Callback::from(move |_: ()| login_open.set(true))
    };
    let close_login = {
        let login_open = login_open.clone();
        Callback::from(move |_: ()| login_open.set(false))
    };

    let render = {
        let logged_in = *logged_in;
        let on_login = on_login.clone();
        Callback::from(move |route: Route| switch(route, logged_in, on_login.clone()))
    };

    html! {
        <BrowserRouter>
            if page_loading {
                <FullScreenLoader />
            }
            <Navbar logged_in={*logged_in} user={(*user).clone()} on_login_click={open_login} />
            <LoginModal is_open={*login_open} on_close={close_login} on_login={on_login} />
            <Switch<Route> render={render} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(Level::Info) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
