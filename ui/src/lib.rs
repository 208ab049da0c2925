use payloads::{APIClient, MediaHostClient};
use yew::prelude::*;
use yew_router::prelude::*;

mod hooks;
pub mod logs;
mod pages;

use pages::{AdminAddEventPage, AdminDashboardPage, NotFoundPage};

const DEFAULT_BACKEND_URL: &str = "https://aid-link-11.onrender.com";
const DEFAULT_MEDIA_UPLOAD_URL: &str =
    "https://api.cloudinary.com/v1_1/dqxcgemok/upload";
const DEFAULT_MEDIA_UPLOAD_PRESET: &str = "AIDlink demo";

// Addresses are fixed at build time; set the variables when running trunk to
// point the UI at the dev-server instead.
pub fn get_api_client() -> APIClient {
    APIClient {
        address: option_env!("BACKEND_URL")
            .unwrap_or(DEFAULT_BACKEND_URL)
            .to_string(),
        inner_client: reqwest::Client::new(),
    }
}

pub fn get_media_host_client() -> MediaHostClient {
    MediaHostClient {
        upload_url: option_env!("MEDIA_UPLOAD_URL")
            .unwrap_or(DEFAULT_MEDIA_UPLOAD_URL)
            .to_string(),
        upload_preset: option_env!("MEDIA_UPLOAD_PRESET")
            .unwrap_or(DEFAULT_MEDIA_UPLOAD_PRESET)
            .to_string(),
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-neutral-50 text-neutral-900">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/admin/add-event")]
    AdminAddEvent,
    #[at("/admin-dashboard")]
    AdminDashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    let page = match routes {
        Route::Home => {
            return html! { <Redirect<Route> to={Route::AdminAddEvent} /> };
        }
        Route::AdminAddEvent => html! { <AdminAddEventPage /> },
        Route::AdminDashboard => html! { <AdminDashboardPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };
    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            {page}
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_path_is_routable() {
        assert_eq!(
            Route::recognize(payloads::ADMIN_DASHBOARD_PATH),
            Some(Route::AdminDashboard)
        );
        assert_eq!(
            Route::AdminDashboard.to_path(),
            payloads::ADMIN_DASHBOARD_PATH
        );
    }
}
