use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component]
pub fn NotFoundPage() -> Html {
    html! {
        <div class="text-center space-y-4">
            <h1 class="text-4xl font-bold text-neutral-900">{"404"}</h1>
            <p class="text-neutral-600">{"Page not found"}</p>
            <Link<Route>
                to={Route::AdminAddEvent}
                classes="text-sm font-medium text-neutral-900 underline"
            >
                {"Add an event"}
            </Link<Route>>
        </div>
    }
}
