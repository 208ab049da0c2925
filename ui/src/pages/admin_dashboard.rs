use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

/// Landing page after an event is created.
#[function_component]
pub fn AdminDashboardPage() -> Html {
    html! {
        <div class="max-w-lg mx-auto bg-white p-8 rounded-lg shadow-md space-y-4">
            <h1 class="text-2xl font-bold text-neutral-900">
                {"Admin Dashboard"}
            </h1>
            <p class="text-neutral-600">
                {"Events you add will be listed by the backend."}
            </p>
            <Link<Route>
                to={Route::AdminAddEvent}
                classes="inline-flex py-2 px-4 rounded-md text-sm font-medium \
                         text-white bg-neutral-900 hover:bg-neutral-800"
            >
                {"Add another event"}
            </Link<Route>>
        </div>
    }
}
