use gloo_timers::callback::Timeout;
use payloads::Redirect;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

/// Returns a callback that performs a [`Redirect`] once its delay has passed.
///
/// The pending timer belongs to the calling component: scheduling a new
/// redirect replaces the old one, and unmounting cancels whatever is still
/// pending, including redirects requested after unmount by a late response.
#[hook]
pub fn use_scheduled_redirect() -> Callback<Redirect> {
    let navigator = use_navigator();
    let timeout_handle = use_mut_ref(|| None::<Timeout>);
    let mounted = use_state(|| Rc::new(Cell::new(true)));

    {
        let timeout_handle = timeout_handle.clone();
        let mounted = (*mounted).clone();
        use_effect_with((), move |_| {
            move || {
                mounted.set(false);
                // Dropping the timeout cancels it
                timeout_handle.borrow_mut().take();
            }
        });
    }

    let mounted = (*mounted).clone();
    Callback::from(move |redirect: Redirect| {
        if !mounted.get() {
            tracing::debug!(
                path = redirect.path,
                "Ignoring redirect after unmount"
            );
            return;
        }
        let Some(navigator) = navigator.clone() else {
            tracing::error!("Redirect requested outside of a router");
            return;
        };
        let Some(route) = Route::recognize(redirect.path) else {
            tracing::error!(path = redirect.path, "Redirect to unknown route");
            return;
        };

        let delay_ms =
            u32::try_from(redirect.delay.as_millis()).unwrap_or(u32::MAX);
        let replace = redirect.replace;
        tracing::debug!(
            path = redirect.path,
            delay_ms,
            replace,
            "Scheduling redirect"
        );

        let timeout = Timeout::new(delay_ms, move || {
            if replace {
                navigator.replace(&route);
            } else {
                navigator.push(&route);
            }
        });
        *timeout_handle.borrow_mut() = Some(timeout);
    })
}
