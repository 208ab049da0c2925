use payloads::{DraftChange, EventCategory, Severity, Tone, UrgencyLevel};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_event_form;

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-neutral-300 \
                           rounded-md shadow-sm bg-white text-neutral-900 \
                           focus:outline-none focus:ring-2 \
                           focus:ring-neutral-500 focus:border-neutral-500";
const LABEL_CLASS: &str = "block text-sm font-medium text-neutral-700 mb-2";

/// Read the `name`, value and checked state of whichever form control fired
/// the event, and turn it into a draft change.
fn change_from_event(e: &Event) -> Option<DraftChange> {
    let target = e.target()?;
    let (name, value, checked) =
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            (input.name(), input.value(), input.checked())
        } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
            (select.name(), select.value(), false)
        } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
            (area.name(), area.value(), false)
        } else {
            return None;
        };
    DraftChange::from_input(&name, &value, checked)
}

/// A `<select>` over every variant of an option enum, with an empty
/// placeholder for "not chosen yet".
fn option_select<T>(
    name: &'static str,
    label: &'static str,
    options: &[T],
    current: Option<T>,
    onchange: Callback<Event>,
) -> Html
where
    T: Copy + PartialEq + std::fmt::Display,
{
    html! {
        <div>
            <label for={name} class={LABEL_CLASS}>{label}</label>
            <select
                id={name}
                name={name}
                onchange={onchange}
                class={INPUT_CLASS}
            >
                <option value="" selected={current.is_none()}>
                    {format!("Select {label}")}
                </option>
                {for options.iter().map(|option| {
                    let value = option.to_string();
                    html! {
                        <option
                            value={value.clone()}
                            selected={current == Some(*option)}
                        >
                            {value}
                        </option>
                    }
                })}
            </select>
        </div>
    }
}

#[function_component]
pub fn AdminAddEventPage() -> Html {
    let form = use_event_form();
    let draft = form.state.draft();
    let is_submitting = form.state.is_submitting();

    let on_change = {
        let on_change = form.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(change) = change_from_event(&e) {
                on_change.emit(change);
            }
        })
    };
    let on_input = {
        let on_change = on_change.clone();
        Callback::from(move |e: InputEvent| on_change.emit(e.into()))
    };

    let on_file_select = {
        let on_file = form.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_file.emit(file);
            }
        })
    };

    let on_submit = {
        let on_submit = form.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let message = form.state.message().map(|message| {
        let class = match message.tone {
            Tone::Info => "p-3 rounded-md bg-blue-50 border border-blue-200 \
                           text-sm text-blue-700",
            Tone::Success => "p-3 rounded-md bg-green-50 border \
                              border-green-200 text-sm text-green-700",
            Tone::Error => "p-3 rounded-md bg-red-50 border border-red-200 \
                            text-sm text-red-700",
        };
        html! { <div class={class} role="status">{&message.text}</div> }
    });

    html! {
        <div class="flex items-center justify-center min-h-[80vh]">
            <div class="max-w-lg w-full bg-white p-8 rounded-lg shadow-md">
                <h1 class="text-2xl font-bold text-neutral-900 text-center mb-8">
                    {"Add New Event"}
                </h1>

                <form onsubmit={on_submit} class="space-y-5">
                    {message}

                    <div>
                        <label for="title" class={LABEL_CLASS}>{"Title"}</label>
                        <input
                            id="title"
                            name="title"
                            type="text"
                            value={draft.title.clone()}
                            oninput={on_input.clone()}
                            placeholder="Title"
                            class={INPUT_CLASS}
                        />
                    </div>

                    <div>
                        <label for="description" class={LABEL_CLASS}>
                            {"Description"}
                        </label>
                        <textarea
                            id="description"
                            name="description"
                            value={draft.description.clone()}
                            oninput={on_input.clone()}
                            placeholder="Description"
                            rows="3"
                            class={INPUT_CLASS}
                        />
                    </div>

                    {option_select(
                        "category",
                        "Category",
                        &EventCategory::ALL,
                        draft.category,
                        on_change.clone(),
                    )}

                    <div>
                        <label for="location" class={LABEL_CLASS}>
                            {"Location"}
                        </label>
                        <input
                            id="location"
                            name="location"
                            type="text"
                            value={draft.location.clone()}
                            oninput={on_input.clone()}
                            placeholder="Location"
                            class={INPUT_CLASS}
                        />
                    </div>

                    <div class="flex gap-3">
                        <div class="flex-1">
                            <label for="startDate" class={LABEL_CLASS}>
                                {"Start date"}
                            </label>
                            <input
                                id="startDate"
                                name="startDate"
                                type="date"
                                value={date_value(draft.start_date)}
                                onchange={on_change.clone()}
                                class={INPUT_CLASS}
                            />
                        </div>
                        <div class="flex-1">
                            <label for="endDate" class={LABEL_CLASS}>
                                {"End date"}
                            </label>
                            <input
                                id="endDate"
                                name="endDate"
                                type="date"
                                value={date_value(draft.end_date)}
                                onchange={on_change.clone()}
                                class={INPUT_CLASS}
                            />
                        </div>
                    </div>

                    {option_select(
                        "severity",
                        "Severity",
                        &Severity::ALL,
                        draft.severity,
                        on_change.clone(),
                    )}

                    {option_select(
                        "urgencyLevel",
                        "Urgency Level",
                        &UrgencyLevel::ALL,
                        draft.urgency_level,
                        on_change.clone(),
                    )}

                    <label class="flex items-center gap-2 text-sm font-medium \
                                  text-neutral-700">
                        <input
                            name="isOngoing"
                            type="checkbox"
                            checked={draft.is_ongoing}
                            onchange={on_change.clone()}
                            class="h-4 w-4 rounded border-neutral-300"
                        />
                        {"Ongoing"}
                    </label>

                    <div>
                        <label for="estimatedAffectedPeople" class={LABEL_CLASS}>
                            {"Estimated affected people"}
                        </label>
                        <input
                            id="estimatedAffectedPeople"
                            name="estimatedAffectedPeople"
                            type="number"
                            min="0"
                            value={draft.estimated_affected_people.clone()}
                            oninput={on_input.clone()}
                            class={INPUT_CLASS}
                        />
                    </div>

                    <div class="flex gap-3">
                        <div class="flex-1">
                            <label for="fundingGoal" class={LABEL_CLASS}>
                                {"Funding goal"}
                            </label>
                            <input
                                id="fundingGoal"
                                name="fundingGoal"
                                type="number"
                                min="0"
                                step="any"
                                value={draft.funding_goal.clone()}
                                oninput={on_input.clone()}
                                class={INPUT_CLASS}
                            />
                        </div>
                        <div class="flex-1">
                            <label for="currentFunding" class={LABEL_CLASS}>
                                {"Current funding"}
                            </label>
                            <input
                                id="currentFunding"
                                name="currentFunding"
                                type="number"
                                min="0"
                                step="any"
                                value={draft.current_funding.clone()}
                                oninput={on_input}
                                class={INPUT_CLASS}
                            />
                        </div>
                    </div>

                    <div>
                        <label for="coverImage" class={LABEL_CLASS}>
                            {"Cover image"}
                        </label>
                        <input
                            id="coverImage"
                            name="coverImage"
                            type="file"
                            accept="image/*"
                            onchange={on_file_select}
                            class="block w-full text-sm text-neutral-600"
                        />
                        if !draft.cover_image().is_empty() {
                            <img
                                src={draft.cover_image().to_string()}
                                alt="Cover preview"
                                class="mt-3 w-full max-h-48 object-cover rounded-md"
                            />
                        }
                    </div>

                    <button
                        type="submit"
                        disabled={is_submitting}
                        class="w-full flex justify-center py-2 px-4 border \
                               border-transparent rounded-md shadow-sm \
                               text-sm font-medium text-white bg-neutral-900 \
                               hover:bg-neutral-800 focus:outline-none \
                               focus:ring-2 focus:ring-offset-2 \
                               focus:ring-neutral-500 \
                               disabled:opacity-50 disabled:cursor-not-allowed \
                               transition-colors duration-200"
                    >
                        if is_submitting {
                            {"Adding..."}
                        } else {
                            {"Add Event"}
                        }
                    </button>
                </form>
            </div>
        </div>
    }
}

fn date_value(date: Option<jiff::civil::Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}
