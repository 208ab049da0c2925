use payloads::{ClientError, DraftChange, FormState, ImageFile};
use wasm_bindgen_futures::JsFuture;
use web_sys::File;
use yew::prelude::*;

use crate::{get_api_client, get_media_host_client};

use super::use_scheduled_redirect;

/// Snapshot of the form for rendering, plus the callbacks that drive it.
pub struct EventFormHandle {
    pub state: FormState,
    pub on_change: Callback<DraftChange>,
    /// Upload a newly picked cover image.
    pub on_file: Callback<File>,
    pub on_submit: Callback<()>,
}

/// Owns the Add New Event form for the lifetime of the calling component.
///
/// Upload and submit tasks apply their results to the latest form held in
/// the shared cell, not to the snapshot of the render that started them.
/// Every mutation is followed by a re-render.
#[hook]
pub fn use_event_form() -> EventFormHandle {
    let form = use_mut_ref(FormState::default);
    let rerender = use_force_update();
    let schedule_redirect = use_scheduled_redirect();

    let on_change = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |change: DraftChange| {
            form.borrow_mut().change(change);
            rerender.force_update();
        })
    };

    let on_file = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |file: File| {
            let ticket = form.borrow_mut().start_upload();
            rerender.force_update();

            let form = form.clone();
            let rerender = rerender.clone();
            yew::platform::spawn_local(async move {
                let result = match read_file(&file).await {
                    Ok(image) => {
                        get_media_host_client().upload_image(image).await
                    }
                    Err(e) => Err(e),
                };
                let applied = form.borrow_mut().finish_upload(ticket, result);
                if applied {
                    rerender.force_update();
                }
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let rerender = rerender.clone();
        Callback::from(move |()| {
            let outcome = form.borrow_mut().begin_submit();
            rerender.force_update();
            let Ok(record) = outcome else {
                return;
            };

            let form = form.clone();
            let rerender = rerender.clone();
            let schedule_redirect = schedule_redirect.clone();
            yew::platform::spawn_local(async move {
                let result = get_api_client().create_event(&record).await;
                let redirect = form.borrow_mut().finish_submit(result);
                rerender.force_update();
                if let Some(redirect) = redirect {
                    schedule_redirect.emit(redirect);
                }
            });
        })
    };

    let state = form.borrow().clone();
    EventFormHandle {
        state,
        on_change,
        on_file,
        on_submit,
    }
}

/// Read a picked file fully into memory.
async fn read_file(file: &File) -> Result<ImageFile, ClientError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::FileRead(format!("{e:?}")))?;
    Ok(ImageFile {
        name: file.name(),
        mime_type: file.type_(),
        data: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}
