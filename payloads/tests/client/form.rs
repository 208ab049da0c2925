//! The whole form flow against the stub backend: upload a cover image,
//! then submit the event.

use payloads::{
    ADMIN_DASHBOARD_PATH, APIClient, DraftChange, FormError, FormState,
    ImageFile, Tone,
};
use std::time::Duration;
use test_helpers::{spawn_app, unreachable_address};

fn cover() -> ImageFile {
    ImageFile {
        name: "cover.jpg".into(),
        mime_type: "image/jpeg".into(),
        data: vec![0xff, 0xd8, 0xff, 0xe0, 1, 2, 3],
    }
}

#[tokio::test]
async fn uploaded_cover_image_is_submitted() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut form = FormState::default();
    form.change(DraftChange::Title("Vaccination drive".into()));

    let ticket = form.start_upload();
    let result = app.media_client.upload_image(cover()).await;
    assert!(form.finish_upload(ticket, result));
    assert!(!form.is_uploading());
    let cover_url = form.draft().cover_image().to_string();
    assert!(cover_url.contains("/media/images/"));

    let record = form.begin_submit()?;
    let result = app.client.create_event(&record).await;
    let redirect = form.finish_submit(result).expect("should redirect");

    assert_eq!(redirect.path, ADMIN_DASHBOARD_PATH);
    assert!(redirect.replace);
    assert!(redirect.delay >= Duration::from_millis(1200));
    assert_eq!(form.message().unwrap().tone, Tone::Success);

    let events = app.backend.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["coverImage"], cover_url);
    assert_eq!(events[0]["title"], "Vaccination drive");

    Ok(())
}

#[tokio::test]
async fn submit_during_upload_sends_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut form = FormState::default();

    let ticket = form.start_upload();
    assert_eq!(form.begin_submit(), Err(FormError::PrematureSubmit));
    assert_eq!(
        form.message().unwrap().text,
        "Please wait for the image to finish uploading."
    );

    let result = app.media_client.upload_image(cover()).await;
    form.finish_upload(ticket, result);
    assert!(app.backend.events().is_empty());

    Ok(())
}

#[tokio::test]
async fn rejected_upload_leaves_form_submittable() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.reject_uploads(true);
    let mut form = FormState::default();

    let ticket = form.start_upload();
    let result = app.media_client.upload_image(cover()).await;
    form.finish_upload(ticket, result);

    assert!(!form.is_uploading());
    assert_eq!(form.draft().cover_image(), "");
    assert_eq!(form.message().unwrap().text, "Failed to upload image");

    let record = form.begin_submit()?;
    app.client.create_event(&record).await?;
    assert_eq!(app.backend.events()[0]["coverImage"], "");

    Ok(())
}

#[tokio::test]
async fn rejected_submission_does_not_redirect() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.respond_to_events_with(500);
    let mut form = FormState::default();

    let record = form.begin_submit()?;
    let result = app.client.create_event(&record).await;

    assert_eq!(form.finish_submit(result), None);
    assert_eq!(form.message().unwrap().text, "Failed to add event");
    assert!(!form.is_submitting());

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_reports_network_error() -> anyhow::Result<()> {
    let client = APIClient {
        address: unreachable_address(),
        inner_client: reqwest::Client::new(),
    };
    let mut form = FormState::default();

    let record = form.begin_submit()?;
    let result = client.create_event(&record).await;

    assert_eq!(form.finish_submit(result), None);
    assert_eq!(form.message().unwrap().text, "Network error");

    Ok(())
}
