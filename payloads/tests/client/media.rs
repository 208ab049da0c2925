use payloads::{
    ClientError, ImageFile, MediaHostClient, responses::MediaUpload,
};
use test_helpers::{DEFAULT_UPLOAD_PRESET, spawn_app, unreachable_address};

fn test_image() -> ImageFile {
    ImageFile {
        name: "flood.png".into(),
        mime_type: "image/png".into(),
        data: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 1, 2],
    }
}

#[tokio::test]
async fn upload_returns_url_serving_the_image() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let url = app.media_client.upload_image(test_image()).await?;

    let images = app.backend.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].data, test_image().data);
    assert_eq!(images[0].file_name.as_deref(), Some("flood.png"));
    assert_eq!(images[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(images[0].upload_preset, DEFAULT_UPLOAD_PRESET);

    let served = reqwest::get(&url).await?;
    assert!(served.status().is_success());
    assert_eq!(served.bytes().await?.to_vec(), test_image().data);

    Ok(())
}

#[tokio::test]
async fn upload_without_mime_type_still_sends_file() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let image = ImageFile {
        mime_type: String::new(),
        ..test_image()
    };
    app.media_client.upload_image(image).await?;

    let images = app.backend.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].data, test_image().data);

    Ok(())
}

#[tokio::test]
async fn rejected_upload_has_no_secure_url() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.reject_uploads(true);

    let result = app.media_client.upload_image(test_image()).await;

    match result {
        Err(ClientError::MissingSecureUrl(reason)) => {
            assert_eq!(reason.as_deref(), Some("Upload rejected"))
        }
        other => panic!("Expected MissingSecureUrl, got {other:?}"),
    }
    assert!(app.backend.images().is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_preset_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .media_client_with_preset("someone else's preset")
        .upload_image(test_image())
        .await;

    assert!(matches!(result, Err(ClientError::MissingSecureUrl(Some(_)))));
    assert!(app.backend.images().is_empty());

    Ok(())
}

#[tokio::test]
async fn unparsable_response_is_a_network_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let client = MediaHostClient {
        // Answers with a non-JSON 404.
        upload_url: format!("{}/media/nowhere", app.address()),
        upload_preset: DEFAULT_UPLOAD_PRESET.into(),
        inner_client: reqwest::Client::new(),
    };

    let result = client.upload_image(test_image()).await;
    assert!(matches!(result, Err(ClientError::Network(_))));

    Ok(())
}

#[tokio::test]
async fn unreachable_media_host_is_a_network_error() -> anyhow::Result<()> {
    let client = MediaHostClient {
        upload_url: format!("{}/media/upload", unreachable_address()),
        upload_preset: DEFAULT_UPLOAD_PRESET.into(),
        inner_client: reqwest::Client::new(),
    };

    let result = client.upload_image(test_image()).await;
    assert!(matches!(result, Err(ClientError::Network(_))));

    Ok(())
}

#[tokio::test]
async fn non_multipart_upload_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(&app.media_client.upload_url)
        .json(&serde_json::json!({ "file": "not really a file" }))
        .send()
        .await?;

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: MediaUpload = response.json().await?;
    assert_eq!(body.secure_url, None);
    assert!(body.error.is_some());
    assert!(app.backend.images().is_empty());

    Ok(())
}
