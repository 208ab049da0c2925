use actix_multipart::Multipart;
use actix_web::{
    HttpRequest, HttpResponse, Responder, ResponseError,
    body::BoxBody,
    dev::HttpServiceFactory,
    get,
    http::{StatusCode, header},
    post, web,
};
use futures::TryStreamExt;
use payloads::{requests, responses};

use crate::backend::{StoredImage, StubBackend};

/// Largest single field the stub media host accepts.
const MAX_FIELD_SIZE: usize = 10 * 1024 * 1024;

/// The event backend's routes.
pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api").service(health_check).service(create_event)
}

/// The media host's routes. Uploaded images are served back from
/// `/media/images/{index}` so the returned URLs resolve.
pub fn media_services() -> impl HttpServiceFactory {
    web::scope("/media").service(upload).service(get_image)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[tracing::instrument(skip_all)]
#[post("/admin/events")]
pub async fn create_event(
    details: web::Json<serde_json::Value>,
    backend: web::Data<StubBackend>,
) -> Result<HttpResponse, APIError> {
    let raw = details.into_inner();
    let event: requests::CreateEvent = serde_json::from_value(raw.clone())
        .map_err(|e| APIError::BadRequest(e.into()))?;
    if event.id.is_some() {
        return Err(APIError::BadRequest(anyhow::anyhow!(
            "A new event must not carry an id"
        )));
    }

    let status = StatusCode::from_u16(backend.event_status())
        .map_err(|e| APIError::UnexpectedError(e.into()))?;
    if !status.is_success() {
        tracing::info!(%status, "Refusing event as configured");
        return Ok(HttpResponse::build(status).body("Event rejected"));
    }

    let id = backend.record_event(raw);
    tracing::info!(%id, title = %event.title, "Created event");
    Ok(HttpResponse::build(status).json(serde_json::json!({ "id": id })))
}

#[tracing::instrument(skip_all)]
#[post("/upload")]
pub async fn upload(
    req: HttpRequest,
    payload: Multipart,
    backend: web::Data<StubBackend>,
) -> HttpResponse {
    let fields = match read_fields(payload).await {
        Ok(fields) => fields,
        Err(e) => return media_error(&e.to_string()),
    };

    let preset = fields
        .iter()
        .find(|f| f.name == "upload_preset")
        .and_then(|f| std::str::from_utf8(&f.data).ok())
        .map(str::to_string);
    let Some(upload_preset) = preset else {
        return media_error(
            "Upload preset must be specified when using unsigned upload",
        );
    };
    if upload_preset != backend.upload_preset() {
        return media_error(&format!("Upload preset not found: {upload_preset}"));
    }
    if backend.rejects_uploads() {
        return media_error("Upload rejected");
    }

    let Some(file) = fields.into_iter().find(|f| f.name == "file") else {
        return media_error("Missing required parameter - file");
    };
    let index = backend.record_image(StoredImage {
        file_name: file.file_name,
        content_type: file.content_type,
        data: file.data,
        upload_preset,
    });

    let connection = req.connection_info();
    let secure_url = format!(
        "{}://{}/media/images/{index}",
        connection.scheme(),
        connection.host()
    );
    tracing::info!(%secure_url, "Stored image");
    HttpResponse::Ok().json(responses::MediaUpload {
        secure_url: Some(secure_url),
        error: None,
    })
}

struct UploadField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Read every field of an upload into memory, in the order they were sent.
async fn read_fields(
    mut payload: Multipart,
) -> Result<Vec<UploadField>, actix_web::Error> {
    let mut fields = Vec::new();
    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if data.len() + chunk.len() > MAX_FIELD_SIZE {
                return Err(actix_web::error::ErrorPayloadTooLarge(
                    "File size too large",
                ));
            }
            data.extend_from_slice(&chunk);
        }
        fields.push(UploadField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    Ok(fields)
}

#[get("/images/{index}")]
pub async fn get_image(
    index: web::Path<usize>,
    backend: web::Data<StubBackend>,
) -> Result<HttpResponse, APIError> {
    let image = backend
        .image(index.into_inner())
        .ok_or_else(|| APIError::NotFound(anyhow::anyhow!("No such image")))?;
    let mut response = HttpResponse::Ok();
    if let Some(content_type) = &image.content_type {
        response.insert_header((header::CONTENT_TYPE, content_type.as_str()));
    }
    Ok(response.body(image.data))
}

/// Reject an upload the way the media host does: a JSON body with an error
/// message and no `secure_url`.
fn media_error(message: &str) -> HttpResponse {
    tracing::info!(reason = message, "Rejecting upload");
    HttpResponse::BadRequest().json(responses::MediaUpload {
        secure_url: None,
        error: Some(responses::MediaError {
            message: message.to_string(),
        }),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[source] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(e) => {
                tracing::error!("{e:#}");
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}
