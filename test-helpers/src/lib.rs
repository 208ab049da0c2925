pub mod backend;
pub mod routes;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use backend::{StoredImage, StubBackend};

/// Preset the stub media host accepts unless configured otherwise.
pub const DEFAULT_UPLOAD_PRESET: &str = "AIDlink demo";

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut Config,
    backend: StubBackend,
) -> std::io::Result<Server> {
    let backend = web::Data::new(backend);
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = if allowed_origins.contains(&"*".to_string()) {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
        } else {
            let mut cors =
                Cors::default().allow_any_method().allow_any_header();
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .service(routes::media_services())
            .app_data(backend.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin
    pub allowed_origins: Vec<String>,
    /// The only upload preset the stub media host accepts
    pub upload_preset: String,
}

impl Config {
    /// Read configuration from the environment, falling back to local
    /// development defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let port = match var("PORT") {
            Ok(port) => port.parse()?,
            Err(_) => 8000,
        };

        Ok(Config {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            allowed_origins,
            upload_preset: var("MEDIA_UPLOAD_PRESET")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_PRESET.to_string()),
        })
    }
}

pub struct TestApp {
    pub port: u16,
    /// Client for the event creation endpoint.
    pub client: payloads::APIClient,
    /// Client for the stub media host, using the accepted preset.
    pub media_client: payloads::MediaHostClient,
    pub backend: StubBackend,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A media host client that sends a different upload preset.
    pub fn media_client_with_preset(
        &self,
        upload_preset: &str,
    ) -> payloads::MediaHostClient {
        payloads::MediaHostClient {
            upload_url: self.media_client.upload_url.clone(),
            upload_preset: upload_preset.to_string(),
            inner_client: reqwest::Client::new(),
        }
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
        upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
    };
    let backend = StubBackend::new(&config.upload_preset);

    let server = build(&mut config, backend.clone()).unwrap();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{}", config.port);
    TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: address.clone(),
            inner_client: reqwest::Client::new(),
        },
        media_client: payloads::MediaHostClient {
            upload_url: format!("{address}/media/upload"),
            upload_preset: config.upload_preset,
            inner_client: reqwest::Client::new(),
        },
        backend,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// An address nothing is listening on, for exercising transport failures.
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
