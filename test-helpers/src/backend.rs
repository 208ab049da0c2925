use payloads::EventId;
use std::sync::{Arc, Mutex, MutexGuard};

/// An image the stub media host has accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
    pub upload_preset: String,
}

/// Shared state behind the stub server: what it has received so far and
/// how it should answer the next request.
///
/// Cloning is cheap and every clone sees the same state, so a test can keep
/// one while the server holds another.
#[derive(Clone)]
pub struct StubBackend {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    upload_preset: String,
    reject_uploads: bool,
    event_status: u16,
    events: Vec<serde_json::Value>,
    images: Vec<StoredImage>,
}

impl StubBackend {
    pub fn new(upload_preset: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                upload_preset: upload_preset.to_string(),
                reject_uploads: false,
                event_status: 201,
                events: Vec::new(),
                images: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // every write is a single push or assignment, so poisoning is harmless
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn upload_preset(&self) -> String {
        self.lock().upload_preset.clone()
    }

    /// Make the media host answer every upload without a `secure_url`.
    pub fn reject_uploads(&self, reject: bool) {
        self.lock().reject_uploads = reject;
    }

    pub fn rejects_uploads(&self) -> bool {
        self.lock().reject_uploads
    }

    /// Status the event endpoint answers well-formed requests with.
    /// Non-2xx statuses leave the event unrecorded.
    pub fn respond_to_events_with(&self, status: u16) {
        self.lock().event_status = status;
    }

    pub fn event_status(&self) -> u16 {
        self.lock().event_status
    }

    /// Every accepted event, exactly as the JSON arrived.
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.lock().events.clone()
    }

    pub fn images(&self) -> Vec<StoredImage> {
        self.lock().images.clone()
    }

    pub fn image(&self, index: usize) -> Option<StoredImage> {
        self.lock().images.get(index).cloned()
    }

    pub(crate) fn record_event(&self, event: serde_json::Value) -> EventId {
        let mut inner = self.lock();
        inner.events.push(event);
        EventId(inner.events.len() as i64)
    }

    /// Store an image, returning its index.
    pub(crate) fn record_image(&self, image: StoredImage) -> usize {
        let mut inner = self.lock();
        inner.images.push(image);
        inner.images.len() - 1
    }
}
