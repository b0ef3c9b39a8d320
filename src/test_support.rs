//! Shared helpers for unit tests: a local HTTP server and in-memory port fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::HeaderMap;
use axum::Router;

use crate::error::MemeError;
use crate::ports::caption_generator::{
    CaptionGenerator, CaptionRequest, CaptionResponse, CompleteFuture,
};
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest, ImageResponse};

/// Bind `app` to an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[derive(Debug, Default)]
struct CapturedRequest {
    authorization: Option<String>,
    api_key: Option<String>,
    body: String,
}

/// Records the last request a test route received.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    inner: Arc<Mutex<CapturedRequest>>,
}

impl Captured {
    pub fn store(&self, headers: &HeaderMap, body: String) {
        let header = |name: &str| {
            headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
        };
        let mut guard = self.inner.lock().unwrap();
        guard.authorization = header("authorization");
        guard.api_key = header("x-goog-api-key");
        guard.body = body;
    }

    pub fn auth_and_body(&self) -> (Option<String>, String) {
        let guard = self.inner.lock().unwrap();
        (guard.authorization.clone(), guard.body.clone())
    }

    pub fn api_key(&self) -> Option<String> {
        self.inner.lock().unwrap().api_key.clone()
    }
}

/// Bundled outline font used by rendering tests.
pub fn fixture_font_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test_fixtures/fonts/DejaVuSans-Bold.ttf")
}

/// Encode an image as PNG bytes.
pub fn png_bytes(image: &image::RgbaImage) -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Image port fake that returns canned bytes or fails, counting calls.
pub struct FakeImages {
    outcome: Result<Vec<u8>, String>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<ImageRequest>>>,
}

impl FakeImages {
    pub fn returning(data: Vec<u8>) -> Self {
        Self {
            outcome: Ok(data),
            calls: Arc::default(),
            last_request: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::default(),
            last_request: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn last_request(&self) -> Arc<Mutex<Option<ImageRequest>>> {
        Arc::clone(&self.last_request)
    }
}

impl ImageGenerator for FakeImages {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let outcome = self.outcome.clone();
        Box::pin(async move {
            outcome
                .map(|data| ImageResponse { data, mime_type: Some("image/png".into()) })
                .map_err(|message| MemeError::Api { status: 500, message })
        })
    }
}

/// Caption port fake that returns canned text or fails, counting calls.
pub struct FakeCaptions {
    outcome: Result<String, String>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<CaptionRequest>>>,
}

impl FakeCaptions {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Arc::default(),
            last_request: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::default(),
            last_request: Arc::default(),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn last_request(&self) -> Arc<Mutex<Option<CaptionRequest>>> {
        Arc::clone(&self.last_request)
    }
}

impl CaptionGenerator for FakeCaptions {
    fn complete(&self, request: &CaptionRequest) -> CompleteFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let outcome = self.outcome.clone();
        Box::pin(async move {
            outcome
                .map(|text| CaptionResponse { text })
                .map_err(|message| MemeError::Api { status: 401, message })
        })
    }
}
