use std::sync::Arc;
use std::time::Duration;

use leptess::LepTess;
use tokio::sync::Mutex;

use crate::config::OcrConfig;
use crate::errors::{AppError, Result};

/// Tesseract wrapper for prescription images. The engine is not
/// thread-safe, so one instance sits behind a mutex and each call runs
/// on a blocking thread under a timeout.
#[derive(Clone)]
pub struct OcrService {
    tesseract: Arc<Mutex<LepTess>>,
    timeout: Duration,
}

impl OcrService {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let tesseract = LepTess::new(None, &config.languages)
            .map_err(|e| AppError::OcrUnavailable(e.to_string()))?;

        tracing::info!(languages = %config.languages, "Tesseract OCR initialized");

        Ok(Self {
            tesseract: Arc::new(Mutex::new(tesseract)),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Recognized lines in engine order, empty fragments dropped.
    pub async fn extract_lines(&self, image_bytes: &[u8]) -> Result<Vec<String>> {
        let result = tokio::time::timeout(self.timeout, self.extract_inner(image_bytes)).await;
        match result {
            Ok(inner) => inner,
            Err(_) => Err(AppError::ocr(format!(
                "OCR timed out after {} seconds",
                self.timeout.as_secs()
            ))),
        }
    }

    async fn extract_inner(&self, image_bytes: &[u8]) -> Result<Vec<String>> {
        let bytes = image_bytes.to_vec();
        let tesseract = Arc::clone(&self.tesseract);

        let text = tokio::task::spawn_blocking(move || {
            let mut lt = tesseract.blocking_lock();
            lt.set_image_from_mem(&bytes)
                .map_err(|e| AppError::ocr(format!("Failed to read image: {}", e)))?;
            lt.get_utf8_text()
                .map_err(|e| AppError::ocr(format!("Failed to extract text: {}", e)))
        })
        .await
        .map_err(|e| AppError::ocr(format!("OCR task panicked: {}", e)))??;

        Ok(split_lines(&text))
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
