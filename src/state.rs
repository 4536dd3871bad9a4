use std::sync::Arc;

use mongodb::Database;

use crate::services::email_service::EmailService;
use crate::services::ocr_service::OcrService;
use crate::services::otp_service::OtpService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub otp_service: Arc<OtpService>,
    pub email_service: Arc<EmailService>,
    pub ocr_service: Option<Arc<OcrService>>,
    pub upload_dir: String,
}

impl AppState {
    pub fn new(
        db: Database,
        otp_service: OtpService,
        email_service: EmailService,
        upload_dir: String,
    ) -> Self {
        AppState {
            db,
            otp_service: Arc::new(otp_service),
            email_service: Arc::new(email_service),
            ocr_service: None,
            upload_dir,
        }
    }

    pub fn with_ocr(mut self, ocr_service: Arc<OcrService>) -> Self {
        self.ocr_service = Some(ocr_service);
        self
    }
}
