pub mod email_service;
pub mod ocr_service;
pub mod otp_service;
