// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub smtp: SmtpConfig,
    pub otp_ttl_minutes: i64,
    pub upload_dir: String,
    pub ocr: OcrConfig,
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub use_tls: bool,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub languages: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let smtp_username = env::var("SMTP_USERNAME")
            .expect("SMTP_USERNAME must be set");

        AppConfig {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "dd_interaction".to_string()),
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST")
                    .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".to_string())
                    .parse()
                    .expect("SMTP_PORT must be a number"),
                from: env::var("SMTP_FROM")
                    .unwrap_or_else(|_| smtp_username.clone()),
                password: env::var("SMTP_PASSWORD")
                    .expect("SMTP_PASSWORD must be set"),
                use_tls: env::var("SMTP_USE_TLS")
                    .map(|v| v != "false" && v != "0")
                    .unwrap_or(true),
                username: smtp_username,
            },
            otp_ttl_minutes: env::var("OTP_TTL_MINUTES")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("OTP_TTL_MINUTES must be a number"),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string()),
            ocr: OcrConfig {
                languages: env::var("OCR_LANGUAGES")
                    .unwrap_or_else(|_| "eng".to_string()),
                timeout_secs: env::var("OCR_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("OCR_TIMEOUT_SECS must be a number"),
            },
            port: env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_uses_defaults_for_optional_settings() {
        env::set_var("DATABASE_URL", "mongodb://localhost:27017");
        env::set_var("SMTP_USERNAME", "noreply@example.com");
        env::set_var("SMTP_PASSWORD", "secret");
        env::remove_var("DATABASE_NAME");
        env::remove_var("SMTP_HOST");
        env::remove_var("SMTP_PORT");
        env::remove_var("SMTP_FROM");
        env::remove_var("SMTP_USE_TLS");
        env::remove_var("OTP_TTL_MINUTES");
        env::remove_var("UPLOAD_DIR");
        env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.database_name, "dd_interaction");
        assert_eq!(config.smtp.host, "smtp.gmail.com");
        assert_eq!(config.smtp.port, 587);
        assert_eq!(config.smtp.from, "noreply@example.com");
        assert!(config.smtp.use_tls);
        assert_eq!(config.otp_ttl_minutes, 5);
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.port, 5001);
    }
}
