use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::errors::{AppError, Result};

/// Sends OTP mail through the configured SMTP relay.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| AppError::service(format!("Invalid SMTP_FROM address: {}", e)))?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| AppError::service(format!("SMTP relay setup failed: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        let mailer = builder.port(config.port).credentials(credentials).build();

        tracing::info!(host = %config.host, port = config.port, tls = config.use_tls,
            "Email service initialized");

        Ok(Self { mailer, from })
    }

    /// Deliver a code to one recipient. An error here means the transport
    /// handoff failed and the code must not be stored as pending.
    pub async fn send_otp(&self, recipient: &str, code: &str) -> Result<()> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| AppError::invalid_data(format!("Invalid recipient address: {}", e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Your OTP Code")
            .header(ContentType::TEXT_PLAIN)
            .body(format!("Your OTP code is: {}", code))
            .map_err(|e| AppError::EmailDelivery(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::EmailDelivery(e.to_string()))?;

        tracing::info!(recipient = %recipient, "OTP email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "noreply@example.com".to_string(),
            password: "secret".to_string(),
            from: "noreply@example.com".to_string(),
            use_tls: true,
        }
    }

    #[test]
    fn service_builds_from_valid_config() {
        assert!(EmailService::new(&test_config()).is_ok());
    }

    #[test]
    fn invalid_from_address_is_rejected() {
        let mut config = test_config();
        config.from = "not an address".to_string();
        assert!(EmailService::new(&config).is_err());
    }

    #[tokio::test]
    async fn invalid_recipient_is_rejected_before_any_send() {
        let service = EmailService::new(&test_config()).unwrap();
        let result = service.send_otp("not an address", "4821").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
