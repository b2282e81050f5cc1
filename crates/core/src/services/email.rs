//! Email side effects over SMTP.
//!
//! Optional: when no email configuration is present every send is a no-op.
//! Callers treat sends as best-effort and never fail the triggering
//! operation on a delivery error.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use threddit_common::{AppError, AppResult, config::EmailConfig};

/// Email service for outgoing notification mail.
#[derive(Clone)]
pub struct EmailService {
    config: Option<EmailConfig>,
}

impl EmailService {
    /// Create a new email service. `None` disables sending.
    #[must_use]
    pub const fn new(config: Option<EmailConfig>) -> Self {
        Self { config }
    }

    /// Check if email delivery is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send the new-follower email.
    pub async fn send_follow_email(
        &self,
        to: &str,
        recipient_username: &str,
        follower_username: &str,
    ) -> AppResult<()> {
        let Some(ref config) = self.config else {
            return Ok(());
        };

        let subject = format!(
            "u/{follower_username} is now following you on {}",
            config.instance_name
        );
        let body = format!(
            "Hi u/{recipient_username},\n\n\
             u/{follower_username} started following you on {}.\n\n\
             You can turn follower emails off in your email settings.\n",
            config.instance_name
        );

        self.send(config, to, &subject, body).await?;
        tracing::info!(to = %to, follower = %follower_username, "New-follower email sent");
        Ok(())
    }

    async fn send(
        &self,
        config: &EmailConfig,
        to: &str,
        subject: &str,
        body: String,
    ) -> AppResult<()> {
        let message = Message::builder()
            .from(
                config
                    .from_address
                    .parse()
                    .map_err(|e| AppError::Config(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::Internal(format!("Failed to build email: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| AppError::ExternalService(format!("SMTP relay error: {e}")))?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        builder
            .build()
            .send(message)
            .await
            .map_err(|e| AppError::ExternalService(format!("SMTP send failed: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_send_is_noop() {
        let service = EmailService::new(None);
        assert!(!service.is_enabled());

        let result = service
            .send_follow_email("alice@example.com", "alice", "bob")
            .await;
        assert!(result.is_ok());
    }
}
