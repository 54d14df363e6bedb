pub mod templates;

use async_trait::async_trait;
use chrono::Datelike;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

const RESET_SUBJECT: &str = "Password Reset Request";

/// Delivers reset links to users.
#[async_trait]
pub trait ResetMailer: Send + Sync {
    async fn send_reset(&self, to_email: &str, token: &str, reset_url: &str) -> Result<(), String>;
}

/// Append the url-encoded token to the caller-supplied reset page URL.
pub fn reset_link(reset_url: &str, token: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
    format!("{reset_url}?token={encoded}")
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    ttl_minutes: i64,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, token_ttl: chrono::Duration) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        // Port 465 expects TLS from the first byte; everything else upgrades with STARTTLS.
        let builder = match config.port {
            465 => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            _ => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host),
        }
        .map_err(|e| format!("SMTP error: {e}"))?;

        let transport = builder.port(config.port).credentials(creds).build();

        Ok(Self {
            transport,
            from: config.from.clone(),
            ttl_minutes: (token_ttl.num_seconds() + 59) / 60,
        })
    }
}

#[async_trait]
impl ResetMailer for SmtpMailer {
    async fn send_reset(&self, to_email: &str, token: &str, reset_url: &str) -> Result<(), String> {
        let link = reset_link(reset_url, token);
        let html = templates::render_password_reset(&link, self.ttl_minutes, chrono::Utc::now().year());

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("Invalid from address: {e}"))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| format!("Invalid to address: {e}"))?)
            .subject(RESET_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(html)
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }
}
