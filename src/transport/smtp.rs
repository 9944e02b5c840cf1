use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use serde::{Deserialize, Serialize};

use crate::config::{MailSettings, MailType};
use crate::transport::wrap::{strip_unwrap_markers, word_wrap};
use crate::transport::MailTransport;
use crate::{MailweaveError, Result};

/// Encryption mode for an SMTP connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encryption {
    None,
    StartTls,
    Tls,
}

/// SMTP connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmtpProfile {
    pub host: String,
    pub port: u16,
    pub encryption: Encryption,
    /// Sender used when `set_from` was not called.
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

/// lettre-backed SMTP transport.
///
/// Before sending, plaintext is word-wrapped at `wrap_chars` except inside
/// unwrap markers, and the markers are removed from both bodies. A failed
/// send is reported once; there is no retry.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    profile: SmtpProfile,
    credentials: SmtpCredentials,
    settings: MailSettings,
    from: Option<Mailbox>,
    to: Vec<Mailbox>,
    subject: String,
    html: String,
    plain: String,
}

impl SmtpMailer {
    pub fn new(profile: SmtpProfile, credentials: SmtpCredentials, settings: MailSettings) -> Self {
        Self {
            profile,
            credentials,
            settings,
            from: None,
            to: Vec::new(),
            subject: String::new(),
            html: String::new(),
            plain: String::new(),
        }
    }

    pub fn profile(&self) -> &SmtpProfile {
        &self.profile
    }

    /// Open a connection and verify the server is reachable (no message sent).
    pub async fn test_connection(&self) -> Result<()> {
        let transport = build_transport(&self.profile, &self.credentials)?;
        transport
            .test_connection()
            .await
            .map_err(|e| MailweaveError::SmtpConnect {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    pub async fn send_async(&self) -> Result<()> {
        let message = self.build_message()?;
        let transport = build_transport(&self.profile, &self.credentials)?;
        tracing::debug!(host = %self.profile.host, recipients = self.to.len(), "sending over SMTP");
        transport
            .send(message)
            .await
            .map_err(|e| MailweaveError::SmtpSend {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Build the lettre [`Message`] for the current envelope and bodies.
    ///
    /// Produces `multipart/alternative` for HTML mail, plain text otherwise.
    pub fn build_message(&self) -> Result<Message> {
        let from = match &self.from {
            Some(mbox) => mbox.clone(),
            None => parse_mailbox("from", &self.profile.from)?,
        };
        if self.to.is_empty() {
            return Err(MailweaveError::MissingField { field: "to" });
        }

        let mut builder = Message::builder().from(from).subject(&self.subject);
        for mbox in &self.to {
            builder = builder.to(mbox.clone());
        }

        let plain = word_wrap(&self.plain, self.settings.wrap_chars, &self.settings.newline);
        let message = match self.settings.mail_type {
            MailType::Html => builder.multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(plain))
                    .singlepart(SinglePart::html(strip_unwrap_markers(&self.html))),
            ),
            MailType::Text => builder.body(plain),
        };
        message.map_err(|e| MailweaveError::MessageBuild {
            reason: e.to_string(),
        })
    }
}

impl MailTransport for SmtpMailer {
    fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_string();
    }

    fn set_message(&mut self, html: &str) {
        self.html = html.to_string();
    }

    fn set_alt_message(&mut self, plain: &str) {
        self.plain = plain.to_string();
    }

    fn set_from(&mut self, from: &str) -> Result<()> {
        self.from = Some(parse_mailbox("from", from)?);
        Ok(())
    }

    /// Accepts a comma-separated list.
    fn set_to(&mut self, to: &str) -> Result<()> {
        self.to = to
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| parse_mailbox("to", s))
            .collect::<Result<Vec<_>>>()?;
        Ok(())
    }

    fn clear(&mut self) {
        self.from = None;
        self.to.clear();
        self.subject.clear();
        self.html.clear();
        self.plain.clear();
    }

    /// Blocks on a private current-thread runtime. Inside an async context
    /// call [`SmtpMailer::send_async`] instead.
    fn send(&mut self) -> Result<()> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(MailweaveError::SmtpSend {
                reason: "blocking send called inside a tokio runtime; use SmtpMailer::send_async"
                    .to_string(),
            });
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| MailweaveError::SmtpConnect {
                reason: e.to_string(),
            })?;
        runtime.block_on(self.send_async())
    }

    fn newline(&self) -> &str {
        &self.settings.newline
    }

    fn wrap_chars(&self) -> usize {
        self.settings.wrap_chars
    }
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox> {
    value
        .parse::<Mailbox>()
        .map_err(|e| MailweaveError::InvalidAddress {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Build a lettre async SMTP transport from the given profile and credentials.
fn build_transport(
    profile: &SmtpProfile,
    credentials: &SmtpCredentials,
) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let creds = Credentials::new(credentials.username.clone(), credentials.password.clone());
    let transport = match profile.encryption {
        Encryption::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&profile.host)
            .map_err(|e| MailweaveError::SmtpConnect {
                reason: e.to_string(),
            })?
            .port(profile.port)
            .credentials(creds)
            .build(),
        Encryption::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&profile.host)
            .map_err(|e| MailweaveError::SmtpConnect {
                reason: e.to_string(),
            })?
            .port(profile.port)
            .credentials(creds)
            .build(),
        Encryption::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&profile.host)
            .port(profile.port)
            .credentials(creds)
            .build(),
    };
    Ok(transport)
}
