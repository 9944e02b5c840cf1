use crate::config::{MailSettings, MailType};
use crate::transport::MailTransport;
use crate::MailweaveError;

/// A message as handed to [`Outbox::send`], bodies untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    /// `None` for text-only mail.
    pub html: Option<String>,
    pub plain: String,
}

/// In-memory transport that records every sent message.
///
/// Useful for previews and tests. Unwrap markers are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    settings: MailSettings,
    from: Option<String>,
    to: Vec<String>,
    subject: String,
    html: String,
    plain: String,
    sent: Vec<OutgoingMessage>,
}

impl Outbox {
    pub fn new(settings: MailSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    pub fn sent(&self) -> &[OutgoingMessage] {
        &self.sent
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }
}

impl MailTransport for Outbox {
    fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_string();
    }

    fn set_message(&mut self, html: &str) {
        self.html = html.to_string();
    }

    fn set_alt_message(&mut self, plain: &str) {
        self.plain = plain.to_string();
    }

    fn set_from(&mut self, from: &str) -> crate::Result<()> {
        self.from = Some(from.trim().to_string());
        Ok(())
    }

    /// Accepts a comma-separated list.
    fn set_to(&mut self, to: &str) -> crate::Result<()> {
        self.to = to
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }

    fn clear(&mut self) {
        self.from = None;
        self.to.clear();
        self.subject.clear();
        self.html.clear();
        self.plain.clear();
    }

    fn send(&mut self) -> crate::Result<()> {
        let from = self
            .from
            .clone()
            .ok_or(MailweaveError::MissingField { field: "from" })?;
        if self.to.is_empty() {
            return Err(MailweaveError::MissingField { field: "to" });
        }
        let html = match self.settings.mail_type {
            MailType::Html => Some(self.html.clone()),
            MailType::Text => None,
        };
        tracing::debug!(to = ?self.to, subject = %self.subject, "outbox accepted message");
        self.sent.push(OutgoingMessage {
            from,
            to: self.to.clone(),
            subject: self.subject.clone(),
            html,
            plain: self.plain.clone(),
        });
        Ok(())
    }

    fn newline(&self) -> &str {
        &self.settings.newline
    }

    fn wrap_chars(&self) -> usize {
        self.settings.wrap_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_records_message() {
        let mut outbox = Outbox::new(MailSettings::default());
        outbox.set_from("me@example.com").unwrap();
        outbox.set_to("a@example.com, b@example.com").unwrap();
        outbox.set_subject("Hi");
        outbox.set_message("<p>Hi</p>");
        outbox.set_alt_message("Hi");
        outbox.send().unwrap();
        let sent = &outbox.sent()[0];
        assert_eq!(sent.to, vec!["a@example.com", "b@example.com"]);
        assert_eq!(sent.html.as_deref(), Some("<p>Hi</p>"));
        assert_eq!(sent.plain, "Hi");
    }

    #[test]
    fn test_text_mail_drops_html() {
        let settings = MailSettings {
            mail_type: MailType::Text,
            ..MailSettings::default()
        };
        let mut outbox = Outbox::new(settings);
        outbox.set_from("me@example.com").unwrap();
        outbox.set_to("a@example.com").unwrap();
        outbox.set_message("<p>Hi</p>");
        outbox.send().unwrap();
        assert!(outbox.sent()[0].html.is_none());
    }

    #[test]
    fn test_send_without_recipient_fails() {
        let mut outbox = Outbox::new(MailSettings::default());
        outbox.set_from("me@example.com").unwrap();
        let err = outbox.send().unwrap_err();
        assert!(matches!(err, MailweaveError::MissingField { field: "to" }));
        assert!(outbox.sent().is_empty());
    }

    #[test]
    fn test_clear_keeps_sent_history() {
        let mut outbox = Outbox::new(MailSettings::default());
        outbox.set_from("me@example.com").unwrap();
        outbox.set_to("a@example.com").unwrap();
        outbox.set_subject("s");
        outbox.send().unwrap();
        outbox.clear();
        assert_eq!(outbox.subject(), "");
        assert_eq!(outbox.sent().len(), 1);
        assert!(matches!(
            outbox.send(),
            Err(MailweaveError::MissingField { field: "from" })
        ));
    }

    #[test]
    fn test_reports_settings() {
        let settings = MailSettings {
            newline: "\r\n".to_string(),
            wrap_chars: 40,
            ..MailSettings::default()
        };
        let outbox = Outbox::new(settings);
        assert_eq!(outbox.newline(), "\r\n");
        assert_eq!(outbox.wrap_chars(), 40);
    }
}
