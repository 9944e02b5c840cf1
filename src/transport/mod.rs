mod outbox;
mod smtp;
mod wrap;

pub use outbox::{Outbox, OutgoingMessage};
pub use smtp::{Encryption, SmtpCredentials, SmtpMailer, SmtpProfile};
pub use wrap::{strip_unwrap_markers, word_wrap};

/// The delivery side of a message: holds the envelope and bodies the builder
/// hands over, and sends them.
pub trait MailTransport {
    fn set_subject(&mut self, subject: &str);
    fn set_message(&mut self, html: &str);
    fn set_alt_message(&mut self, plain: &str);
    fn set_from(&mut self, from: &str) -> crate::Result<()>;
    fn set_to(&mut self, to: &str) -> crate::Result<()>;
    /// Drop subject, bodies and recipients.
    fn clear(&mut self);
    fn send(&mut self) -> crate::Result<()>;
    /// Line terminator the transport uses for plaintext.
    fn newline(&self) -> &str;
    /// Column at which the transport wraps plaintext.
    fn wrap_chars(&self) -> usize;
}
