use crate::message::build_message;
use crate::Result;
use interfaces::defs::{DispatchOutcome, Dispatcher, ReportBodies, ReportEnvelope};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{SmtpTransport, Transport};
use std::fmt::Display;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Sends each recipient its own copy over any lettre transport.
pub struct SmtpDispatcher<T = SmtpTransport> {
    transport: T,
}

impl SmtpDispatcher<SmtpTransport> {
    /// Authenticated STARTTLS submission, e.g. Gmail on port 587.
    pub fn smtp(config: &SmtpConfig) -> Result<Self> {
        let transport = SmtpTransport::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .build();
        info!("SMTP transport ready for {}:{}", config.host, config.port);
        Ok(Self::new(transport))
    }
}

impl<T> SmtpDispatcher<T>
where
    T: Transport,
    T::Error: Display,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send_one(&self, envelope: &ReportEnvelope, recipient: &str, bodies: &ReportBodies) -> std::result::Result<(), String> {
        let message =
            build_message(&envelope.sender, recipient, &envelope.subject, bodies).map_err(|e| e.to_string())?;
        self.transport.send(&message).map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl<T> Dispatcher for SmtpDispatcher<T>
where
    T: Transport,
    T::Error: Display,
{
    fn dispatch(&self, envelope: &ReportEnvelope, bodies: &ReportBodies) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for recipient in &envelope.recipients {
            match self.send_one(envelope, recipient, bodies) {
                Ok(()) => {
                    info!("Email sent successfully to {}", recipient);
                    outcome.delivered.push(recipient.clone());
                }
                Err(reason) => {
                    warn!("Error sending email to {}: {}", recipient, reason);
                    outcome.failed.push((recipient.clone(), reason));
                }
            }
        }
        outcome
    }
}
