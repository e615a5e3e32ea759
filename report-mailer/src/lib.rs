pub mod message;
pub mod smtp_dispatcher;

pub use message::build_message;
pub use smtp_dispatcher::{SmtpConfig, SmtpDispatcher};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid address {address:?}: {source}")]
    Address {
        address: String,
        source: lettre::address::AddressError,
    },

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
