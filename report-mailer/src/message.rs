use crate::{DispatchError, Result};
use interfaces::defs::ReportBodies;
use lettre::message::{Mailbox, MultiPart};
use lettre::Message;

fn mailbox(address: &str) -> Result<Mailbox> {
    address.trim().parse().map_err(|source| DispatchError::Address {
        address: address.to_string(),
        source,
    })
}

/// One message per recipient, carrying both bodies as alternatives.
pub fn build_message(sender: &str, recipient: &str, subject: &str, bodies: &ReportBodies) -> Result<Message> {
    let message = Message::builder()
        .from(mailbox(sender)?)
        .to(mailbox(recipient)?)
        .subject(subject)
        .multipart(MultiPart::alternative_plain_html(
            bodies.text.clone(),
            bodies.html.clone(),
        ))?;
    Ok(message)
}
