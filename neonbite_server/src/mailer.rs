use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
};
use log::*;
use neonbite_engine::{
    db_types::Order,
    traits::{NotifierError, OrderNotifier},
};

use crate::config::SmtpConfig;

/// Sends order confirmation emails over SMTP.
///
/// When no relay is configured the mailer is inert: every send fails softly, which leaves the order's fulfilment
/// un-notified where the sweeper can see it, rather than failing the checkout.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
}

impl SmtpMailer {
    pub fn from_config(config: &SmtpConfig) -> Self {
        let transport = config.host.as_ref().and_then(|host| {
            match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
                Ok(builder) => {
                    let credentials = Credentials::new(config.username.clone(), config.password.reveal().clone());
                    info!("✉️ SMTP relay configured at {host}:{}", config.port);
                    Some(builder.port(config.port).credentials(credentials).build())
                },
                Err(e) => {
                    error!("✉️ Could not set up the SMTP relay at {host}: {e}. Confirmation emails will not be sent.");
                    None
                },
            }
        });
        Self { transport, from_address: config.from_address.clone() }
    }

    /// A mailer with no relay behind it. Every send fails softly.
    pub fn unconfigured() -> Self {
        Self { transport: None, from_address: String::new() }
    }
}

impl OrderNotifier for SmtpMailer {
    async fn order_confirmation(&self, to: &str, order: &Order) -> Result<(), NotifierError> {
        let Some(transport) = &self.transport else {
            return Err(NotifierError("No SMTP relay is configured".to_string()));
        };
        let from =
            self.from_address.parse().map_err(|_| NotifierError(format!("Invalid sender address: {}", self.from_address)))?;
        let to_mailbox = to.parse().map_err(|_| NotifierError(format!("Invalid recipient address: {to}")))?;
        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject(format!("NEONBITE order #{} confirmed", order.id))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Thanks for your order!\n\nOrder #{} has been received and comes to {}.\nWe are firing up the \
                 grill.\n",
                order.id, order.total
            ))
            .map_err(|e| NotifierError(e.to_string()))?;
        transport.send(message).await.map_err(|e| NotifierError(e.to_string()))?;
        info!("✉️ Order confirmation for #{} sent to {to}", order.id);
        Ok(())
    }
}
