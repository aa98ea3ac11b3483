use crate::{
    args::Args,
    config::Credentials,
    domain::OutgoingMessage,
    pushover::{self, DeliveryResponse},
};
use snafu::{ResultExt, Snafu};
use std::{fs, io, path::PathBuf};
use tracing::trace;

pub fn build_message(credentials: &Credentials, args: &Args) -> Result<OutgoingMessage> {
    let Args { event, body_path } = args;

    trace!("Reading message body from {}", body_path.display());
    let body = fs::read(body_path).context(UnableToReadBody { path: body_path })?;
    let body = String::from_utf8_lossy(&body).into_owned();

    Ok(OutgoingMessage::for_event(credentials, event, body))
}

#[derive(Debug, Clone)]
pub struct NotifyFlow {
    credentials: Credentials,
    pushover: pushover::Client,
}

impl NotifyFlow {
    pub fn new(credentials: Credentials, pushover: pushover::Client) -> Self {
        Self {
            credentials,
            pushover,
        }
    }

    pub async fn run(&self, args: &Args) -> Result<DeliveryResponse> {
        let Self {
            credentials,
            pushover,
        } = self;

        let message = build_message(credentials, args)?;

        pushover.notify(&message).await.context(UnableToNotify)
    }
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum Error {
    #[snafu(display("Unable to read message body file {}", path.display()))]
    UnableToReadBody { source: io::Error, path: PathBuf },

    #[snafu(display("Unable to deliver the notification"))]
    UnableToNotify { source: pushover::Error },
}

type Result<T, E = Error> = std::result::Result<T, E>;
