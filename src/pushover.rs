use crate::domain::OutgoingMessage;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt, Snafu};
use tracing::{debug, info, trace, trace_span, Instrument};
use url::Url;

const NOTIFY_URL: &str = "https://api.pushover.net/1/messages.json";
const API_STATUS_OK: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserKey(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppToken(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub request: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    notify_url: Url,
}

impl Config {
    pub fn new() -> Result<Self> {
        let notify_url = Url::parse(NOTIFY_URL).context(UnableToConfigureNotifyUrl)?;

        Ok(Self { notify_url })
    }

    pub fn into_client(self) -> Client {
        Client {
            client: reqwest::Client::new(),
            config: self,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    config: Config,
}

impl Client {
    pub async fn notify(&self, message: &OutgoingMessage) -> Result<DeliveryResponse> {
        let Self { client, config } = self;
        let s = trace_span!("notify", title = %message.title);

        async {
            let payload = encode(message)?;
            debug!("Sending {}", message.redacted());

            let resp = client
                .post(config.notify_url.clone())
                .header(header::CONTENT_TYPE, "application/json")
                .body(payload)
                .send()
                .await
                .context(UnableToSendNotification)?;

            let status = resp.status();
            info!("Response status: {}", status);
            trace!("Response headers: {:?}", resp.headers());

            // Consumes the response; the connection is released before validation
            let body = resp.bytes().await.context(UnableToReadResponse)?;
            debug!("Response body: {}", String::from_utf8_lossy(&body));

            validate(status, &body)
        }
        .instrument(s)
        .await
    }
}

pub fn encode(message: &OutgoingMessage) -> Result<Vec<u8>> {
    serde_json::to_vec(message).context(UnableToEncode)
}

/// The HTTP status is checked before the body is looked at.
pub fn validate(status: StatusCode, body: &[u8]) -> Result<DeliveryResponse> {
    ensure!(status == StatusCode::OK, UnexpectedHttpStatus { status });

    let resp: DeliveryResponse =
        serde_json::from_slice(body).context(UnableToDeserializeResponse)?;

    ensure!(
        resp.status == API_STATUS_OK,
        UnexpectedApiStatus {
            status: resp.status,
            request: resp.request,
        }
    );

    Ok(resp)
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum Error {
    #[snafu(display("Unable to parse the Pushover notify URL"))]
    UnableToConfigureNotifyUrl {
        source: url::ParseError,
    },

    #[snafu(display("Unable to encode the notification"))]
    UnableToEncode {
        source: serde_json::Error,
    },

    #[snafu(display("Unable to send the notification"))]
    UnableToSendNotification {
        source: reqwest::Error,
    },

    #[snafu(display("Unable to read the Pushover response"))]
    UnableToReadResponse {
        source: reqwest::Error,
    },

    #[snafu(display("Status other than 200 received: {}", status))]
    UnexpectedHttpStatus {
        status: StatusCode,
    },

    #[snafu(display("Unable to deserialize the Pushover response"))]
    UnableToDeserializeResponse {
        source: serde_json::Error,
    },

    #[snafu(display("Status other than 1 returned: {} (request {})", status, request))]
    UnexpectedApiStatus {
        status: i64,
        request: String,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;
