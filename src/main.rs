#![deny(rust_2018_idioms)]

use snafu::{ErrorCompat, ResultExt, Snafu};
use std::{ffi::OsString, path::PathBuf};
use tracing::info;

use args::Args;
use config::{Credentials, Locator};

mod args;
mod config;
mod domain;
mod flow;
mod pushover;

fn main() {
    if let Err(e) = core() {
        let mut chain = e.iter_chain();
        if let Some(top) = chain.next() {
            eprintln!("Error: {}", top);
        }
        for cause in chain {
            eprintln!("Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn core() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let (args, credentials) = prepare(std::env::args_os(), Locator::from_process)?;

    let pushover_config = pushover::Config::new().context(UnableToConfigurePushover)?;
    let pushover = pushover_config.into_client();

    let notify_flow = flow::NotifyFlow::new(credentials, pushover);
    let resp = notify_flow
        .run(&args)
        .await
        .context(UnableToForward { event: &args.event })?;

    info!("Delivered, request {}", resp.request);

    Ok(())
}

/// Everything that must succeed before a client exists. The argument
/// count is checked before the locator is consulted.
fn prepare<I, L>(argv: I, locate: L) -> Result<(Args, Credentials)>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
    L: FnOnce() -> std::result::Result<Locator, config::Error>,
{
    let args = Args::from_args(argv).context(InvalidUsage)?;

    let locator = locate().context(UnableToLocateConfig)?;
    let config_path = locator.find().context(UnableToLocateConfig)?;
    info!("Using config file: {}", config_path.display());

    let credentials = Credentials::load(config_path).context(UnableToReadConfig {
        path: config_path,
    })?;

    Ok((args, credentials))
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
enum Error {
    #[snafu(display("Invalid command line"))]
    InvalidUsage { source: args::Error },

    #[snafu(display("Unable to locate the configuration"))]
    UnableToLocateConfig { source: config::Error },

    #[snafu(display("Unable to read credentials from {}", path.display()))]
    UnableToReadConfig {
        source: config::Error,
        path: PathBuf,
    },

    #[snafu(display("Unable to configure Pushover integration"))]
    UnableToConfigurePushover { source: pushover::Error },

    #[snafu(display("Unable to forward event {}", event))]
    UnableToForward { source: flow::Error, event: String },
}

type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::{AppToken, UserKey};
    use std::{cell::Cell, fs};

    #[test]
    fn wrong_argument_count_never_consults_the_locator() {
        let cases: &[&[&str]] = &[
            &["prog"],
            &["prog", "alert"],
            &["prog", "alert", "body.txt", "extra"],
        ];

        for &case in cases {
            let located = Cell::new(false);
            let err = prepare(case.iter().copied(), || {
                located.set(true);
                Ok(Locator::new(vec![]))
            })
            .unwrap_err();

            assert!(matches!(err, Error::InvalidUsage { .. }), "{:?}", case);
            assert!(!located.get(), "{:?}", case);
        }
    }

    #[test]
    fn missing_config_stops_before_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(config::CONFIG_FILE_NAME);

        let err = prepare(vec!["prog", "alert", "body.txt"], || {
            Ok(Locator::new(vec![missing]))
        })
        .unwrap_err();

        assert!(matches!(
            err,
            Error::UnableToLocateConfig {
                source: config::Error::ConfigNotFound { .. }
            }
        ));
    }

    #[test]
    fn prepares_args_and_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let conf = dir.path().join(config::CONFIG_FILE_NAME);
        fs::write(&conf, "[pushover]\nuser_key = u\napp_key = a\n").unwrap();

        let (args, credentials) = prepare(vec!["prog", "alert", "body.txt"], || {
            Ok(Locator::new(vec![conf]))
        })
        .unwrap();

        assert_eq!(args.event, "alert");
        assert_eq!(args.body_path, PathBuf::from("body.txt"));
        assert_eq!(credentials.user, UserKey("u".into()));
        assert_eq!(credentials.token, AppToken("a".into()));
    }
}
