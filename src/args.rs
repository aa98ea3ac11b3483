use snafu::Snafu;
use std::{convert::TryFrom, ffi::OsString, path::PathBuf};

const EXPECTED_ARGUMENTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub event: String,
    pub body_path: PathBuf,
}

impl Args {
    /// Parses a full argument list, including the program name.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let positional: Vec<OsString> = args.into_iter().skip(1).map(Into::into).collect();

        match <[OsString; EXPECTED_ARGUMENTS]>::try_from(positional) {
            Ok([event, body_path]) => Ok(Self {
                event: event.to_string_lossy().into_owned(),
                body_path: body_path.into(),
            }),
            Err(positional) => WrongArgumentCount {
                count: positional.len(),
            }
            .fail(),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum Error {
    #[snafu(display(
        "Usage: pushover-forward <event-name> <body-file-path> (expected {} arguments, got {})",
        EXPECTED_ARGUMENTS,
        count
    ))]
    WrongArgumentCount { count: usize },
}

type Result<T, E = Error> = std::result::Result<T, E>;
