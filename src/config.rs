use crate::pushover::{AppToken, UserKey};
use ini::Ini;
use snafu::{OptionExt, ResultExt, Snafu};
use std::{
    env, fmt, io,
    path::{Path, PathBuf},
};

pub const CONFIG_FILE_NAME: &str = "conf.ini";

const SECTION: &str = "pushover";
const USER_KEY: &str = "user_key";
const APP_KEY: &str = "app_key";

/// Candidate configuration paths, searched in order.
#[derive(Debug, Clone)]
pub struct Locator {
    candidates: Vec<PathBuf>,
}

impl Locator {
    /// The executable's directory wins over the working directory.
    pub fn from_process() -> Result<Self> {
        let exe = env::current_exe().context(UnknownExecutablePath)?;
        let exe_dir = exe
            .parent()
            .context(ExecutableHasNoDirectory { path: &exe })?;
        let work_dir = env::current_dir().context(UnknownWorkingDirectory)?;

        Ok(Self::new(vec![
            exe_dir.join(CONFIG_FILE_NAME),
            work_dir.join(CONFIG_FILE_NAME),
        ]))
    }

    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn find(&self) -> Result<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.exists())
            .context(ConfigNotFound {
                searched: self.candidates.clone(),
            })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: UserKey,
    pub token: AppToken,
}

// Keep the secrets out of log output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ini = Ini::load_from_file(path).context(UnableToLoad { path })?;
        Self::from_ini(&ini, path)
    }

    pub fn from_ini(ini: &Ini, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let section = ini
            .section(Some(SECTION))
            .context(MissingSection { path })?;

        let user = section.get(USER_KEY).context(MissingKey { key: USER_KEY })?;
        let token = section.get(APP_KEY).context(MissingKey { key: APP_KEY })?;

        Ok(Self {
            user: UserKey(user.to_owned()),
            token: AppToken(token.to_owned()),
        })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)))]
pub enum Error {
    #[snafu(display("Unable to determine the path of the executable"))]
    UnknownExecutablePath { source: io::Error },

    #[snafu(display("The executable path {} has no parent directory", path.display()))]
    ExecutableHasNoDirectory { path: PathBuf },

    #[snafu(display("Unable to determine the working directory"))]
    UnknownWorkingDirectory { source: io::Error },

    #[snafu(display(
        "Unable to find {} (searched {})",
        CONFIG_FILE_NAME,
        display_paths(searched)
    ))]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[snafu(display("Unable to read config file {}", path.display()))]
    UnableToLoad { source: ini::Error, path: PathBuf },

    #[snafu(display("Config file {} has no [{}] section", path.display(), SECTION))]
    MissingSection { path: PathBuf },

    #[snafu(display("The [{}] section is missing {}", SECTION, key))]
    MissingKey { key: &'static str },
}

type Result<T, E = Error> = std::result::Result<T, E>;
