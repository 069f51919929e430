//! Startup configuration: session tokens plus a few tuning knobs.
//!
//! Tokens come from a TOML file (`tokeny.txt` by default) of the form
//!
//! ```text
//! MENZA_K8_TOKEN = "..."
//! SHIBSESSION_TOKEN = "..."
//! ```
//!
//! and may be overridden by environment variables of the same names. Files that
//! are not valid TOML but still consist of `KEY = value` lines (unquoted values,
//! repeated keys) are read line by line, the last value of a key winning.
//! Everything is validated once, before any request leaves the machine.

use std::{
    env,
    fmt::{self, Display, Formatter},
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

use crate::monitor::OrderPolicy;

pub const DEFAULT_TOKEN_FILE: &str = "tokeny.txt";
pub const DEFAULT_BASE_URL: &str = "https://menza.tul.cz/";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const MENZA_K8_KEY: &str = "MENZA_K8_TOKEN";
const SHIBSESSION_KEY: &str = "SHIBSESSION_TOKEN";
/// Value shipped in the example token file.
const PLACEHOLDER: &str = "-";

#[derive(Debug)]
pub enum Error {
    Io(PathBuf, io::Error),
    Toml(toml::de::Error),
    MissingToken(&'static str),
    PlaceholderToken(&'static str),
    InvalidValue { key: &'static str, value: String },
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Cannot read token file {}: {e}", path.display()),
            Self::Toml(e) => write!(f, "Token file is not valid: {e}"),
            Self::MissingToken(key) => write!(f, "Authentication token {key} is not set"),
            Self::PlaceholderToken(key) => {
                write!(f, "Authentication token {key} still has its placeholder value")
            }
            Self::InvalidValue { key, value } => write!(f, "Invalid value {value:?} for {key}"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Default, Deserialize)]
struct TokenFile {
    #[serde(rename = "MENZA_K8_TOKEN")]
    menza_k8: Option<String>,
    #[serde(rename = "SHIBSESSION_TOKEN")]
    shibsession: Option<String>,
}

/// The two cookies identifying a logged-in session on the ordering site.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub menza_k8: String,
    pub shibsession: String,
}

// keep tokens out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

impl Credentials {
    fn validate(key: &'static str, value: Option<String>) -> Result<String, Error> {
        let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
        if value.is_empty() {
            Err(Error::MissingToken(key))
        } else if value == PLACEHOLDER {
            Err(Error::PlaceholderToken(key))
        } else {
            Ok(value)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: Url,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub order_policy: OrderPolicy,
}

impl Config {
    /// Reads the token file named by `MENZA_TOKEN_FILE` (or [`DEFAULT_TOKEN_FILE`])
    /// and the process environment.
    pub fn load() -> Result<Self, Error> {
        let path = env::var("MENZA_TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.to_string());
        let file = read_token_file(Path::new(&path))?;
        Self::from_sources(file.as_deref(), |key| env::var(key).ok())
    }

    /// `token_file` is the file's text, `None` when there is no file.
    pub fn from_sources(
        token_file: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Error> {
        let file: TokenFile = match token_file {
            Some(text) => parse_token_file(text)?,
            None => TokenFile::default(),
        };
        let credentials = Credentials {
            menza_k8: Credentials::validate(MENZA_K8_KEY, env(MENZA_K8_KEY).or(file.menza_k8))?,
            shibsession: Credentials::validate(
                SHIBSESSION_KEY,
                env(SHIBSESSION_KEY).or(file.shibsession),
            )?,
        };

        let base_url = match env("MENZA_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => parse_base_url(DEFAULT_BASE_URL)?,
        };
        let poll_interval = env("MENZA_POLL_SECS")
            .map(|raw| parse_secs("MENZA_POLL_SECS", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        let request_timeout = env("MENZA_TIMEOUT_SECS")
            .map(|raw| parse_secs("MENZA_TIMEOUT_SECS", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let order_policy = match env("MENZA_ORDER_ALL").as_deref().map(str::trim) {
            None | Some("" | "0" | "false") => OrderPolicy::StopOnFirst,
            Some("1" | "true") => OrderPolicy::OrderAll,
            Some(other) => {
                return Err(Error::InvalidValue {
                    key: "MENZA_ORDER_ALL",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            credentials,
            base_url,
            poll_interval,
            request_timeout,
            order_policy,
        })
    }
}

fn parse_token_file(text: &str) -> Result<TokenFile, Error> {
    let toml_err = match toml::from_str(text) {
        Ok(file) => return Ok(file),
        Err(e) => e,
    };
    let mut file = TokenFile::default();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        // a line that is not an assignment is not a token file at all
        let Some((key, value)) = line.split_once('=') else {
            return Err(toml_err.into());
        };
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
        match key.trim() {
            MENZA_K8_KEY => file.menza_k8 = Some(value),
            SHIBSESSION_KEY => file.shibsession = Some(value),
            other => log::debug!("ignoring unknown key {other:?} in token file"),
        }
    }
    log::debug!("token file read as plain KEY = value lines ({toml_err})");
    Ok(file)
}

fn read_token_file(path: &Path) -> Result<Option<String>, Error> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("token file {} not found, relying on environment", path.display());
            Ok(None)
        }
        Err(e) => Err(Error::Io(path.to_owned(), e)),
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let invalid = || Error::InvalidValue {
        key: "MENZA_BASE_URL",
        value: raw.to_string(),
    };
    let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    // relative joins replace the last segment unless the path ends in a slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_secs(key: &'static str, raw: &str) -> Result<Duration, Error> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}
