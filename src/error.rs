use std::fmt::{self, Display, Formatter};
use std::io;

use crate::{config, fetch};

#[derive(Debug)]
pub enum Error {
    Config(config::Error),
    Fetch(fetch::Error),
    Io(io::Error),
    /// The menu page was served without a logged-in session.
    NotLoggedIn,
}

impl From<config::Error> for Error {
    fn from(e: config::Error) -> Self {
        Self::Config(e)
    }
}

impl From<fetch::Error> for Error {
    fn from(e: fetch::Error) -> Self {
        Self::Fetch(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Fetch(e) => write!(f, "Could not load the canteen website: {e}"),
            Self::Io(e) => write!(f, "Console error: {e}"),
            Self::NotLoggedIn => write!(
                f,
                "Login failed! Try running the program again; if that does not help, refresh your tokens."
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::NotLoggedIn => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_source() {
        let e: Error = config::Error::MissingToken("MENZA_K8_TOKEN").into();
        assert!(e.to_string().contains("MENZA_K8_TOKEN is not set"));
        assert!(std::error::Error::source(&e).is_some());
        assert!(std::error::Error::source(&Error::NotLoggedIn).is_none());
    }
}
