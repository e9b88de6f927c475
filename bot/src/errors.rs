use serenity::http::error::Error as HttpError;
use std::{
    error::Error as StdError,
    fmt::{self, Display},
    result,
};

pub type Result<T> = result::Result<T, Error>;

/// Discord's "Unknown Channel" json error code
pub const UNKNOWN_CHANNEL: isize = 10003;
/// Discord's "Missing Access" json error code
pub const MISSING_ACCESS: isize = 50001;

#[derive(Debug)]
pub enum Error {
    Serenity(serenity::Error),
    /// Request rejected by discord with a json error code
    Discord { code: isize, message: String },
    Db(db::Error),
    Config(String),
    ConstStr(&'static str),
}

impl Error {
    pub const fn is_unreachable_destination(&self) -> bool {
        matches!(
            self,
            Error::Discord {
                code: UNKNOWN_CHANNEL | MISSING_ACCESS,
                ..
            }
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Serenity(inner) => fmt::Display::fmt(&inner, f),
            Error::Discord { code, message } => write!(f, "discord error {code}: {message}"),
            Error::Db(inner) => fmt::Display::fmt(&inner, f),
            Error::Config(inner) => write!(f, "invalid configuration: {inner}"),
            Error::ConstStr(inner) => f.write_str(inner),
        }
    }
}

impl StdError for Error {}

impl From<serenity::Error> for Error {
    fn from(e: serenity::Error) -> Error {
        if let serenity::Error::Http(http_err) = &e {
            if let HttpError::UnsuccessfulRequest(response) = http_err.as_ref() {
                return Error::Discord {
                    code: response.error.code,
                    message: response.error.message.clone(),
                };
            }
        }
        Error::Serenity(e)
    }
}

impl From<db::Error> for Error {
    fn from(e: db::Error) -> Error {
        Error::Db(e)
    }
}
