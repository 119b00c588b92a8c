use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    DateParse,
    InvalidDate,
    UnknownMonth,
    DayOutOfRange,
    InvalidRange,
    CampaignParse,
    ConfigParse,
    CommandParse,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for Error {
    fn from(error: nom::Err<E>) -> Self {
        Error::new(
            ErrorKind::DateParse,
            &format!("Error while parsing: {}", error),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::DateParse => "invalid date format".to_owned(),
            ErrorKind::InvalidDate => "invalid date".to_owned(),
            ErrorKind::UnknownMonth => "unknown month".to_owned(),
            ErrorKind::DayOutOfRange => "day out of range".to_owned(),
            ErrorKind::InvalidRange => "invalid date range".to_owned(),
            ErrorKind::CampaignParse => "invalid campaign definition".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration".to_owned(),
            ErrorKind::CommandParse => "invalid command".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_and_without_message() {
        let bare = Error::from(ErrorKind::DayOutOfRange);
        assert_eq!(bare.to_string(), "day out of range");

        let detailed = bare.with_msg("day 29 does not exist");
        assert_eq!(
            detailed.to_string(),
            "day out of range: day 29 does not exist"
        );
    }

    #[test]
    fn io_error_is_kept_as_source() {
        let err = Error::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
        assert!(error::Error::source(&err).is_some());
    }

    #[test]
    fn toml_error_is_config_parse() {
        let toml_error = toml::from_str::<toml::Value>("start = ").unwrap_err();
        let err = Error::from(toml_error);
        assert!(matches!(err.kind, ErrorKind::ConfigParse));
        assert!(err.message.is_some());
    }
}
