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
    InvalidArgument,
    ConfigParse,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
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
    fn from(parse_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &parse_error.to_string())
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

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::InvalidArgument => "invalid argument".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_message() {
        let err = Error::new(ErrorKind::InvalidArgument, "2023-02-30");
        assert_eq!(err.to_string(), "invalid argument: 2023-02-30");
    }

    #[test]
    fn display_without_message() {
        let err = Error::from(ErrorKind::ConfigParse);
        assert_eq!(err.to_string(), "invalid configuration");
    }

    #[test]
    fn io_errors_keep_their_description() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
        assert_eq!(err.to_string(), "no such file");
    }
}
