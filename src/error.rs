use std::fmt;
use std::io;
use std::string::FromUtf8Error;

#[derive(Debug)]
pub enum NBTError {
    EndOfStream(String),
    FormatError(String),
    RangeError(String),
    InvalidReaderState(String),
}

pub type NBTResult<T> = Result<T, NBTError>;

impl fmt::Display for NBTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NBTError::EndOfStream(msg) => write!(f, "end of stream: {}", msg),
            NBTError::FormatError(msg) => write!(f, "format error: {}", msg),
            NBTError::RangeError(msg) => write!(f, "range error: {}", msg),
            NBTError::InvalidReaderState(msg) => write!(f, "invalid reader state: {}", msg),
        }
    }
}

impl std::error::Error for NBTError {}

impl From<io::Error> for NBTError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => NBTError::EndOfStream(e.to_string()),
            _ => NBTError::FormatError(e.to_string()),
        }
    }
}

impl From<FromUtf8Error> for NBTError {
    fn from(e: FromUtf8Error) -> Self {
        NBTError::FormatError(format!("invalid utf-8 string: {}", e))
    }
}
