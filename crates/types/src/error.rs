use thiserror::Error;

const ROOT_FIELD: &str = "value";

/// Encoding and decoding failures. `field` is the dotted path of the
/// offending field inside the record being processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{field}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("{field}: {value} does not fit in {width} bytes")]
    IntegerTooLarge {
        field: String,
        width: usize,
        value: u128,
    },
    #[error("{field}: malformed table, {reason}")]
    MalformedTable { field: String, reason: String },
    #[error("{field}: invalid hash type {value}, expected 0 or 1")]
    InvalidHashType { field: String, value: u8 },
    #[error("{field}: invalid hex string {value:?}")]
    InvalidHex { field: String, value: String },
}

impl Error {
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Error::LengthMismatch {
            field: ROOT_FIELD.to_string(),
            expected,
            actual,
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedTable {
            field: ROOT_FIELD.to_string(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Error::LengthMismatch { field, .. }
            | Error::IntegerTooLarge { field, .. }
            | Error::MalformedTable { field, .. }
            | Error::InvalidHashType { field, .. }
            | Error::InvalidHex { field, .. } => field,
        }
    }

    /// Nest the error under `parent`, building paths like
    /// `deposit_lock_args.layer2_lock.hash_type`.
    pub fn at(mut self, parent: &str) -> Self {
        let field = match &mut self {
            Error::LengthMismatch { field, .. }
            | Error::IntegerTooLarge { field, .. }
            | Error::MalformedTable { field, .. }
            | Error::InvalidHashType { field, .. }
            | Error::InvalidHex { field, .. } => field,
        };
        *field = if field == ROOT_FIELD {
            parent.to_string()
        } else {
            format!("{}.{}", parent, field)
        };
        self
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Attach a field path to the error of a codec result.
pub trait ResultExt<T> {
    fn at(self, field: &str) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn at(self, field: &str) -> Result<T> {
        self.map_err(|err| err.at(field))
    }
}
