use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::reader::CborState;

// -----------------------------------------------------------------------------
// WriteError

/// Misuse of [`CborWriter`](crate::CborWriter).
///
/// The encoder never produces these for well formed values, they signal a
/// bug in the code driving the writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WriteError {
    #[error("Container of {expected} items is already full")]
    ContainerFull { expected: usize },

    #[error("Container closed after {written} of {expected} items")]
    CountMismatch { expected: usize, written: usize },

    #[error("No open {0} to close")]
    NotOpen(&'static str),

    #[error("A tag must be followed by a data item")]
    DanglingTag,

    #[error("The document already has a root data item")]
    MultipleRoots,

    #[error("The document is incomplete")]
    Incomplete,
}

// -----------------------------------------------------------------------------
// ReadError

/// Malformed or unexpected input of [`CborReader`](crate::CborReader).
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReadError {
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Malformed data item at offset {offset}")]
    Malformed { offset: usize },

    #[error("Indefinite length data item at offset {offset} is not supported")]
    IndefiniteLength { offset: usize },

    #[error("Expected {expected}, found {found}")]
    UnexpectedState { expected: CborState, found: CborState },

    #[error("Value does not fit in {target}")]
    Overflow { target: &'static str },

    #[error("Invalid UTF-8 in text string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Invalid {kind} value: {reason}")]
    InvalidValue { kind: &'static str, reason: String },

    #[error("{count} bytes left after the root data item")]
    TrailingBytes { count: usize },
}

// -----------------------------------------------------------------------------
// Error

/// The error of encoding and decoding.
///
/// Every error aborts the whole call; no partial output is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The value has no wire form, e.g. an opaque type.
    #[error("The type \"{type_path}\" is not supported")]
    UnsupportedType { type_path: &'static str },

    /// The target is a struct with fields, none of them writable.
    #[error(
        "The object of \"{type_name}\" cannot be restored because there are no writable fields."
    )]
    Unrestorable { type_name: &'static str },

    /// The type carried by a wrapped value cannot be resolved.
    #[error("Cannot resolve type \"{key}\": {reason}")]
    TypeResolution { key: String, reason: &'static str },

    /// The data does not have the shape of the target type.
    #[error("Expected {expected}, found {found}")]
    StructuralMismatch { expected: &'static str, found: String },

    /// A tag outside the registry space.
    #[error("Unexpected tag {0}")]
    UnexpectedTag(u64),

    /// A simple value other than null, undefined or a boolean.
    #[error("Unsupported simple value {0}")]
    UnsupportedSimpleValue(u8),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Write(#[from] WriteError),

    /// An error with the types being processed when it occurred.
    #[error("{source} (stack: {stack})")]
    Context { stack: String, source: Box<Error> },
}

impl Error {
    /// Returns the error without [`Error::Context`] layers.
    ///
    /// # Examples
    ///
    /// ```
    /// use ac_cbor::Error;
    ///
    /// let error = Error::Context {
    ///     stack: "`i32`".into(),
    ///     source: Box::new(Error::UnexpectedTag(1)),
    /// };
    /// assert!(matches!(error.innermost(), Error::UnexpectedTag(1)));
    /// ```
    pub fn innermost(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.innermost(),
            other => other,
        }
    }
}

/// A `Result` of [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
