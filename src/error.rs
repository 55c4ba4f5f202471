use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Recoverable-by-design conditions (an assembly the locator cannot find, a reader that fails
/// mid-scan) never surface here — they are absorbed by the resolver and degrade to an
/// `Unknown` classification. Everything below is fatal for the generation pass that raised it:
/// the generator buffers its output and flushes only on success, so a failed pass never emits
/// a truncated contract.
///
/// # Error Categories
///
/// - [`Error::Malformed`] - Internal-consistency violation in the metadata graph
/// - [`Error::NotSupported`] - Signature shape this model cannot represent faithfully
/// - [`Error::Member`] - Context wrapper identifying the member that failed to render
/// - [`Error::FmtError`] - Failure writing to the caller-supplied output sink
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata graph violates one of the model's invariants.
    ///
    /// Raised for conditions the external metadata source must never produce, such as a
    /// generic instantiation whose argument count does not match the accumulated arity of
    /// its definition chain, or a nested reference whose declaring type is neither a
    /// top-level nor a nested reference. Never recovered.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the violated invariant
    /// * `file` - Source file where the violation was detected
    /// * `line` - Source line where the violation was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A signature uses an encoding this model has no representation for.
    ///
    /// The malformed shape must not be silently misrendered, so the generation pass aborts
    /// with a description of the offending construct.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// A member failed to render; wraps the underlying error with the member's path.
    #[error("{member}: {source}")]
    Member {
        /// Dotted path of the member that failed (namespace, type, member name)
        member: String,
        /// The underlying failure
        source: Box<Error>,
    },

    /// Failure while writing to the caller-supplied output sink.
    #[error("{0}")]
    FmtError(#[from] std::fmt::Error),
}

impl Error {
    /// Wrap this error with the dotted path of the member being rendered.
    #[must_use]
    pub fn in_member(self, member: impl Into<String>) -> Self {
        Error::Member {
            member: member.into(),
            source: Box::new(self),
        }
    }
}
