use swc_common::Span;
use thiserror::Error;

/// The error type for conversion failures.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was not parseable as an ES module.
    #[error("parse error: {0}")]
    Parse(String),

    /// The input uses syntax outside the supported surface.
    #[error("unsupported syntax: {what} (byte offset {offset})")]
    Unsupported {
        /// The construct that is not supported.
        what: &'static str,

        /// The byte offset of the construct in the input.
        offset: u32,
    },

    /// A class ended up with two static members of the same name.
    #[error("duplicate static member `{class}.{name}`")]
    DuplicateStatic {
        /// The class name.
        class: String,

        /// The member name.
        name: String,
    },

    /// A retained assignment targets a member that already has an inline
    /// initializer.
    #[error("`{class}.{name}` is assigned externally but already has an initializer")]
    ConflictingAssign {
        /// The class name.
        class: String,

        /// The member name.
        name: String,
    },

    /// A readonly member was given a compound initializer, which only literal
    /// initializers may be.
    #[error("non-literal initializer inlined for `{class}.{name}`")]
    NonLiteralInit {
        /// The class name.
        class: String,

        /// The member name.
        name: String,
    },
}

impl Error {
    pub(crate) fn unsupported(what: &'static str, span: Span) -> Self {
        Error::Unsupported {
            what,
            offset: span.lo.0,
        }
    }
}
