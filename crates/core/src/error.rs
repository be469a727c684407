use thiserror::Error;

/// Result type for docsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for docsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parsing errors when reading input documents
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// The reflection document uses a type expression kind this build does not know.
    ///
    /// Signals an incompatible TypeDoc schema version; extraction stops.
    #[error("Not supported type: {kind}")]
    UnsupportedTypeKind { kind: String },

    /// Package version missing or not a release/pre-release version
    #[error("Version is invalid \"{0}\"")]
    InvalidVersion(String),

    /// Storage related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported type kind error
    pub fn unsupported_type_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedTypeKind { kind: kind.into() }
    }

    /// Creates an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion(version.into())
    }

    /// Creates a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
