//! Error types for the block height comparer
//!
//! Single failures are [`ProbeError`]s. Independent operations that can fail
//! together (building both clients, fetching both heights) collect every
//! failure into an [`ErrorList`] instead of stopping at the first one.

use std::fmt;

use thiserror::Error;

/// One failure from a single operation
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Wrong number of node endpoints configured
    #[error(
        "must pass the correct number of command line arguments \
         ({found} given, {expected} expected), see `--help` for more info"
    )]
    EndpointCount { expected: usize, found: usize },

    /// Threshold text is not a non-negative base-10 integer
    #[error("invalid threshold '{value}': {reason}")]
    InvalidThreshold { value: String, reason: String },

    /// RPC transport could not be set up for an endpoint
    #[error("failed to connect to '{endpoint}': {reason}")]
    Connection { endpoint: String, reason: String },

    /// A remote call failed or its result could not be decoded
    #[error("call '{method}' to {endpoint} failed: {reason}")]
    Call {
        endpoint: String,
        method: String,
        reason: String,
    },
}

/// Every error collected from a group of independent operations
#[derive(Debug, Default)]
pub struct ErrorList {
    errors: Vec<ProbeError>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ProbeError) {
        self.errors.push(error);
    }

    /// Records the error side of a result and hands back the success value
    pub fn collect<T>(&mut self, result: Result<T, ProbeError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    /// Combines the given errors, returning `None` when there are none
    pub fn combine<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<ProbeError>>,
    {
        let list = Self {
            errors: errors.into_iter().flatten().collect(),
        };
        list.into_result().err()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeError> {
        self.errors.iter()
    }
}

impl From<ProbeError> for ErrorList {
    fn from(error: ProbeError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorList {}

/// Main error type for the comparer
#[derive(Debug, Error)]
pub enum ComparerError {
    /// Invalid startup configuration; the service must not start
    #[error("configuration error: {0}")]
    Configuration(ErrorList),

    /// One or both nodes could not report their latest block
    #[error("upstream error: {0}")]
    Upstream(ErrorList),
}

impl ComparerError {
    /// Underlying errors without the category prefix
    pub fn errors(&self) -> &ErrorList {
        match self {
            ComparerError::Configuration(list) | ComparerError::Upstream(list) => list,
        }
    }
}
