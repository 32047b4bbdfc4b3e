//! Error shared by every repository port.
//!
//! All five stores fail the same two ways, so one enum serves them all. The
//! `From` impl gives services the HTTP mapping for free: a connection
//! failure is a 503, anything else is a redacted 500.

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures raised by repository adapters.
    pub enum RepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Connection { .. } => Error::service_unavailable(err.to_string()),
            RepositoryError::Query { .. } => Error::internal(err.to_string()),
        }
    }
}
