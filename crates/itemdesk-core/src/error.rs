use thiserror::Error;

/// Everything that can go wrong while talking to the items endpoint
///
/// None of these are fatal. The store hands them back so the front end
/// can show a notice and let the user try again.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never completed: unreachable host, timeout, reset
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered, but with a non-success status or a body we can't decode
    #[error("Response error: {0}")]
    Response(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Error::Response(_))
    }
}

impl From<itemdesk_api::ApiError> for Error {
    fn from(err: itemdesk_api::ApiError) -> Self {
        if err.is_transport() {
            Error::Transport(err.to_string())
        } else {
            Error::Response(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemdesk_api::ApiError;

    #[test]
    fn test_status_errors_become_response_errors() {
        let err: Error = ApiError::Status {
            status: 500,
            body: "boom".into(),
        }
        .into();
        assert!(err.is_response());
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_bad_url_is_transport() {
        let err: Error = ApiError::InvalidUrl("nope".into()).into();
        assert!(err.is_transport());
    }
}
