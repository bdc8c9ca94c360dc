use reqwest::StatusCode;

/// Ways a listing request can fail.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, TLS).
    Transport(reqwest::Error),
    /// The server answered with something other than 200 or 201.
    UnexpectedStatus(StatusCode),
    /// A success response whose body is not a JSON array of packages.
    Decode(reqwest::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Failed to send request: {}", e),
            ApiError::UnexpectedStatus(status) => {
                write!(f, "Unexpected HTTP status: {}", status.as_u16())
            }
            ApiError::Decode(e) => write!(f, "Failed to parse JSON response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) | ApiError::Decode(e) => Some(e),
            ApiError::UnexpectedStatus(_) => None,
        }
    }
}
