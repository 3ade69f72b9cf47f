/// Application error taxonomy.
///
/// None of these are fatal to the page: network failures surface as a
/// transient notification, validation failures block the request before it
/// leaves the client, chart failures skip the affected adapter only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Network(String),
    Validation(String),
    Chart(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network Error: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::Chart(msg) => write!(f, "Chart Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

pub type ApiResult<T> = Result<T, AppError>;
