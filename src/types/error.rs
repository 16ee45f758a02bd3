use thiserror::Error;

/// entrytally error types
#[derive(Error, Debug)]
pub enum EntryTallyError {
    /// Failed to parse JSON
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Payload did not have the shape of a record list
    #[error("structure error: {0}")]
    Structure(String),

    /// Account input rejected
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for entrytally
pub type Result<T> = std::result::Result<T, EntryTallyError>;

/// A timestamp that no parsing strategy accepted.
///
/// Carries the raw value and its runtime type so the caller can log both.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not parse date: {value} (type: {kind})")]
pub struct UnparseableDate {
    pub value: String,
    pub kind: &'static str,
}

/// Rejected account input. Messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Please enter a valid 10-digit phone number")]
    PhoneInvalid,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Password must contain at least one uppercase letter")]
    PasswordNoUppercase,
    #[error("Password must contain at least one special character")]
    PasswordNoSpecial,
    #[error("Password must contain at least one digit")]
    PasswordNoDigit,
}
