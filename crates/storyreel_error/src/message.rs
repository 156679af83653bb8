//! Message-only errors raised outside the provider and pipeline domains.

macro_rules! message_error {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
        #[display("{}: {} at line {} in {}", $label, message, line, file)]
        pub struct $name {
            /// What went wrong, suitable for display
            pub message: String,
            /// Line that raised the error
            pub line: u32,
            /// File that raised the error
            pub file: &'static str,
        }

        impl $name {
            /// Record `message` at the caller's location.
            #[track_caller]
            pub fn new(message: impl Into<String>) -> Self {
                let location = std::panic::Location::caller();
                Self {
                    message: message.into(),
                    line: location.line(),
                    file: location.file(),
                }
            }
        }
    };
}

message_error!(
    /// Transport setup failure.
    ///
    /// ```
    /// use storyreel_error::HttpError;
    ///
    /// let err = HttpError::new("Connection refused");
    /// assert_eq!(err.message, "Connection refused");
    /// assert!(err.to_string().starts_with("HTTP Error: Connection refused"));
    /// ```
    HttpError,
    "HTTP Error"
);

message_error!(
    /// Serialization failure outside provider responses.
    JsonError,
    "JSON Error"
);

message_error!(
    /// Invalid or unreadable settings, or a missing credential variable.
    ///
    /// ```
    /// use storyreel_error::ConfigError;
    ///
    /// let err = ConfigError::new("poll_interval_secs must be positive");
    /// assert!(err.message.contains("poll_interval_secs"));
    /// ```
    ConfigError,
    "Configuration Error"
);

message_error!(
    /// Failure of the surface presenting a scene or prompting the user.
    SurfaceError,
    "Surface Error"
);
