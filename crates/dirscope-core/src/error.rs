//! Operation errors with portable and platform-native views.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Portable classification of an OS failure.
///
/// The numeric values mirror the generic POSIX codes so that `code()`
/// stays stable across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Entry vanished or never existed. Tolerated during traversal.
    NotFound = 2,
    /// Directory or file is not accessible to the process.
    PermissionDenied = 13,
    /// Any other OS failure. Always fatal to the current call.
    Other = 5,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::NotFound => "not found",
            ErrorClass::PermissionDenied => "permission denied",
            ErrorClass::Other => "I/O failure",
        };
        f.write_str(name)
    }
}

/// Raw platform-native view of an OS failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    /// OS error code (errno on Unix, GetLastError on Windows), if any.
    pub code: Option<i32>,
    /// OS-provided error message.
    pub message: String,
}

impl PlatformError {
    /// Capture the platform view of an `io::Error`.
    pub fn capture(source: &io::Error) -> Self {
        Self {
            code: source.raw_os_error(),
            message: source.to_string(),
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A single OS-originated failure.
///
/// Carries both a portable classification (`class`, `code`, `message`,
/// `category_name`) and the raw platform representation (`platform_code`,
/// `platform_message`) of the same underlying failure.
#[derive(Debug, Clone, Error)]
pub enum OperationError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf, platform: PlatformError },

    /// Path not found.
    #[error("No such entry: {path}")]
    NotFound { path: PathBuf, platform: PlatformError },

    /// Generic I/O error.
    #[error("I/O error at {path}: {platform}")]
    Io { path: PathBuf, platform: PlatformError },

    /// Path does not resolve to a mounted volume.
    #[error("No mounted volume contains: {path}")]
    NoVolume { path: PathBuf },

    /// Scan target is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl OperationError {
    /// Create an error from an `io::Error` with path context.
    pub fn io(path: impl Into<PathBuf>, source: &io::Error) -> Self {
        let path = path.into();
        let platform = PlatformError::capture(source);
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, platform },
            io::ErrorKind::NotFound => Self::NotFound { path, platform },
            _ => Self::Io { path, platform },
        }
    }

    /// Portable classification of the failure.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::PermissionDenied { .. } => ErrorClass::PermissionDenied,
            Self::Io { .. } | Self::NoVolume { .. } | Self::NotADirectory { .. } => {
                ErrorClass::Other
            }
        }
    }

    /// Portable numeric code, stable across platforms.
    pub fn code(&self) -> i32 {
        self.class() as i32
    }

    /// Portable human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Name of the domain the failure originated from.
    pub fn category_name(&self) -> &'static str {
        match self {
            Self::NoVolume { .. } => "volume",
            _ => "filesystem",
        }
    }

    /// Raw OS error code, when one was captured.
    pub fn platform_code(&self) -> Option<i32> {
        self.platform().and_then(|p| p.code)
    }

    /// Raw OS error message, when one was captured.
    pub fn platform_message(&self) -> Option<&str> {
        self.platform().map(|p| p.message.as_str())
    }

    /// Path the failure is attached to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::PermissionDenied { path, .. }
            | Self::NotFound { path, .. }
            | Self::Io { path, .. }
            | Self::NoVolume { path }
            | Self::NotADirectory { path } => path,
        }
    }

    /// Whether this failure is on the explicit allow-list of tolerated
    /// codes: exactly the not-found class. A missing entry is recorded
    /// with `exists = false`; everything else aborts the current call.
    pub fn is_tolerated_missing(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }

    fn platform(&self) -> Option<&PlatformError> {
        match self {
            Self::PermissionDenied { platform, .. }
            | Self::NotFound { platform, .. }
            | Self::Io { platform, .. } => Some(platform),
            Self::NoVolume { .. } | Self::NotADirectory { .. } => None,
        }
    }

    /// Render the fixed-field diagnostic block.
    ///
    /// Field order: code, category, message, then platform code and
    /// platform message when a raw OS view was captured.
    pub fn report(&self) -> String {
        fn field(out: &mut String, label: &str, value: &str) {
            out.push_str(&format!("* {label:<18}{value:<46} *\n"));
        }

        let rule = format!("{}\n", "*".repeat(68));
        let blank = format!("* {:<64} *\n", "");

        let mut out = String::new();
        out.push_str(&rule);
        field(&mut out, "ERROR", "");
        out.push_str(&blank);
        field(&mut out, "CODE:", &self.code().to_string());
        field(&mut out, "CATEGORY:", self.category_name());
        field(&mut out, "MESSAGE:", &self.message());
        if let Some(platform) = self.platform() {
            out.push_str(&blank);
            let code = platform
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            field(&mut out, "PLATFORM CODE:", &code);
            field(&mut out, "PLATFORM MESSAGE:", &platform.message);
        }
        out.push_str(&rule);
        out
    }
}

/// Slot holding the most recently observed failure.
///
/// The zero value reports no error; `clear()` resets to that state.
#[derive(Debug, Clone, Default)]
pub struct LastError(Option<OperationError>);

impl LastError {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a failure is currently recorded.
    pub fn is_error(&self) -> bool {
        self.0.is_some()
    }

    /// Record a failure, replacing any previous one.
    pub fn record(&mut self, error: OperationError) {
        self.0 = Some(error);
    }

    /// Reset to the no-error state.
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// The recorded failure, if any.
    pub fn get(&self) -> Option<&OperationError> {
        self.0.as_ref()
    }
}
