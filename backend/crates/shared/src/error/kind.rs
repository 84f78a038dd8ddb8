//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to process exit codes.

/// Error classification
///
/// Each variant maps to a `sysexits(3)` style exit status so that tooling
/// driving the generator can tell caller mistakes from internal failures.
///
/// ## Notes
/// * `non_exhaustive` - more variants may be added later
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::InvalidInput;
/// assert_eq!(kind.exit_code(), 65);
/// assert_eq!(kind.as_str(), "Invalid Input");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 65 - EX_DATAERR: input data is malformed
    InvalidInput,
    /// 65 - EX_DATAERR: input is well-formed but breaks a required contract
    ContractViolation,
    /// 66 - EX_NOINPUT: an input file does not exist
    NotFound,
    /// 70 - EX_SOFTWARE: serialization of generated output failed
    Serialization,
    /// 74 - EX_IOERR: reading or writing failed
    Io,
    /// 77 - EX_NOPERM: permission denied
    PermissionDenied,
    /// 78 - EX_CONFIG: configuration is missing or invalid
    InvalidConfiguration,
}

impl ErrorKind {
    /// Process exit code for this kind
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::NotFound.exit_code(), 66);
    /// assert_eq!(ErrorKind::InvalidConfiguration.exit_code(), 78);
    /// ```
    #[inline]
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::InvalidInput | ErrorKind::ContractViolation => 65,
            ErrorKind::NotFound => 66,
            ErrorKind::Serialization => 70,
            ErrorKind::Io => 74,
            ErrorKind::PermissionDenied => 77,
            ErrorKind::InvalidConfiguration => 78,
        }
    }

    /// Human readable name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid Input",
            ErrorKind::ContractViolation => "Contract Violation",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Serialization => "Serialization Error",
            ErrorKind::Io => "I/O Error",
            ErrorKind::PermissionDenied => "Permission Denied",
            ErrorKind::InvalidConfiguration => "Invalid Configuration",
        }
    }

    /// Whether the caller can fix this by changing its input or configuration
    ///
    /// Caller errors are logged at warn level, everything else at error.
    #[inline]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidInput
                | ErrorKind::ContractViolation
                | ErrorKind::NotFound
                | ErrorKind::InvalidConfiguration
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorKind::InvalidInput.exit_code(), 65);
        assert_eq!(ErrorKind::ContractViolation.exit_code(), 65);
        assert_eq!(ErrorKind::NotFound.exit_code(), 66);
        assert_eq!(ErrorKind::Serialization.exit_code(), 70);
        assert_eq!(ErrorKind::Io.exit_code(), 74);
        assert_eq!(ErrorKind::PermissionDenied.exit_code(), 77);
        assert_eq!(ErrorKind::InvalidConfiguration.exit_code(), 78);
    }

    #[test]
    fn test_is_caller_error() {
        assert!(ErrorKind::InvalidInput.is_caller_error());
        assert!(ErrorKind::ContractViolation.is_caller_error());
        assert!(ErrorKind::NotFound.is_caller_error());
        assert!(ErrorKind::InvalidConfiguration.is_caller_error());
        assert!(!ErrorKind::Serialization.is_caller_error());
        assert!(!ErrorKind::Io.is_caller_error());
        assert!(!ErrorKind::PermissionDenied.is_caller_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorKind::ContractViolation.to_string(), "Contract Violation");
    }
}
