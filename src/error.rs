use crate::Version;
use std::ffi::NulError;
use std::str::Utf8Error;
use thiserror::Error;

/// Errors reported by this crate.
///
/// PROJ failures display as PROJ's own message, so they read the same as the
/// messages printed by the PROJ command line tools.
#[derive(Error, Debug)]
pub enum ProjError {
    /// PROJ could not create an object from the given definition or arguments.
    #[error("{message}")]
    Create { code: i32, message: String },
    /// A transformation or other operation on an existing object failed.
    #[error("{message}")]
    Projection { code: i32, message: String },
    #[error("{operation} requires PROJ {required} or later, but PROJ {compiled} was compiled in")]
    Unsupported {
        operation: &'static str,
        required: Version,
        compiled: Version,
    },
    #[error("A nul byte was found in a string argument: {0}")]
    Nul(#[from] NulError),
    #[error("A UTF8 error occurred when reading a string returned by PROJ")]
    Utf8(#[from] Utf8Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ProjError {
    /// The PROJ error number, for errors that originate in PROJ.
    pub fn code(&self) -> Option<i32> {
        match self {
            ProjError::Create { code, .. } | ProjError::Projection { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn proj_errors_display_the_proj_message() {
        let err = ProjError::Projection {
            code: 2049,
            message: "Invalid coordinate".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid coordinate");
        assert_eq!(err.code(), Some(2049));
    }

    #[test]
    fn unsupported_names_both_versions() {
        let err = ProjError::Unsupported {
            operation: "proj_trans_bounds",
            required: Version::new(8, 2, 0),
            compiled: Version::new(7, 2, 1),
        };
        assert_eq!(
            err.to_string(),
            "proj_trans_bounds requires PROJ 8.2.0 or later, but PROJ 7.2.1 was compiled in"
        );
        assert_eq!(err.code(), None);
    }

    #[test]
    fn nul_errors_convert() {
        let nul = CString::new("EPSG:\04326").unwrap_err();
        let err: ProjError = nul.into();
        assert!(matches!(err, ProjError::Nul(_)));
    }
}
