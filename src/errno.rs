use crate::context::ThreadContext;
use std::str;

pub(crate) struct Errno(pub libc::c_int);

impl Errno {
    pub fn is_err(&self) -> bool {
        self.0 != 0
    }

    /// PROJ's text for this error number.
    ///
    /// Goes through `proj_context_errno_string`, which is the legacy
    /// `proj_errno_string` on PROJ < 8.
    pub fn message(&self, context: &ThreadContext) -> Result<String, str::Utf8Error> {
        let raw = unsafe { proj_compat_sys::proj_context_errno_string(context.as_ptr(), self.0) };
        if raw.is_null() {
            Ok(format!("Unknown error (code {})", self.0))
        } else {
            unsafe { crate::_string(raw) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_success() {
        assert!(!Errno(0).is_err());
        assert!(Errno(1025).is_err());
        assert!(Errno(-14).is_err());
    }

    #[test]
    fn every_error_has_a_message() {
        let ctx = ThreadContext::new();
        for code in [-1, -14, 1024, 1025, 2049, 4096] {
            let message = Errno(code).message(&ctx).unwrap();
            assert!(!message.is_empty(), "errno {code}");
        }
    }
}
