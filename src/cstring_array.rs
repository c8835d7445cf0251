use libc::{c_char, c_int};
use std::ffi::{CString, NulError};
use std::ptr;

/// Owned C strings plus the NULL-terminated `char *const *` view of them
/// that PROJ takes for option lists, argument vectors and search paths.
pub(crate) struct CStringArray {
    cstrings: Vec<CString>,
    // Always ends with a null pointer.
    ptrs: Vec<*const c_char>,
}

impl CStringArray {
    /// Convert every item, failing on the first one with an interior NUL.
    pub fn from_strs<I, S>(items: I) -> Result<Self, NulError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cstrings = items
            .into_iter()
            .map(|s| CString::new(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let ptrs = cstrings
            .iter()
            .map(|s| s.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();
        Ok(CStringArray { cstrings, ptrs })
    }

    pub fn len(&self) -> usize {
        self.cstrings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cstrings.is_empty()
    }

    /// Count in the form PROJ's `argc`/`count_paths` parameters take.
    pub fn c_len(&self) -> c_int {
        c_int::try_from(self.len()).unwrap_or(c_int::MAX)
    }

    /// The pointer array, or null when there are no strings; PROJ documents
    /// NULL, not an empty list, for "no options".
    pub fn as_ptr(&self) -> *const *const c_char {
        if self.is_empty() {
            ptr::null()
        } else {
            self.ptrs.as_ptr()
        }
    }
}
