use std::fmt;

/// A PROJ release number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// The first release providing `gate`'s function.
    pub const fn of_gate(gate: &proj_compat_sys::VersionGate) -> Self {
        Version::new(gate.major, gate.minor, 0)
    }

    fn passes(&self, gate: &proj_compat_sys::VersionGate) -> bool {
        !gate.is_gated(self.major, self.minor)
    }

    /// Whether `proj_context_errno_string` is PROJ's own rather than a stand-in.
    pub fn has_context_errno_string(&self) -> bool {
        self.passes(&proj_compat_sys::CONTEXT_ERRNO_STRING)
    }

    /// Whether `proj_trans_bounds` is PROJ's own rather than a stand-in.
    pub fn has_trans_bounds(&self) -> bool {
        self.passes(&proj_compat_sys::TRANS_BOUNDS)
    }

    /// Whether `proj_trans_get_last_used_operation` is PROJ's own rather than a stand-in.
    pub fn has_last_used_operation(&self) -> bool {
        self.passes(&proj_compat_sys::LAST_USED_OPERATION)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The version of the `proj.h` this crate was compiled against.
///
/// This is the version that decides which entry points are stand-ins.
pub fn compiled_version() -> Version {
    Version::new(
        proj_compat_sys::PROJ_VERSION_MAJOR,
        proj_compat_sys::PROJ_VERSION_MINOR,
        proj_compat_sys::PROJ_VERSION_PATCH,
    )
}

/// The version reported by the PROJ library linked at runtime.
pub fn runtime_version() -> Version {
    let info = unsafe { proj_compat_sys::proj_info() };
    let part = |n: libc::c_int| u32::try_from(n).unwrap_or_default();
    Version::new(part(info.major), part(info.minor), part(info.patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_major_then_minor_then_patch() {
        assert!(Version::new(8, 1, 9) < Version::new(8, 2, 0));
        assert!(Version::new(8, 2, 0) < Version::new(9, 0, 0));
        assert!(Version::new(9, 1, 1) > Version::new(9, 1, 0));
        assert_eq!(Version::new(9, 4, 0).to_string(), "9.4.0");
    }

    #[test]
    fn thresholds() {
        assert!(!Version::new(7, 2, 1).has_context_errno_string());
        assert!(Version::new(8, 0, 0).has_context_errno_string());

        assert!(!Version::new(8, 1, 1).has_trans_bounds());
        assert!(Version::new(8, 2, 0).has_trans_bounds());
        assert!(Version::new(9, 0, 0).has_trans_bounds());

        assert!(!Version::new(8, 2, 1).has_last_used_operation());
        assert!(!Version::new(9, 0, 1).has_last_used_operation());
        assert!(Version::new(9, 1, 0).has_last_used_operation());
        assert!(Version::new(10, 0, 0).has_last_used_operation());
    }

    #[test]
    fn gate_versions() {
        assert_eq!(Version::of_gate(&proj_compat_sys::TRANS_BOUNDS), Version::new(8, 2, 0));
        assert_eq!(
            Version::of_gate(&proj_compat_sys::LAST_USED_OPERATION),
            Version::new(9, 1, 0)
        );
    }

    #[test]
    fn compiled_version_agrees_with_version_gates() {
        let compiled = compiled_version();
        assert_eq!(compiled.has_context_errno_string(), !cfg!(proj_before_8));
        assert_eq!(compiled.has_trans_bounds(), !cfg!(proj_before_8_2));
        assert_eq!(compiled.has_last_used_operation(), !cfg!(proj_before_9_1));
    }

    #[test]
    fn runtime_version_is_at_least_the_minimum() {
        assert!(runtime_version() >= Version::new(6, 2, 0));
    }
}
