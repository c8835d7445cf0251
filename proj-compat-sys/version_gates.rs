// Shared by build.rs, which turns these gates into cfgs, and by the library,
// which exposes them so the thresholds are tested where they are defined.

/// An entry point PROJ only provides from `major.minor` on. While the
/// compiled PROJ is older, `cfg` is set and a stand-in is compiled instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    pub function: &'static str,
    pub cfg: &'static str,
    pub major: u32,
    pub minor: u32,
}

impl VersionGate {
    /// Whether PROJ `major.minor` needs the stand-in.
    pub const fn is_gated(&self, major: u32, minor: u32) -> bool {
        major < self.major || (major == self.major && minor < self.minor)
    }
}

pub const CONTEXT_ERRNO_STRING: VersionGate = VersionGate {
    function: "proj_context_errno_string",
    cfg: "proj_before_8",
    major: 8,
    minor: 0,
};

pub const TRANS_BOUNDS: VersionGate = VersionGate {
    function: "proj_trans_bounds",
    cfg: "proj_before_8_2",
    major: 8,
    minor: 2,
};

pub const LAST_USED_OPERATION: VersionGate = VersionGate {
    function: "proj_trans_get_last_used_operation",
    cfg: "proj_before_9_1",
    major: 9,
    minor: 1,
};

pub const VERSION_GATES: [VersionGate; 3] = [CONTEXT_ERRNO_STRING, TRANS_BOUNDS, LAST_USED_OPERATION];

/// The cfgs to set when compiling against PROJ `major.minor`.
pub fn gated_cfgs(major: u32, minor: u32) -> impl Iterator<Item = &'static str> {
    VERSION_GATES
        .into_iter()
        .filter(move |gate| gate.is_gated(major, minor))
        .map(|gate| gate.cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfgs(major: u32, minor: u32) -> Vec<&'static str> {
        gated_cfgs(major, minor).collect()
    }

    #[test]
    fn boundaries() {
        assert_eq!(cfgs(6, 2), ["proj_before_8", "proj_before_8_2", "proj_before_9_1"]);
        assert_eq!(cfgs(7, 9), ["proj_before_8", "proj_before_8_2", "proj_before_9_1"]);
        assert_eq!(cfgs(8, 0), ["proj_before_8_2", "proj_before_9_1"]);
        assert_eq!(cfgs(8, 1), ["proj_before_8_2", "proj_before_9_1"]);
        assert_eq!(cfgs(8, 2), ["proj_before_9_1"]);
        assert_eq!(cfgs(8, 9), ["proj_before_9_1"]);
        assert_eq!(cfgs(9, 0), ["proj_before_9_1"]);
        assert!(cfgs(9, 1).is_empty());
        assert!(cfgs(9, 7).is_empty());
        assert!(cfgs(10, 0).is_empty());
    }

    #[test]
    fn compiled_cfgs_match_the_header() {
        let expected = cfgs(crate::PROJ_VERSION_MAJOR, crate::PROJ_VERSION_MINOR);
        let mut set = Vec::new();
        if cfg!(proj_before_8) {
            set.push("proj_before_8");
        }
        if cfg!(proj_before_8_2) {
            set.push("proj_before_8_2");
        }
        if cfg!(proj_before_9_1) {
            set.push("proj_before_9_1");
        }
        assert_eq!(expected, set);
    }
}
