//! Stand-ins for PROJ entry points that older releases lack.
//!
//! Every item here is gated on a `proj_before_*` cfg set by the build script
//! from the `PROJ_VERSION_*` macros of the `proj.h` being compiled against.
//! On a recent enough PROJ the gate is off, nothing here is compiled, and the
//! bindgen declaration of the real function is the only one in scope.
//!
//! The symbols are unmangled so C objects linked into the same artifact see
//! them too.

#[cfg(any(proj_before_8, proj_before_8_2))]
use crate::PJ_CONTEXT;
#[cfg(any(proj_before_8_2, proj_before_9_1))]
use crate::PJ;
#[cfg(proj_before_8_2)]
use crate::PJ_DIRECTION;
#[cfg(any(proj_before_8, proj_before_8_2))]
use std::os::raw::c_int;
#[cfg(proj_before_8)]
use std::os::raw::c_char;

/// PROJ < 8.0: forwards to the context-free `proj_errno_string`.
///
/// # Safety
///
/// `ctx` is ignored and may be anything, including null.
#[cfg(proj_before_8)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn proj_context_errno_string(
    _ctx: *mut PJ_CONTEXT,
    err: c_int,
) -> *const c_char {
    unsafe { crate::proj_errno_string(err) }
}

/// PROJ < 8.2: always returns `1` and never writes through the output
/// pointers. There is no older routine to fall back to.
///
/// # Safety
///
/// None of the pointers are dereferenced.
#[cfg(proj_before_8_2)]
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn proj_trans_bounds(
    _context: *mut PJ_CONTEXT,
    _P: *mut PJ,
    _direction: PJ_DIRECTION,
    _xmin: f64,
    _ymin: f64,
    _xmax: f64,
    _ymax: f64,
    _out_xmin: *mut f64,
    _out_ymin: *mut f64,
    _out_xmax: *mut f64,
    _out_ymax: *mut f64,
    _densify_pts: c_int,
) -> c_int {
    1
}

/// PROJ < 9.1: there is never a last used operation to report.
///
/// # Safety
///
/// `P` is not dereferenced.
#[cfg(proj_before_9_1)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn proj_trans_get_last_used_operation(_P: *mut PJ) -> *mut PJ {
    std::ptr::null_mut()
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::ffi::{CStr, CString};
    use std::os::raw::c_char;
    use std::ptr;

    fn message(ptr: *const c_char) -> Option<String> {
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
        }
    }

    /// Context plus a transformation from `source` to `target`, torn down on drop.
    struct Fixture {
        ctx: *mut PJ_CONTEXT,
        pj: *mut PJ,
    }

    impl Fixture {
        fn new(source: &str, target: &str) -> Self {
            let source = CString::new(source).unwrap();
            let target = CString::new(target).unwrap();
            unsafe {
                let ctx = proj_context_create();
                let pj = proj_create_crs_to_crs(
                    ctx,
                    source.as_ptr(),
                    target.as_ptr(),
                    ptr::null_mut(),
                );
                assert!(!pj.is_null());
                Fixture { ctx, pj }
            }
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            unsafe {
                proj_destroy(self.pj);
                proj_context_destroy(self.ctx);
            }
        }
    }

    #[cfg(proj_before_8)]
    #[test]
    fn errno_string_matches_legacy_lookup_for_any_context() {
        let fixture = Fixture::new("EPSG:4326", "EPSG:3857");
        for err in -60..=0 {
            let legacy = message(unsafe { proj_errno_string(err) });
            let with_null = message(unsafe { proj_context_errno_string(ptr::null_mut(), err) });
            let with_ctx = message(unsafe { proj_context_errno_string(fixture.ctx, err) });
            assert_eq!(legacy, with_null, "errno {err}");
            assert_eq!(legacy, with_ctx, "errno {err}");
        }
    }

    #[cfg(not(proj_before_8))]
    #[test]
    fn errno_string_is_upstream() {
        let definition = CString::new("invalid").unwrap();
        unsafe {
            let ctx = proj_context_create();
            assert!(proj_create(ctx, definition.as_ptr()).is_null());
            let err = proj_context_errno(ctx);
            assert_ne!(err, 0);
            let msg = message(proj_context_errno_string(ctx, err)).unwrap();
            assert!(!msg.is_empty());
            proj_context_destroy(ctx);
        }
    }

    #[cfg(proj_before_8_2)]
    #[test]
    fn trans_bounds_returns_sentinel_and_leaves_outputs() {
        let fixture = Fixture::new("EPSG:4326", "EPSG:2056");
        for (ctx, pj) in [
            (ptr::null_mut(), ptr::null_mut()),
            (fixture.ctx, fixture.pj),
        ] {
            let mut out = [-1.5, f64::NAN, 42.0, f64::INFINITY];
            let [out_xmin, out_ymin, out_xmax, out_ymax] = &mut out;
            let rv = unsafe {
                proj_trans_bounds(
                    ctx,
                    pj,
                    PJ_DIRECTION_PJ_FWD,
                    46.948056,
                    7.4475,
                    47.374444,
                    8.541111,
                    out_xmin,
                    out_ymin,
                    out_xmax,
                    out_ymax,
                    21,
                )
            };
            assert_eq!(rv, 1);
            assert_eq!(out[0], -1.5);
            assert!(out[1].is_nan());
            assert_eq!(out[2], 42.0);
            assert_eq!(out[3], f64::INFINITY);
        }
    }

    #[cfg(not(proj_before_8_2))]
    #[test]
    fn trans_bounds_is_upstream() {
        let fixture = Fixture::new("EPSG:4326", "EPSG:2056");
        let (mut xmin, mut ymin, mut xmax, mut ymax) = (f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        let rv = unsafe {
            proj_trans_bounds(
                fixture.ctx,
                fixture.pj,
                PJ_DIRECTION_PJ_FWD,
                46.948056,
                7.4475,
                47.374444,
                8.541111,
                &mut xmin,
                &mut ymin,
                &mut xmax,
                &mut ymax,
                21,
            )
        };
        assert_ne!(rv, 0);
        assert!((xmin - 2600675.0876650945).abs() < 1e3);
        assert!((ymin - 1199663.542715189).abs() < 1e3);
        assert!((xmax - 2683263.251826082).abs() < 1e3);
        assert!((ymax - 1247651.9664695852).abs() < 1e3);
    }

    #[test]
    fn last_used_operation_is_null_before_any_transform() {
        let fixture = Fixture::new("EPSG:4326", "EPSG:2056");
        assert!(unsafe { proj_trans_get_last_used_operation(fixture.pj) }.is_null());
    }

    #[cfg(proj_before_9_1)]
    #[test]
    fn last_used_operation_stays_null() {
        let fixture = Fixture::new("EPSG:4326", "EPSG:2056");
        assert!(unsafe { proj_trans_get_last_used_operation(ptr::null_mut()) }.is_null());

        let coord = PJ_COORD {
            v: [46.948056, 7.4475, 540.0, 0.0],
        };
        unsafe { proj_trans(fixture.pj, PJ_DIRECTION_PJ_FWD, coord) };
        assert!(unsafe { proj_trans_get_last_used_operation(fixture.pj) }.is_null());
    }
}
