#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
//! `proj-compat` provides bindings to the [PROJ](https://proj.org) C API that
//! behave the same whichever PROJ release between 6.2 and 9.x is installed.
//!
//! Three entry points only exist in newer PROJ releases:
//! `proj_context_errno_string` (8.0), `proj_trans_bounds` (8.2) and
//! `proj_trans_get_last_used_operation` (9.1). `proj-compat-sys` defines
//! stand-ins for them when compiled against an older `proj.h`, and this crate
//! maps the stand-ins' sentinel results onto the safe API:
//!
//! - error messages always come from the context-aware lookup, falling back
//!   to the legacy one on PROJ < 8;
//! - [`Proj::trans_bounds`] returns [`ProjError::Unsupported`] on PROJ < 8.2;
//! - [`Proj::last_used_operation`] returns `None` on PROJ < 9.1.
//!
//! # Usage
//!
//! Objects are created either through a [`Context`], which lets you set the log
//! level and resource search paths and share one PROJ context between many
//! objects, or directly with [`Proj::new`] / [`Proj::new_known_crs`], which use
//! a private context each.
//!
//! Contexts are not thread safe, so neither `Context` nor `Proj` is `Send`:
//! create one context per thread.
//!
//! PROJ's own diagnostics are forwarded to the [`log`](https://docs.rs/log)
//! crate once a context's [`LogLevel`] is raised above `None`.
//!
//! # Example
//!
//! ```
//! use approx::assert_abs_diff_eq;
//! use proj_compat::{Context, Coord};
//!
//! let ctx = Context::new();
//! let to_web_mercator = ctx.crs_to_crs("EPSG:4326", "EPSG:3857", None).unwrap();
//!
//! // Zürich, latitude first as EPSG:4326 mandates.
//! let zurich = Coord::new(47.374444, 8.541111, 408.0, 0.0);
//! let projected = to_web_mercator.forward(zurich).unwrap();
//! assert_abs_diff_eq!(projected.x(), 950792.127329, epsilon = 1e-3);
//! assert_abs_diff_eq!(projected.y(), 6003408.475803, epsilon = 1e-3);
//!
//! let back = to_web_mercator.inverse(projected).unwrap();
//! assert_abs_diff_eq!(back.x(), zurich.x(), epsilon = 1e-6);
//! ```
//!
//! # Requirements
//!
//! `libproj` 6.2 or later must be discoverable with `pkg-config`, or the
//! `bundled_proj` feature must be enabled together with a
//! `PROJ_COMPAT_SYS_SOURCE` tarball; see `proj-compat-sys`.
//!
//! The `geo-types` feature (on by default) adds the [`Transform`] trait for
//! [`geo-types`](https://docs.rs/geo-types) geometries.

use libc::c_char;
use std::ffi::CStr;
use std::str;

mod area;
mod context;
mod coord;
mod cstring_array;
mod errno;
mod error;
#[cfg(feature = "geo-types")]
mod geo_types;
mod pj;
mod proj;
#[cfg(feature = "geo-types")]
mod transform;
mod version;

pub use crate::area::Area;
pub use crate::context::{Context, LogLevel};
pub use crate::coord::{Bounds, Coord, Direction, Geod, coords_from_slices};
pub use crate::error::ProjError;
pub use crate::proj::{Proj, ProjInfo};
#[cfg(feature = "geo-types")]
pub use crate::transform::Transform;
pub use crate::version::{Version, compiled_version, runtime_version};

/// Copy a NUL-terminated string owned by PROJ.
///
/// # Safety
///
/// `raw_ptr` must be non-null and point to a NUL-terminated string.
pub(crate) unsafe fn _string(raw_ptr: *const c_char) -> Result<String, str::Utf8Error> {
    let c_str = unsafe { CStr::from_ptr(raw_ptr) };
    Ok(str::from_utf8(c_str.to_bytes())?.to_string())
}

/// Like [`_string`], but a null pointer yields an empty string.
///
/// # Safety
///
/// `raw_ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn _string_or_empty(raw_ptr: *const c_char) -> Result<String, str::Utf8Error> {
    if raw_ptr.is_null() {
        Ok(String::new())
    } else {
        unsafe { _string(raw_ptr) }
    }
}
