#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
//! # Low-level bindings for PROJ 6.2 and later
//!
//! **This is a
//! [`*-sys`](https://doc.rust-lang.org/cargo/reference/build-scripts.html#-sys-packages)
//! crate; you shouldn't use its API directly.** See the `proj-compat` crate
//! for general use.
//!
//! A guide to the functions can be found here:
//! <https://proj.org/development/reference/functions.html>.
//!
//! By default, the crate will search for an existing `libproj` installation on
//! your system using
//! [pkg-config](https://www.freedesktop.org/wiki/Software/pkg-config/).
//! If none is found, libproj is built from the source tarball named by the
//! `PROJ_COMPAT_SYS_SOURCE` environment variable.
//!
//! ## Version stand-ins
//!
//! A handful of entry points only exist in newer PROJ releases. When the
//! installed `proj.h` predates them, this crate defines them itself so the
//! same names resolve on every supported version:
//!
//! | function                             | real since | stand-in behaviour                  |
//! |--------------------------------------|------------|-------------------------------------|
//! | `proj_context_errno_string`          | 8.0        | forwards to `proj_errno_string`     |
//! | `proj_trans_bounds`                  | 8.2        | returns `1`, outputs left untouched |
//! | `proj_trans_get_last_used_operation` | 9.1        | returns null                        |
//!
//! The version the crate was compiled against is available as
//! [`PROJ_VERSION_MAJOR`], [`PROJ_VERSION_MINOR`] and [`PROJ_VERSION_PATCH`],
//! and is published to dependent build scripts as `DEP_PROJ_VERSION_MAJOR`,
//! `DEP_PROJ_VERSION_MINOR` and `DEP_PROJ_VERSION_PATCH`. The cfgs that were
//! set are published as the comma separated `DEP_PROJ_CFGS`, and the
//! thresholds themselves are [`VERSION_GATES`].
//!
//! ## Features
//!
//! `bundled_proj` - forces building libproj from source even if an acceptable
//! version could be found on your system. Note that SQLite3 must be present on
//! your system if you wish to use this feature (or enable
//! `bundled_proj_sqlite`), and that it builds `libproj` **without** its native
//! network functionality.
//!
//! `tiff` - enables TIFF grid support in a source build.

extern crate libsqlite3_sys;
extern crate link_cplusplus;

include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

mod compat;
#[path = "../version_gates.rs"]
mod version_gates;

#[allow(unused_imports)]
pub use compat::*;
pub use version_gates::{
    CONTEXT_ERRNO_STRING, LAST_USED_OPERATION, TRANS_BOUNDS, VERSION_GATES, VersionGate,
    gated_cfgs,
};
