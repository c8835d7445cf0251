use crate::area::Area;
use crate::cstring_array::CStringArray;
use crate::pj::Pj;
use crate::proj::Proj;
use crate::ProjError;
use libc::{c_char, c_int, c_void};
use proj_compat_sys::PJ_LOG_LEVEL;
use std::ffi::CString;
use std::{ptr, rc};

/// PROJ thread context
pub(crate) struct ThreadContext(ptr::NonNull<proj_compat_sys::PJ_CONTEXT>);

impl ThreadContext {
    pub fn new() -> Self {
        // Safety: `proj_context_create` always returns a valid pointer to a thread context.
        unsafe {
            let ctx_ptr = proj_compat_sys::proj_context_create();
            ThreadContext::from_raw(ctx_ptr)
        }
    }

    /// # Safety
    ///
    /// Must provide a non-null pointer to a PROJ thread context.
    unsafe fn from_raw(ctx_ptr: *mut proj_compat_sys::PJ_CONTEXT) -> Self {
        debug_assert!(!ctx_ptr.is_null());
        ThreadContext(unsafe { ptr::NonNull::new_unchecked(ctx_ptr) })
    }

    pub fn as_ptr(&self) -> *mut proj_compat_sys::PJ_CONTEXT {
        self.0.as_ptr()
    }

    pub fn errno(&self) -> crate::errno::Errno {
        crate::errno::Errno(unsafe { proj_compat_sys::proj_context_errno(self.as_ptr()) })
    }
}

impl Drop for ThreadContext {
    fn drop(&mut self) {
        // Safety: The pointer being provided to `proj_context_destroy` will always be a valid
        // thread context, so long as the same `ThreadContext` doesn't get dropped twice.
        unsafe { proj_compat_sys::proj_context_destroy(self.0.as_ptr()) };
    }
}

/// How much PROJ reports through the [`log`](https://docs.rs/log) crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    None,
    Error,
    Debug,
    Trace,
    /// PROJ's query value: setting it leaves the current level unchanged.
    Tell,
}

impl LogLevel {
    fn as_raw(self) -> PJ_LOG_LEVEL {
        match self {
            LogLevel::None => proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_NONE,
            LogLevel::Error => proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_ERROR,
            LogLevel::Debug => proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_DEBUG,
            LogLevel::Trace => proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_TRACE,
            LogLevel::Tell => proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_TELL,
        }
    }

    fn from_raw(level: PJ_LOG_LEVEL) -> Self {
        match level {
            proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_ERROR => LogLevel::Error,
            proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_DEBUG => LogLevel::Debug,
            proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_TRACE => LogLevel::Trace,
            proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_TELL => LogLevel::Tell,
            _ => LogLevel::None,
        }
    }
}

/// The `log` level a PROJ message of `level` is recorded at.
fn record_level(level: c_int) -> log::Level {
    match PJ_LOG_LEVEL::try_from(level) {
        Ok(proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_ERROR) => log::Level::Error,
        Ok(proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_DEBUG) => log::Level::Debug,
        Ok(proj_compat_sys::PJ_LOG_LEVEL_PJ_LOG_TRACE) => log::Level::Trace,
        _ => log::Level::Info,
    }
}

/// PROJ log callback: forwards every message to the `log` crate.
unsafe extern "C" fn forward_to_log(_app_data: *mut c_void, level: c_int, msg: *const c_char) {
    if msg.is_null() {
        return;
    }
    let Ok(msg) = (unsafe { crate::_string(msg) }) else {
        return;
    };
    log::log!(target: "proj", record_level(level), "{msg}");
}

/// A PROJ context.
///
/// Every object created through a context keeps it alive, so a `Context` may be
/// dropped before the [`Proj`]s it made. Cloning is cheap and shares the same
/// underlying PROJ context.
///
/// PROJ contexts must not be used from several threads at once; `Context` is
/// neither `Send` nor `Sync`.
#[derive(Clone)]
pub struct Context {
    inner: rc::Rc<ThreadContext>,
}

impl Context {
    /// Create a context with PROJ logging silenced and routed to the `log` crate.
    pub fn new() -> Self {
        let inner = ThreadContext::new();
        unsafe {
            proj_compat_sys::proj_log_level(inner.as_ptr(), LogLevel::None.as_raw());
            proj_compat_sys::proj_log_func(inner.as_ptr(), ptr::null_mut(), Some(forward_to_log));
        }
        Context {
            inner: rc::Rc::new(inner),
        }
    }

    pub(crate) fn thread_context(&self) -> &ThreadContext {
        &self.inner
    }

    pub(crate) fn as_ptr(&self) -> *mut proj_compat_sys::PJ_CONTEXT {
        self.inner.as_ptr()
    }

    pub fn set_log_level(&self, level: LogLevel) {
        unsafe { proj_compat_sys::proj_log_level(self.as_ptr(), level.as_raw()) };
    }

    pub fn log_level(&self) -> LogLevel {
        // PJ_LOG_TELL queries the level without changing it.
        LogLevel::from_raw(unsafe {
            proj_compat_sys::proj_log_level(self.as_ptr(), LogLevel::Tell.as_raw())
        })
    }

    /// Set the directories PROJ searches for resource files such as `proj.db`
    /// and grids. An empty list restores PROJ's defaults.
    pub fn set_search_paths<I, S>(&self, paths: I) -> Result<(), ProjError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = CStringArray::from_strs(paths)?;
        unsafe {
            proj_compat_sys::proj_context_set_search_paths(
                self.as_ptr(),
                paths.c_len(),
                paths.as_ptr(),
            )
        };
        Ok(())
    }

    /// Create an object from a PROJ string, WKT, PROJJSON or `AUTHORITY:CODE`.
    ///
    /// ```
    /// let ctx = proj_compat::Context::new();
    /// let swiss = ctx.proj("EPSG:2056").unwrap();
    /// assert!(swiss.is_crs());
    /// assert!(ctx.proj("invalid").is_err());
    /// ```
    pub fn proj(&self, definition: &str) -> Result<Proj, ProjError> {
        let c_definition = CString::new(definition)?;
        let pj_ptr = unsafe { proj_compat_sys::proj_create(self.as_ptr(), c_definition.as_ptr()) };
        Pj::from_pj_ptr(self.clone(), pj_ptr).map(Proj::from_pj)
    }

    /// Create an object from `key=value` arguments, as in `proj_create_argv`.
    pub fn proj_from_args<S: AsRef<str>>(&self, args: &[S]) -> Result<Proj, ProjError> {
        if args.is_empty() {
            return Err(ProjError::InvalidArgument(
                "at least one argument is required".to_string(),
            ));
        }
        let args = CStringArray::from_strs(args)?;
        let pj_ptr = unsafe {
            proj_compat_sys::proj_create_argv(
                self.as_ptr(),
                args.c_len(),
                args.as_ptr().cast_mut().cast::<*mut c_char>(),
            )
        };
        Pj::from_pj_ptr(self.clone(), pj_ptr).map(Proj::from_pj)
    }

    /// Create a transformation between two CRS, optionally limited to `area`.
    pub fn crs_to_crs(
        &self,
        source_crs: &str,
        target_crs: &str,
        area: Option<&Area>,
    ) -> Result<Proj, ProjError> {
        let source_crs = CString::new(source_crs)?;
        let target_crs = CString::new(target_crs)?;
        let pj_ptr = unsafe {
            proj_compat_sys::proj_create_crs_to_crs(
                self.as_ptr(),
                source_crs.as_ptr(),
                target_crs.as_ptr(),
                area.map_or(ptr::null_mut(), Area::as_ptr),
            )
        };
        Pj::from_pj_ptr(self.clone(), pj_ptr).map(Proj::from_pj)
    }

    /// Create a transformation between two CRS objects.
    ///
    /// `options` are `KEY=VALUE` strings such as `AUTHORITY=EPSG` or
    /// `ALLOW_BALLPARK=NO`; see the PROJ documentation of
    /// `proj_create_crs_to_crs_from_pj` for the supported keys.
    pub fn crs_to_crs_from_pj<S: AsRef<str>>(
        &self,
        source_crs: &Proj,
        target_crs: &Proj,
        area: Option<&Area>,
        options: &[S],
    ) -> Result<Proj, ProjError> {
        let options = CStringArray::from_strs(options)?;
        let pj_ptr = unsafe {
            proj_compat_sys::proj_create_crs_to_crs_from_pj(
                self.as_ptr(),
                source_crs.as_ptr(),
                target_crs.as_ptr(),
                area.map_or(ptr::null_mut(), Area::as_ptr),
                options.as_ptr(),
            )
        };
        Pj::from_pj_ptr(self.clone(), pj_ptr).map(Proj::from_pj)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
