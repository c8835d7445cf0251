use crate::context::Context;
use crate::errno::Errno;
use crate::ProjError;
use std::ptr;

/// A safe wrapper around `proj_compat_sys::PJ`.
pub(crate) struct Pj {
    pj: ptr::NonNull<proj_compat_sys::PJ>,
    ctx: Context,
}

impl Pj {
    /// Take ownership of a freshly created object, or turn a null result into
    /// the context's current error.
    pub fn from_pj_ptr(ctx: Context, pj_ptr: *mut proj_compat_sys::PJ) -> Result<Self, ProjError> {
        match ptr::NonNull::new(pj_ptr) {
            Some(pj) => Ok(Pj { pj, ctx }),
            None => {
                let errno = ctx.thread_context().errno();
                let message = errno.message(ctx.thread_context())?;
                log::debug!("PROJ object creation failed ({}): {message}", errno.0);
                Err(ProjError::Create {
                    code: errno.0,
                    message,
                })
            }
        }
    }

    /// Take ownership of an object PROJ may legitimately not return.
    pub fn from_pj_ptr_opt(ctx: Context, pj_ptr: *mut proj_compat_sys::PJ) -> Option<Self> {
        ptr::NonNull::new(pj_ptr).map(|pj| Pj { pj, ctx })
    }

    pub fn as_ptr(&self) -> *mut proj_compat_sys::PJ {
        self.pj.as_ptr()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run `f` with a cleared error number, returning its result and the error
    /// number it left behind. The previous error number is restored afterwards.
    pub fn with_errno<T>(&self, f: impl FnOnce(*mut proj_compat_sys::PJ) -> T) -> (T, Errno) {
        let p = self.as_ptr();
        unsafe {
            let saved = proj_compat_sys::proj_errno_reset(p);
            let out = f(p);
            let errno = Errno(proj_compat_sys::proj_errno(p));
            proj_compat_sys::proj_errno_restore(p, saved);
            (out, errno)
        }
    }

    pub fn error(&self, errno: Errno) -> ProjError {
        match errno.message(self.ctx.thread_context()) {
            Ok(message) => ProjError::Projection {
                code: errno.0,
                message,
            },
            Err(err) => ProjError::Utf8(err),
        }
    }
}

impl Drop for Pj {
    fn drop(&mut self) {
        unsafe {
            proj_compat_sys::proj_destroy(self.as_ptr());
        }
    }
}
