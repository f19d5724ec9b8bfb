//! Real Symbol Storage
//!
//! Provides access to the next definition of an interposed symbol, found with
//! `dlsym(RTLD_NEXT)`, so the layer never calls back into itself.

use libc::{c_char, c_void};
use std::sync::atomic::{AtomicPtr, Ordering};

/// Lazily located pointer to the real definition of a libc symbol.
///
/// Only a successful lookup is stored, so a failed lookup is retried on the
/// next call. Threads racing on the first call each store the same pointer.
pub struct RealSymbol {
    ptr: AtomicPtr<c_void>,
    name: &'static str,
}

impl RealSymbol {
    /// `name` must be NUL-terminated.
    pub const fn new(name: &'static str) -> Self {
        Self {
            ptr: AtomicPtr::new(std::ptr::null_mut()),
            name,
        }
    }

    /// Symbol name without the trailing NUL.
    pub fn name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }

    /// Get the real function pointer, or None if the loader has no next
    /// definition.
    pub unsafe fn get(&self) -> Option<*mut c_void> {
        let p = self.ptr.load(Ordering::Acquire);
        if !p.is_null() {
            return Some(p);
        }
        // Clear any stale error so the check below reflects this lookup only.
        libc::dlerror();
        let f = libc::dlsym(libc::RTLD_NEXT, self.name.as_ptr() as *const c_char);
        if f.is_null() || !libc::dlerror().is_null() {
            return None;
        }
        self.ptr.store(f, Ordering::Release);
        Some(f)
    }
}

pub static REAL_GETHOSTBYNAME: RealSymbol = RealSymbol::new("gethostbyname\0");
