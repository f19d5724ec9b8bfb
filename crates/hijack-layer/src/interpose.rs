//! Symbol exports.
//!
//! Loaded ahead of libc, the exported `gethostbyname` binds in place of the
//! real one. On macOS this relies on `DYLD_FORCE_FLAT_NAMESPACE=1`, which the
//! launcher sets alongside `DYLD_INSERT_LIBRARIES`.

use crate::reals::REAL_GETHOSTBYNAME;
use crate::syslog::Syslog;
use hijack_core::sys::{GethostbynameFn, HostEntryRef};
use hijack_core::{decide, Decision, HijackConfig, HijackLog, LogEvent};
use libc::{c_char, hostent};
use std::ffi::CStr;

#[no_mangle]
pub unsafe extern "C" fn gethostbyname(name: *const c_char) -> *mut hostent {
    gethostbyname_hijack(name)
}

/// Delegate, then rewrite the first address of a matching result in place.
///
/// The returned `hostent` is the real resolver's own buffer; failures from the
/// real resolver come back exactly as it produced them.
pub unsafe fn gethostbyname_hijack(name: *const c_char) -> *mut hostent {
    let log = Syslog::open();

    let Some(real) = REAL_GETHOSTBYNAME.get() else {
        log.record(&LogEvent::SymbolMissing {
            symbol: REAL_GETHOSTBYNAME.name(),
        });
        return std::ptr::null_mut();
    };
    let real = std::mem::transmute::<*mut libc::c_void, GethostbynameFn>(real);

    let h = real(name);
    if h.is_null() || name.is_null() {
        return h;
    }

    let config = HijackConfig::from_env();
    let Some(mut entry) = HostEntryRef::from_raw(h) else {
        return h;
    };
    // Unknown family or inconsistent h_length: leave it alone.
    let Some(family) = entry.family() else {
        return h;
    };

    let queried = CStr::from_ptr(name).to_bytes();
    if let Decision::Replace { from, to } =
        decide(queried, family, entry.first_address(), &config)
    {
        log.record(&LogEvent::Hijacked {
            name: &String::from_utf8_lossy(queried),
            from,
            to: config.addr.as_deref().unwrap_or_default(),
        });
        entry.set_first_address(to);
    }

    h
}
