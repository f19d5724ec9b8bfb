//! System log channel.
//!
//! A channel is opened for one intercepted call and closed when dropped; the
//! layer holds no logging state between calls.

use hijack_core::{HijackLog, LogEvent};
use libc::c_char;
use std::ffi::CString;

const IDENT: &[u8] = b"dns_hijack\0";

pub struct Syslog(());

impl Syslog {
    pub fn open() -> Self {
        unsafe {
            libc::openlog(
                IDENT.as_ptr() as *const c_char,
                libc::LOG_CONS | libc::LOG_PID | libc::LOG_NDELAY,
                libc::LOG_LOCAL7,
            );
        }
        Syslog(())
    }
}

impl HijackLog for Syslog {
    fn record(&self, event: &LogEvent<'_>) {
        let priority = if event.is_error() {
            libc::LOG_ERR
        } else {
            libc::LOG_INFO
        };
        // Hostnames reaching us come from C strings and carry no NUL.
        let Ok(message) = CString::new(event.to_string()) else {
            return;
        };
        unsafe {
            libc::syslog(
                priority,
                b"%s\0".as_ptr() as *const c_char,
                message.as_ptr(),
            );
        }
    }
}

impl Drop for Syslog {
    fn drop(&mut self) {
        unsafe { libc::closelog() };
    }
}
