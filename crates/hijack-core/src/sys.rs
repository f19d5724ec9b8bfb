//! Native bridge: the C `hostent` and the platform resolver.

use crate::error::{HijackError, Result};
use crate::family::AddressFamily;
use crate::resolver::Resolver;
use crate::result::ResolutionResult;
use libc::{c_char, hostent};
use std::ffi::{CStr, CString};
use std::net::IpAddr;
use std::sync::Mutex;

extern "C" {
    #[link_name = "gethostbyname"]
    fn sys_gethostbyname(name: *const c_char) -> *mut hostent;
}

/// Signature of `gethostbyname(3)`.
pub type GethostbynameFn = unsafe extern "C" fn(*const c_char) -> *mut hostent;

/// Borrowed view over a resolver-owned `hostent`.
///
/// The entry usually lives in a static buffer owned by libc; the view must
/// not outlive the call that produced it.
pub struct HostEntryRef<'a> {
    raw: &'a mut hostent,
}

impl<'a> HostEntryRef<'a> {
    /// # Safety
    /// `ptr` must be null or point to a valid `hostent` that nothing else
    /// touches for `'a`, with a null-terminated `h_addr_list` whose records
    /// are `h_length` bytes each.
    pub unsafe fn from_raw(ptr: *mut hostent) -> Option<Self> {
        ptr.as_mut().map(|raw| Self { raw })
    }

    /// Family, if known and consistent with `h_length`.
    pub fn family(&self) -> Option<AddressFamily> {
        let family = AddressFamily::from_raw(self.raw.h_addrtype)?;
        let len = usize::try_from(self.raw.h_length).ok()?;
        (len == family.address_len()).then_some(family)
    }

    fn record(&self, index: usize) -> Option<*mut c_char> {
        if self.raw.h_addr_list.is_null() {
            return None;
        }
        let record = unsafe { *self.raw.h_addr_list.add(index) };
        (!record.is_null()).then_some(record)
    }

    fn decode(&self, family: AddressFamily, record: *mut c_char) -> Option<IpAddr> {
        let bytes =
            unsafe { std::slice::from_raw_parts(record as *const u8, family.address_len()) };
        family.decode(bytes)
    }

    pub fn first_address(&self) -> Option<IpAddr> {
        let family = self.family()?;
        self.decode(family, self.record(0)?)
    }

    /// Overwrite the first address record in place.
    /// Returns false when there is no record or the family differs.
    pub fn set_first_address(&mut self, addr: IpAddr) -> bool {
        let Some(family) = self.family() else {
            return false;
        };
        if AddressFamily::of(&addr) != family {
            return false;
        }
        let Some(record) = self.record(0) else {
            return false;
        };
        let dst = record as *mut u8;
        unsafe {
            match addr {
                IpAddr::V4(v4) => std::ptr::copy_nonoverlapping(v4.octets().as_ptr(), dst, 4),
                IpAddr::V6(v6) => std::ptr::copy_nonoverlapping(v6.octets().as_ptr(), dst, 16),
            }
        }
        true
    }

    pub fn name(&self) -> String {
        cstr_lossy(self.raw.h_name)
    }

    pub fn aliases(&self) -> Vec<String> {
        let mut aliases = Vec::new();
        if self.raw.h_aliases.is_null() {
            return aliases;
        }
        let mut i = 0;
        loop {
            let alias = unsafe { *self.raw.h_aliases.add(i) };
            if alias.is_null() {
                break;
            }
            aliases.push(cstr_lossy(alias));
            i += 1;
        }
        aliases
    }

    pub fn addresses(&self) -> Vec<IpAddr> {
        let Some(family) = self.family() else {
            return Vec::new();
        };
        let mut addresses = Vec::new();
        let mut i = 0;
        while let Some(record) = self.record(i) {
            if let Some(addr) = self.decode(family, record) {
                addresses.push(addr);
            }
            i += 1;
        }
        addresses
    }

    /// Owned copy of the entry.
    pub fn to_result(&self) -> Result<ResolutionResult> {
        let family = self.family().ok_or(HijackError::UnsupportedFamily {
            family: self.raw.h_addrtype,
            length: self.raw.h_length,
        })?;
        Ok(ResolutionResult::new(self.name(), family, self.addresses())
            .with_aliases(self.aliases()))
    }
}

fn cstr_lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// `gethostbyname` returns a process-wide static buffer.
static RESOLVE_LOCK: Mutex<()> = Mutex::new(());

/// The platform resolver, as linked.
///
/// Results are copied out before the lock is released, so callers own them.
/// An answer in an unmodelled family is `Err(UnsupportedFamily)`, distinct
/// from a failed lookup (`Ok(None)`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolver for SystemResolver {
    fn resolve(&self, name: &str) -> Result<Option<ResolutionResult>> {
        let c_name = CString::new(name).map_err(|_| HijackError::InvalidName)?;
        let _guard = RESOLVE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let entry = unsafe { HostEntryRef::from_raw(sys_gethostbyname(c_name.as_ptr())) };
        entry.map(|entry| entry.to_result()).transpose()
    }
}
