//! # hijack-layer
//!
//! LD_PRELOAD / DYLD_INSERT_LIBRARIES layer that hijacks `gethostbyname`.
//!
//! Every call is delegated to the real resolver. When `HIJACK_HOST` matches
//! the queried name and `HIJACK_ADDR` parses in the result's family, the first
//! address record of the genuine result is overwritten and the substitution is
//! written to syslog (ident `dns_hijack`, facility `LOCAL7`).
//!
//! ```bash
//! HIJACK_HOST=example.com HIJACK_ADDR=10.0.0.9 \
//!     LD_PRELOAD=target/debug/libhijack_layer.so curl http://example.com/
//! ```
//!
//! The layer never installs a `tracing` subscriber; its host process owns
//! stderr and any subscriber it may have.

// Allow unsafe FFI functions without safety docs - these are inherently unsafe C ABI
#![allow(clippy::missing_safety_doc)]

pub mod interpose;
pub mod reals;
pub mod syslog;

pub use interpose::gethostbyname;
