//! Errors surfaced by resolution through the hijacking decorator.
//!
//! Only failures that belong to this crate are errors. A delegate reporting
//! "no such host" is `Ok(None)`, and a disabled or unparsable hijack target is
//! a [`crate::KeepReason`], not an error.

#[derive(Debug, thiserror::Error)]
pub enum HijackError {
    /// The real resolver could not be located. Retried on the next call.
    #[error("failed to look up {symbol}()")]
    SymbolNotFound { symbol: &'static str },

    /// The queried name cannot be handed to a C resolver.
    #[error("hostname contains an interior NUL byte")]
    InvalidName,

    /// The resolver answered, but in an address family this crate does not
    /// model, or with a record length that does not fit the family.
    #[error("resolver returned unsupported address family {family} (record length {length})")]
    UnsupportedFamily { family: i32, length: i32 },
}

pub type Result<T> = std::result::Result<T, HijackError>;
