//! The hijack decision.
//!
//! [`decide`] is pure: it inspects a genuine result and the current target
//! and says what should happen to the first address record. Both the
//! preloaded layer (which applies the answer to a C `hostent` in place) and
//! [`crate::HijackingResolver`] (which builds a new owned result) go through it.

use crate::family::AddressFamily;
use crate::matching::host_matches;
use crate::result::ResolutionResult;
use hijack_config::HijackConfig;
use std::borrow::Cow;
use std::net::IpAddr;

/// Why a genuine result was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    /// `HIJACK_HOST` or `HIJACK_ADDR` is unset
    Disabled,
    HostMismatch,
    /// Replacement text does not parse in the result's family
    InvalidAddress,
    /// Result carries no address record to replace
    NoAddress,
}

impl KeepReason {
    pub fn as_str(self) -> &'static str {
        match self {
            KeepReason::Disabled => "disabled",
            KeepReason::HostMismatch => "host_mismatch",
            KeepReason::InvalidAddress => "invalid_address",
            KeepReason::NoAddress => "no_address",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep(KeepReason),
    Replace { from: IpAddr, to: IpAddr },
}

impl Decision {
    pub fn is_replace(&self) -> bool {
        matches!(self, Decision::Replace { .. })
    }
}

pub fn decide(
    name: &[u8],
    family: AddressFamily,
    first: Option<IpAddr>,
    config: &HijackConfig,
) -> Decision {
    let (Some(host), Some(addr)) = (config.host.as_deref(), config.addr.as_deref()) else {
        return Decision::Keep(KeepReason::Disabled);
    };
    if !host_matches(name, host.as_bytes()) {
        return Decision::Keep(KeepReason::HostMismatch);
    }
    let Some(to) = family.parse(addr) else {
        return Decision::Keep(KeepReason::InvalidAddress);
    };
    match first {
        Some(from) => Decision::Replace { from, to },
        None => Decision::Keep(KeepReason::NoAddress),
    }
}

/// Apply the hijack to a borrowed result.
///
/// The original is handed back untouched unless the decision is
/// [`Decision::Replace`], in which case a new value is built.
pub fn hijack<'a>(
    name: &str,
    result: &'a ResolutionResult,
    config: &HijackConfig,
) -> (Cow<'a, ResolutionResult>, Decision) {
    let decision = decide(
        name.as_bytes(),
        result.family,
        result.first_address(),
        config,
    );
    match decision {
        Decision::Replace { to, .. } => (
            Cow::Owned(result.clone().with_first_address(to)),
            decision,
        ),
        Decision::Keep(_) => (Cow::Borrowed(result), decision),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn origin() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))
    }

    fn genuine() -> ResolutionResult {
        ResolutionResult::new("example.com", AddressFamily::Inet, vec![origin()])
    }

    #[test]
    fn test_disabled_without_both_values() {
        for config in [
            HijackConfig::default(),
            HijackConfig {
                host: Some("example.com".into()),
                addr: None,
            },
            HijackConfig {
                host: None,
                addr: Some("10.0.0.9".into()),
            },
        ] {
            assert_eq!(
                decide(b"example.com", AddressFamily::Inet, Some(origin()), &config),
                Decision::Keep(KeepReason::Disabled)
            );
        }
    }

    #[test]
    fn test_replace_on_match() {
        let config = HijackConfig::new("example.com", "10.0.0.9");
        assert_eq!(
            decide(b"Example.COM", AddressFamily::Inet, Some(origin()), &config),
            Decision::Replace {
                from: origin(),
                to: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)),
            }
        );
    }

    #[test]
    fn test_mismatch_checked_before_address() {
        let config = HijackConfig::new("example.com", "not-an-address");
        assert_eq!(
            decide(b"example.org", AddressFamily::Inet, Some(origin()), &config),
            Decision::Keep(KeepReason::HostMismatch)
        );
    }

    #[test]
    fn test_invalid_address_keeps_result() {
        let config = HijackConfig::new("example.com", "not-an-address");
        assert_eq!(
            decide(b"example.com", AddressFamily::Inet, Some(origin()), &config),
            Decision::Keep(KeepReason::InvalidAddress)
        );
    }

    #[test]
    fn test_address_parsed_in_result_family() {
        let config = HijackConfig::new("example.com", "10.0.0.9");
        let v6_origin: IpAddr = "2606:2800:220:1::1".parse().unwrap();
        assert_eq!(
            decide(b"example.com", AddressFamily::Inet6, Some(v6_origin), &config),
            Decision::Keep(KeepReason::InvalidAddress)
        );
    }

    #[test]
    fn test_no_address_to_replace() {
        let config = HijackConfig::new("example.com", "10.0.0.9");
        assert_eq!(
            decide(b"example.com", AddressFamily::Inet, None, &config),
            Decision::Keep(KeepReason::NoAddress)
        );
    }

    #[test]
    fn test_prefix_of_longer_target_is_hijacked() {
        let config = HijackConfig::new("example.com.evil", "10.0.0.9");
        assert!(decide(b"example.com", AddressFamily::Inet, Some(origin()), &config).is_replace());
    }

    #[test]
    fn test_hijack_borrows_when_kept() {
        let result = genuine();
        let config = HijackConfig::new("example.com", "10.0.0.9");
        let (out, decision) = hijack("example.org", &result, &config);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(decision, Decision::Keep(KeepReason::HostMismatch));
        assert_eq!(*out, result);
    }

    #[test]
    fn test_hijack_builds_new_result_when_replaced() {
        let result = genuine();
        let config = HijackConfig::new("example.com", "10.0.0.9");
        let (out, decision) = hijack("example.com", &result, &config);
        assert!(decision.is_replace());
        assert_eq!(
            out.first_address(),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)))
        );
        // The caller's value is not touched.
        assert_eq!(result.first_address(), Some(origin()));
    }
}
