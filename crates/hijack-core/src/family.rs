//! Address families and replacement-address parsing.

use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Family of the address records in a resolution result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    Inet,
    Inet6,
}

impl AddressFamily {
    /// Map a raw `h_addrtype` value.
    pub fn from_raw(raw: libc::c_int) -> Option<Self> {
        match raw {
            libc::AF_INET => Some(AddressFamily::Inet),
            libc::AF_INET6 => Some(AddressFamily::Inet6),
            _ => None,
        }
    }

    /// Size in bytes of one address record (`h_length`).
    pub fn address_len(self) -> usize {
        match self {
            AddressFamily::Inet => 4,
            AddressFamily::Inet6 => 16,
        }
    }

    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::Inet,
            IpAddr::V6(_) => AddressFamily::Inet6,
        }
    }

    /// Parse replacement text in this family.
    ///
    /// IPv4 text follows `inet_aton`, so `10.1` and `0x0a.0.0.1` are accepted
    /// just as the C resolver stack accepts them.
    pub fn parse(self, text: &str) -> Option<IpAddr> {
        match self {
            AddressFamily::Inet => parse_inet_aton(text).map(IpAddr::V4),
            AddressFamily::Inet6 => text.trim_end().parse::<Ipv6Addr>().ok().map(IpAddr::V6),
        }
    }

    /// Decode one raw address record.
    pub fn decode(self, bytes: &[u8]) -> Option<IpAddr> {
        match self {
            AddressFamily::Inet => {
                let octets: [u8; 4] = bytes.try_into().ok()?;
                Some(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            AddressFamily::Inet6 => {
                let octets: [u8; 16] = bytes.try_into().ok()?;
                Some(IpAddr::V6(Ipv6Addr::from(octets)))
            }
        }
    }
}

/// Parse an IPv4 address the way `inet_aton(3)` does.
///
/// Accepts one to four numeric parts separated by dots. Each part is decimal,
/// octal (leading `0`) or hex (leading `0x`). All parts but the last are one
/// byte; the last part fills the remaining bytes. The address ends at the end
/// of input or at the first C whitespace byte.
pub fn parse_inet_aton(text: &str) -> Option<Ipv4Addr> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut leading: Vec<u8> = Vec::with_capacity(3);

    let last = loop {
        let value = parse_part(bytes, &mut pos)?;
        if bytes.get(pos) == Some(&b'.') {
            if leading.len() == 3 || value > 0xff {
                return None;
            }
            leading.push(value as u8);
            pos += 1;
        } else {
            break value;
        }
    };

    match bytes.get(pos) {
        None => {}
        Some(c) if is_c_space(*c) => {}
        Some(_) => return None,
    }

    let max: u64 = match leading.len() {
        0 => 0xffff_ffff,
        1 => 0x00ff_ffff,
        2 => 0x0000_ffff,
        _ => 0x0000_00ff,
    };
    if last > max {
        return None;
    }

    let mut word = last as u32;
    for (i, byte) in leading.iter().enumerate() {
        word |= (*byte as u32) << (24 - 8 * i);
    }
    Some(Ipv4Addr::from(word))
}

/// `isspace` in the C locale, which unlike `is_ascii_whitespace` includes `\v`.
fn is_c_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// One numeric part, `strtoul(.., 0)` style. Must start with a digit.
fn parse_part(bytes: &[u8], pos: &mut usize) -> Option<u64> {
    let first = *bytes.get(*pos)?;
    if !first.is_ascii_digit() {
        return None;
    }

    let radix = if first != b'0' {
        10
    } else if matches!(bytes.get(*pos + 1), Some(b'x') | Some(b'X'))
        && bytes.get(*pos + 2).is_some_and(|c| c.is_ascii_hexdigit())
    {
        *pos += 2;
        16
    } else {
        8
    };

    let mut value: u64 = 0;
    while let Some(digit) = bytes.get(*pos).and_then(|c| (*c as char).to_digit(radix)) {
        value = value.checked_mul(radix as u64)?.checked_add(digit as u64)?;
        *pos += 1;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(text: &str) -> Option<String> {
        parse_inet_aton(text).map(|a| a.to_string())
    }

    #[test]
    fn test_dotted_quad() {
        assert_eq!(v4("10.0.0.9").as_deref(), Some("10.0.0.9"));
        assert_eq!(v4("255.255.255.255").as_deref(), Some("255.255.255.255"));
    }

    #[test]
    fn test_short_forms_fill_trailing_bytes() {
        assert_eq!(v4("10.1").as_deref(), Some("10.0.0.1"));
        assert_eq!(v4("10.1.258").as_deref(), Some("10.1.1.2"));
        assert_eq!(v4("167772169").as_deref(), Some("10.0.0.9"));
    }

    #[test]
    fn test_hex_and_octal_parts() {
        assert_eq!(v4("0x0a.0.0.011").as_deref(), Some("10.0.0.9"));
        assert_eq!(v4("0XA.0.0.1").as_deref(), Some("10.0.0.1"));
        assert_eq!(v4("012.0.0.1").as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_trailing_whitespace_ends_address() {
        assert_eq!(v4("10.0.0.9 trailing").as_deref(), Some("10.0.0.9"));
        assert_eq!(v4("10.0.0.9\n").as_deref(), Some("10.0.0.9"));
        assert_eq!(v4("1.2.3.4\x0b").as_deref(), Some("1.2.3.4"));
        assert_eq!(v4("1.2.3.4\x0c").as_deref(), Some("1.2.3.4"));
        assert_eq!(v4("1.2.3.4\r\n").as_deref(), Some("1.2.3.4"));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "not-an-address",
            "10.0.0.256",
            "256.0.0.1",
            "10.0.0.0.1",
            "10..0.1",
            "10.0.0.",
            " 10.0.0.9",
            "08.0.0.1",
            "0x.0.0.1",
            "10.0.0.9x",
            "4294967296",
            "99999999999999999999999",
        ] {
            assert_eq!(v4(bad), None, "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_family_parse_and_decode() {
        assert_eq!(
            AddressFamily::Inet.parse("10.0.0.9"),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)))
        );
        assert_eq!(AddressFamily::Inet.parse("::1"), None);
        assert_eq!(
            AddressFamily::Inet6.parse("2001:db8::1"),
            "2001:db8::1".parse().ok()
        );
        assert_eq!(AddressFamily::Inet6.parse("10.0.0.9"), None);

        assert_eq!(
            AddressFamily::Inet.decode(&[93, 184, 216, 34]),
            Some(IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)))
        );
        assert_eq!(AddressFamily::Inet.decode(&[1, 2, 3]), None);
    }

    #[test]
    fn test_raw_family_mapping() {
        assert_eq!(AddressFamily::from_raw(libc::AF_INET), Some(AddressFamily::Inet));
        assert_eq!(AddressFamily::from_raw(libc::AF_INET6), Some(AddressFamily::Inet6));
        assert_eq!(AddressFamily::from_raw(libc::AF_UNIX), None);
        assert_eq!(AddressFamily::Inet6.address_len(), 16);
    }
}
