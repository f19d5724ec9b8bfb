use crate::family::AddressFamily;
use serde::Serialize;
use std::net::IpAddr;

/// Outcome of one hostname lookup, owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    /// Canonical name
    pub name: String,
    pub aliases: Vec<String>,
    pub family: AddressFamily,
    /// Address records in resolver order; all of `family`
    pub addresses: Vec<IpAddr>,
}

impl ResolutionResult {
    pub fn new(name: impl Into<String>, family: AddressFamily, addresses: Vec<IpAddr>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            family,
            addresses,
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn first_address(&self) -> Option<IpAddr> {
        self.addresses.first().copied()
    }

    /// Copy of this result with the first record replaced.
    /// A result without records is returned unchanged.
    pub fn with_first_address(mut self, addr: IpAddr) -> Self {
        if let Some(first) = self.addresses.first_mut() {
            *first = addr;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_with_first_address_keeps_rest() {
        let result = ResolutionResult::new(
            "example.com",
            AddressFamily::Inet,
            vec![
                IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
                IpAddr::V4(Ipv4Addr::new(93, 184, 216, 35)),
            ],
        );
        let replaced = result.with_first_address(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)));
        assert_eq!(
            replaced.addresses,
            vec![
                IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9)),
                IpAddr::V4(Ipv4Addr::new(93, 184, 216, 35)),
            ]
        );
        assert_eq!(replaced.name, "example.com");
    }

    #[test]
    fn test_with_first_address_on_empty() {
        let result = ResolutionResult::new("example.com", AddressFamily::Inet, Vec::new());
        let same = result.clone().with_first_address(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(same, result);
    }

    #[test]
    fn test_serializes_addresses_as_text() {
        let result = ResolutionResult::new(
            "example.com",
            AddressFamily::Inet,
            vec![IpAddr::V4(Ipv4Addr::new(10, 0, 0, 9))],
        )
        .with_aliases(vec!["www.example.com".into()]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["family"], "inet");
        assert_eq!(json["addresses"][0], "10.0.0.9");
        assert_eq!(json["aliases"][0], "www.example.com");
    }
}
