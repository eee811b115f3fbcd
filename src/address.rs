use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an endpoint string or address was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("missing port in {0:?}")]
    MissingPort(String),
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("{0:?} is not a dotted-quad IPv4 address")]
    InvalidAddress(String),
}

/// A peer's IPv4 endpoint: a host address and a port.
///
/// The address is kept as given, so hostnames round-trip unchanged. Only
/// [`Ipv4::to_socket_addr`] requires a literal dotted quad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ipv4 {
    pub address: String,
    pub port: u16,
}

impl Ipv4 {
    /// Builds an endpoint without checking the address.
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// The endpoint as a socket address; fails unless the address is a dotted quad.
    pub fn to_socket_addr(&self) -> Result<SocketAddrV4, AddressError> {
        let ip = self
            .address
            .parse::<Ipv4Addr>()
            .map_err(|_| AddressError::InvalidAddress(self.address.clone()))?;
        Ok(SocketAddrV4::new(ip, self.port))
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

impl FromStr for Ipv4 {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, port) = s
            .rsplit_once(':')
            .ok_or_else(|| AddressError::MissingPort(s.to_string()))?;
        if address.is_empty() {
            return Err(AddressError::InvalidAddress(address.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| AddressError::InvalidPort(port.to_string()))?;
        Ok(Self::new(address, port))
    }
}

impl From<SocketAddrV4> for Ipv4 {
    fn from(addr: SocketAddrV4) -> Self {
        Self::new(addr.ip().to_string(), addr.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_address_colon_port() {
        assert_eq!(Ipv4::new("10.0.0.7", 8080).to_string(), "10.0.0.7:8080");
        assert_eq!(Ipv4::new("peer-3", 0).to_string(), "peer-3:0");
    }

    #[test]
    fn test_json_field_names() {
        let ip = Ipv4::new("192.168.1.2", 30303);
        let json = serde_json::to_value(&ip).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "address": "192.168.1.2", "port": 30303 })
        );
        let back: Ipv4 = serde_json::from_value(json).unwrap();
        assert_eq!(back, ip);
    }

    #[test]
    fn test_parse() {
        let ip: Ipv4 = "127.0.0.1:9000".parse().unwrap();
        assert_eq!(ip, Ipv4::new("127.0.0.1", 9000));
        assert_eq!(
            "localhost".parse::<Ipv4>(),
            Err(AddressError::MissingPort("localhost".into()))
        );
        assert_eq!(
            "localhost:http".parse::<Ipv4>(),
            Err(AddressError::InvalidPort("http".into()))
        );
        assert_eq!(
            "1.2.3.4:70000".parse::<Ipv4>(),
            Err(AddressError::InvalidPort("70000".into()))
        );
        assert!(":80".parse::<Ipv4>().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let ip = Ipv4::new("10.1.2.3", 4000);
        let addr = ip.to_socket_addr().unwrap();
        assert_eq!(addr, SocketAddrV4::new(Ipv4Addr::new(10, 1, 2, 3), 4000));
        assert_eq!(Ipv4::from(addr), ip);

        assert_eq!(
            Ipv4::new("peer-3", 1).to_socket_addr(),
            Err(AddressError::InvalidAddress("peer-3".into()))
        );
    }
}
