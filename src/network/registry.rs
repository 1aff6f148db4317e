use std::collections::BTreeSet;

use actix_web::http::Uri;
use log::debug;

use crate::error::{LedgerError, LedgerResult};

/// Reduce a peer address to its `host:port` part.
///
/// Accepts full URLs (`http://10.0.0.2:5000/`) as well as bare
/// `host:port` strings.
pub fn parse_peer_address(address: &str) -> LedgerResult<String> {
    let trimmed = address.trim();
    let invalid = || LedgerError::InvalidPeerAddress(address.to_string());

    let uri: Uri = trimmed.parse().map_err(|_| invalid())?;
    let authority = uri.authority().ok_or_else(invalid)?;
    if authority.host().is_empty() {
        return Err(invalid());
    }
    Ok(authority.as_str().to_string())
}

/// Manually registered peers, deduplicated by `host:port`.
#[derive(Debug, Default, Clone)]
pub struct PeerRegistry {
    nodes: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one peer. Returns `true` when it was not known before.
    pub fn register_peer(&mut self, address: &str) -> LedgerResult<bool> {
        let peer = parse_peer_address(address)?;
        let added = self.nodes.insert(peer.clone());
        debug!("PEERS - register {peer} (new={added})");
        Ok(added)
    }

    /// Register every address, or none of them if any is invalid.
    pub fn register_peers<S: AsRef<str>>(&mut self, addresses: &[S]) -> LedgerResult<usize> {
        if addresses.is_empty() {
            return Err(LedgerError::NoPeers);
        }
        for address in addresses {
            parse_peer_address(address.as_ref())?;
        }

        let mut added = 0;
        for address in addresses {
            if self.register_peer(address.as_ref())? {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn peers(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(
            parse_peer_address("http://192.168.0.5:5000").unwrap(),
            "192.168.0.5:5000"
        );
        assert_eq!(
            parse_peer_address("http://node-b:5001/chain").unwrap(),
            "node-b:5001"
        );
    }

    #[test]
    fn accepts_bare_host_port() {
        assert_eq!(
            parse_peer_address("192.168.0.5:5000").unwrap(),
            "192.168.0.5:5000"
        );
        assert_eq!(parse_peer_address(" localhost:5001 ").unwrap(), "localhost:5001");
    }

    #[test]
    fn rejects_addresses_without_host() {
        assert!(matches!(
            parse_peer_address(""),
            Err(LedgerError::InvalidPeerAddress(_))
        ));
        assert!(parse_peer_address("/just/a/path").is_err());
        assert!(parse_peer_address("not a url").is_err());
    }

    #[test]
    fn registration_is_idempotent() {
        let mut reg = PeerRegistry::new();
        assert!(reg.register_peer("http://10.0.0.2:5000").unwrap());
        assert!(!reg.register_peer("10.0.0.2:5000").unwrap());
        assert_eq!(reg.peers(), vec!["10.0.0.2:5000".to_string()]);
    }

    #[test]
    fn bulk_registration_is_all_or_nothing() {
        let mut reg = PeerRegistry::new();
        let err = reg.register_peers(&["10.0.0.2:5000", "not a url"]);
        assert!(err.is_err());
        assert!(reg.is_empty());

        let added = reg
            .register_peers(&["10.0.0.3:5000", "http://10.0.0.2:5000", "10.0.0.3:5000"])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(reg.peers(), vec!["10.0.0.2:5000", "10.0.0.3:5000"]);
    }

    #[test]
    fn empty_list_is_rejected() {
        let mut reg = PeerRegistry::new();
        let none: [&str; 0] = [];
        assert!(matches!(reg.register_peers(&none), Err(LedgerError::NoPeers)));
    }
}
