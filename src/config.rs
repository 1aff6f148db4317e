use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use uuid::Uuid;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

/// Process settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Recipient of this node's mining rewards.
    pub node_id: String,
    /// Peers registered at startup.
    pub peers: Vec<String>,
    pub peer_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or unparsable values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let node_id = lookup("NODE_ID")
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(new_node_id);
        let peers = lookup("PEERS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let peer_timeout = Duration::from_secs(parse_or(
            &lookup,
            "PEER_TIMEOUT_SECS",
            DEFAULT_PEER_TIMEOUT_SECS,
        ));

        Self {
            host,
            port,
            node_id,
            peers,
            peer_timeout,
        }
    }
}

/// Random node identifier: a v4 UUID without dashes.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("invalid {key}={raw:?}, using {default}");
            default
        }),
    }
}
