//! Known Hosts
//!
//! Host list consumed by the profile picker and the host sidebar.

use parking_lot::Mutex;
use std::collections::HashMap;

use crate::app::Host;

/// Reachability of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostState {
    #[default]
    Unknown,
    Offline,
    Online,
}

/// Pairing status of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HostPairState {
    #[default]
    Unknown,
    Unpaired,
    Paired,
}

/// Host as reported by discovery
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostInfo {
    pub uuid: String,
    pub name: String,
    pub mac: Option<String>,
    pub address: Option<String>,
    pub state: HostState,
    pub pair_state: HostPairState,
}

impl HostInfo {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, state: HostState) -> Self {
        self.state = state;
        self
    }

    /// Key used to merge duplicate discovery results
    fn identity_key(&self) -> String {
        if !self.uuid.is_empty() {
            return format!("uuid:{}", self.uuid);
        }
        if let Some(mac) = self.mac.as_deref().filter(|m| !m.is_empty()) {
            return format!("mac:{}", mac);
        }
        if let Some(address) = self.address.as_deref().filter(|a| !a.is_empty()) {
            return format!("addr:{}", address);
        }
        format!("name:{}", self.name)
    }
}

/// Read-only source of known hosts
pub trait HostProvider: Send + Sync {
    fn hosts(&self) -> Vec<HostInfo>;
}

/// Host provider backed by an in-memory list
#[derive(Debug, Default)]
pub struct StaticHostProvider {
    hosts: Mutex<Vec<HostInfo>>,
}

impl StaticHostProvider {
    pub fn new(hosts: Vec<HostInfo>) -> Self {
        Self {
            hosts: Mutex::new(hosts),
        }
    }

    /// Replace the host list (e.g. after a discovery pass)
    pub fn replace(&self, hosts: Vec<HostInfo>) {
        *self.hosts.lock() = hosts;
    }
}

impl HostProvider for StaticHostProvider {
    fn hosts(&self) -> Vec<HostInfo> {
        self.hosts.lock().clone()
    }
}

/// Profile picker entries: the global profile followed by every known host
pub fn profile_hosts(provider: &dyn HostProvider) -> Vec<Host> {
    std::iter::once(Host::global())
        .chain(provider.hosts().into_iter().map(|h| Host {
            id: h.uuid,
            name: h.name,
        }))
        .collect()
}

/// Row of the host sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDisplayModel {
    pub uuid: String,
    pub name: String,
    pub state: HostState,
    pub pair_state: HostPairState,
    pub is_streaming: bool,
}

/// Build sidebar rows: deduplicated, hosts without a uuid dropped, online
/// hosts first and then by name.
pub fn sidebar_hosts(hosts: &[HostInfo], streaming_uuid: Option<&str>) -> Vec<HostDisplayModel> {
    let mut seen: HashMap<String, &HostInfo> = HashMap::new();
    for host in hosts {
        let key = host.identity_key();
        // Prefer the entry with a known state or uuid
        let replace = match seen.get(&key) {
            None => true,
            Some(existing) => {
                (existing.state == HostState::Unknown && host.state != HostState::Unknown)
                    || (existing.uuid.is_empty() && !host.uuid.is_empty())
            }
        };
        if replace {
            seen.insert(key, host);
        }
    }

    let mut deduped: Vec<&HostInfo> = seen.into_values().filter(|h| !h.uuid.is_empty()).collect();
    deduped.sort_by(|a, b| {
        let a_online = a.state == HostState::Online;
        let b_online = b.state == HostState::Online;
        b_online
            .cmp(&a_online)
            .then_with(|| a.name.cmp(&b.name))
    });

    deduped
        .into_iter()
        .map(|host| HostDisplayModel {
            uuid: host.uuid.clone(),
            name: host.name.clone(),
            state: host.state,
            pair_state: host.pair_state,
            is_streaming: streaming_uuid == Some(host.uuid.as_str()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_hosts_lead_with_global() {
        let provider = StaticHostProvider::new(vec![HostInfo::new("A1", "Desk")]);
        let hosts = profile_hosts(&provider);
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0], Host::global());
        assert_eq!(hosts[1].id, "A1");
    }

    #[test]
    fn test_sidebar_sorting() {
        let hosts = vec![
            HostInfo::new("3", "Zeta").with_state(HostState::Online),
            HostInfo::new("1", "Alpha").with_state(HostState::Offline),
            HostInfo::new("2", "Beta").with_state(HostState::Online),
            HostInfo::new("", "NoId").with_state(HostState::Online),
        ];

        let rows = sidebar_hosts(&hosts, Some("2"));
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Zeta", "Alpha"]);
        assert!(rows[0].is_streaming);
        assert!(!rows[1].is_streaming);
    }

    #[test]
    fn test_sidebar_dedup_prefers_known_state() {
        let hosts = vec![
            HostInfo::new("X", "Den"),
            HostInfo::new("X", "Den").with_state(HostState::Online),
        ];

        let rows = sidebar_hosts(&hosts, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state, HostState::Online);
    }
}
