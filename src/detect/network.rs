//! TCP/IP stack tunables.
use super::{observe_int, observe_string};
use crate::sysfs::{StateReader, paths};

/// `net.*` sysctls managed by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkState {
    /// `net.ipv4.tcp_congestion_control`.
    pub congestion: Option<String>,
    /// `net.ipv4.tcp_fastopen`.
    pub fastopen: Option<i64>,
    /// `net.ipv4.tcp_mtu_probing`.
    pub mtu_probing: Option<i64>,
    /// `net.core.rmem_max`.
    pub rmem_max: Option<i64>,
    /// `net.core.wmem_max`.
    pub wmem_max: Option<i64>,
    /// `net.ipv4.tcp_rmem` (`min default max`, whitespace as read).
    pub tcp_rmem: Option<String>,
    /// `net.ipv4.tcp_wmem` (`min default max`, whitespace as read).
    pub tcp_wmem: Option<String>,
}

/// Read network tunables.
#[must_use]
pub fn detect(reader: &dyn StateReader) -> NetworkState {
    NetworkState {
        congestion: observe_string(reader, paths::TCP_CONGESTION),
        fastopen: observe_int(reader, paths::TCP_FASTOPEN),
        mtu_probing: observe_int(reader, paths::TCP_MTU_PROBING),
        rmem_max: observe_int(reader, paths::NET_RMEM_MAX),
        wmem_max: observe_int(reader, paths::NET_WMEM_MAX),
        tcp_rmem: observe_string(reader, paths::TCP_RMEM),
        tcp_wmem: observe_string(reader, paths::TCP_WMEM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::test_helpers::FakeRoot;

    #[test]
    fn reads_buffer_triplets_verbatim() {
        let root = FakeRoot::new();
        root.put(paths::TCP_RMEM, "4096\t131072\t6291456\n")
            .put(paths::NET_RMEM_MAX, "212992\n");
        let net = detect(&root.sysfs());
        assert_eq!(net.tcp_rmem.as_deref(), Some("4096\t131072\t6291456"));
        assert_eq!(net.rmem_max, Some(212_992));
        assert!(net.tcp_wmem.is_none());
    }
}
