use std::net::{IpAddr, Ipv4Addr};

use local_ip_address::list_afinet_netifas;

/// Best-effort lookup of the LAN IPv4 address, for startup logging only.
/// Walks the interface list, so no default route is needed.
pub fn local_ipv4() -> Result<Ipv4Addr, String> {
    let interfaces =
        list_afinet_netifas().map_err(|e| format!("Failed to list network interfaces: {e}"))?;

    first_lan_ipv4(interfaces).ok_or_else(|| "No non-loopback IPv4 address found".to_string())
}

/// Same as [`local_ipv4`], falling back to 127.0.0.1 with a warning.
pub fn local_ipv4_or_loopback() -> Ipv4Addr {
    local_ipv4().unwrap_or_else(|e| {
        tracing::warn!("Could not determine LAN IP: {e}");
        Ipv4Addr::LOCALHOST
    })
}

fn first_lan_ipv4<I>(interfaces: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = (String, IpAddr)>,
{
    interfaces.into_iter().find_map(|(_, ip)| usable(ip))
}

fn usable(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => Some(v4),
        _ => None,
    }
}
