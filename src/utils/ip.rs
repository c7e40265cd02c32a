//! IP 地址处理工具

use std::net::{IpAddr, SocketAddr};

use tracing::debug;

/// 规范化来源 IP
///
/// 接受 `ip` 或 `ip:port`（含 `[v6]:port`），返回规范化的地址字符串；
/// 无法解析时返回 None。
pub fn normalize_ip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // 先尝试解析为 SocketAddr（支持 ip:port），如果失败再尝试纯 IpAddr
    let ip_addr = if let Ok(socket_addr) = raw.parse::<SocketAddr>() {
        socket_addr.ip()
    } else if let Ok(ip_addr) = raw.parse::<IpAddr>() {
        ip_addr
    } else {
        debug!("Dropping unparseable source ip: {:?}", raw);
        return None;
    };

    Some(ip_addr.to_string())
}
