//! Typed views over the vendor extension blocks a spec may carry.
//!
//! Extension blocks are author-supplied and loosely structured, so every
//! struct here derives `Default` and parses with missing or unknown keys
//! tolerated. A malformed block degrades to its defaults instead of failing
//! the run.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Parse a vendor extension block, falling back to defaults when the block
/// does not deserialize.
pub(crate) fn parse_ext<T>(value: &Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value.clone()).unwrap_or_default()
}

/// Presence test for optional spec values: null, false, zero, and the empty
/// string all count as absent. Objects and arrays always count as present,
/// including empty ones.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Root `x-go-zero` block: service identity and middleware for the backend
/// generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub service: Option<String>,
    pub group: Option<String>,
    pub middleware: Vec<String>,
    pub jwt: JwtConfig,
}

impl BackendConfig {
    /// Service name, defaulting when unset or empty.
    pub fn service_name(&self) -> &str {
        match self.service.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "api-service",
        }
    }

    /// Route group name, defaulting when unset or empty.
    pub fn group_name(&self) -> &str {
        match self.group.as_deref() {
            Some(g) if !g.is_empty() => g,
            _ => "api",
        }
    }

    /// Middleware chain as a single comma separated string, empty when none.
    pub fn middleware_list(&self) -> String {
        self.middleware.join(", ")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub enabled: bool,
}

/// Per-operation `x-go-zero` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendOpConfig {
    pub handler: Option<String>,
    pub logic: Option<String>,
    pub noauth: bool,
    pub cache: Map<String, Value>,
}

impl BackendOpConfig {
    /// Handler name, derived from the operation id when not overridden.
    pub fn handler_name(&self, operation_id: &str) -> String {
        match self.handler.as_deref() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => format!("{operation_id}Handler"),
        }
    }

    /// Logic name, derived from the operation id when not overridden.
    pub fn logic_name(&self, operation_id: &str) -> String {
        match self.logic.as_deref() {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => format!("{operation_id}Logic"),
        }
    }
}

/// Per-property `x-go-zero` block: struct tag and validation rule overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BackendFieldConfig {
    pub tag: Option<String>,
    pub validate: Option<String>,
}

/// Per-operation `x-frontend` block: SWR, server action, and cache
/// directives for the web generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontendOpConfig {
    pub swr: Option<bool>,
    pub revalidate_on_focus: Option<bool>,
    pub revalidate_on_reconnect: Option<bool>,
    /// SWR refresh interval in seconds.
    pub revalidate: Option<u64>,
    pub invalidates_cache: Vec<String>,
    pub server_action: bool,
    pub cache_time: Option<u64>,
    pub cache: Option<Value>,
    pub revalidate_paths: Vec<String>,
    pub revalidate_tags: Vec<String>,
}

impl FrontendOpConfig {
    pub fn swr_enabled(&self) -> bool {
        self.swr == Some(true)
    }

    /// SWR revalidates on focus unless explicitly disabled.
    pub fn revalidate_on_focus(&self) -> bool {
        self.revalidate_on_focus != Some(false)
    }

    /// SWR revalidates on reconnect unless explicitly disabled.
    pub fn revalidate_on_reconnect(&self) -> bool {
        self.revalidate_on_reconnect != Some(false)
    }

    /// Refresh interval in milliseconds, zero when polling is off.
    pub fn refresh_interval_ms(&self) -> u64 {
        match self.revalidate {
            Some(secs) if secs > 0 => secs * 1000,
            _ => 0,
        }
    }

    /// Cache lifetime in seconds. A zero or missing value falls back to an
    /// hour.
    pub fn cache_time_secs(&self) -> u64 {
        match self.cache_time {
            Some(secs) if secs > 0 => secs,
            _ => 3600,
        }
    }
}

/// Per-operation `x-mobile` block: offline and sync directives for the
/// mobile generator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MobileOpConfig {
    pub offline: bool,
    pub cache_time: Option<u64>,
    pub background: bool,
    pub sync_priority: Option<String>,
    pub invalidates_cache: Vec<String>,
}

impl MobileOpConfig {
    /// Cache lifetime in seconds, zero when unset.
    pub fn cache_time_secs(&self) -> u64 {
        self.cache_time.unwrap_or(0)
    }

    pub fn sync_priority(&self) -> &str {
        match self.sync_priority.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => "normal",
        }
    }
}

/// One channel of the root `x-websocket` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    pub description: String,
    pub messages: Vec<Value>,
    #[serde(rename = "x-mobile")]
    pub mobile: WebSocketMobileConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebSocketMobileConfig {
    pub background: bool,
    pub reconnect: bool,
    pub heartbeat: u64,
}

impl WebSocketMobileConfig {
    /// Heartbeat interval in seconds. A zero value falls back to the
    /// default interval.
    pub fn heartbeat_secs(&self) -> u64 {
        if self.heartbeat == 0 {
            30
        } else {
            self.heartbeat
        }
    }
}

impl Default for WebSocketMobileConfig {
    fn default() -> Self {
        WebSocketMobileConfig {
            background: false,
            reconnect: true,
            heartbeat: 30,
        }
    }
}

/// Per-property `x-validation` block, split by platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationHints {
    pub frontend: Map<String, Value>,
    pub mobile: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backend_config_defaults() {
        let cfg: BackendConfig = parse_ext(&json!({}));
        assert_eq!(cfg.service_name(), "api-service");
        assert_eq!(cfg.group_name(), "api");
        assert_eq!(cfg.middleware_list(), "");
        assert!(!cfg.jwt.enabled);
    }

    #[test]
    fn test_backend_config_empty_strings_fall_back() {
        let cfg: BackendConfig = parse_ext(&json!({ "service": "", "group": "" }));
        assert_eq!(cfg.service_name(), "api-service");
        assert_eq!(cfg.group_name(), "api");
    }

    #[test]
    fn test_backend_op_names() {
        let cfg: BackendOpConfig = parse_ext(&json!({ "handler": "CustomHandler" }));
        assert_eq!(cfg.handler_name("getUser"), "CustomHandler");
        assert_eq!(cfg.logic_name("getUser"), "getUserLogic");
    }

    #[test]
    fn test_frontend_swr_defaults() {
        let cfg: FrontendOpConfig = parse_ext(&json!({ "swr": true }));
        assert!(cfg.swr_enabled());
        assert!(cfg.revalidate_on_focus());
        assert!(cfg.revalidate_on_reconnect());
        assert_eq!(cfg.refresh_interval_ms(), 0);

        let cfg: FrontendOpConfig =
            parse_ext(&json!({ "swr": true, "revalidateOnFocus": false, "revalidate": 30 }));
        assert!(!cfg.revalidate_on_focus());
        assert_eq!(cfg.refresh_interval_ms(), 30_000);
    }

    #[test]
    fn test_frontend_cache_time_zero_is_unset() {
        let cfg: FrontendOpConfig = parse_ext(&json!({ "cacheTime": 0 }));
        assert_eq!(cfg.cache_time_secs(), 3600);
        let cfg: FrontendOpConfig = parse_ext(&json!({ "cacheTime": 60 }));
        assert_eq!(cfg.cache_time_secs(), 60);
    }

    #[test]
    fn test_websocket_mobile_defaults() {
        let cfg: WebSocketConfig = parse_ext(&json!({ "description": "Live updates" }));
        assert!(cfg.mobile.reconnect);
        assert_eq!(cfg.mobile.heartbeat_secs(), 30);

        let cfg: WebSocketConfig =
            parse_ext(&json!({ "x-mobile": { "reconnect": false, "heartbeat": 0 } }));
        assert!(!cfg.mobile.reconnect);
        assert_eq!(cfg.mobile.heartbeat_secs(), 30);
    }

    #[test]
    fn test_malformed_block_degrades_to_default() {
        let cfg: MobileOpConfig = parse_ext(&json!("not an object"));
        assert!(!cfg.offline);
        assert_eq!(cfg.cache_time_secs(), 0);
        assert_eq!(cfg.sync_priority(), "normal");
    }
}
