//! Server version and health reporting

use std::time::Duration;

use mcp_common::{json_success, CallToolResult, McpError};
use serde::Serialize;
use sysinfo::{ProcessRefreshKind, RefreshKind, System};

use crate::config::{
    Config, ENV_API_KEY, ENV_API_URL, ENV_DEFAULT_WORKSPACE_ID, ENV_READ_ONLY,
};

pub const SERVER_NAME: &str = "businessmap-mcp";
const NOT_CONFIGURED: &str = "not configured";

/// Mask all but the first and last four characters of a key
///
/// Keys shorter than eight characters are masked completely.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return NOT_CONFIGURED.to_string();
    }
    if chars.len() < 8 {
        return "***".to_string();
    }

    let start: String = chars[..4].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    let middle = "*".repeat((chars.len() - 8).max(3));
    format!("{start}{middle}{end}")
}

/// Render a duration as `1d 2h 3m 4s`, dropping leading zero units
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Memory held by this server process
#[derive(Debug, Serialize)]
struct MemoryUsage {
    rss_mb: u64,
    virtual_mb: u64,
}

fn process_memory() -> Option<MemoryUsage> {
    let pid = sysinfo::get_current_pid().ok()?;
    let sys = System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory()),
    );
    let process = sys.process(pid)?;

    Some(MemoryUsage {
        rss_mb: process.memory() / BYTES_PER_MB,
        virtual_mb: process.virtual_memory() / BYTES_PER_MB,
    })
}

#[derive(Debug, Serialize)]
struct EnvironmentInfo {
    read_only_mode: bool,
    api_url: String,
    api_key_masked: String,
    default_workspace_id: String,
}

impl EnvironmentInfo {
    fn from_config(config: &Config) -> Self {
        Self {
            read_only_mode: config.read_only,
            api_url: config.api.url.clone(),
            api_key_masked: mask_api_key(&config.api.key),
            default_workspace_id: config
                .default_workspace_id
                .clone()
                .unwrap_or_else(|| NOT_CONFIGURED.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    server_name: &'static str,
    server_version: &'static str,
    platform: &'static str,
    architecture: &'static str,
    uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<MemoryUsage>,
    environment: EnvironmentInfo,
}

/// Server name, version, platform and effective configuration
pub fn get_mcp_version(config: &Config, uptime: Duration) -> Result<CallToolResult, McpError> {
    json_success(&VersionInfo {
        server_name: SERVER_NAME,
        server_version: env!("CARGO_PKG_VERSION"),
        platform: std::env::consts::OS,
        architecture: std::env::consts::ARCH,
        uptime_seconds: uptime.as_secs(),
        memory: process_memory(),
        environment: EnvironmentInfo::from_config(config),
    })
}

#[derive(Debug, Serialize)]
struct SettingStatus {
    name: &'static str,
    required: bool,
    configured: bool,
    value_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    masked_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_value: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    uptime_seconds: u64,
    uptime_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<MemoryUsage>,
    settings: Vec<SettingStatus>,
    configuration: EnvironmentInfo,
}

fn setting_statuses(config: &Config) -> Vec<SettingStatus> {
    let workspace = config.default_workspace_id.as_deref().unwrap_or_default();
    vec![
        SettingStatus {
            name: ENV_API_KEY,
            required: true,
            configured: !config.api.key.is_empty(),
            value_length: config.api.key.chars().count(),
            masked_value: Some(mask_api_key(&config.api.key)),
            current_value: None,
        },
        SettingStatus {
            name: ENV_API_URL,
            required: true,
            configured: !config.api.url.is_empty(),
            value_length: config.api.url.chars().count(),
            masked_value: None,
            current_value: None,
        },
        SettingStatus {
            name: ENV_DEFAULT_WORKSPACE_ID,
            required: false,
            configured: !workspace.is_empty(),
            value_length: workspace.chars().count(),
            masked_value: None,
            current_value: Some(if workspace.is_empty() {
                NOT_CONFIGURED.to_string()
            } else {
                workspace.to_string()
            }),
        },
        SettingStatus {
            name: ENV_READ_ONLY,
            required: false,
            configured: config.read_only,
            value_length: 0,
            masked_value: None,
            current_value: Some(config.read_only.to_string()),
        },
    ]
}

/// `healthy` when every required setting is present, `warning` otherwise
pub fn get_system_health(config: &Config, uptime: Duration) -> Result<CallToolResult, McpError> {
    let settings = setting_statuses(config);
    let status = if settings.iter().filter(|s| s.required).all(|s| s.configured) {
        "healthy"
    } else {
        "warning"
    };

    json_success(&HealthReport {
        status,
        uptime_seconds: uptime.as_secs(),
        uptime_human: format_uptime(uptime),
        memory: process_memory(),
        settings,
        configuration: EnvironmentInfo::from_config(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::Value;

    fn report(result: CallToolResult) -> Value {
        serde_json::from_str(&result.content[0].as_text().unwrap().text).unwrap()
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key(""), "not configured");
        assert_eq!(mask_api_key("short"), "***");
        assert_eq!(mask_api_key("abcdefgh"), "abcd***efgh");
        assert_eq!(mask_api_key("abcd1234567890wxyz"), "abcd**********wxyz");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(42)), "42s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3_600)), "1h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(93_784)), "1d 2h 3m 4s");
    }

    #[test]
    fn test_health_warning_without_key() {
        let config = Config {
            api: ApiConfig {
                url: "https://acme.kanbanize.com/api/v2".to_string(),
                key: String::new(),
            },
            ..Default::default()
        };
        let value = report(get_system_health(&config, Duration::from_secs(5)).unwrap());
        assert_eq!(value["status"], "warning");
        assert_eq!(value["uptime_human"], "5s");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_health_reports_process_memory() {
        let memory = process_memory().expect("own process is visible");
        assert!(memory.virtual_mb >= memory.rss_mb);

        let config = Config::default();
        let value = report(get_system_health(&config, Duration::ZERO).unwrap());
        assert!(value["memory"]["rss_mb"].is_u64());
        assert!(value["memory"]["virtual_mb"].is_u64());
    }

    #[test]
    fn test_version_masks_key() {
        let config = Config {
            api: ApiConfig {
                url: "https://acme.kanbanize.com/api/v2".to_string(),
                key: "0123456789abcdef".to_string(),
            },
            read_only: true,
            default_workspace_id: None,
        };
        let value = report(get_mcp_version(&config, Duration::ZERO).unwrap());
        assert_eq!(value["server_name"], SERVER_NAME);
        assert_eq!(value["environment"]["api_key_masked"], "0123********cdef");
        assert_eq!(value["environment"]["read_only_mode"], true);
        assert_eq!(value["environment"]["default_workspace_id"], "not configured");
    }
}
