//! Server initialization utilities

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for an MCP server.
///
/// Output goes to stderr since stdout carries the MCP protocol. `RUST_LOG`
/// refines the filter; the given crate logs at `info` unless overridden.
/// `LOG_FORMAT=json` switches to structured JSON lines.
///
/// ```rust,ignore
/// mcp_common::init_tracing("businessmap_mcp")?;
/// ```
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(format!("{crate_name}=info").parse()?);

    let registry = tracing_subscriber::registry().with(filter);

    if json_output_requested(std::env::var("LOG_FORMAT").ok().as_deref()) {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn json_output_requested(log_format: Option<&str>) -> bool {
    log_format.is_some_and(|v| v.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber itself can only be installed once per process, so only
    // the format switch is covered here.
    #[test]
    fn test_json_output_requested() {
        assert!(json_output_requested(Some("json")));
        assert!(json_output_requested(Some("JSON")));
        assert!(!json_output_requested(Some("text")));
        assert!(!json_output_requested(None));
    }
}
