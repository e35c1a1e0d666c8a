//! Example of declaring log categories in a TOML file.
//!
//! Run with:
//! ```bash
//! cargo run --example config_toml
//! ```

use loggable::{DiagnosticsConfig, LogCategory};
use serde::Deserialize;

const CONFIG: &str = r#"
[diagnostics]
console = true
level = "debug"

[[categories]]
directory = "target/demo-logs"
file_prefix = "errors"
logger_name = "errors"
max_log_days = 14
create_dir = true

[[categories]]
directory = "target/demo-logs"
file_prefix = "access"
logger_name = "http"
level = "info"
create_dir = true

[categories.format]
timestamp = true
empty_context = true
"#;

#[derive(Deserialize)]
struct Config {
    #[serde(default)]
    diagnostics: DiagnosticsConfig,
    categories: Vec<LogCategory>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: Config = toml::from_str(CONFIG)?;
    loggable::init_logging(&config.diagnostics, None)?;

    for category in &config.categories {
        let logger = category.logger()?;
        logger.debug("only visible where the level allows it");
        logger.notice("category ready");
        println!("{} -> {}", logger.name(), logger.path()?.display());

        category.clear_old_logs()?;
    }

    Ok(())
}
