//! Daily category logging with a retention sweep.
//!
//! Writes a few records to today's file of an "orders" category, drops some
//! stale files next to it and prunes everything older than three days.
//!
//! Run with:
//! ```bash
//! cargo run --example daily_category
//! ```

use loggable::{Context, DiagnosticsConfig, Severity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    loggable::init_logging(&DiagnosticsConfig::new().with_console(true), Some(1))?;

    let temp_dir = tempfile::tempdir()?;
    let category = loggable::category(temp_dir.path(), "orders")
        .with_max_log_days(3)
        .build()?;

    let logger = category.logger()?;
    logger.info("order service started");
    logger.log(
        Severity::Warning,
        "payment retry",
        &Context::new().with("order", 1042).with("attempt", 2),
    );
    logger.critical("inventory unreachable");

    for stale in ["orders-2020-01-01.log", "orders-2020-01-02.log", "orders-bogus.log"] {
        std::fs::write(temp_dir.path().join(stale), "stale\n")?;
    }

    let deleted = category.clear_old_logs()?;
    println!("Deleted {} expired files", deleted);
    println!("Today's log: {}", logger.path()?.display());
    print!("{}", std::fs::read_to_string(logger.path()?)?);

    Ok(())
}
