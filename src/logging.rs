use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Level, debug};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Install the global subscriber. Either sink may be disabled by passing
/// `None`; with both `None` logging stays off entirely. Safe to call once
/// per process only.
pub fn init(console: Option<Level>, file: Option<(&Path, Level)>) -> Result<()> {
    let console_layer = console.map(|level| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_filter(LevelFilter::from_level(level))
    });

    let file_layer = match file {
        Some((path, level)) => {
            let sink = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(sink))
                    .with_ansi(false)
                    .with_filter(LevelFilter::from_level(level)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

/// Run `f`, logging entry, exit, and elapsed wall time at DEBUG. Applied at
/// call sites that want timing; the operations themselves know nothing
/// about it.
pub fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    debug!("Enter {}.", name);
    let start = Instant::now();
    let result = f();
    debug!("{} was executed in {:.2} sec.", name, start.elapsed().as_secs_f64());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_passes_through_the_result() {
        let value = timed("double", || 21 * 2);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_timed_propagates_errors_untouched() {
        let result: Result<(), String> = timed("failing op", || Err("boom".to_string()));
        assert_eq!(result.unwrap_err(), "boom");
    }
}
