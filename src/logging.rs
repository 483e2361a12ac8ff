use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialise logging at `info` level, or `debug` when enabled in the
/// configuration file. `RUST_LOG` is only honoured in debug mode.
///
/// When `log_file` is given the output is mirrored to that file. The returned
/// guard must be kept alive for the file writer to flush. If the file cannot
/// be created, logging continues on the console only and `None` is returned.
pub fn init(debug: bool, log_file: Option<&Path>) -> Option<WorkerGuard> {
    // Outside debug mode the level is forced so a stray `RUST_LOG` in the
    // user's environment does not flood the console.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let mut file_error = None;
    let (file_layer, guard) = match log_file.and_then(split_log_path) {
        Some((dir, name)) => match RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(name.to_string_lossy())
            .build(dir)
        {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer().with_writer(writer).with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                file_error = Some(e);
                (None, None)
            }
        },
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init();
    if let (Some(e), Some(path)) = (file_error, log_file) {
        tracing::warn!(path = %path.display(), error = %e, "cannot open log file; logging to console only");
    }
    guard
}

fn split_log_path(path: &Path) -> Option<(&Path, &std::ffi::OsStr)> {
    let name = path.file_name()?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Some((dir, name))
}
