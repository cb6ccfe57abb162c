use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::clipboard_monitor::SystemClipboard;
use crate::config::{self, ConfigError};
use crate::core_service::{LauncherCore, ServiceError};
use crate::logging;
use crate::transport::handle_json;

#[derive(Debug, Clone, Parser)]
#[command(name = "launchpad-core", about = "Launcher search core speaking JSON lines on stdio")]
pub struct CliOptions {
    /// Config file to load instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory for log files.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
    /// Disable the background clipboard poller.
    #[arg(long)]
    pub no_clipboard_poll: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config.as_deref())?;
    let log_dir = options.log_dir.clone().unwrap_or_else(logging::logs_dir);
    if let Err(error) = logging::init(&log_dir, config.log_level_filter()) {
        eprintln!("[launchpad-core] file logging unavailable: {error}");
    }
    log::info!(
        "startup config_path={} log_dir={}",
        config.config_path.display(),
        log_dir.display()
    );

    let core = Arc::new(LauncherCore::new(config)?);
    let indexing = core.initialize_in_background()?;
    let _poller = if options.no_clipboard_poll {
        log::info!("clipboard polling disabled");
        None
    } else {
        log::info!(
            "clipboard polling every {}ms capacity={}",
            core.config().clipboard_poll_interval_ms,
            core.config().clipboard_capacity
        );
        Some(core.start_clipboard_polling(Box::new(SystemClipboard))?)
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve_lines(&core, stdin.lock(), stdout.lock())?;

    if indexing.join().is_err() {
        log::error!("indexer thread panicked");
    }
    log::info!("stdin closed; shutting down");
    Ok(())
}

/// Answers each non-blank input line with exactly one JSON response line.
pub fn serve_lines(
    core: &LauncherCore,
    input: impl BufRead,
    mut output: impl Write,
) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_json(core, &line);
        writeln!(output, "{response}")?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{serve_lines, CliOptions};
    use crate::config::Config;
    use crate::core_service::LauncherCore;
    use crate::discovery::Indexer;
    use clap::Parser;

    #[test]
    fn serve_lines_answers_each_request() {
        let core = LauncherCore::with_indexer(Config::default(), Indexer::with_providers(vec![]));
        let input = concat!(
            r#"{"kind":"add_clipboard","payload":{"content":"Hello World"}}"#,
            "\n\n",
            r#"{"kind":"search","payload":{"query":"hello"}}"#,
            "\n",
            "{broken\n"
        );
        let mut output = Vec::new();

        serve_lines(&core, input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"status\":\"ok\""));
        assert!(lines[1].contains("\"title\":\"Hello World\""));
        assert!(lines[2].contains("\"code\":\"invalid_json\""));
    }

    #[test]
    fn cli_parses_flags() {
        let options =
            CliOptions::parse_from(["launchpad-core", "--config", "/tmp/lp.toml", "--no-clipboard-poll"]);
        assert_eq!(options.config.unwrap().to_string_lossy(), "/tmp/lp.toml");
        assert!(options.no_clipboard_poll);
        assert!(options.log_dir.is_none());
    }
}
