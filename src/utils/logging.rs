use chrono::Local;
use env_logger::{Builder, Env};
use log::{debug, error, info};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system.
///
/// The level comes from `LOG_LEVEL` (default `info`). When `LOG_DIR` is set,
/// records are also appended to `<LOG_DIR>/skin_market.log`.
pub fn init_logger() {
    INIT.call_once(|| {
        let env = Env::default().filter_or("LOG_LEVEL", "info");
        let mut builder = Builder::from_env(env);
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

        let log_file = env::var("LOG_DIR").ok().map(|dir| get_log_file_path(Path::new(&dir)));
        let file = log_file.as_ref().map(|path| open_log_file(path));

        match file {
            Some(Ok(file)) => {
                builder
                    .target(env_logger::Target::Pipe(Box::new(FileAndStdout { file })))
                    .init();
                if let Some(path) = &log_file {
                    info!("Logging initialized: {}", path.display());
                }
            }
            Some(Err(e)) => {
                builder.init();
                error!("Failed to open log file, logging to stdout only: {}", e);
            }
            None => builder.init(),
        }

        debug!("Log level: {}", get_log_level());
    });
}

fn get_log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join("skin_market.log")
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Get the current log level
fn get_log_level() -> String {
    env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

/// Custom writer that writes to both a file and stdout
struct FileAndStdout {
    file: File,
}

impl Write for FileAndStdout {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = env::temp_dir().join(format!("skin-market-logs-{}", uuid::Uuid::new_v4()));
        let path = get_log_file_path(&dir);

        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "hello").unwrap();
        assert!(path.is_file());

        fs::remove_dir_all(&dir).unwrap();
    }
}
