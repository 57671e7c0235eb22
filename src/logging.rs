//! Logging setup.
//!
//! The terminal front end owns stdout and stderr while it runs, so log records are only emitted
//! when a log file is configured. The filter defaults to `info` and honours `RUST_LOG`.

use std::{fs::File, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};
use env_logger::{Builder, Env, Target};

/// Installs the global logger writing to the given file, or leaves logging off without one.
///
/// # Errors
///
/// This function returns an error if the file cannot be created or a logger is already installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("failed to install logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_init_with_unwritable_path_fails() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("missing").join("pathgrid.log");

        assert!(init(Some(&path)).is_err());
    }

    #[test]
    fn test_init_writes_records() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("pathgrid.log");

        init(Some(&path)).expect("logger should install");
        log::warn!("logging test record");
        log::logger().flush();

        let contents = std::fs::read_to_string(&path).expect("log file should be readable");
        assert!(contents.contains("logging test record"));
    }
}
