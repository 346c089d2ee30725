//! JSON statistics file reading and writing.
//!
//! Statistics dumps are the handoff format between the profiling
//! host and this tool. Malformed dumps surface as [`StatsError`];
//! once an entry deserializes, downstream graph construction is
//! total.

use crate::stats::schema::RawStatEntry;
use crate::utils::error::StatsError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a statistics dump from a JSON file
///
/// # Errors
/// * `StatsError::Io` - file cannot be opened
/// * `StatsError::Json` - dump is malformed (including entries with
///   a missing code handle)
pub fn read_stats(input_path: impl AsRef<Path>) -> Result<Vec<RawStatEntry>, StatsError> {
    let input_path = input_path.as_ref();

    debug!("Reading stats from: {}", input_path.display());

    let file = File::open(input_path).map_err(StatsError::Io)?;
    let reader = BufReader::new(file);

    let stats: Vec<RawStatEntry> = serde_json::from_reader(reader).map_err(StatsError::Json)?;

    debug!("Stats loaded: {} entries", stats.len());

    Ok(stats)
}

/// Write a statistics dump to a JSON file
///
/// Creates parent directories if needed.
///
/// # Errors
/// * `StatsError::InvalidPath` - empty path, directory path, or
///   parent directory that cannot be created
/// * `StatsError::Io` / `StatsError::Json` - write or serialization
///   failure
pub fn write_stats(
    stats: &[RawStatEntry],
    output_path: impl AsRef<Path>,
) -> Result<(), StatsError> {
    let output_path = output_path.as_ref();

    info!("Writing {} stats entries to: {}", stats.len(), output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                StatsError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(StatsError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, stats).map_err(StatsError::Json)?;

    Ok(())
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), StatsError> {
    if path.as_os_str().is_empty() {
        return Err(StatsError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(StatsError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::schema::{CodeHandle, Timing};
    use pretty_assertions::assert_eq;

    fn sample_stats() -> Vec<RawStatEntry> {
        vec![
            RawStatEntry::new(
                CodeHandle::named("app", "handler"),
                Timing {
                    inline_time: 0.25,
                    cumulative_time: 1.5,
                    primitive_calls: 1,
                    total_calls: 1,
                },
            )
            .with_caller(
                CodeHandle::builtin("<built-in method exec>"),
                Timing {
                    total_calls: 1,
                    ..Timing::default()
                },
            ),
            RawStatEntry::new(CodeHandle::file_scoped("<string>", "<module>"), Timing::default()),
        ]
    }

    #[test]
    fn test_write_and_read_stats() {
        let stats = sample_stats();
        let temp_file = tempfile::NamedTempFile::new().unwrap();

        write_stats(&stats, temp_file.path()).unwrap();
        let loaded = read_stats(temp_file.path()).unwrap();

        assert_eq!(loaded, stats);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_stats("/nonexistent/stats.json");
        assert!(matches!(result, Err(StatsError::Io(_))));
    }

    #[test]
    fn test_read_malformed_dump() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"timing": {{}}}}]"#).unwrap();

        let result = read_stats(file.path());
        assert!(matches!(result, Err(StatsError::Json(_))));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/stats.json");

        write_stats(&sample_stats(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
