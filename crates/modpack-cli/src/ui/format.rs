//! Formatting of sizes, durations and the batch report.

use std::time::Duration;

use modpack_bundler::{BatchStats, PackedArtifact};

/// Format a byte count with the most appropriate unit.
///
/// ```
/// use modpack_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as ms, seconds or minutes.
///
/// ```
/// use std::time::Duration;
/// use modpack_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

/// One report line per written archive:
///
/// ```text
///   84 files  1554.2KB ->   393.9KB - ratio:  25.3% - xml.sax.saxutils.tar.gz
/// ```
///
/// An artifact built from empty files reports a ratio of 0.
pub fn module_line(artifact: &PackedArtifact) -> String {
    format!(
        "{:4} files {:7.1}KB -> {:7.1}KB - ratio: {:5.1}% - {}",
        artifact.file_count,
        kilobytes(artifact.uncompressed_bytes),
        kilobytes(artifact.compressed_bytes),
        artifact.ratio().unwrap_or(0.0),
        artifact.name
    )
}

/// Lines printed before a batch starts.
pub fn batch_header(out_dir: &std::path::Path, backend_info: &str) -> Vec<String> {
    vec![
        format!("created archive files in..: {}", out_dir.display()),
        format!("Used compression..........: {}", backend_info),
    ]
}

/// Totals printed after a batch.
pub fn summary_lines(stats: &BatchStats) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Compress {} files to {} archives in {}.",
            stats.total_files,
            stats.total_archives,
            format_duration(stats.elapsed)
        ),
        format!(
            "total uncompressed size..: {:.1} MB",
            megabytes(stats.total_uncompressed_bytes)
        ),
        format!(
            "total compressed size....: {:.1} MB",
            megabytes(stats.total_compressed_bytes)
        ),
    ];
    if stats.skipped > 0 || stats.failed > 0 {
        lines.push(format!(
            "skipped / failed modules.: {} / {}",
            stats.skipped, stats.failed
        ));
    }
    lines
}
