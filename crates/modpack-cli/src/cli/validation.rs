//! Value parsers for command-line arguments.

/// Parse a compression level (0-9).
pub fn parse_level(s: &str) -> Result<u32, String> {
    let level: u32 = s
        .parse()
        .map_err(|_| format!("Compression level must be a number: '{}'", s))?;

    if level > 9 {
        return Err(format!("Compression level must be between 0 and 9, got {}", level));
    }

    Ok(level)
}

/// Parse a worker thread count (at least 1).
pub fn parse_jobs(s: &str) -> Result<usize, String> {
    parse_positive(s, "Job count")
}

/// Parse the archive cap of a bounded run (at least 1).
pub fn parse_max_archives(s: &str) -> Result<usize, String> {
    parse_positive(s, "Maximum archive count")
}

/// Parse an artifact base name: a single file name component.
pub fn parse_artifact_name(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Archive name cannot be empty".to_string());
    }

    if s == "." || s == ".." || s.contains(['/', '\\']) {
        return Err(format!(
            "Archive name must be a plain file name without path separators: '{}'",
            s
        ));
    }

    Ok(s.to_string())
}

fn parse_positive(s: &str, what: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err(format!("{} must be at least 1", what)),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("{} must be a positive number: '{}'", what, s)),
    }
}
