use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a serial capture file and returns its non-empty lines. Telemetry
/// captures are line-oriented, one wire frame per line.
pub fn read_capture_lines<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
