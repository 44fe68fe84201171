use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The input path with a `.csv` extension, next to the input.
pub fn default_output_path(input: &str) -> String {
    Path::new(input)
        .with_extension("csv")
        .as_path()
        .display()
        .to_string()
}

/// A count as printed in the exports, with thousands separators.
pub fn parse_count(s: &str) -> Option<u64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<u64>().ok()
}

/// A percentage such as `54.3%`.
pub fn parse_percent(s: &str) -> Option<f64> {
    let t = s.trim();
    t.strip_suffix('%').unwrap_or(t).trim().parse::<f64>().ok()
}

/// Text before the first period: `1.0` and `1.` both give `1`.
pub fn district_prefix(s: &str) -> String {
    s.trim().split('.').next().unwrap_or("").to_string()
}

#[cfg(test)]
pub fn temp_path(name: &str) -> String {
    use std::path::PathBuf;
    let p: PathBuf = [
        std::env::temp_dir(),
        PathBuf::from(format!("congscrape-{}-{}", std::process::id(), name)),
    ]
    .iter()
    .collect();
    p.as_path().display().to_string()
}
