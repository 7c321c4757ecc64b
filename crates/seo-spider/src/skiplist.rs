//! Non-HTML extension and path-prefix exclusion catalogue (spec §4.5).

/// File extensions never worth enqueuing as an HTML page.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg", ".ico", ".tiff",
    ".js", ".css", ".json", ".xml", ".txt", ".csv", ".rss", ".atom",
    ".zip", ".tar", ".gz", ".rar", ".7z", ".bz2",
    ".woff", ".woff2", ".ttf", ".eot", ".otf",
    ".mp3", ".mp4", ".wav", ".avi", ".mov", ".mkv", ".webm", ".flac", ".ogg",
    ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    ".exe", ".dmg", ".apk", ".iso",
];

/// Path prefixes known to host non-content machinery rather than pages.
pub const EXCLUDED_PREFIXES: &[&str] = &["/wp-json", "/feed", "/wp-admin", "/api/", "/xmlrpc.php"];

/// True when `path` ends with one of [`EXCLUDED_EXTENSIONS`] or starts with
/// one of [`EXCLUDED_PREFIXES`] (case-insensitive on the extension).
pub fn is_excluded(path: &str) -> bool {
    let lower = path.to_lowercase();
    EXCLUDED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        || EXCLUDED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}
