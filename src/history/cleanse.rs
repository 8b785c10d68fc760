use once_cell::sync::Lazy;
use regex::Regex;

static PASTE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[Pasted text #\d+ \+\d+ lines\]").unwrap());
static IMAGE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[Image #\d+\]").unwrap());

/// Remove pasted-text and image placeholders, then trim.
pub fn strip_paste_markers(text: &str) -> String {
    let without_paste = PASTE_MARKER.replace_all(text, "");
    let without_images = IMAGE_MARKER.replace_all(&without_paste, "");
    without_images.trim().to_string()
}

/// Slash commands and bracketed system messages are not prompts.
pub fn is_command(text: &str) -> bool {
    text.starts_with('/') || text.starts_with('[')
}
