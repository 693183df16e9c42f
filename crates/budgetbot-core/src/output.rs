//! Light cleanup of the model's reply for terminal display

const BOLD_MARKER: &str = "**";
const BULLET_MARKERS: &[&str] = &["-", "* ", "•"];

/// Drop blank lines, put a blank line before bold headings and indent bullets.
///
/// Markers are matched at the very start of the line; indented lines pass
/// through untouched. Never fails.
pub fn format_output(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if line.starts_with(BOLD_MARKER) {
                format!("\n{}", line)
            } else if BULLET_MARKERS.iter().any(|m| line.starts_with(m)) {
                format!("  {}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
