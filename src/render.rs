//! Small text and HTML helpers shared by the provider renderers.

pub const CELL_CSS: &str =
    r#"style="padding:3px;border-bottom:solid 1px #CCC;border-right:solid 1px #CCC;""#;
pub const TABLE_CSS: &str =
    r#"style="width:100%;border:solid 1px #CCC;border-collapse:collapse;margin-bottom:10px;""#;

/// Horizontal rule of `width` dashes, newline terminated.
pub fn rule(width: usize) -> String {
    format!("{}\n", "-".repeat(width))
}

pub fn image_html(image_url: &str, width: &str) -> String {
    format!(r#"<img style="width:{width};" src="{image_url}" />"#)
}

pub fn link_html(url: &str) -> String {
    format!(r#"<a href="{url}">{url}</a>"#)
}

/// Greedy word wrap. A word longer than `width` is split: its head fills
/// what is left of the current line and the rest is cut into `width` chunks.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let gap = usize::from(line_len > 0);
        if line_len + gap + word_len <= width {
            if gap == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_len += gap + word_len;
            continue;
        }
        if word_len <= width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
            continue;
        }

        let mut chars: Vec<char> = word.chars().collect();
        let room = width.saturating_sub(line_len + gap);
        if line_len > 0 {
            if room > 0 {
                line.push(' ');
                line.extend(chars.drain(..room));
            }
            lines.push(std::mem::take(&mut line));
        }
        let mut chunks = chars.chunks(width).peekable();
        while let Some(chunk) = chunks.next() {
            line = chunk.iter().collect();
            line_len = chunk.len();
            if chunks.peek().is_some() {
                lines.push(std::mem::take(&mut line));
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}
