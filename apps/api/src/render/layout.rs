//! Plain-text layout: paragraph splitting, greedy word wrap and pagination.

/// Wraps `text` into display lines no wider than `max_chars`.
///
/// Blank lines separate paragraphs and survive as a single empty line.
/// Single newlines inside a paragraph are kept as hard breaks (sign-offs, addresses).
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines = Vec::new();

    for paragraph in normalized.split("\n\n") {
        if paragraph.trim().is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        for hard_line in paragraph.lines() {
            lines.extend(wrap_line(hard_line.trim(), max_chars));
        }
    }

    lines
}

/// Greedy word wrap of a single line. Words longer than `max_chars` are split.
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            out.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 {
        out.push(current);
    }
    out
}

/// Splits lines into pages of at most `lines_per_page`, never starting a page with a blank line.
pub fn paginate(lines: Vec<String>, lines_per_page: usize) -> Vec<Vec<String>> {
    let mut pages: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if current.is_empty() && line.is_empty() {
            continue;
        }
        current.push(line);
        if current.len() == lines_per_page {
            pages.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}
