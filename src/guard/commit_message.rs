//! Commit message extraction and marker stripping.
//!
//! Finds the message text of every `git commit` invocation in a shell command
//! (heredoc bodies and quoted `-m`/`--message` arguments), drops attribution
//! lines, and splices the cleaned text back without touching the quoting.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::CommitMessageConfig;

static COMMIT_INVOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgit\s+commit\b").unwrap());

/// `-m "$(cat <<'EOF'` up to and including the newline that opens the body.
static HEREDOC_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:-m|--message)(?:\s+|=)"\$\(\s*cat\s+<<-?\s*['"]?([A-Za-z_][A-Za-z0-9_]*)['"]?[ \t]*\r?\n"#,
    )
    .unwrap()
});

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\r?\n){3,}").unwrap());

/// How a message was delimited in the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Heredoc,
    SingleQuoted,
    DoubleQuoted,
}

/// Byte range of a message body inside the command (quotes excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSpan {
    pub start: usize,
    pub end: usize,
    pub style: MessageStyle,
}

impl MessageSpan {
    pub fn text<'a>(&self, command: &'a str) -> &'a str {
        &command[self.start..self.end]
    }
}

/// Locate every commit message in `command`, in order of appearance.
pub fn extract_messages(command: &str) -> Vec<MessageSpan> {
    let mut spans = Vec::new();
    let mut consumed = 0;

    for m in COMMIT_INVOCATION.find_iter(command) {
        // Skip "git commit" appearing inside an earlier message.
        if m.start() < consumed {
            continue;
        }
        if let Some(span) = heredoc_message(command, m.end()) {
            consumed = span.end;
            spans.push(span);
            continue;
        }
        let quoted = quoted_messages(command, m.end());
        if let Some(last) = quoted.last() {
            consumed = last.end;
        }
        spans.extend(quoted);
    }
    spans
}

/// Heredoc body belonging to the invocation that ends its `git commit` at `from`.
/// The opening must sit on the same line as the invocation.
fn heredoc_message(command: &str, from: usize) -> Option<MessageSpan> {
    let rest = &command[from..];
    let line_end = rest.find('\n').unwrap_or(rest.len());
    let caps = HEREDOC_OPEN.captures(rest)?;
    let open = caps.get(0)?;
    if open.start() > line_end {
        return None;
    }
    let delimiter = caps.get(1)?.as_str();
    let body_start = from + open.end();

    let mut line_start = body_start;
    for line in command[body_start..].split_inclusive('\n') {
        if line.trim() == delimiter {
            if line_start == body_start {
                return None;
            }
            // Body excludes the newline before the delimiter line.
            let mut end = line_start - 1;
            if command[..end].ends_with('\r') {
                end -= 1;
            }
            return Some(MessageSpan {
                start: body_start,
                end,
                style: MessageStyle::Heredoc,
            });
        }
        line_start += line.len();
    }
    None
}

/// Quoted `-m`/`--message` arguments of one invocation, scanning from `from`
/// to the first unquoted command separator.
fn quoted_messages(command: &str, from: usize) -> Vec<MessageSpan> {
    let bytes = command.as_bytes();
    let len = bytes.len();
    let mut spans = Vec::new();
    let mut i = from;

    while i < len {
        // Whitespace and line continuations between words
        match bytes[i] {
            b' ' | b'\t' => {
                i += 1;
                continue;
            }
            b'\\' if i + 1 < len && bytes[i + 1] == b'\n' => {
                i += 2;
                continue;
            }
            b'\n' | b';' | b'&' | b'|' | b')' => break,
            _ => {}
        }

        let rest = &command[i..];
        let value_at = if let Some(after) = rest.strip_prefix("--message=") {
            Some(len - after.len())
        } else if rest.starts_with("--message") && next_is_blank(bytes, i + 9) {
            Some(skip_blanks(bytes, i + 9))
        } else if let Some(flag_len) = short_message_flag(rest) {
            let after = i + flag_len;
            if after < len && (bytes[after] == b'\'' || bytes[after] == b'"') {
                Some(after)
            } else if next_is_blank(bytes, after) {
                Some(skip_blanks(bytes, after))
            } else {
                None
            }
        } else {
            None
        };

        match value_at {
            Some(at) => match quoted_value(command, at) {
                Some(span) => {
                    i = span.end + 1;
                    spans.push(span);
                }
                // Unquoted, unterminated, or a substitution: nothing safe to edit.
                None => break,
            },
            None => match skip_word(bytes, i) {
                Some(next) => i = next,
                None => break,
            },
        }
    }
    spans
}

/// Length of a short-option cluster ending in `m` (`-m`, `-am`, `-sm`).
fn short_message_flag(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('-')?;
    if body.starts_with('-') {
        return None;
    }
    let letters = body
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if letters > 0 && body.as_bytes()[letters - 1] == b'm' {
        Some(letters + 1)
    } else {
        None
    }
}

fn next_is_blank(bytes: &[u8], at: usize) -> bool {
    at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t')
}

fn skip_blanks(bytes: &[u8], mut at: usize) -> usize {
    while at < bytes.len() && (bytes[at] == b' ' || bytes[at] == b'\t') {
        at += 1;
    }
    at
}

/// Span of the quoted literal starting at `at` (which must be a quote).
fn quoted_value(command: &str, at: usize) -> Option<MessageSpan> {
    let bytes = command.as_bytes();
    match *bytes.get(at)? {
        b'\'' => {
            let close = command[at + 1..].find('\'')? + at + 1;
            Some(MessageSpan {
                start: at + 1,
                end: close,
                style: MessageStyle::SingleQuoted,
            })
        }
        b'"' => {
            if command[at + 1..].starts_with("$(") {
                return None;
            }
            let close = closing_double_quote(bytes, at + 1)?;
            Some(MessageSpan {
                start: at + 1,
                end: close,
                style: MessageStyle::DoubleQuoted,
            })
        }
        _ => None,
    }
}

fn closing_double_quote(bytes: &[u8], mut at: usize) -> Option<usize> {
    while at < bytes.len() {
        match bytes[at] {
            b'\\' => at += 2,
            b'"' => return Some(at),
            _ => at += 1,
        }
    }
    None
}

/// Advance past one shell word, honouring quotes. `None` on an unterminated quote.
fn skip_word(bytes: &[u8], mut at: usize) -> Option<usize> {
    while at < bytes.len() {
        match bytes[at] {
            b' ' | b'\t' | b'\n' | b';' | b'&' | b'|' | b')' => break,
            b'\'' => {
                at += 1;
                while at < bytes.len() && bytes[at] != b'\'' {
                    at += 1;
                }
                if at >= bytes.len() {
                    return None;
                }
                at += 1;
            }
            b'"' => at = closing_double_quote(bytes, at + 1)? + 1,
            b'\\' => at += 2,
            _ => at += 1,
        }
    }
    Some(at.min(bytes.len()))
}

/// Strips attribution lines from commit messages.
#[derive(Debug, Clone)]
pub struct MessageCleaner {
    /// Each rule's needles, ASCII-lowercased.
    rules: Vec<Vec<String>>,
}

impl MessageCleaner {
    pub fn from_config(config: &CommitMessageConfig) -> Self {
        let rules = config
            .strip
            .iter()
            .filter(|r| !r.contains.is_empty())
            .map(|r| r.contains.iter().map(|n| n.to_ascii_lowercase()).collect())
            .collect();
        Self { rules }
    }

    fn is_marker(&self, line: &str) -> bool {
        let lower = line.to_ascii_lowercase();
        self.rules
            .iter()
            .any(|needles| needles.iter().all(|n| lower.contains(n.as_str())))
    }

    /// Drop marker lines, collapse runs of blank lines to one, trim the tail.
    /// CRLF messages keep CRLF endings. Applying this twice yields the same
    /// text as applying it once.
    pub fn clean(&self, message: &str) -> String {
        let eol = if message.contains("\r\n") { "\r\n" } else { "\n" };
        let kept: Vec<&str> = message
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !self.is_marker(line))
            .collect();
        let joined = kept.join(eol);
        BLANK_RUNS
            .replace_all(&joined, eol.repeat(2))
            .trim_end()
            .to_string()
    }

    /// The command with every commit message cleaned, or `None` when
    /// cleaning changes nothing.
    pub fn sanitize_command(&self, command: &str) -> Option<String> {
        let spans = extract_messages(command);
        let mut out = String::with_capacity(command.len());
        let mut cursor = 0;
        let mut changed = false;

        for span in &spans {
            let original = span.text(command);
            let cleaned = self.clean(original);
            if cleaned != original {
                log::debug!(
                    "cleaned {:?} commit message ({} -> {} bytes)",
                    span.style,
                    original.len(),
                    cleaned.len()
                );
                out.push_str(&command[cursor..span.start]);
                out.push_str(&cleaned);
                cursor = span.end;
                changed = true;
            }
        }

        if !changed {
            return None;
        }
        out.push_str(&command[cursor..]);
        Some(out)
    }
}
