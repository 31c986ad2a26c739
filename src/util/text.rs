use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

/// Display width of a string in character cells.
///
/// Unicode-aware: CJK characters and emoji count as 2 cells, combining marks
/// as 0, ASCII as 1. The layout engine multiplies this by the per-device
/// character width to estimate a tag chip's rendered width.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Strip ANSI escape sequences and control characters from untrusted text.
///
/// Removes CSI sequences (`ESC [ ... final`), OSC sequences (`ESC ] ... BEL`),
/// bare ESC and DEL, and C0 controls other than tab, newline, and carriage
/// return. Clean input is returned borrowed.
pub fn strip_control_chars(s: &str) -> String {
    match strip_cow(s) {
        Cow::Borrowed(clean) => clean.to_string(),
        Cow::Owned(stripped) => stripped,
    }
}

fn strip_cow(s: &str) -> Cow<'_, str> {
    let needs_strip = s
        .chars()
        .any(|c| c == '\x1b' || c == '\x7f' || (c.is_control() && !matches!(c, '\t' | '\n' | '\r')));
    if !needs_strip {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            match chars.peek() {
                // CSI: consume through the final byte (0x40..=0x7e)
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                // OSC: consume through BEL or ST (ESC \)
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' {
                            if chars.peek() == Some(&'\\') {
                                chars.next();
                            }
                            break;
                        }
                    }
                }
                _ => {} // bare ESC dropped
            }
            continue;
        }

        if c == '\x7f' || (c.is_control() && !matches!(c, '\t' | '\n' | '\r')) {
            continue;
        }
        out.push(c);
    }

    Cow::Owned(out)
}
