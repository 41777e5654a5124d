// The comment pre-filter and the scan-buffer primitives the driver loop and
// compiled word bodies use to walk it.
//
// chew.c keeps a single global `pos_idx` into a `string_type` scan buffer;
// here that's `Chew::scan_idx`/`Chew::scan_buf`, with 0-past-end reads
// matching the sentinel the original relies on everywhere.

use crate::engine::Chew;

fn at(buf: &[u8], idx: usize) -> u8 {
    buf.get(idx).copied().unwrap_or(0)
}

/// Extracts and reshapes `/* ... */` comments anchored at the start of a
/// line into the driver's input language: each such comment becomes a run
/// of text terminated by `\nENDDD\n`, with the comment's leading stars and
/// indentation stripped line by line. Everything outside a recognized
/// comment is discarded. A synthetic leading newline makes a comment that
/// opens on the very first line of the file detectable the same way an
/// interior one is.
pub fn prefilter(raw: &[u8]) -> Vec<u8> {
    let mut work = Vec::with_capacity(raw.len() + 1);
    work.push(b'\n');
    work.extend_from_slice(raw);

    let mut out = Vec::new();
    let mut i = 0usize;
    let n = work.len();

    while i < n {
        if at(&work, i) == b'\n' && at(&work, i + 1) == b'/' && at(&work, i + 2) == b'*' {
            i += 3;
            i = skip_stars_and_space(&work, i);
            if at(&work, i) == b'.' {
                i += 1;
            }
            loop {
                let c = at(&work, i);
                if c == 0 {
                    break;
                }
                if c == b'\n' {
                    if at(&work, i + 1) == b'\n' {
                        out.push(b'\n');
                    }
                    out.push(b'\n');
                    i += 1;
                    i = skip_stars_and_space(&work, i);
                } else if c == b'*' && at(&work, i + 1) == b'/' {
                    i += 2;
                    out.extend_from_slice(b"\nENDDD\n");
                    break;
                } else {
                    out.push(c);
                    i += 1;
                }
            }
        } else {
            i += 1;
        }
    }
    out
}

/// A `*` only counts as comment filler when it isn't about to close the
/// comment (`*/`) and isn't the first character on its line — both of
/// those are content, not decoration, and must survive into the scan
/// buffer untouched.
fn skip_stars_and_space(buf: &[u8], mut idx: usize) -> usize {
    loop {
        let c = at(buf, idx);
        let star_is_filler = c == b'*' && at(buf, idx + 1) != b'/' && (idx == 0 || at(buf, idx - 1) != b'\n');
        if c.is_ascii_whitespace() || star_is_filler {
            idx += 1;
        } else {
            break;
        }
    }
    idx
}

/// True when the line starting at `idx` is made up only of uppercase
/// letters, spaces and underscores, is longer than three characters, and is
/// terminated by a newline before the buffer ends.
pub fn is_command_line(buf: &[u8], idx: usize) -> bool {
    let mut len = 0usize;
    let mut i = idx;
    loop {
        let c = at(buf, i);
        if c == 0 {
            return false;
        }
        if c.is_ascii_uppercase() || c == b' ' || c == b'_' {
            len += 1;
            i += 1;
        } else if c == b'\n' {
            return len > 3;
        } else {
            return false;
        }
    }
}

/// Extracts the first whitespace-delimited token from the command line
/// starting at `idx`, along with the scan index just past that line's
/// newline. The command word is looked up and executed with the scan
/// index already past its own line, so any scanning primitive in its body
/// only ever sees the lines that follow.
pub fn command_word(buf: &[u8], idx: usize) -> (String, usize) {
    let mut i = idx;
    let mut word = Vec::new();
    while at(buf, i) != b' ' && at(buf, i) != b'\n' && at(buf, i) != 0 {
        word.push(at(buf, i));
        i += 1;
    }
    let after_line = skip_past_newline(buf, idx);
    (String::from_utf8_lossy(&word).into_owned(), after_line)
}

pub fn skip_past_newline(buf: &[u8], mut idx: usize) -> usize {
    while at(buf, idx) != 0 && at(buf, idx) != b'\n' {
        idx += 1;
    }
    if at(buf, idx) == b'\n' {
        idx += 1;
    }
    idx
}

fn copy_past_newline(buf: &[u8], mut idx: usize, dst: &mut crate::buffer::ByteBuffer) -> usize {
    let mut col = 0usize;
    loop {
        let c = at(buf, idx);
        if c == 0 {
            break;
        }
        if c == b'\t' {
            let spaces = 8 - (col % 8);
            for _ in 0..spaces {
                dst.push_byte(b' ');
            }
            col += spaces;
            idx += 1;
        } else if c == b'\n' {
            dst.push_byte(b'\n');
            idx += 1;
            break;
        } else {
            dst.push_byte(c);
            col += 1;
            idx += 1;
        }
    }
    idx
}

pub fn f_skip_past_newline(engine: &mut Chew) {
    let idx = skip_past_newline(engine.scan_buf(), engine.scan_idx());
    engine.set_scan_idx(idx);
}

pub fn f_copy_past_newline(engine: &mut Chew) {
    let slot = engine.strings.push();
    let mut buf = std::mem::take(slot);
    let idx = copy_past_newline(engine.scan_buf(), engine.scan_idx(), &mut buf);
    *engine.strings.top_mut() = buf;
    engine.set_scan_idx(idx);
}

/// Copies whole lines onto a fresh string-stack slot until the line at the
/// current scan index is itself a command line (or the buffer ends),
/// leaving the scan index sitting right before that line so the driver
/// loop picks it up normally afterwards.
pub fn f_get_stuff_in_command(engine: &mut Chew) {
    engine.strings.push();
    loop {
        let idx = engine.scan_idx();
        if idx >= engine.scan_buf().len() || is_command_line(engine.scan_buf(), idx) {
            break;
        }
        let slot = engine.strings.top_mut();
        let mut buf = std::mem::take(slot);
        let new_idx = copy_past_newline(engine.scan_buf(), idx, &mut buf);
        *engine.strings.top_mut() = buf;
        engine.set_scan_idx(new_idx);
    }
}

pub fn f_print_stack_level(engine: &mut Chew) {
    eprintln!(
        "current string stack depth = {}, current integer stack depth = {}",
        engine.stack_level(),
        engine.ints.depth()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefilter_extracts_comment_at_start_of_file() {
        let src = b"/* hi\n   there */\ncode();\n";
        let out = prefilter(src);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("hi"));
        assert!(text.contains("there"));
        assert!(text.contains("ENDDD"));
        assert!(!text.contains("code();"));
    }

    #[test]
    fn prefilter_strips_leading_stars() {
        let src = b"\n/*\n * one\n * two\n */\n";
        let out = prefilter(src);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("one"));
        assert!(text.contains("two"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn is_command_line_requires_more_than_three_chars() {
        assert!(is_command_line(b"HELLO\n", 0));
        assert!(!is_command_line(b"HI\n", 0));
        assert!(!is_command_line(b"not upper\n", 0));
    }

    #[test]
    fn is_command_line_false_without_terminating_newline() {
        assert!(!is_command_line(b"HELLO", 0));
    }

    #[test]
    fn command_word_splits_on_space() {
        let (word, after) = command_word(b"FOO BAR\nrest\n", 0);
        assert_eq!(word, "FOO");
        assert_eq!(after, 8);
    }

    #[test]
    fn skip_past_newline_lands_after_newline() {
        assert_eq!(skip_past_newline(b"abc\ndef", 0), 4);
    }

    #[test]
    fn skip_past_newline_stops_at_end_without_newline() {
        assert_eq!(skip_past_newline(b"abc", 0), 3);
    }
}
