// The text-reshaping primitives: these turn the plain-text body of a
// pre-filtered comment into Texinfo markup, the way chew.c's own
// `courierize`, `bulletize`, `do_fancy_stuff` and friends turn a binutils
// doc comment into `@deffn`/`@example`/`@code` markup for `makeinfo`.
//
// Each primitive works over raw bytes, not `str` — the source documents
// these primitives reshape are plain ASCII, and chew.c's own `at()` treats
// every byte as an 8-bit character with no notion of multi-byte encoding.

use crate::buffer::ByteBuffer;
use crate::engine::Chew;

fn at(bytes: &[u8], idx: usize) -> u8 {
    bytes.get(idx).copied().unwrap_or(0)
}

fn transform_top(engine: &mut Chew, f: impl FnOnce(&[u8]) -> Vec<u8>) {
    let top = engine.strings.pop();
    let bytes = top.into_bytes();
    let result = f(&bytes);
    engine.strings.push().append_slice(&result);
}

pub fn f_collapse_whitespace(engine: &mut Chew) {
    transform_top(engine, collapse_whitespace);
}

/// Collapses every run of whitespace bytes — including newlines — to a
/// single space.
fn collapse_whitespace(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut last_was_ws = false;
    for &c in bytes {
        if c.is_ascii_whitespace() {
            if !last_was_ws {
                out.push(b' ');
                last_was_ws = true;
            }
        } else {
            out.push(c);
            last_was_ws = false;
        }
    }
    out
}

pub fn f_kill_bogus_lines(engine: &mut Chew) {
    transform_top(engine, kill_bogus_lines);
}

/// Drops the leading run of newlines, trims trailing whitespace, and folds
/// the blank line that sits next to a `.`-prefixed line (on either side of
/// it) into the dot line itself. A body that starts with a dot gets a
/// newline put back in front of it.
fn kill_bogus_lines(bytes: &[u8]) -> Vec<u8> {
    let mut idx = 0usize;
    while at(bytes, idx) == b'\n' {
        idx += 1;
    }
    let mut out = Vec::new();
    if at(bytes, idx) == b'.' {
        out.push(b'\n');
    }

    let mut end = idx;
    while at(bytes, end) != 0 {
        end += 1;
    }
    if end > 0 {
        end -= 1;
        while end > 0 && at(bytes, end).is_ascii_whitespace() {
            end -= 1;
        }
        end += 1;
    }

    let mut c = idx;
    let mut start_of_line = true;
    let mut dot: u8 = 0;
    while c < end {
        if at(bytes, c) == b'\n' && at(bytes, c + 1) == b'\n' && at(bytes, c + 2) == b'.' {
            c += 1;
        } else if at(bytes, c) == b'.' && start_of_line {
            dot = 2;
        } else if at(bytes, c) == b'\n' && at(bytes, c + 1) == b'\n' && dot != 0 {
            c += 1;
        }
        out.push(at(bytes, c));
        if at(bytes, c) == b'\n' {
            start_of_line = true;
            dot = if dot == 2 { 1 } else { 0 };
        } else {
            start_of_line = false;
        }
        c += 1;
    }
    out.push(b'\n');
    out
}

pub fn f_indent(engine: &mut Chew) {
    transform_top(engine, indent);
}

/// Tracks parenthesis depth character by character. A newline is followed
/// by a depth-derived prefix (each pair of levels becomes a tab, an odd
/// remainder four spaces); an opening paren on an otherwise-empty line gets
/// that same prefix plus three extra spaces before it.
fn indent(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut tab: i64 = 0;
    let mut idx = 0usize;
    let mut on_line = false;
    while at(bytes, idx) != 0 {
        match at(bytes, idx) {
            b'\n' => {
                out.push(b'\n');
                idx += 1;
                if tab != 0 && at(bytes, idx) != 0 {
                    let mut i = 0i64;
                    while i < tab - 1 {
                        out.push(b'\t');
                        i += 2;
                    }
                    if i < tab {
                        out.extend_from_slice(b"    ");
                    }
                }
                on_line = false;
            }
            b'(' => {
                if !on_line {
                    let mut i = 1i64;
                    while i < tab - 1 {
                        out.push(b'\t');
                        i += 2;
                    }
                    if i < tab {
                        out.extend_from_slice(b"    ");
                    }
                    out.extend_from_slice(b"   ");
                }
                tab += 1;
                out.push(b'(');
                idx += 1;
                on_line = true;
            }
            b')' => {
                tab -= 1;
                out.push(b')');
                idx += 1;
                on_line = true;
            }
            c => {
                out.push(c);
                on_line = true;
                idx += 1;
            }
        }
    }
    out
}

pub fn f_outputdots(engine: &mut Chew) {
    transform_top(engine, outputdots);
}

/// Keeps only the lines that begin with `.`, stripping the dot and
/// converting the run of spaces that follows it into tabs (every eight
/// spaces becomes one), and translates `{*`/`*}` to `/*`/`*/` along the way.
/// Lines that don't start with `.` are dropped entirely.
fn outputdots(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut idx = 0usize;
    while at(bytes, idx) != 0 {
        if at(bytes, idx) == b'.' {
            idx += 1;
            let mut spaces: i64 = 0;
            loop {
                let c = at(bytes, idx);
                if c == 0 || c == b'\n' {
                    break;
                }
                if c == b' ' {
                    spaces += 1;
                    idx += 1;
                    continue;
                }
                while spaces >= 8 {
                    out.push(b'\t');
                    spaces -= 8;
                }
                while spaces > 0 {
                    out.push(b' ');
                    spaces -= 1;
                }
                if c == b'{' && at(bytes, idx + 1) == b'*' {
                    out.extend_from_slice(b"/*");
                    idx += 2;
                } else if c == b'*' && at(bytes, idx + 1) == b'}' {
                    out.extend_from_slice(b"*/");
                    idx += 2;
                } else {
                    out.push(c);
                    idx += 1;
                }
            }
            if at(bytes, idx) == b'\n' {
                idx += 1;
            }
            out.push(b'\n');
        } else {
            idx = crate::internals::scan::skip_past_newline(bytes, idx);
        }
    }
    out
}

pub fn f_courierize(engine: &mut Chew) {
    transform_top(engine, courierize);
}

/// Wraps contiguous runs of lines that start with `.` or `|` in
/// `@example ... @end example`. Inside such a run, bare `{`/`}` get an `@`
/// prefix unless they belong to an `@name{...}` parameter span, tracked with
/// a nesting counter; `{*`/`*}` still translate to `/*`/`*/`.
fn courierize(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut idx = 0usize;
    let mut command: i32 = 0;
    while at(bytes, idx) != 0 {
        if at(bytes, idx) == b'\n' && (at(bytes, idx + 1) == b'.' || at(bytes, idx + 1) == b'|') {
            out.extend_from_slice(b"\n@example\n");
            loop {
                idx += 2;
                while at(bytes, idx) != 0 && at(bytes, idx) != b'\n' {
                    if command > 1 {
                        if at(bytes, idx) == b'{' {
                            command += 1;
                        } else if at(bytes, idx) == b'}' {
                            command -= 1;
                        }
                    } else if command != 0 {
                        if at(bytes, idx) == b'{' {
                            command += 1;
                        } else if !at(bytes, idx).is_ascii_lowercase() {
                            command -= 1;
                        }
                    } else if at(bytes, idx) == b'@' && at(bytes, idx + 1).is_ascii_lowercase() {
                        command += 1;
                    } else if at(bytes, idx) == b'{' && at(bytes, idx + 1) == b'*' {
                        out.extend_from_slice(b"/*");
                        idx += 2;
                        continue;
                    } else if at(bytes, idx) == b'*' && at(bytes, idx + 1) == b'}' {
                        out.extend_from_slice(b"*/");
                        idx += 2;
                        continue;
                    } else if at(bytes, idx) == b'{' || at(bytes, idx) == b'}' {
                        out.push(b'@');
                    }
                    out.push(at(bytes, idx));
                    idx += 1;
                }
                out.push(b'\n');
                if !(at(bytes, idx) == b'\n' && (at(bytes, idx + 1) == b'.' || at(bytes, idx + 1) == b'|')) {
                    break;
                }
            }
            out.extend_from_slice(b"@end example");
        } else {
            out.push(at(bytes, idx));
            idx += 1;
        }
    }
    out
}

pub fn f_bulletize(engine: &mut Chew) {
    transform_top(engine, bulletize);
}

/// Turns each run of `\no <text>` lines into a texinfo `@itemize @bullet`
/// block with one `@item` per line; `@*` unescapes to a literal `*`.
fn bulletize(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut idx = 0usize;
    let mut on = false;
    while at(bytes, idx) != 0 {
        if at(bytes, idx) == b'@' && at(bytes, idx + 1) == b'*' {
            out.push(b'*');
            idx += 2;
        } else if at(bytes, idx) == b'\n' && at(bytes, idx + 1) == b'o' && at(bytes, idx + 2).is_ascii_whitespace() {
            if !on {
                out.extend_from_slice(b"\n@itemize @bullet\n");
                on = true;
            }
            out.extend_from_slice(b"\n@item\n");
            idx += 3;
        } else {
            out.push(at(bytes, idx));
            if on && at(bytes, idx) == b'\n' && at(bytes, idx + 1) == b'\n' && at(bytes, idx + 2) != b'o' {
                out.extend_from_slice(b"@end itemize");
                on = false;
            }
            idx += 1;
        }
    }
    if on {
        out.extend_from_slice(b"@end itemize\n");
    }
    out
}

pub fn f_do_fancy_stuff(engine: &mut Chew) {
    transform_top(engine, do_fancy_stuff);
}

/// Expands `<<text>>` into `@code{text}`. The opening `<<` only counts when
/// not immediately followed by whitespace; once it does, scanning stops at
/// the first `>` and skips two bytes, so a single stray `>` inside the span
/// still closes it early — a quirk carried over rather than tidied up.
fn do_fancy_stuff(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut idx = 0usize;
    while at(bytes, idx) != 0 {
        if at(bytes, idx) == b'<' && at(bytes, idx + 1) == b'<' && !at(bytes, idx + 2).is_ascii_whitespace() {
            idx += 2;
            out.extend_from_slice(b"@code{");
            while at(bytes, idx) != 0 && at(bytes, idx) != b'>' {
                out.push(at(bytes, idx));
                idx += 1;
            }
            out.push(b'}');
            idx += 2;
        } else {
            out.push(at(bytes, idx));
            idx += 1;
        }
    }
    out
}

pub fn f_translatecomments(engine: &mut Chew) {
    transform_top(engine, translatecomments);
}

/// Substitutes the escaped comment delimiters `{*`/`*}` with the real
/// `/*`/`*/`, letting a doc comment embed an example that itself contains a
/// comment without prematurely closing the outer one.
fn translatecomments(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0usize;
    while at(bytes, idx) != 0 {
        if at(bytes, idx) == b'{' && at(bytes, idx + 1) == b'*' {
            out.extend_from_slice(b"/*");
            idx += 2;
        } else if at(bytes, idx) == b'*' && at(bytes, idx + 1) == b'}' {
            out.extend_from_slice(b"*/");
            idx += 2;
        } else {
            out.push(at(bytes, idx));
            idx += 1;
        }
    }
    out
}

pub fn f_wrap_comment(engine: &mut Chew) {
    let indent = engine.strings.pop();
    let indent_bytes = indent.into_bytes();
    let body_bytes = engine.strings.top().as_bytes().to_vec();

    let mut out = Vec::new();
    out.extend_from_slice(&indent_bytes);
    out.extend_from_slice(b"/* ");
    let mut idx = 0usize;
    while idx < body_bytes.len() {
        let c = body_bytes[idx];
        out.push(c);
        if c == b'\n' && body_bytes.get(idx + 1).copied() != Some(b'\n') {
            out.extend_from_slice(&indent_bytes);
            out.extend_from_slice(b"   ");
        }
        idx += 1;
    }
    out.extend_from_slice(b"  */");

    *engine.strings.top_mut() = ByteBuffer::from_bytes(&out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_folds_newlines_too() {
        assert_eq!(collapse_whitespace(b"a   b\tc\n\nd"), b"a b c d");
    }

    #[test]
    fn kill_bogus_lines_prepends_newline_for_dot_start() {
        assert_eq!(kill_bogus_lines(b".deffn\nbody\n"), b"\n.deffn\nbody\n");
    }

    #[test]
    fn kill_bogus_lines_drops_blank_pair_before_dot() {
        let input = b"text\n\n.deffn\nmore\n";
        assert_eq!(kill_bogus_lines(input), b"text\n.deffn\nmore\n");
    }

    #[test]
    fn kill_bogus_lines_drops_blank_pair_after_dot_line() {
        let input = b".deffn\n\nmore\n";
        assert_eq!(kill_bogus_lines(input), b"\n.deffn\nmore\n");
    }

    #[test]
    fn kill_bogus_lines_trims_trailing_whitespace() {
        assert_eq!(kill_bogus_lines(b"body  \n\n\n"), b"body\n");
    }

    #[test]
    fn indent_adds_prefix_after_open_paren() {
        let out = indent(b"(a\n(b\n)\n)");
        assert_eq!(out, b"(a\n    (b\n)\n)");
    }

    #[test]
    fn outputdots_keeps_only_dot_lines_and_strips_dot() {
        assert_eq!(outputdots(b".first\nskip this\n.second\n"), b"first\nsecond\n");
    }

    #[test]
    fn outputdots_expands_leading_spaces_to_tabs() {
        assert_eq!(outputdots(b".        x\n"), b"\tx\n");
    }

    #[test]
    fn outputdots_translates_escaped_comment_markers() {
        assert_eq!(outputdots(b".a {* c *} b\n"), b"a /* c */ b\n");
    }

    #[test]
    fn courierize_wraps_dot_prefixed_run_in_example() {
        let out = courierize(b"intro\n.one\n.two\nmore");
        assert_eq!(out, b"intro\n@example\none\ntwo\n@end examplemore");
    }

    #[test]
    fn courierize_at_prefixes_bare_braces_outside_command_span() {
        let out = courierize(b"\n.a { b }\n");
        assert_eq!(out, b"\n@example\na @{ b @}\n@end example");
    }

    #[test]
    fn courierize_leaves_name_brace_span_alone() {
        let out = courierize(b"\n.see @var{x} here\n");
        assert_eq!(out, b"\n@example\nsee @var{x} here\n@end example");
    }

    #[test]
    fn bulletize_wraps_contiguous_bullets() {
        let input = b"\no first\n\no second\n\nafter\n";
        let out = bulletize(input);
        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("\n@itemize @bullet\n\n@item\nfirst\n\n@item\nsecond\n"));
        assert!(text.contains("@end itemize"));
        assert!(text.ends_with("after\n"));
    }

    #[test]
    fn bulletize_unescapes_at_star() {
        assert_eq!(bulletize(b"a @* b"), b"a * b");
    }

    #[test]
    fn do_fancy_stuff_expands_code_span() {
        assert_eq!(do_fancy_stuff(b"see <<foo>> here"), b"see @code{foo} here");
    }

    #[test]
    fn do_fancy_stuff_requires_non_space_after_open() {
        assert_eq!(do_fancy_stuff(b"a << b >> c"), b"a << b >> c");
    }

    #[test]
    fn translatecomments_substitutes_escaped_delimiters() {
        assert_eq!(translatecomments(b"{* note *}"), b"/* note */");
    }

    #[test]
    fn wrap_comment_uses_top_as_indent_and_beneath_as_body() {
        let mut e = Chew::new(false, false);
        e.strings.top_mut().append_slice(b"one\ntwo");
        e.strings.push().append_slice(b"  ");
        f_wrap_comment(&mut e);
        assert_eq!(e.strings.top().as_bytes(), b"  /* one\n     two  */");
    }
}
