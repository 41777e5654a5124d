// Stack manipulation and I/O primitives: the direct analogues of chew.c's
// `drop`, `idrop`, `icatstr`, `swap`, `other_dup`, `bang`, `atsign` and
// `print`/`hello`-style output words.

use std::io::Write;

use crate::engine::Chew;
use crate::messages::fatal;

pub fn f_dup(engine: &mut Chew) {
    engine.strings.dup();
}

pub fn f_drop(engine: &mut Chew) {
    engine.strings.drop_top();
}

pub fn f_swap(engine: &mut Chew) {
    engine.strings.swap();
}

pub fn f_remchar(engine: &mut Chew) {
    engine.strings.top_mut().drop_last();
}

pub fn f_catstr(engine: &mut Chew) {
    engine.strings.catstr();
}

pub fn f_catstrif(engine: &mut Chew) {
    let cond = engine.ints.pop();
    if cond != 0 {
        engine.strings.catstr();
    } else {
        engine.strings.drop_top();
    }
}

pub fn f_maybecatstr(engine: &mut Chew) {
    if engine.internal_mode_matches() {
        engine.strings.catstr();
    } else {
        engine.strings.drop_top();
    }
}

pub fn f_strip_trailing_newlines(engine: &mut Chew) {
    let buf = engine.strings.top_mut();
    while !buf.is_empty() && buf.at(buf.len() - 1).is_ascii_whitespace() {
        buf.drop_last();
    }
}

pub fn f_idrop(engine: &mut Chew) {
    engine.ints.pop();
}

pub fn f_store(engine: &mut Chew) {
    let addr = engine.ints.pop();
    let value = engine.ints.pop();
    engine.vars.set(addr as usize, value);
}

pub fn f_fetch(engine: &mut Chew) {
    let addr = engine.ints.pop();
    engine.ints.push(engine.vars.get(addr as usize));
}

pub fn f_stdout(engine: &mut Chew) {
    engine.ints.push(1);
}

pub fn f_stderr(engine: &mut Chew) {
    engine.ints.push(2);
}

pub fn f_print(engine: &mut Chew) {
    let dest = engine.ints.pop();
    let text = engine.strings.pop();
    match dest {
        1 => {
            std::io::stdout()
                .write_all(text.as_bytes())
                .expect("failed to write stdout");
        }
        2 => {
            std::io::stderr()
                .write_all(text.as_bytes())
                .expect("failed to write stderr");
        }
        _ => fatal("print: destination must be stdout or stderr"),
    }
}

pub fn f_exit(_engine: &mut Chew) {
    std::process::exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Chew {
        Chew::new(false, false)
    }

    #[test]
    fn strip_trailing_newlines_trims_whitespace() {
        let mut e = engine();
        e.strings.top_mut().append_slice(b"hi \n\t");
        f_strip_trailing_newlines(&mut e);
        assert_eq!(e.strings.top().as_bytes(), b"hi");
    }

    #[test]
    fn catstrif_false_drops_without_appending() {
        let mut e = engine();
        e.strings.top_mut().append_slice(b"base");
        e.strings.push().append_slice(b"tail");
        e.ints.push(0);
        f_catstrif(&mut e);
        assert_eq!(e.strings.top().as_bytes(), b"base");
    }

    #[test]
    fn catstrif_true_appends() {
        let mut e = engine();
        e.strings.top_mut().append_slice(b"base");
        e.strings.push().append_slice(b"tail");
        e.ints.push(1);
        f_catstrif(&mut e);
        assert_eq!(e.strings.top().as_bytes(), b"basetail");
    }

    #[test]
    fn store_and_fetch_roundtrip() {
        let mut e = engine();
        let addr = e.vars.alloc(0);
        e.ints.push(42);
        e.ints.push(addr as i64);
        f_store(&mut e);
        e.ints.push(addr as i64);
        f_fetch(&mut e);
        assert_eq!(e.ints.pop(), 42);
    }

    #[test]
    #[should_panic(expected = "destination must be")]
    fn print_bad_destination_is_fatal() {
        let mut e = engine();
        e.strings.top_mut().append_slice(b"x");
        e.ints.push(9);
        f_print(&mut e);
    }
}
