// Table of builtin primitives: a name, a function pointer, and a short doc
// string, the same three fields the teacher's own `BuiltInFn` carries.
// `BuiltinId` is the stable index a `Cell::Prim` dispatches through.

use crate::engine::Chew;

pub type BuiltinId = usize;

pub struct BuiltInFn {
    pub name: &'static str,
    pub code: fn(&mut Chew),
    pub doc: &'static str,
}

#[derive(Default)]
pub struct Builtins {
    entries: Vec<BuiltInFn>,
}

impl Builtins {
    pub fn new() -> Self {
        Builtins {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &'static str, code: fn(&mut Chew), doc: &'static str) -> BuiltinId {
        let id = self.entries.len();
        self.entries.push(BuiltInFn { name, code, doc });
        id
    }

    pub fn call(&self, id: BuiltinId, engine: &mut Chew) {
        let f = self.entries[id].code;
        f(engine);
    }

    pub fn name(&self, id: BuiltinId) -> &str {
        self.entries[id].name
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_ref())
    }
}

/// Registers every primitive named in the stack, text-transform and
/// input-scanning operation tables, and returns the filled-in table
/// together with a name -> id map the compiler's dictionary seeding uses.
pub fn register_all() -> Builtins {
    let mut b = Builtins::new();

    use crate::internals::{scan, stack_ops, text};

    b.add("dup", stack_ops::f_dup, "( s -- s s ) duplicate top string");
    b.add("drop", stack_ops::f_drop, "( s -- ) discard top string");
    b.add("swap", stack_ops::f_swap, "( s1 s2 -- s2 s1 ) swap top two strings");
    b.add(
        "remchar",
        stack_ops::f_remchar,
        "( s -- s' ) drop the last byte of the top string",
    );
    b.add(
        "catstr",
        stack_ops::f_catstr,
        "( s1 s2 -- s1s2 ) append top string onto the one beneath it",
    );
    b.add(
        "catstrif",
        stack_ops::f_catstrif,
        "( s1 s2 n -- s1[s2] ) conditionally append, pop n first",
    );
    b.add(
        "maybecatstr",
        stack_ops::f_maybecatstr,
        "( s1 s2 -- s1[s2] ) append iff internalmode matches -i",
    );
    b.add(
        "strip_trailing_newlines",
        stack_ops::f_strip_trailing_newlines,
        "( s -- s' ) trim trailing whitespace from the top string",
    );
    b.add("idrop", stack_ops::f_idrop, "( n -- ) discard top integer");
    b.add("!", stack_ops::f_store, "( n addr -- ) store n into variable addr");
    b.add("@", stack_ops::f_fetch, "( addr -- n ) load variable addr");
    b.add("stdout", stack_ops::f_stdout, "( -- 1 ) push the stdout destination tag");
    b.add("stderr", stack_ops::f_stderr, "( -- 2 ) push the stderr destination tag");
    b.add(
        "print",
        stack_ops::f_print,
        "( s dest -- ) write top string to stdout or stderr, pop both",
    );
    b.add("exit", stack_ops::f_exit, "( -- ) terminate the process immediately");

    b.add(
        "skip_past_newline",
        scan::f_skip_past_newline,
        "( -- ) advance the scan index past the next newline",
    );
    b.add(
        "copy_past_newline",
        scan::f_copy_past_newline,
        "( -- ) copy scan text up to and including the next newline onto top",
    );
    b.add(
        "get_stuff_in_command",
        scan::f_get_stuff_in_command,
        "( -- s ) copy lines up to (not including) the next command line",
    );
    b.add(
        "print_stack_level",
        scan::f_print_stack_level,
        "( -- ) print the current string- and integer-stack depths",
    );

    b.add(
        "translatecomments",
        text::f_translatecomments,
        "( s -- s' ) substitute the escaped comment delimiters {* *} with /* */",
    );
    b.add(
        "wrap_comment",
        text::f_wrap_comment,
        "( indent body -- s' ) wrap body in /* ... */ using the slot beneath as indent",
    );
    b.add(
        "outputdots",
        text::f_outputdots,
        "( s -- s' ) keep only dot-prefixed lines, stripping the dot",
    );
    b.add(
        "courierize",
        text::f_courierize,
        "( s -- s' ) wrap runs of .- or |-prefixed lines in @example markup",
    );
    b.add(
        "bulletize",
        text::f_bulletize,
        "( s -- s' ) turn runs of \\no lines into @itemize @bullet markup",
    );
    b.add(
        "do_fancy_stuff",
        text::f_do_fancy_stuff,
        "( s -- s' ) expand <<text>> into @code{text}",
    );
    b.add(
        "kill_bogus_lines",
        text::f_kill_bogus_lines,
        "( s -- s' ) drop blank lines chew.c's own scanner produced as noise",
    );
    b.add(
        "collapse_whitespace",
        text::f_collapse_whitespace,
        "( s -- s' ) collapse runs of whitespace to a single space",
    );
    b.add("indent", text::f_indent, "( s -- s' ) indent by current paren depth");

    b
}
