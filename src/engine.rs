// The interpreter proper: owns both stacks, the dictionary, the variable
// table and the scan buffer, and drives execution of compiled word bodies.
//
// Where chew.c threads execution through `exec()`'s `switch` on a `pcu`
// union and a manual program counter, this dispatches on the `Cell` enum
// directly and uses ordinary Rust recursion for `call` cells — the host
// call stack plays the role chew.c's `call()` plays by hand with its own
// save/restore of `pc`.

use std::io::Write;

use crate::dictionary::{Cell, Dictionary, Variables, INTERNALMODE_IDX};
use crate::internals::builtin::{register_all, Builtins};
use crate::internals::compiler::compile_script;
use crate::messages::{fatal, DebugLevel, Msg};
use crate::stacks::{IntStack, StringStack};

pub struct Chew {
    pub strings: StringStack,
    pub ints: IntStack,
    pub dict: Dictionary,
    pub vars: Variables,
    pub builtins: Builtins,
    /// -w: gates unrecognized-command and unresolved-call warnings, via
    /// `msg`'s level rather than a separate flag read at each call site.
    pub msg: Msg,

    /// -i: the value `maybecatstr` compares `internalmode` against.
    pub internal_wanted: bool,

    /// The prefiltered scan buffer every `-f` file's driver loop reads from.
    scan_buf: Vec<u8>,
    scan_idx: usize,
}

impl Chew {
    pub fn new(warning: bool, internal_wanted: bool) -> Self {
        let mut msg = Msg::new();
        // chew.c's own `-w` is a single on/off switch, not a verbosity
        // level; it maps onto `Msg`'s level as the Warning threshold so
        // `msg.warning` calls only surface when `-w` was given, while
        // `msg.error` always does.
        msg.set_level(if warning { DebugLevel::Warning } else { DebugLevel::Error });
        Chew {
            strings: StringStack::new(),
            ints: IntStack::new(),
            dict: Dictionary::new(),
            vars: Variables::new(),
            builtins: Builtins::new(),
            msg,
            internal_wanted,
            scan_buf: Vec::new(),
            scan_idx: 0,
        }
    }

    /// Registers every primitive and seeds the dictionary with one entry
    /// per builtin name plus the single pre-declared variable, the
    /// equivalent of chew.c's `add_intrinsic`/`add_variable` calls in
    /// `main` before any file is compiled.
    pub fn cold_start(&mut self) {
        self.builtins = register_all();
        let names: Vec<(usize, String)> = self
            .builtins
            .names()
            .enumerate()
            .map(|(i, n)| (i, n.to_string()))
            .collect();
        for (id, name) in names {
            self.dict.define(&name, vec![Cell::Prim(id)]);
        }
        self.dict
            .define("internalmode", vec![Cell::PushVar(INTERNALMODE_IDX)]);
    }

    pub fn internalmode(&self) -> i64 {
        self.vars.get(INTERNALMODE_IDX)
    }

    pub fn internal_mode_matches(&self) -> bool {
        (self.internal_wanted as i64) == self.internalmode()
    }

    /// Runs the comment pre-filter over raw source text and loads the
    /// result as the scan buffer the driver loop reads from. Called once,
    /// before any `-f` file is compiled, mirroring chew.c reading all of
    /// stdin up front in `main` before looping over `-f` arguments.
    pub fn load_input(&mut self, raw: &[u8]) {
        self.scan_buf = crate::internals::scan::prefilter(raw);
        self.scan_idx = 0;
    }

    pub fn compile_file(&mut self, source: &str) {
        compile_script(self, source);
    }

    /// Runs the driver loop once over the scan buffer. Called once per `-f`
    /// file; the scan index always restarts at 0 (scripts see the buffer
    /// from the start every time) while the string stack only resets its
    /// top, leaving the accumulator's content from earlier runs intact.
    pub fn drive(&mut self) {
        self.strings.reset_for_drive();
        self.scan_idx = 0;
        while self.scan_idx < self.scan_buf.len() {
            if crate::internals::scan::is_command_line(&self.scan_buf, self.scan_idx) {
                let (word, after_line) = crate::internals::scan::command_word(&self.scan_buf, self.scan_idx);
                match self.dict.lookup(&word) {
                    Some(id) => {
                        self.scan_idx = after_line;
                        self.exec_word(id);
                    }
                    None => {
                        self.msg.warning("drive", &format!("{word} is not recognised"), None::<()>);
                        self.scan_idx = after_line;
                    }
                }
            } else {
                self.scan_idx = crate::internals::scan::skip_past_newline(&self.scan_buf, self.scan_idx);
            }
        }
    }

    pub fn scan_buf(&self) -> &[u8] {
        &self.scan_buf
    }

    pub fn scan_idx(&self) -> usize {
        self.scan_idx
    }

    pub fn set_scan_idx(&mut self, idx: usize) {
        self.scan_idx = idx;
    }

    pub fn exec_word(&mut self, id: usize) {
        let body = self.dict.body(id);
        self.exec_body(&body);
    }

    pub fn exec_body(&mut self, body: &[Cell]) {
        for cell in body {
            match cell {
                Cell::Prim(i) => self.call_builtin(*i),
                Cell::Call(Some(id)) => self.exec_word(*id),
                Cell::Call(None) => fatal("call to an undefined word"),
                Cell::Text(bytes) => {
                    let slot = self.strings.push();
                    slot.append_slice(bytes);
                }
                Cell::Number(n) => self.ints.push(*n),
                Cell::PushVar(idx) => self.ints.push(*idx as i64),
            }
        }
    }

    fn call_builtin(&mut self, id: usize) {
        let builtins = std::mem::take(&mut self.builtins);
        builtins.call(id, self);
        self.builtins = builtins;
    }

    pub fn stack_level(&self) -> usize {
        self.strings.top_index()
    }

    pub fn strings_balanced(&self) -> bool {
        self.strings.is_balanced()
    }

    pub fn write_output<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.strings.accumulator().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_engine() -> Chew {
        let mut e = Chew::new(false, false);
        e.cold_start();
        e
    }

    #[test]
    fn cold_start_registers_known_primitives() {
        let e = new_engine();
        assert!(e.dict.lookup("dup").is_some());
        assert!(e.dict.lookup("catstr").is_some());
        assert!(e.dict.lookup("internalmode").is_some());
    }

    #[test]
    fn direct_command_invocation_prints_to_stdout() {
        let mut e = new_engine();
        e.compile_file(": HI \"hi\\n\" stdout print ;\n");
        e.load_input(b"\nHI\n");
        e.drive();
        let mut out = Vec::new();
        e.write_output(&mut out).unwrap();
        assert!(out.is_empty());
        assert!(e.strings_balanced());
    }

    #[test]
    fn accumulation_via_catstr_reaches_accumulator() {
        let mut e = new_engine();
        e.compile_file(": ACCUM \"hi\" catstr ;\n");
        e.load_input(b"/*\n * ACCUM\n */");
        e.drive();
        let mut out = Vec::new();
        e.write_output(&mut out).unwrap();
        assert_eq!(out, b"hi");
    }

    #[test]
    fn unresolved_call_is_fatal_only_when_executed() {
        let mut e = new_engine();
        e.compile_file(": BOGUS nosuchword ;\n");
        assert!(e.dict.lookup("BOGUS").is_some());
    }
}
