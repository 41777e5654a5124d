// Leveled diagnostics, wrapping the `log` crate the way the teacher's own
// Msg/DebugLevel pair wraps its message sink, plus the `fatal` helper used
// everywhere an internal invariant is violated.
//
// chew.c treats `-w` as a single boolean flag, not a verbosity level; the
// engine maps it onto the Warning threshold at construction time, so every
// `msg.warning` call site stays unconditional and the on/off behavior lives
// in one place.

use log::{debug, error, info, warn};
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Error,
    Warning,
    Info,
    Debug,
}

pub struct Msg {
    level: DebugLevel,
}

impl Msg {
    pub fn new() -> Msg {
        Msg {
            level: DebugLevel::Error,
        }
    }

    pub fn set_level(&mut self, level: DebugLevel) {
        self.level = level;
    }

    pub fn get_level(&self) -> DebugLevel {
        self.level
    }

    pub fn error<T: Debug>(&self, caller: &str, text: &str, detail: Option<T>) {
        match detail {
            Some(d) => error!("{caller}: {text}: {d:?}"),
            None => error!("{caller}: {text}"),
        }
    }

    pub fn warning<T: Debug>(&self, caller: &str, text: &str, detail: Option<T>) {
        if self.level < DebugLevel::Warning {
            return;
        }
        match detail {
            Some(d) => warn!("{caller}: {text}: {d:?}"),
            None => warn!("{caller}: {text}"),
        }
    }

    pub fn info<T: Debug>(&self, caller: &str, text: &str, detail: Option<T>) {
        if self.level < DebugLevel::Info {
            return;
        }
        match detail {
            Some(d) => info!("{caller}: {text}: {d:?}"),
            None => info!("{caller}: {text}"),
        }
    }

    pub fn debug<T: Debug>(&self, caller: &str, text: &str, detail: Option<T>) {
        if self.level < DebugLevel::Debug {
            return;
        }
        match detail {
            Some(d) => debug!("{caller}: {text}: {d:?}"),
            None => debug!("{caller}: {text}"),
        }
    }
}

impl Default for Msg {
    fn default() -> Self {
        Msg::new()
    }
}

/// Reports an internal invariant violation and unwinds the process. Mirrors
/// chew.c's `die()`, which logs to stderr and calls `exit(1)`; here the exit
/// happens in `main` after catching the panic, so tests can assert on the
/// panic directly instead of tearing down the whole test binary.
pub fn fatal(text: &str) -> ! {
    error!("{text}");
    panic!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(DebugLevel::Error < DebugLevel::Warning);
        assert!(DebugLevel::Warning < DebugLevel::Info);
        assert!(DebugLevel::Info < DebugLevel::Debug);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn fatal_panics() {
        fatal("boom");
    }
}
