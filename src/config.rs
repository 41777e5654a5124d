// Command-line argument processing, built the way the teacher's own
// `config.rs` builds it: clap's builder API over `arg!`, not argh (argh
// only ever showed up in the teacher's Cargo.toml, never in its actual
// source — this crate follows the source).
//
// chew.c's own `usage()` prints a single fixed line to stderr and exits
// with status 33 on any unrecognized flag; clap's own "unrecognized
// argument" diagnostics are discarded in favor of that exact line so the
// two interpreters are indistinguishable from the outside.

use clap::{arg, ArgAction, Command};

pub const USAGE: &str = "usage: -[d|i|g] <file >file";

pub struct Config {
    /// One entry per `-f PATH`, in the order given; each is compiled and run
    /// in turn once stdin has been loaded.
    pub scripts: Vec<String>,
    /// -i: selects the "internal" documentation variant.
    pub internal_wanted: bool,
    /// -w: warn about unrecognized command lines and undefined words.
    pub warning: bool,
}

impl Config {
    pub fn from_args() -> Config {
        match Self::parse(std::env::args()) {
            Ok(config) => config,
            Err(()) => {
                eprintln!("{USAGE}");
                std::process::exit(33);
            }
        }
    }

    fn command() -> Command {
        Command::new("chew")
            .about("Extracts and reshapes documentation comments embedded in source files")
            .arg(arg!(-f --file <PATH> "compile and run this script file").action(ArgAction::Append))
            .arg(arg!(-i --internal "select the internal documentation variant").action(ArgAction::SetTrue))
            .arg(arg!(-w --warn "warn about unrecognized commands and words").action(ArgAction::SetTrue))
    }

    fn parse<I, T>(args: I) -> Result<Config, ()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args).map_err(|_| ())?;

        let scripts = matches
            .get_many::<String>("file")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();

        Ok(Config {
            scripts,
            internal_wanted: matches.get_flag("internal"),
            warning: matches.get_flag("warn"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_repeated_file_flags_in_order() {
        let config = Config::parse(["chew", "-f", "a.c", "-f", "b.c"]).unwrap();
        assert_eq!(config.scripts, vec!["a.c".to_string(), "b.c".to_string()]);
    }

    #[test]
    fn sets_internal_and_warning_flags() {
        let config = Config::parse(["chew", "-i", "-w"]).unwrap();
        assert!(config.internal_wanted);
        assert!(config.warning);
    }

    #[test]
    fn defaults_are_empty_and_false() {
        let config = Config::parse(["chew"]).unwrap();
        assert!(config.scripts.is_empty());
        assert!(!config.internal_wanted);
        assert!(!config.warning);
    }

    #[test]
    fn unrecognized_flag_is_rejected() {
        assert!(Config::parse(["chew", "-z"]).is_err());
    }
}
