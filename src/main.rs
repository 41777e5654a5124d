// Entry point: load stdin as the scan buffer, then compile and run each
// `-f` file against it in turn, writing the accumulator to stdout once
// everything has run — the same shape as chew.c's own `main()`, which
// reads all of stdin up front before looping over its `argv`.

mod buffer;
mod config;
mod dictionary;
mod engine;
mod internals;
mod messages;
mod stacks;

use std::io::Read;
use std::panic;
use std::process;

use config::Config;
use engine::Chew;

fn main() {
    env_logger::init();
    let config = Config::from_args();

    match panic::catch_unwind(|| run(&config)) {
        Ok(Ok(())) => {}
        Ok(Err(code)) => process::exit(code),
        // messages::fatal() panics on an internal invariant violation;
        // chew.c's die() logs and calls exit(1) directly, so the panic is
        // caught here and turned into the same clean exit.
        Err(_) => process::exit(1),
    }
}

fn run(config: &Config) -> Result<(), i32> {
    let mut engine = Chew::new(config.warning, config.internal_wanted);
    engine.cold_start();

    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .expect("failed to read stdin");
    engine.load_input(&input);

    for path in &config.scripts {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                engine.compile_file(&source);
                engine.drive();
            }
            Err(_) => {
                eprintln!("Can't open the input file {path}");
                return Err(33);
            }
        }
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    engine.write_output(&mut handle).expect("failed to write stdout");

    if !engine.strings_balanced() {
        eprintln!("finishing with current stack level {}", engine.stack_level());
        return Err(1);
    }
    Ok(())
}
