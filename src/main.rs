use std::env;
use std::process::ExitCode;

use wish::error::report;
use wish::flags::Flags;
use wish::logging;
use wish::shell::Shell;

fn main() -> ExitCode {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = flags.parse(&args) {
        report(&e);
        return ExitCode::FAILURE;
    }

    if flags.is_set("help") {
        flags.print_help();
        return ExitCode::SUCCESS;
    }

    if flags.is_set("version") {
        println!("wish {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    logging::init(flags.is_set("debug"));

    let result = Shell::new(flags).and_then(|mut shell| shell.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
