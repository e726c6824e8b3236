//! Brine interpreter CLI.

use brine_eval::stdout_handler;
use brinec::{config_from_env, init_tracing, read_source, render_error, run_source};
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(first) = args.first() else {
        print_usage(&mut std::io::stderr());
        return ExitCode::FAILURE;
    };

    match first.as_str() {
        "-h" | "--help" => {
            print_usage(&mut std::io::stdout());
            ExitCode::SUCCESS
        }
        "-V" | "--version" => {
            println!("brine {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        path => run(path, args[1..].to_vec()),
    }
}

/// Run the script at `path`; errors go to stderr.
fn run(path: &str, script_args: Vec<String>) -> ExitCode {
    let mut stderr = std::io::stderr();
    let color = stderr.is_terminal();

    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => {
            let _ = render_error(&err, path, "", color, &mut stderr);
            return ExitCode::FAILURE;
        }
    };

    match run_source(&source, path, script_args, config_from_env(), stdout_handler()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = std::io::stdout().flush();
            let _ = render_error(&err, path, &source, color, &mut stderr);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(out: &mut impl Write) {
    let _ = writeln!(out, "Usage: brine <file> [args...]");
    let _ = writeln!(out);
    let _ = writeln!(out, "Runs a Brine script. Trailing arguments are available");
    let _ = writeln!(out, "to the script as the constant `str[] argv`.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Options:");
    let _ = writeln!(out, "  -h, --help       Print this help");
    let _ = writeln!(out, "  -V, --version    Print the version");
    let _ = writeln!(out);
    let _ = writeln!(out, "Environment:");
    let _ = writeln!(out, "  BRINE_LOG          Log filter directives, e.g. brine_eval=debug");
    let _ = writeln!(out, "  BRINE_LOG_TREE=1   Show logs as an indented span tree");
    let _ = writeln!(out, "  BRINE_MAX_DEPTH    Maximum nested function calls (default 1024)");
}
