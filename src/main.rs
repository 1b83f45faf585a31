use std::io;
use std::process::ExitCode;

use hll_estimator::cli::{Command, Mode};
use hll_estimator::protocol::read_batch;

const USAGE: &str = "usage: hll <estimate|hll> <m> | rho-dist | registers-sample";

fn main() -> ExitCode {
    let mode = match Mode::from_args(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let values = match read_batch(&mut io::stdin().lock()) {
        Ok(values) => values,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match mode.run(&values) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
