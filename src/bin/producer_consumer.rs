use std::process::ExitCode;

use bounded_buffer::{diag, run, Config, ConsoleSink, Result, RunReport, UniformValues};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run_default() -> Result<RunReport> {
    let config = Config::default();
    // ThreadRng is not Send, so the producer thread gets its own seeded generator.
    let values = UniformValues::new(StdRng::from_entropy(), config.min_value, config.max_value)?;
    run(&config, values, &ConsoleSink)
}

fn main() -> ExitCode {
    match run_default() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            diag::error(err.to_string());
            ExitCode::FAILURE
        }
    }
}
