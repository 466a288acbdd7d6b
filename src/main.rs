//! Volume Discount function runner
//!
//! Reads one input document (stdin or `--input`), writes one output document to
//! stdout. Logs and the optional evaluation report go to stderr.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process::ExitCode,
};

use tracing::{error, warn};

use volume_discount::{
    configuration::Configuration,
    function::{self, FunctionResult, RunInput},
    report::write_report,
};

use crate::cli::{CliConfig, CliError, logging::init_subscriber};

mod cli;

fn main() -> ExitCode {
    let config = CliConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for subscriber errors"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "volume discount run failed");

            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<(), CliError> {
    let raw = read_input(config.input.as_deref()).map_err(CliError::ReadInput)?;

    let result = match serde_json::from_str::<RunInput>(&raw) {
        Ok(input) => {
            let discount_config = Configuration::load(input.configuration_blob());
            let cart = input.cart_snapshot();

            if config.explain {
                write_report(io::stderr().lock(), discount_config.as_ref(), &cart)?;
            }

            function::run_with(discount_config.as_ref(), &cart, config.protocol)
        }
        Err(error) => {
            warn!(%error, "invalid input document, no discount");

            FunctionResult::empty(config.protocol)
        }
    };

    write_output(io::stdout().lock(), &result)
}

/// Write the output document followed by a newline.
///
/// The document is serialized before anything is written, so a failing writer
/// is always reported as an output error.
fn write_output(mut out: impl Write, result: &FunctionResult) -> Result<(), CliError> {
    let mut document = serde_json::to_vec(result)?;

    document.push(b'\n');

    out.write_all(&document).map_err(CliError::WriteOutput)?;
    out.flush().map_err(CliError::WriteOutput)?;

    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut raw = String::new();

            io::stdin().read_to_string(&mut raw)?;

            Ok(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use volume_discount::function::Protocol;

    use super::*;

    /// Writer whose pipe has been closed.
    #[derive(Debug)]
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn write_output_appends_newline() -> TestResult {
        let mut out = Vec::new();

        write_output(&mut out, &FunctionResult::empty(Protocol::LegacyRun))?;

        assert_eq!(
            String::from_utf8(out)?,
            "{\"discountApplicationStrategy\":\"FIRST\",\"discounts\":[]}\n"
        );

        Ok(())
    }

    #[test]
    fn closed_stdout_is_an_output_error() {
        let result = write_output(
            ClosedPipe,
            &FunctionResult::empty(Protocol::CartLinesDiscountsGenerate),
        );

        assert!(matches!(result, Err(CliError::WriteOutput(_))));
    }
}
