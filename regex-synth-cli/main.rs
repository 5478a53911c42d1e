use std::{env, io::Write};

use anyhow::Context;

mod args;
mod cmd;
mod logger;

/// Environment variables consulted for the log level, in order.
const LOG_VARS: &[&str] = &["REGEX_SYNTH_LOG", "RUST_LOG"];

fn main() -> anyhow::Result<()> {
    logger::Logger::init()?;
    log::set_max_level(log_level()?);

    let Err(err) = cmd::run(&mut lexopt::Parser::from_env()) else {
        return Ok(());
    };
    let mut stderr = std::io::stderr().lock();
    if env::var_os("RUST_BACKTRACE").map_or(false, |v| v == "1") {
        writeln!(stderr, "{:?}", err)?;
    } else {
        writeln!(stderr, "error: {:#}", err)?;
    }
    std::process::exit(1);
}

/// The level from the first log variable that is set. Logging is off when
/// none of them are.
fn log_level() -> anyhow::Result<log::LevelFilter> {
    for &var in LOG_VARS {
        if let Ok(value) = env::var(var) {
            return parse_level(&value).with_context(|| format!("${}", var));
        }
    }
    Ok(log::LevelFilter::Off)
}

fn parse_level(value: &str) -> anyhow::Result<log::LevelFilter> {
    if value.is_empty() {
        return Ok(log::LevelFilter::Off);
    }
    value.parse().map_err(|_| {
        anyhow::anyhow!(
            "unrecognized log level '{}' (expected one of off, error, \
             warn, info, debug or trace)",
            value,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(log::LevelFilter::Off, parse_level("").unwrap());
        assert_eq!(log::LevelFilter::Off, parse_level("off").unwrap());
        assert_eq!(log::LevelFilter::Warn, parse_level("warn").unwrap());
        assert_eq!(log::LevelFilter::Trace, parse_level("TRACE").unwrap());
        assert!(parse_level("loud").is_err());
    }
}
