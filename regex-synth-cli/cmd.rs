use std::io::{self, Write};

use {anyhow::Context, regex_synth::Generated};

use crate::args;

const USAGE: &str = r#"
Generates random strings that match one or more regular expressions.

Strings are generated for each pattern in turn and printed one per line.
Randomness comes from a cryptographically secure random number generator
seeded by the operating system.

USAGE:
    regex-synth [-p <pattern> ...] <pattern> ...

TIP:
    use -h for short docs and --help for long docs

OPTIONS:
%options%
"#;

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let mut patterns = args::patterns::Config::default();
    let mut syntax = args::syntax::Config::default();
    let mut generate = args::generate::Config::default();
    args::configure(
        p,
        USAGE,
        &mut [&mut patterns, &mut syntax, &mut generate],
    )?;
    let pats = patterns.get();
    anyhow::ensure!(!pats.is_empty(), "at least one pattern is required");

    let mut builder = regex_synth::Builder::new();
    syntax.apply(&mut builder);
    generate.apply(&mut builder);

    let stdout = io::stdout();
    let mut wtr = io::BufWriter::new(stdout.lock());
    for (i, pat) in pats.iter().enumerate() {
        let mut generator = builder.build(pat).with_context(|| {
            format!("failed to build generator for pattern {i}: '{pat}'")
        })?;
        let items = if generate.unique() {
            let unique = generator
                .generate_unique(generate.count())
                .with_context(|| format!("failed to generate for '{pat}'"))?;
            if let Some(shortfall) = unique.shortfall() {
                log::warn!("pattern '{}': {}", pat, shortfall);
                if !generate.quiet() {
                    eprintln!("warning: pattern '{pat}': {shortfall}");
                }
            }
            unique.into_items()
        } else {
            generator
                .generate_many(generate.count())
                .with_context(|| format!("failed to generate for '{pat}'"))?
        };
        report_anomalies(pat, &items, generate.quiet());
        for item in items.iter() {
            writeln!(wtr, "{}", item.as_str())?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Log every anomaly, and unless `quiet`, print a one line summary per
/// pattern on stderr.
fn report_anomalies(pat: &str, items: &[Generated], quiet: bool) {
    let mut total = 0;
    for (i, item) in items.iter().enumerate() {
        for anomaly in item.anomalies() {
            log::warn!(
                "pattern '{}', string {}, offset {}: {}",
                pat,
                i,
                anomaly.offset(),
                anomaly,
            );
            total += 1;
        }
    }
    if total > 0 && !quiet {
        eprintln!(
            "warning: pattern '{pat}': {total} anomalies found, \
             generated strings may not match (set RUST_LOG=warn for details)"
        );
    }
}
