use lexopt::{Arg, Parser};

use crate::args::{self, Configurable, Usage};

/// Flags controlling how many strings are generated and how.
#[derive(Debug)]
pub struct Config {
    count: usize,
    unique: bool,
    more_limit: Option<u32>,
    attempt_limit: Option<u64>,
    inline_anomalies: bool,
    quiet: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            count: 1,
            unique: false,
            more_limit: None,
            attempt_limit: None,
            inline_anomalies: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Apply the generation limits to the given builder.
    pub fn apply(&self, builder: &mut regex_synth::Builder) {
        builder.inline_anomalies(self.inline_anomalies);
        if let Some(limit) = self.more_limit {
            builder.more_limit(limit);
        }
        if let Some(limit) = self.attempt_limit {
            builder.attempt_limit(limit);
        }
    }

    /// The number of strings to generate per pattern.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether generated strings must be distinct.
    pub fn unique(&self) -> bool {
        self.unique
    }

    /// Whether to keep quiet about anomalies and shortfalls.
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('n') | Arg::Long("count") => {
                self.count = args::parse(p, "-n/--count")?;
            }
            Arg::Short('u') | Arg::Long("unique") => {
                self.unique = true;
            }
            Arg::Short('l') | Arg::Long("more-limit") => {
                self.more_limit = Some(args::parse(p, "-l/--more-limit")?);
            }
            Arg::Long("attempt-limit") => {
                // "none" means "as many attempts as it takes", which is
                // close enough to u64::MAX.
                let limit = args::parse_maybe(p, "--attempt-limit")?;
                self.attempt_limit = Some(limit.unwrap_or(u64::MAX));
            }
            Arg::Long("inline-anomalies") => {
                self.inline_anomalies = true;
            }
            Arg::Short('q') | Arg::Long("quiet") => {
                self.quiet = true;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-n, --count <number>",
                "The number of strings to generate per pattern.",
                r#"
The number of strings to generate for each pattern given. The default is 1.

With -u/--unique, fewer strings may be printed than requested. See the
documentation for that flag.
"#,
            ),
            Usage::new(
                "-u, --unique",
                "Only generate distinct strings.",
                r#"
When enabled, every string printed for a pattern is distinct from the others
printed for that pattern.

Some patterns can't produce as many distinct strings as requested. For
example, '[ab]' can only ever produce two. In that case generation stops once
every possible string has been found, or when the attempt limit is reached
(see --attempt-limit), and a warning is printed to stderr.
"#,
            ),
            Usage::new(
                "-l, --more-limit <number>",
                "Set the ceiling for *, + and {m,}.",
                r#"
Sets the maximum number of repetitions for open ended repetition operators.
With a limit of 5, 'a*' generates between zero and five 'a's, while 'a+'
generates between one and five. A repetition whose minimum exceeds the limit,
like 'a{8,}', generates exactly its minimum.

Repetitions with an explicit maximum, like 'a{2,8}', are not affected.

The default is 10.
"#,
            ),
            Usage::new(
                "--attempt-limit <number>",
                "Set the attempt limit for -u/--unique.",
                r#"
Sets the maximum number of strings generated while looking for distinct
ones. The special value 'none' removes the limit.

The default is 10000000.
"#,
            ),
            Usage::new(
                "--inline-anomalies",
                "Write anomaly descriptions into generated strings.",
                r#"
Some constructs can't be generated faithfully, for example word boundaries
('\b') or a start of text anchor ('\A') in the middle of a pattern. These are
called anomalies. By default, they are reported on stderr and otherwise
skipped. When this flag is set, a description of each anomaly is also written
into the generated string itself, enclosed in '<' and '>'.
"#,
            ),
            Usage::new(
                "-q, --quiet",
                "Don't report anomalies or shortfalls on stderr.",
                r#"
Suppresses the summary printed on stderr when anomalies were found or when
fewer distinct strings than requested were generated. Log messages (see
RUST_LOG) are still emitted.
"#,
            ),
        ];
        USAGES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured<const N: usize>(argv: [&str; N]) -> anyhow::Result<Config> {
        let mut p = Parser::from_args(argv);
        let mut config = Config::default();
        crate::args::configure(&mut p, "", &mut [&mut config])?;
        Ok(config)
    }

    #[test]
    fn defaults() {
        let config = configured([]).unwrap();
        assert_eq!(1, config.count());
        assert!(!config.unique());
        assert!(!config.quiet());
    }

    #[test]
    fn flags() {
        let config = configured([
            "-n",
            "5",
            "--unique",
            "-l3",
            "--attempt-limit",
            "none",
            "--inline-anomalies",
            "-q",
        ])
        .unwrap();
        assert_eq!(5, config.count());
        assert!(config.unique());
        assert_eq!(Some(3), config.more_limit);
        assert_eq!(Some(u64::MAX), config.attempt_limit);
        assert!(config.inline_anomalies);
        assert!(config.quiet());
    }

    #[test]
    fn bad_count() {
        let err = configured(["--count", "many"]).unwrap_err();
        assert!(format!("{:#}", err).contains("-n/--count"));
    }

    #[test]
    fn unknown_flag() {
        assert!(configured(["--frobnicate"]).is_err());
    }
}
