use std::path::PathBuf;

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
};

use crate::args::{Configurable, Usage};

/// Collects patterns from positional arguments, `-p/--pattern` and
/// `-f/--pattern-file`.
#[derive(Debug, Default)]
pub struct Config {
    patterns: Vec<String>,
    fixed_strings: bool,
}

impl Config {
    /// Returns all of the pattern strings from this configuration, escaped
    /// if requested.
    ///
    /// Note that it is legal for this to return zero patterns!
    pub fn get(&self) -> Vec<String> {
        if self.fixed_strings {
            self.patterns.iter().map(|p| regex_syntax::escape(p)).collect()
        } else {
            self.patterns.clone()
        }
    }
}

impl Configurable for Config {
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool> {
        match *arg {
            Arg::Short('p') | Arg::Long("pattern") => {
                let pat = p.value().context("-p/--pattern needs a value")?;
                let pat = pat
                    .string()
                    .context("-p/--pattern must be valid UTF-8")?;
                self.patterns.push(pat);
            }
            Arg::Short('F') | Arg::Long("fixed-strings") => {
                self.fixed_strings = true;
            }
            Arg::Short('f') | Arg::Long("pattern-file") => {
                let path =
                    PathBuf::from(p.value().context("-f/--pattern-file")?);
                let contents =
                    std::fs::read_to_string(&path).with_context(|| {
                        anyhow::anyhow!("failed to read {}", path.display())
                    })?;
                self.patterns.extend(contents.lines().map(|x| x.to_string()));
            }
            Arg::Value(ref mut v) => {
                let v = std::mem::take(v);
                self.patterns
                    .push(v.string().context("patterns must be valid UTF-8")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-p, --pattern <pattern>",
                "Add a pattern to this command.",
                r#"
This adds a new pattern to the command. Patterns may also be given as
positional arguments.

Strings are generated for each pattern in turn, in the order given. All
patterns given must be valid UTF-8.
"#,
            ),
            Usage::new(
                "-f, --pattern-file <path>",
                "Read patterns from the file given.",
                r#"
Reads patterns, one per line, from the file given.

All patterns given must be valid UTF-8.
"#,
            ),
            Usage::new(
                "-F, --fixed-strings",
                "Interpret all patterns literally.",
                r#"
When set, all patterns are interpreted as literal strings. So for example,
special regex meta characters like '+' are generated literally instead of
being given special significance.
"#,
            ),
        ];
        USAGES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_flags() {
        let mut p = Parser::from_args(["a+", "-p", "b|c", "--pattern=d"]);
        let mut config = Config::default();
        crate::args::configure(&mut p, "", &mut [&mut config]).unwrap();
        assert_eq!(vec!["a+", "b|c", "d"], config.get());
    }

    #[test]
    fn fixed_strings() {
        let mut p = Parser::from_args(["-F", "a+b"]);
        let mut config = Config::default();
        crate::args::configure(&mut p, "", &mut [&mut config]).unwrap();
        assert_eq!(vec![r"a\+b"], config.get());
    }
}
