use lexopt::{Arg, Parser};

use crate::args::{self, Configurable, Usage};

/// Exposes the parser knobs of a `regex_synth::Builder` via CLI flags.
#[derive(Debug, Default)]
pub struct Config {
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    crlf: bool,
    ignore_whitespace: bool,
    no_unicode: bool,
    octal: bool,
    nest_limit: Option<u32>,
}

impl Config {
    /// Apply these syntax options to the given builder.
    pub fn apply(&self, builder: &mut regex_synth::Builder) {
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .crlf(self.crlf)
            .ignore_whitespace(self.ignore_whitespace)
            .unicode(!self.no_unicode)
            .octal(self.octal);
        if let Some(limit) = self.nest_limit {
            builder.nest_limit(limit);
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
            Arg::Short('i') | Arg::Long("case-insensitive") => {
                self.case_insensitive = true;
            }
            Arg::Long("multi-line") => {
                self.multi_line = true;
            }
            Arg::Long("dot-matches-new-line") => {
                self.dot_matches_new_line = true;
            }
            Arg::Long("crlf") => {
                self.crlf = true;
            }
            Arg::Long("ignore-whitespace") => {
                self.ignore_whitespace = true;
            }
            Arg::Short('U') | Arg::Long("no-unicode") => {
                self.no_unicode = true;
            }
            Arg::Long("octal") => {
                self.octal = true;
            }
            Arg::Long("nest-limit") => {
                self.nest_limit = Some(args::parse(p, "--nest-limit")?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn usage(&self) -> &[Usage] {
        const USAGES: &[Usage] = &[
            Usage::new(
                "-i, --case-insensitive",
                "Enable case insensitive mode.",
                r#"
This enables case insensitive mode for all patterns given. Every cased
character in a pattern may then be generated in any of its case variants.

Note that individual patterns can have case insensitivity enabled via the
inline regex flag 'i'. For example, '(?i:abc)'.
"#,
            ),
            Usage::new(
                "--multi-line",
                "Enable multi-line mode.",
                r#"
This enables multi-line mode for all patterns given. When multi-line mode is
enabled, the anchors '^' and '$' turn into line anchors. A line anchor that
is not at the very start of the generated string inserts a '\n'.

Note that individual patterns can have multi-line mode enabled via the
inline regex flag 'm'. For example, '(?m:^)'.
"#,
            ),
            Usage::new(
                "--dot-matches-new-line",
                "Make a dot match \\n.",
                r#"
Enabling this causes a '.' (dot) to match the line terminator. This makes no
difference to generated strings: a dot always generates printable ASCII.
"#,
            ),
            Usage::new(
                "--crlf",
                "Line anchors are CRLF aware.",
                r#"
When enabled, line anchors become CRLF aware. Generation still inserts a
single '\n' for a line anchor.
"#,
            ),
            Usage::new(
                "--ignore-whitespace",
                "Enable whitespace insensitive mode.",
                r#"
This enables whitespace insensitive mode for all patterns given. When
enabled, all whitespace in patterns is ignored. Moreover, any lines whose
first non-whitespace character is '#' will be ignored and treated as a comment.

Note that individual patterns can have whitespace insensitivity enabled via the
inline regex flag 'x'. For example, '(?x:a b c)' is equivalent to 'abc'.
"#,
            ),
            Usage::new(
                "-U, --no-unicode",
                "Disable Unicode mode.",
                r#"
This disables Unicode mode for all patterns given. When Unicode mode is
disabled, classes like '\w', '\d' and '\s' only contain ASCII characters.
This makes little difference to generated strings, since generation prefers
the printable ASCII members of a class in either mode.

Note that individual patterns can have Unicode mode disabled via the inline
regex flag 'u'. For example, '(?-u:\w)'.
"#,
            ),
            Usage::new(
                "--octal",
                "Permit octal escapes.",
                r#"
This permits octal escape sequences in the regex syntax. For example, it treats
'\17' as equivalent to '\x0F'. This is disabled by default.
"#,
            ),
            Usage::new(
                "--nest-limit <limit>",
                "Set the nest limit on the syntax.",
                r#"
This sets the nesting limit of the regex syntax on all patterns. Generation
recurses once per level of nesting, so this also limits how deep generation
can recurse.

Note that the default is likely big enough to permit most regex patterns.
"#,
            ),
        ];
        USAGES
    }
}
