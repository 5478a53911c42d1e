use rand::{rngs::StdRng, RngCore, SeedableRng};
use regex_syntax::{hir::Hir, ParserBuilder};

use crate::{
    batch::{self, Unique},
    error::Error,
    generate::Generated,
    sample::Sampler,
};

/// The default ceiling on open ended repetitions.
const DEFAULT_MORE_LIMIT: u32 = 10;

/// The default number of attempts when generating distinct strings.
const DEFAULT_ATTEMPT_LIMIT: u64 = 10_000_000;

/// The configuration used when generating strings.
///
/// A configuration is built by chaining calls, where each call consumes and
/// returns the configuration:
///
/// ```
/// use regex_synth::Config;
///
/// let config = Config::new().more_limit(3).inline_anomalies(true);
/// assert_eq!(3, config.get_more_limit());
/// assert_eq!(10_000_000, config.get_attempt_limit());
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    more_limit: u32,
    attempt_limit: u64,
    inline_anomalies: bool,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config {
            more_limit: DEFAULT_MORE_LIMIT,
            attempt_limit: DEFAULT_ATTEMPT_LIMIT,
            inline_anomalies: false,
        }
    }

    /// Set the ceiling for open ended repetitions, i.e., `*`, `+` and
    /// `{m,}`.
    ///
    /// A repetition with minimum `m` is repeated between `m` and
    /// `max(m, limit)` times. So with a limit of `5`, `a*` produces between
    /// zero and five `a`s while `a+` produces between one and five.
    /// Repetitions with an explicit upper bound, like `a{2,8}`, are not
    /// affected.
    ///
    /// The default is `10`.
    pub fn more_limit(mut self, limit: u32) -> Config {
        self.more_limit = limit;
        self
    }

    /// Set the maximum number of strings to generate while looking for
    /// distinct ones.
    ///
    /// Some patterns can only produce a few distinct strings, or make them
    /// very unlikely. This limit guarantees that generating distinct strings
    /// eventually stops, even when the requested count can't be reached.
    ///
    /// The default is `10,000,000`.
    pub fn attempt_limit(mut self, limit: u64) -> Config {
        self.attempt_limit = limit;
        self
    }

    /// Whether to write a description of each anomaly into the generated
    /// text, enclosed in `<` and `>`.
    ///
    /// Anomalies are always available via
    /// [`Generated::anomalies`](crate::Generated::anomalies). This is
    /// disabled by default.
    pub fn inline_anomalies(mut self, yes: bool) -> Config {
        self.inline_anomalies = yes;
        self
    }

    /// Returns the ceiling for open ended repetitions.
    pub fn get_more_limit(&self) -> u32 {
        self.more_limit
    }

    /// Returns the maximum number of attempts for distinct strings.
    pub fn get_attempt_limit(&self) -> u64 {
        self.attempt_limit
    }

    /// Returns whether anomalies are written into generated text.
    pub fn get_inline_anomalies(&self) -> bool {
        self.inline_anomalies
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

/// A builder for configuring and constructing a [`Generator`].
///
/// The syntax options mirror those of the `regex` crate's `RegexBuilder`.
/// They are handed to `regex-syntax` when a pattern is parsed.
#[derive(Clone, Debug)]
pub struct Builder {
    config: Config,
    parser: ParserBuilder,
}

impl Builder {
    /// Create a new builder with a default configuration.
    pub fn new() -> Builder {
        Builder { config: Config::new(), parser: ParserBuilder::new() }
    }

    /// Build a generator for the given pattern, drawing randomness from a
    /// sampler seeded by the operating system.
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern fails to parse.
    pub fn build(&self, pattern: &str) -> Result<Generator, Error> {
        self.build_with_rng(pattern, StdRng::from_os_rng())
    }

    /// Build a generator for the given pattern, drawing randomness from the
    /// given random number generator.
    ///
    /// This is mostly useful for reproducible output: pass a seeded RNG.
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern fails to parse.
    pub fn build_with_rng<R: RngCore>(
        &self,
        pattern: &str,
        rng: R,
    ) -> Result<Generator<R>, Error> {
        let hir = self.parser.build().parse(pattern)?;
        Ok(self.build_from_hir_with_rng(hir, rng))
    }

    /// Build a generator from an already parsed syntax tree.
    ///
    /// Syntax options set on this builder have no effect here.
    pub fn build_from_hir(&self, hir: Hir) -> Generator {
        self.build_from_hir_with_rng(hir, StdRng::from_os_rng())
    }

    /// Build a generator from an already parsed syntax tree, drawing
    /// randomness from the given random number generator.
    pub fn build_from_hir_with_rng<R: RngCore>(
        &self,
        hir: Hir,
        rng: R,
    ) -> Generator<R> {
        Generator {
            hir,
            config: self.config.clone(),
            sampler: Sampler::new(rng),
        }
    }

    /// Apply the given configuration, replacing any set previously.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = config;
        self
    }

    /// Set the ceiling for open ended repetitions.
    ///
    /// See [`Config::more_limit`].
    pub fn more_limit(&mut self, limit: u32) -> &mut Builder {
        self.config = self.config.clone().more_limit(limit);
        self
    }

    /// Set the maximum number of attempts when generating distinct strings.
    ///
    /// See [`Config::attempt_limit`].
    pub fn attempt_limit(&mut self, limit: u64) -> &mut Builder {
        self.config = self.config.clone().attempt_limit(limit);
        self
    }

    /// Whether to write anomaly descriptions into the generated text.
    ///
    /// See [`Config::inline_anomalies`].
    pub fn inline_anomalies(&mut self, yes: bool) -> &mut Builder {
        self.config = self.config.clone().inline_anomalies(yes);
        self
    }

    /// Enable or disable the case insensitive flag (`i`) by default.
    pub fn case_insensitive(&mut self, yes: bool) -> &mut Builder {
        self.parser.case_insensitive(yes);
        self
    }

    /// Enable or disable multi-line mode (`m`) by default. In multi-line
    /// mode, `^` and `$` are line anchors.
    pub fn multi_line(&mut self, yes: bool) -> &mut Builder {
        self.parser.multi_line(yes);
        self
    }

    /// Enable or disable the "dot matches any character" flag (`s`) by
    /// default. Either way, `.` only produces printable ASCII.
    pub fn dot_matches_new_line(&mut self, yes: bool) -> &mut Builder {
        self.parser.dot_matches_new_line(yes);
        self
    }

    /// Enable or disable CRLF mode (`R`) by default.
    pub fn crlf(&mut self, yes: bool) -> &mut Builder {
        self.parser.crlf(yes);
        self
    }

    /// Enable or disable whitespace insensitive mode (`x`) by default.
    pub fn ignore_whitespace(&mut self, yes: bool) -> &mut Builder {
        self.parser.ignore_whitespace(yes);
        self
    }

    /// Enable or disable Unicode mode (`u`) by default.
    ///
    /// With Unicode mode disabled, classes like `\w` and `\d` only contain
    /// ASCII characters. Either way, generation prefers the printable ASCII
    /// members of a class.
    pub fn unicode(&mut self, yes: bool) -> &mut Builder {
        self.parser.unicode(yes);
        self
    }

    /// Whether to support octal escapes like `\141`.
    pub fn octal(&mut self, yes: bool) -> &mut Builder {
        self.parser.octal(yes);
        self
    }

    /// Set the nesting limit of the parser.
    ///
    /// Generation recurses once per level of nesting, so this also bounds
    /// the stack used while generating.
    pub fn nest_limit(&mut self, limit: u32) -> &mut Builder {
        self.parser.nest_limit(limit);
        self
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

/// A generator of random strings matching one regular expression.
///
/// A generator owns its parsed pattern, its configuration and its source of
/// randomness. Generating requires mutable access, so a generator can't be
/// shared between threads, but it can be moved to another thread (the
/// default RNG is `Send`).
///
/// # Example
///
/// ```
/// use regex_synth::Generator;
///
/// let mut generator = Generator::new(r"[a-f]{3}-[0-9]{2}")?;
/// let id = generator.generate()?;
/// assert_eq!(6, id.as_str().len());
/// assert_eq!(Some('-'), id.as_str().chars().nth(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Generator<R = StdRng> {
    hir: Hir,
    config: Config,
    sampler: Sampler<R>,
}

impl Generator {
    /// Build a generator for the given pattern with a default
    /// configuration.
    ///
    /// To configure the generator, use a [`Builder`].
    ///
    /// # Errors
    ///
    /// This returns an error when the pattern fails to parse.
    pub fn new(pattern: &str) -> Result<Generator, Error> {
        Builder::new().build(pattern)
    }
}

impl<R: RngCore> Generator<R> {
    /// Generate one string.
    ///
    /// # Errors
    ///
    /// This returns an error when a character class in the pattern has
    /// nothing to pick from, e.g., `[^ -~]`.
    pub fn generate(&mut self) -> Result<Generated, Error> {
        batch::generate_string(&self.hir, &self.config, &mut self.sampler)
    }

    /// Generate exactly `count` strings, possibly with duplicates.
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_many(
        &mut self,
        count: usize,
    ) -> Result<Vec<Generated>, Error> {
        batch::generate_strings(&self.hir, &self.config, count, &mut self.sampler)
    }

    /// Generate up to `count` distinct strings.
    ///
    /// The result may hold fewer strings than requested. See
    /// [`generate_unique_strings`](crate::generate_unique_strings).
    ///
    /// ```
    /// use regex_synth::{Generator, ShortfallReason};
    ///
    /// let mut generator = Generator::new("[ab]")?;
    /// let unique = generator.generate_unique(5)?;
    /// assert_eq!(2, unique.len());
    /// assert_eq!(
    ///     Some(ShortfallReason::LanguageExhausted),
    ///     unique.shortfall().map(|s| s.reason),
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// See [`Generator::generate`].
    pub fn generate_unique(&mut self, count: usize) -> Result<Unique, Error> {
        batch::generate_unique_strings(
            &self.hir,
            &self.config,
            count,
            &mut self.sampler,
        )
    }

    /// Returns the syntax tree strings are generated from.
    pub fn hir(&self) -> &Hir {
        &self.hir
    }

    /// Returns the configuration of this generator.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
