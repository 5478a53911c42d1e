use std::collections::HashSet;

use rand::RngCore;
use regex_syntax::hir::Hir;

use crate::{
    builder::Config,
    error::Error,
    generate::{generate_match, Buffer, Generated},
    sample::Sampler,
    size,
};

/// The most distinct strings room is reserved for before generating any.
const MAX_PREALLOCATED: usize = 1 << 16;

/// Generate one string matching `hir`.
///
/// This uses a fresh [`Buffer`] configured from `config`, so nothing
/// survives from one call to the next.
///
/// # Errors
///
/// This returns an error when a character class in `hir` has nothing to
/// pick from.
pub fn generate_string<R: RngCore>(
    hir: &Hir,
    config: &Config,
    sampler: &mut Sampler<R>,
) -> Result<Generated, Error> {
    let mut buf = Buffer::new().inline_anomalies(config.get_inline_anomalies());
    generate_match(hir, config.get_more_limit(), &mut buf, sampler)?;
    Ok(buf.into_generated())
}

/// Generate exactly `count` strings matching `hir`. The same string may
/// appear more than once.
///
/// # Errors
///
/// This returns an error when a character class in `hir` has nothing to
/// pick from.
pub fn generate_strings<R: RngCore>(
    hir: &Hir,
    config: &Config,
    count: usize,
    sampler: &mut Sampler<R>,
) -> Result<Vec<Generated>, Error> {
    (0..count).map(|_| generate_string(hir, config, sampler)).collect()
}

/// Generate up to `count` distinct strings matching `hir`.
///
/// Strings are generated until `count` distinct ones have been found, or
/// until one of these happens first:
///
/// * The attempt limit from `config` is used up.
/// * Every string the pattern can produce has been found. This is only
/// detected when the number of distinct strings the pattern can produce is
/// known to be smaller than `count`, e.g., `[ab]` can produce only two.
///
/// Stopping early isn't an error. Callers should check
/// [`Unique::shortfall`] (or compare [`Unique::len`] with the count they
/// asked for) to find out whether they got everything.
///
/// # Errors
///
/// This returns an error when a character class in `hir` has nothing to
/// pick from.
pub fn generate_unique_strings<R: RngCore>(
    hir: &Hir,
    config: &Config,
    count: usize,
    sampler: &mut Sampler<R>,
) -> Result<Unique, Error> {
    // A bound of zero means generation will fail, so let it do that below
    // instead of quietly returning nothing.
    let target = match size::distinct_bound(hir, config.get_more_limit()) {
        Some(bound) if bound > 0 => {
            usize::try_from(bound).map_or(count, |bound| bound.min(count))
        }
        _ => count,
    };
    if target < count {
        debug!(
            "pattern can produce at most {} distinct strings, \
             but {} were requested",
            target, count,
        );
    }

    // `count` alone never sizes an allocation.
    let capacity = usize::try_from(config.get_attempt_limit())
        .map_or(target, |limit| target.min(limit))
        .min(MAX_PREALLOCATED);
    let mut seen = HashSet::with_capacity(capacity);
    let mut items = Vec::with_capacity(capacity);
    let mut attempts = 0u64;
    while items.len() < target {
        if attempts >= config.get_attempt_limit() {
            debug!(
                "gave up after {} attempts with {} of {} distinct strings",
                attempts,
                items.len(),
                count,
            );
            break;
        }
        attempts += 1;
        let generated = generate_string(hir, config, sampler)?;
        if seen.insert(generated.as_str().to_string()) {
            items.push(generated);
        } else {
            trace!("duplicate string at attempt {}: {:?}", attempts, generated.as_str());
        }
    }
    let reason = if items.len() >= count {
        None
    } else if items.len() >= target {
        Some(ShortfallReason::LanguageExhausted)
    } else {
        Some(ShortfallReason::AttemptsExhausted)
    };
    Ok(Unique { items, requested: count, attempts, reason })
}

/// The result of generating distinct strings.
///
/// This may hold fewer strings than requested. See [`Unique::shortfall`].
#[derive(Clone, Debug)]
pub struct Unique {
    items: Vec<Generated>,
    requested: usize,
    attempts: u64,
    reason: Option<ShortfallReason>,
}

impl Unique {
    /// Returns the distinct strings generated, in the order they were first
    /// produced.
    pub fn items(&self) -> &[Generated] {
        &self.items
    }

    /// Consume this result and return the generated strings.
    pub fn into_items(self) -> Vec<Generated> {
        self.items
    }

    /// Returns an iterator over the text of each generated string.
    pub fn strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|g| g.as_str())
    }

    /// Returns the number of distinct strings generated.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when no strings were generated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of strings that were requested.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Returns the number of strings generated in total, duplicates
    /// included.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Returns true when as many strings as requested were generated.
    pub fn is_complete(&self) -> bool {
        self.reason.is_none()
    }

    /// Describes why fewer strings than requested were generated, or `None`
    /// when the request was fully met.
    pub fn shortfall(&self) -> Option<Shortfall> {
        self.reason.map(|reason| Shortfall {
            requested: self.requested,
            produced: self.items.len(),
            reason,
        })
    }
}

/// A uniqueness request that stopped short of the requested count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Shortfall {
    /// The number of strings requested.
    pub requested: usize,
    /// The number of distinct strings actually produced.
    pub produced: usize,
    /// Why generation stopped.
    pub reason: ShortfallReason,
}

/// The reason a uniqueness request stopped short.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ShortfallReason {
    /// The configured attempt limit was used up.
    AttemptsExhausted,
    /// Every string the pattern can produce was found.
    LanguageExhausted,
}

impl core::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let why = match self.reason {
            ShortfallReason::AttemptsExhausted => "attempt limit reached",
            ShortfallReason::LanguageExhausted => {
                "pattern has no more distinct matches"
            }
        };
        write!(
            f,
            "generated {} of {} requested distinct strings ({})",
            self.produced, self.requested, why,
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn hir(pattern: &str) -> Hir {
        regex_syntax::parse(pattern).unwrap()
    }

    fn sampler(seed: u64) -> Sampler<StdRng> {
        Sampler::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn string_is_fresh_each_time() {
        let (re, config) = (hir("ab"), Config::new());
        let mut sampler = sampler(0);
        for _ in 0..3 {
            let got = generate_string(&re, &config, &mut sampler).unwrap();
            assert_eq!("ab", got.as_str());
        }
    }

    #[test]
    fn strings_exact_count() {
        let config = Config::new();
        let got = generate_strings(&hir("[ab]"), &config, 50, &mut sampler(1))
            .unwrap();
        assert_eq!(50, got.len());
        assert!(got.iter().all(|g| g.as_str() == "a" || g.as_str() == "b"));
        let got = generate_strings(&hir("a"), &config, 0, &mut sampler(1))
            .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn unique_small_language_stops_early() {
        let config = Config::new();
        let got =
            generate_unique_strings(&hir("[ab]"), &config, 5, &mut sampler(2))
                .unwrap();
        let mut strings: Vec<&str> = got.strings().collect();
        strings.sort();
        assert_eq!(vec!["a", "b"], strings);
        assert!(got.attempts() < 1_000);
        assert_eq!(
            Some(Shortfall {
                requested: 5,
                produced: 2,
                reason: ShortfallReason::LanguageExhausted,
            }),
            got.shortfall(),
        );
    }

    #[test]
    fn unique_complete() {
        let config = Config::new();
        let got = generate_unique_strings(
            &hir("[a-z]{4}"),
            &config,
            20,
            &mut sampler(3),
        )
        .unwrap();
        assert!(got.is_complete());
        assert_eq!(None, got.shortfall());
        assert_eq!(20, got.len());
        let distinct: HashSet<&str> = got.strings().collect();
        assert_eq!(20, distinct.len());
    }

    #[test]
    fn unique_attempts_exhausted() {
        // The bound for this is 4 ("", "a", "a", "aa"), but only three
        // distinct strings exist, so the attempt limit has to kick in.
        let opt = hir("a?");
        let re = Hir::concat(vec![opt.clone(), Hir::capture(
            regex_syntax::hir::Capture { index: 1, name: None, sub: Box::new(opt) },
        )]);
        let config = Config::new().attempt_limit(200);
        let got =
            generate_unique_strings(&re, &config, 4, &mut sampler(4)).unwrap();
        assert_eq!(3, got.len());
        assert_eq!(200, got.attempts());
        assert_eq!(
            Some(ShortfallReason::AttemptsExhausted),
            got.shortfall().map(|s| s.reason),
        );
    }

    #[test]
    fn unique_zero_attempts() {
        let config = Config::new().attempt_limit(0);
        let got = generate_unique_strings(&hir("[a-z]+"), &config, 3, &mut sampler(5))
            .unwrap();
        assert!(got.is_empty());
        assert_eq!(0, got.attempts());
        assert!(!got.is_complete());
    }

    #[test]
    fn unique_huge_count_is_a_soft_shortfall() {
        // Neither the language size (26^20) nor the count fits the
        // reservation, so only the attempt limit should size anything.
        let config = Config::new().attempt_limit(3);
        let got = generate_unique_strings(
            &hir("[a-z]{20}"),
            &config,
            usize::MAX,
            &mut sampler(7),
        )
        .unwrap();
        assert_eq!(3, got.attempts());
        assert!(got.len() <= 3);
        assert_eq!(usize::MAX, got.requested());
        assert_eq!(
            Some(ShortfallReason::AttemptsExhausted),
            got.shortfall().map(|s| s.reason),
        );

        let config = Config::new().attempt_limit(u64::MAX);
        let got = generate_unique_strings(
            &hir("[ab]"),
            &config,
            usize::MAX,
            &mut sampler(8),
        )
        .unwrap();
        assert_eq!(2, got.len());
    }

    #[test]
    fn unique_empty_class_is_an_error() {
        let config = Config::new();
        let got =
            generate_unique_strings(&hir("[a&&b]"), &config, 3, &mut sampler(6));
        assert_eq!(Some(Error::EmptyClass), got.err());
    }

    #[test]
    fn shortfall_display() {
        let shortfall = Shortfall {
            requested: 5,
            produced: 2,
            reason: ShortfallReason::LanguageExhausted,
        };
        assert_eq!(
            "generated 2 of 5 requested distinct strings \
             (pattern has no more distinct matches)",
            shortfall.to_string(),
        );
    }
}
