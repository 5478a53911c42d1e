/*!
This crate generates random strings that match a regular expression.

Generated strings are useful as test fixtures, fuzzing inputs or sample data
that must conform to some format, without writing a generator by hand for
each format. Randomness comes from a cryptographically secure random number
generator seeded by the operating system, unless a different one is
provided.

Patterns are parsed by [`regex-syntax`](regex_syntax), so they use the same
syntax as the `regex` crate. Generation then walks the parsed syntax tree
([`Hir`](regex_syntax::hir::Hir)) and makes a random choice at every
quantifier, alternation and character class.

# Example

```
use regex_synth::Generator;

let mut generator = Generator::new(r"(foo|bar)-[0-9]{4}")?;
for generated in generator.generate_many(10)? {
    let s = generated.as_str();
    assert!(s.starts_with("foo-") || s.starts_with("bar-"));
    assert_eq!(8, s.len());
}
# Ok::<(), Box<dyn std::error::Error>>(())
```

# Example: distinct strings

Asking for more distinct strings than a pattern can produce doesn't hang.
The result simply has fewer strings than requested, and says why:

```
use regex_synth::{Generator, ShortfallReason};

let mut generator = Generator::new("[ab]")?;
let unique = generator.generate_unique(5)?;
assert_eq!(2, unique.len());
let shortfall = unique.shortfall().unwrap();
assert_eq!(ShortfallReason::LanguageExhausted, shortfall.reason);
# Ok::<(), Box<dyn std::error::Error>>(())
```

# Character sets

Classes draw from the 95 printable ASCII characters, `' '` through `'~'`,
that they contain. So "any character" (`.`) and negated classes (`[^abc]`)
produce printable ASCII minus whatever they exclude, and `\d` or `\w`
produce ASCII digits and word characters even in Unicode mode. Only a
class with no printable ASCII member at all, like `[α-ω]`, draws from its
full set of members.

# Limitations

* Open ended repetitions (`*`, `+`, `{m,}`) are capped by a configurable
ceiling. See [`Config::more_limit`].
* Output is not uniformly distributed over all strings a pattern matches.
* Line anchors (`^` and `$` in multi-line mode) insert a `\n` when they
aren't at the very start of the output. This approximates, but doesn't
guarantee, a line boundary at that position.
* Word boundaries (`\b`, `\B` and friends) are unsupported. They, along with
a start of text anchor that isn't at the start, are reported as an
[`Anomaly`] on the [`Generated`] value rather than as an error.
*/

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

pub use crate::{
    batch::{
        generate_string, generate_strings, generate_unique_strings,
        Shortfall, ShortfallReason, Unique,
    },
    builder::{Builder, Config, Generator},
    error::Error,
    generate::{generate_match, Anomaly, Buffer, Generated},
    sample::Sampler,
    size::distinct_bound,
};

// Re-exported so that callers can name the tree type without depending on
// a matching version of regex-syntax themselves.
pub use regex_syntax;

#[macro_use]
mod macros;

mod batch;
mod builder;
pub mod domain;
mod error;
mod generate;
mod sample;
mod size;
