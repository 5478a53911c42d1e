use regex_synth::{Builder, Config, ShortfallReason};

use crate::seeded;

#[test]
fn star_with_ceiling_five() {
    let mut generator = seeded("a*", 5, 0);
    let mut seen = [false; 6];
    for generated in generator.generate_many(1_000).unwrap() {
        let s = generated.as_str();
        assert!(s.len() <= 5, "{:?}", s);
        assert!(s.chars().all(|c| c == 'a'), "{:?}", s);
        seen[s.len()] = true;
    }
    assert_eq!([true; 6], seen);
}

#[test]
fn class_of_three() {
    let mut generator = seeded("[abc]", 10, 1);
    let mut seen = vec![];
    for generated in generator.generate_many(300).unwrap() {
        let s = generated.into_string();
        assert!(s == "a" || s == "b" || s == "c", "{:?}", s);
        if !seen.contains(&s) {
            seen.push(s);
        }
    }
    assert_eq!(3, seen.len());
}

#[test]
fn alternation_never_blends() {
    let mut generator = seeded("(foo|bar)", 10, 2);
    let outs = generator.generate_many(200).unwrap();
    assert!(outs.iter().all(|g| g.as_str() == "foo" || g.as_str() == "bar"));
    assert!(outs.iter().any(|g| g.as_str() == "foo"));
    assert!(outs.iter().any(|g| g.as_str() == "bar"));
}

#[test]
fn unique_over_two_member_class() {
    let mut generator = seeded("[ab]", 10, 3);
    let unique = generator.generate_unique(5).unwrap();
    assert!(unique.len() <= 2);
    let mut strings: Vec<&str> = unique.strings().collect();
    strings.sort();
    assert_eq!(vec!["a", "b"], strings);
    // Stopping is driven by the size of the pattern's language, not by the
    // attempt limit.
    assert!(unique.attempts() < 1_000, "{}", unique.attempts());
    let shortfall = unique.shortfall().unwrap();
    assert_eq!(ShortfallReason::LanguageExhausted, shortfall.reason);
    assert_eq!((5, 2), (shortfall.requested, shortfall.produced));
}

#[test]
fn unique_with_tiny_attempt_limit() {
    let mut builder = Builder::new();
    builder.configure(Config::new().attempt_limit(3));
    let mut generator = builder.build("[a-z]{8}").unwrap();
    let unique = generator.generate_unique(10).unwrap();
    assert!(unique.len() <= 3);
    assert_eq!(3, unique.attempts());
    assert_eq!(
        Some(ShortfallReason::AttemptsExhausted),
        unique.shortfall().map(|s| s.reason),
    );
}

#[test]
fn email_like() {
    let mut generator = seeded(r"[a-z]{3,8}\.[a-z]{2,6}@(example|test)\.(com|org)", 10, 4);
    for generated in generator.generate_many(50).unwrap() {
        let s = generated.as_str();
        let (user, host) = s.split_once('@').unwrap();
        assert!(user.contains('.'));
        assert!(
            ["example.com", "example.org", "test.com", "test.org"]
                .contains(&host),
            "{:?}",
            host,
        );
    }
}

#[test]
fn anomalies_surface_without_failing() {
    let mut builder = Builder::new();
    builder.inline_anomalies(true);
    let mut generator = builder.build(r"foo\bbar").unwrap();
    let generated = generator.generate().unwrap();
    assert_eq!(1, generated.anomalies().len());
    assert!(generated.as_str().starts_with("foo<"));
    assert!(generated.as_str().ends_with(">bar"));

    let mut generator = Builder::new().build(r"foo\bbar").unwrap();
    let generated = generator.generate().unwrap();
    assert_eq!("foobar", generated.as_str());
    assert!(!generated.is_clean());
}

#[test]
fn no_unicode_classes_are_ascii() {
    let mut builder = Builder::new();
    builder.unicode(false);
    let mut generator = builder.build(r"\w{20}").unwrap();
    for generated in generator.generate_many(20).unwrap() {
        let s = generated.as_str();
        assert_eq!(20, s.len());
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}

#[test]
fn unicode_classes_are_ascii() {
    let mut generator = Builder::new().build(r"\d{8}").unwrap();
    for generated in generator.generate_many(100).unwrap() {
        let s = generated.as_str();
        assert_eq!(8, s.len());
        assert!(s.bytes().all(|b| b.is_ascii_digit()), "{:?}", s);
    }
    let mut generator = Builder::new().build(r"\w+").unwrap();
    for generated in generator.generate_many(100).unwrap() {
        let s = generated.as_str();
        assert!(!s.is_empty());
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}

#[test]
fn secure_generators_differ() {
    let mut generator = regex_synth::Generator::new("[a-z]{32}").unwrap();
    let (a, b) = (generator.generate().unwrap(), generator.generate().unwrap());
    // 26^32 possibilities: a collision means the RNG is broken.
    assert_ne!(a, b);
}
