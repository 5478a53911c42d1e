// Every string generated from these patterns must be matched, in full, by
// the regex crate. Patterns with anchors that generation only approximates
// (line anchors) or doesn't support (word boundaries) are left out.

use {regex::Regex, regex_synth::domain::PRINTABLE};

use crate::seeded;

const PATTERNS: &[&str] = &[
    "",
    "abc",
    "a*b+c?",
    "[a-z]{3}-[0-9]{2,4}",
    r"\d+\.\d{2}",
    r"\w+@\w+\.(com|net|org)",
    "[^abc]{5}",
    ".{0,12}",
    "(?s).{3}",
    "(?i)hello",
    "(a|bc|def)+",
    "((ab)*|c{2,3})x",
    r"\p{Greek}{1,4}",
    "[[:upper:]][[:lower:]]{2,}",
    r"\Afoo\z",
    "^[A-F0-9]{8}(-[A-F0-9]{4}){3}-[A-F0-9]{12}$",
    "x{0}y",
    "(?:)",
    "[α-ω]+",
    r"[\x20-\x2F]{4}",
    r"(?i)k{3}\s\S",
];

// Patterns whose classes have no printable ASCII members at all.
const NON_ASCII: &[&str] = &[r"\p{Greek}{1,4}", "[α-ω]+"];

#[test]
fn generated_strings_match() {
    for (i, pattern) in PATTERNS.iter().enumerate() {
        let re = Regex::new(&format!("^(?:{})$", pattern)).unwrap();
        let mut generator = seeded(pattern, 6, i as u64);
        for generated in generator.generate_many(200).unwrap() {
            assert!(generated.is_clean(), "{:?}: {:?}", pattern, generated);
            assert!(
                re.is_match(generated.as_str()),
                "pattern {:?} generated non-matching {:?}",
                pattern,
                generated.as_str(),
            );
        }
    }
}

#[test]
fn unique_strings_match() {
    let re = Regex::new("^(?:[0-9a-f]{2}:){2}[0-9a-f]{2}$").unwrap();
    let mut generator = seeded("([0-9a-f]{2}:){2}[0-9a-f]{2}", 6, 99);
    let unique = generator.generate_unique(500).unwrap();
    assert!(unique.is_complete());
    assert!(unique.strings().all(|s| re.is_match(s)));
}

#[test]
fn generated_strings_are_printable() {
    for (i, pattern) in PATTERNS.iter().enumerate() {
        if NON_ASCII.contains(pattern) {
            continue;
        }
        let mut generator = seeded(pattern, 6, i as u64);
        for generated in generator.generate_many(200).unwrap() {
            assert!(
                generated
                    .as_str()
                    .chars()
                    .all(|ch| ch == '\n' || PRINTABLE.contains(&ch)),
                "pattern {:?} generated {:?}",
                pattern,
                generated.as_str(),
            );
        }
    }
}
