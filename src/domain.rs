/*!
The fixed set of characters used whenever a pattern leaves the choice of
character wide open.

Both "any character" (`.`) and negated classes (`[^abc]`) match almost every
codepoint. Picking uniformly among all of Unicode would mostly produce
unassigned or unprintable codepoints, so these constructs draw from the 95
printable ASCII characters instead. Since the set never contains `\n`, the
"any character" and "any character except newline" forms behave the same.

Positive classes prefer the same set: `\d` in Unicode mode draws from the
ten ASCII digits rather than from every decimal digit Unicode knows about.
*/

/// The number of printable ASCII characters.
pub const PRINTABLE_LEN: usize = 95;

/// The printable ASCII characters, `' '` through `'~'`, in ascending order.
pub const PRINTABLE: [char; PRINTABLE_LEN] = printable();

const fn printable() -> [char; PRINTABLE_LEN] {
    let mut set = [' '; PRINTABLE_LEN];
    let mut i = 0;
    while i < PRINTABLE_LEN {
        set[i] = (b' ' + i as u8) as char;
        i += 1;
    }
    set
}

/// Returns the printable characters for which `is_excluded` returns false,
/// in ascending order.
///
/// The result may be empty. Callers sampling from it must treat that as an
/// error.
pub fn build_domain<F: FnMut(char) -> bool>(mut is_excluded: F) -> Vec<char> {
    PRINTABLE.iter().copied().filter(|&ch| !is_excluded(ch)).collect()
}

/// Returns the printable characters that do not appear in `excluded`, in
/// ascending order.
pub fn build_domain_excluding(excluded: &[char]) -> Vec<char> {
    build_domain(|ch| excluded.contains(&ch))
}
