/*!
The recursive match generator.

[`generate_match`] walks a [`Hir`] and appends characters to a [`Buffer`]
such that the result is consistent with each node's meaning. Every choice
along the way (how many repetitions, which alternative, which member of a
class) is made by a [`Sampler`].

Constructs that cannot be reproduced faithfully don't abort the walk. They
are recorded as [`Anomaly`] values on the buffer, and when inline anomalies
are enabled, their description is also written into the output.
*/

use rand::RngCore;
use regex_syntax::hir::{
    Capture, Class, ClassBytes, ClassUnicode, Hir, HirKind, Look, Repetition,
};

use crate::{domain, error::Error, sample::Sampler};

/// A structural problem found while generating from a syntax tree.
///
/// Anomalies never stop generation. The output produced around them is
/// still returned, but it may not actually match the original pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Anomaly {
    /// A start-of-text anchor (`\A`, or `^` outside of multi-line mode)
    /// appeared after some output was already produced.
    MisplacedStartText {
        /// The byte offset in the output where the anchor was reached.
        offset: usize,
    },
    /// A look-around assertion that generation doesn't support, i.e., any
    /// kind of word boundary.
    UnsupportedLook {
        /// The assertion in question.
        look: Look,
        /// The byte offset in the output where the assertion was reached.
        offset: usize,
    },
    /// Bytes that aren't valid UTF-8 were requested, e.g., by a literal or
    /// class with Unicode mode disabled. They were replaced with U+FFFD.
    InvalidUtf8 {
        /// The byte offset in the output where the replacement starts.
        offset: usize,
    },
}

impl Anomaly {
    /// Returns the byte offset in the output at which this anomaly occurred.
    pub fn offset(&self) -> usize {
        match *self {
            Anomaly::MisplacedStartText { offset }
            | Anomaly::UnsupportedLook { offset, .. }
            | Anomaly::InvalidUtf8 { offset } => offset,
        }
    }
}

impl core::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Anomaly::MisplacedStartText { .. } => write!(
                f,
                "start of text anchor must be at the start of the expression",
            ),
            Anomaly::UnsupportedLook { look, .. } => {
                write!(f, "word boundary assertions are unsupported ({:?})", look)
            }
            Anomaly::InvalidUtf8 { .. } => {
                write!(f, "bytes are not valid UTF-8")
            }
        }
    }
}

/// The growable output of a single generation call.
///
/// A buffer accumulates generated text along with any anomalies found. Once
/// generation is done, it is usually turned into a [`Generated`] value.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    text: String,
    anomalies: Vec<Anomaly>,
    inline: bool,
}

impl Buffer {
    /// Create a new empty buffer that records anomalies without writing them
    /// into the output.
    pub fn new() -> Buffer {
        Buffer::default()
    }

    /// When enabled, the description of each anomaly is also written into
    /// the output, enclosed in `<` and `>`.
    ///
    /// This makes anomalies visible in the generated text itself, at the
    /// cost of output that certainly doesn't match the pattern.
    pub fn inline_anomalies(mut self, yes: bool) -> Buffer {
        self.inline = yes;
        self
    }

    /// Returns the text generated so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text generated so far, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if no text has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the anomalies recorded so far.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Convert this buffer into the final result of a generation call.
    pub fn into_generated(self) -> Generated {
        Generated { text: self.text, anomalies: self.anomalies }
    }

    fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    fn record(&mut self, anomaly: Anomaly) {
        if self.inline {
            self.text.push('<');
            self.text.push_str(&anomaly.to_string());
            self.text.push('>');
        }
        self.anomalies.push(anomaly);
    }
}

/// A generated string, along with any anomalies found while producing it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Generated {
    text: String,
    anomalies: Vec<Anomaly>,
}

impl Generated {
    /// Returns the generated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume this value and return only the generated text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns the anomalies found while generating this text.
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Returns true when no anomalies were found. A clean string always
    /// consists of content derived from the pattern only.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

impl core::fmt::Display for Generated {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Append a random string matching `hir` to `buf`.
///
/// `ceiling` bounds every open ended repetition (`*`, `+` and `{m,}`): one
/// with minimum `m` repeats between `m` and `max(m, ceiling)` times. Bounded
/// repetitions like `{m,n}` ignore it.
///
/// The walk recurses once per level of `hir`, so its depth is bounded by
/// the depth of the tree.
///
/// # Errors
///
/// This returns [`Error::EmptyClass`] when a character class has nothing to
/// pick from. Whatever was appended before that point remains in `buf`.
pub fn generate_match<R: RngCore>(
    hir: &Hir,
    ceiling: u32,
    buf: &mut Buffer,
    sampler: &mut Sampler<R>,
) -> Result<(), Error> {
    Walker { ceiling, buf, sampler }.g(hir)
}

/// Returns the inclusive range of counts a repetition may take.
///
/// The upper bound never falls below the lower bound, even for a ceiling
/// below the repetition's minimum or a malformed `{5,2}`.
pub(crate) fn repetition_bounds(rep: &Repetition, ceiling: u32) -> (u32, u32) {
    let max = rep.max.unwrap_or(ceiling);
    (rep.min, max.max(rep.min))
}

/// Returns the number of distinct characters a class can produce.
pub(crate) fn class_len(class: &Class) -> usize {
    match *class {
        Class::Unicode(ref cls) => match printable_in_unicode(cls).len() {
            0 if !is_negated_unicode(cls) => cls
                .ranges()
                .iter()
                .map(|r| char_count(r.start(), r.end()))
                .sum(),
            n => n,
        },
        Class::Bytes(ref cls) => match printable_in_bytes(cls).len() {
            0 if !is_negated_bytes(cls) => cls
                .ranges()
                .iter()
                .map(|r| usize::from(r.end() - r.start()) + 1)
                .sum(),
            n => n,
        },
    }
}

struct Walker<'a, R> {
    ceiling: u32,
    buf: &'a mut Buffer,
    sampler: &'a mut Sampler<R>,
}

impl<'a, R: RngCore> Walker<'a, R> {
    fn g(&mut self, hir: &Hir) -> Result<(), Error> {
        match *hir.kind() {
            HirKind::Empty => Ok(()),
            HirKind::Literal(ref lit) => {
                self.g_literal(&lit.0);
                Ok(())
            }
            HirKind::Class(ref class) => self.g_class(class),
            HirKind::Look(look) => {
                self.g_look(look);
                Ok(())
            }
            HirKind::Repetition(ref rep) => self.g_repetition(rep),
            HirKind::Capture(ref cap) => self.g_capture(cap),
            HirKind::Concat(ref subs) => {
                subs.iter().try_for_each(|sub| self.g(sub))
            }
            HirKind::Alternation(ref subs) => self.g_alternation(subs),
        }
    }

    fn g_literal(&mut self, bytes: &[u8]) {
        match core::str::from_utf8(bytes) {
            Ok(s) => self.buf.text.push_str(s),
            Err(_) => {
                let offset = self.buf.len();
                self.buf.text.push_str(&String::from_utf8_lossy(bytes));
                self.buf.record(Anomaly::InvalidUtf8 { offset });
            }
        }
    }

    /// Every class draws from its printable members when it has any. This
    /// keeps Unicode classes like `\d`, `\w` or `(?i)k` within printable
    /// ASCII. A class without printable members (`[α-ω]`, `[\t\n]`) draws
    /// from all of its members instead, unless it spans the whole codepoint
    /// space: such a class is a negation of some smaller set (this includes
    /// `.`), and excluding every printable character leaves it empty.
    fn g_class(&mut self, class: &Class) -> Result<(), Error> {
        match *class {
            Class::Unicode(ref cls) => {
                let domain = printable_in_unicode(cls);
                let ch = match self.sampler.choose(&domain) {
                    Some(&ch) => ch,
                    None if is_negated_unicode(cls) => {
                        return Err(Error::EmptyClass)
                    }
                    None => {
                        self.sample_unicode(cls).ok_or(Error::EmptyClass)?
                    }
                };
                self.buf.push(ch);
            }
            Class::Bytes(ref cls) => {
                let domain = printable_in_bytes(cls);
                let byte = match self.sampler.choose(&domain) {
                    // Every printable character is ASCII.
                    Some(&ch) => ch as u8,
                    None if is_negated_bytes(cls) => {
                        return Err(Error::EmptyClass)
                    }
                    None => self.sample_bytes(cls).ok_or(Error::EmptyClass)?,
                };
                if byte.is_ascii() {
                    self.buf.push(char::from(byte));
                } else {
                    let offset = self.buf.len();
                    self.buf.push(char::REPLACEMENT_CHARACTER);
                    self.buf.record(Anomaly::InvalidUtf8 { offset });
                }
            }
        }
        Ok(())
    }

    /// Pick a member of the class uniformly, as if its ranges had been
    /// expanded into one list of characters.
    fn sample_unicode(&mut self, cls: &ClassUnicode) -> Option<char> {
        let total: usize =
            cls.ranges().iter().map(|r| char_count(r.start(), r.end())).sum();
        if total == 0 {
            return None;
        }
        let mut index = self.sampler.below(total);
        for r in cls.ranges() {
            let len = char_count(r.start(), r.end());
            if index < len {
                return nth_char(r.start(), index);
            }
            index -= len;
        }
        None
    }

    fn sample_bytes(&mut self, cls: &ClassBytes) -> Option<u8> {
        let total: usize = cls
            .ranges()
            .iter()
            .map(|r| usize::from(r.end() - r.start()) + 1)
            .sum();
        if total == 0 {
            return None;
        }
        let mut index = self.sampler.below(total);
        for r in cls.ranges() {
            let len = usize::from(r.end() - r.start()) + 1;
            if index < len {
                return u8::try_from(index).ok().map(|i| r.start() + i);
            }
            index -= len;
        }
        None
    }

    /// Line anchors only insert a line break when something precedes them.
    /// This keeps output plausible for line oriented matching, but it is not
    /// a positional guarantee: nothing checks what follows the break.
    fn g_look(&mut self, look: Look) {
        match look {
            Look::Start => {
                if !self.buf.is_empty() {
                    let offset = self.buf.len();
                    self.buf.record(Anomaly::MisplacedStartText { offset });
                }
            }
            Look::End => {}
            Look::StartLF | Look::EndLF | Look::StartCRLF | Look::EndCRLF => {
                if !self.buf.is_empty() {
                    self.buf.push('\n');
                }
            }
            look => {
                let offset = self.buf.len();
                self.buf.record(Anomaly::UnsupportedLook { look, offset });
            }
        }
    }

    fn g_repetition(&mut self, rep: &Repetition) -> Result<(), Error> {
        let count = match (rep.min, rep.max) {
            (0, Some(1)) => u32::from(self.sampler.coin()),
            _ => {
                let (min, max) = repetition_bounds(rep, self.ceiling);
                min + self.sampler.below_inclusive(max - min)
            }
        };
        for _ in 0..count {
            self.g(&rep.sub)?;
        }
        Ok(())
    }

    fn g_capture(&mut self, cap: &Capture) -> Result<(), Error> {
        if matches!(*cap.sub.kind(), HirKind::Empty) {
            return Ok(());
        }
        self.g(&cap.sub)
    }

    fn g_alternation(&mut self, subs: &[Hir]) -> Result<(), Error> {
        match self.sampler.choose(subs) {
            Some(sub) => self.g(sub),
            None => Ok(()),
        }
    }
}

fn is_negated_unicode(cls: &ClassUnicode) -> bool {
    match (cls.ranges().first(), cls.ranges().last()) {
        (Some(first), Some(last)) => {
            first.start() == '\0' && last.end() == char::MAX
        }
        _ => false,
    }
}

fn is_negated_bytes(cls: &ClassBytes) -> bool {
    match (cls.ranges().first(), cls.ranges().last()) {
        (Some(first), Some(last)) => first.start() == 0 && last.end() == 0xFF,
        _ => false,
    }
}

/// The printable characters in a class, i.e., the printable domain minus
/// everything the class leaves out.
fn printable_in_unicode(cls: &ClassUnicode) -> Vec<char> {
    let ranges = cls.ranges();
    domain::build_domain(|ch| {
        !ranges.iter().any(|r| r.start() <= ch && ch <= r.end())
    })
}

fn printable_in_bytes(cls: &ClassBytes) -> Vec<char> {
    let ranges = cls.ranges();
    domain::build_domain(|ch| {
        // Every printable character is ASCII, so this never truncates.
        let byte = ch as u8;
        !ranges.iter().any(|r| r.start() <= byte && byte <= r.end())
    })
}

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_LEN: u32 = 0x800;

/// The number of scalar values in `start..=end`, skipping surrogates.
fn char_count(start: char, end: char) -> usize {
    let (start, end) = (u32::from(start), u32::from(end));
    let mut len = end - start + 1;
    if start < SURROGATE_START && end >= SURROGATE_START + SURROGATE_LEN {
        len -= SURROGATE_LEN;
    }
    len as usize
}

/// The `n`th scalar value at or after `start`, skipping surrogates.
fn nth_char(start: char, n: usize) -> Option<char> {
    let start = u32::from(start);
    let mut cp = start.checked_add(u32::try_from(n).ok()?)?;
    if start < SURROGATE_START && cp >= SURROGATE_START {
        cp += SURROGATE_LEN;
    }
    char::from_u32(cp)
}
