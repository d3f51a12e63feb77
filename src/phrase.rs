use crate::word_list::WordList;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

pub const DEFAULT_WORD_COUNT: usize = 50;

/// Marks that split a sentence without ending it
pub const MINOR_PUNCTUATION: [char; 2] = [',', ';'];
/// Marks that end a sentence; the next word is capitalized
pub const MAJOR_PUNCTUATION: [char; 3] = ['.', '?', '!'];

const MINOR_EVERY: RangeInclusive<usize> = 5..=9;
const MAJOR_EVERY: RangeInclusive<usize> = 10..=15;

/// Builds pseudo-sentences out of random words.
///
/// Every few words a comma or semicolon is attached to the previous word, and
/// every ten to fifteen words a sentence ends with `.`, `?` or `!`. The first
/// word and every word following a sentence end are capitalized.
#[derive(Debug)]
pub struct PhraseGenerator<R: Rng = StdRng> {
    rng: R,
}

impl PhraseGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator, for tests and reproducible passages
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PhraseGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, words: &WordList, word_count: usize) -> String {
        let mut tokens: Vec<String> = Vec::with_capacity(word_count + word_count / 4);
        let mut since_minor = 0;
        let mut since_major = 0;
        let mut capitalize_next = true;

        for _ in 0..word_count {
            let word = &words.words()[self.rng.gen_range(0..words.len())];

            if capitalize_next {
                tokens.push(capitalize_first_letter(word));
                capitalize_next = false;
            } else {
                tokens.push(word.clone());
            }

            since_minor += 1;
            since_major += 1;

            if since_minor >= self.rng.gen_range(MINOR_EVERY) {
                tokens.push(self.pick(&MINOR_PUNCTUATION).to_string());
                since_minor = 0;
            }

            if since_major >= self.rng.gen_range(MAJOR_EVERY) {
                tokens.push(self.pick(&MAJOR_PUNCTUATION).to_string());
                capitalize_next = true;
                since_major = 0;
            }
        }

        let phrase = attach_punctuation(&tokens.join(" "));
        tracing::debug!(word_count, len = phrase.len(), "generated phrase");
        phrase
    }

    fn pick(&mut self, marks: &[char]) -> char {
        marks[self.rng.gen_range(0..marks.len())]
    }
}

/// Drops every space that directly precedes a punctuation mark
fn attach_punctuation(joined: &str) -> String {
    let mut out = String::with_capacity(joined.len());
    let mut chars = joined.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' && chars.peek().is_some_and(|&next| is_punctuation(next)) {
            continue;
        }
        out.push(c);
    }
    out
}

pub fn is_punctuation(c: char) -> bool {
    MINOR_PUNCTUATION.contains(&c) || MAJOR_PUNCTUATION.contains(&c)
}

/// Uppercases the first character when it is alphabetic
pub fn capitalize_first_letter(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().chain(chars).collect(),
        _ => word.to_string(),
    }
}
