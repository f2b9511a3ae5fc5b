//! Pseudo-latin sentence generation for `lorem` columns.

use rand::Rng;

const WORDS: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
    "duis",
    "aute",
    "irure",
    "in",
    "reprehenderit",
    "voluptate",
    "velit",
    "esse",
    "cillum",
    "fugiat",
    "nulla",
    "pariatur",
    "excepteur",
    "sint",
    "occaecat",
    "cupidatat",
];

/// Natural sentence lengths drawn before any word-count constraint is
/// applied; callers retry until the count lands in their range.
const SENTENCE_WORDS_MIN: usize = 3;
const SENTENCE_WORDS_MAX: usize = 24;

/// One sentence with a natural word count. Returns the text and its
/// word count so callers can enforce a range.
pub fn sentence(rng: &mut impl Rng) -> (String, usize) {
    let count = rng.random_range(SENTENCE_WORDS_MIN..=SENTENCE_WORDS_MAX);
    let mut text = String::new();
    for index in 0..count {
        let word = WORDS[rng.random_range(0..WORDS.len())];
        if index == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                text.extend(first.to_uppercase());
                text.push_str(chars.as_str());
            }
        } else {
            text.push(' ');
            text.push_str(word);
        }
    }
    text.push('.');
    (text, count)
}
