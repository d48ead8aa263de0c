//! Rule-based sentence segmentation with ASCII transliteration

use deunicode::deunicode;

/// Split a text block (typically an abstract) into sentences.
///
/// Newlines are flattened to spaces, each sentence is transliterated to its
/// closest ASCII form, and leading blanks are stripped. Returns both the
/// sentence list and its flattened single-string form.
///
/// Segmentation is rule-based: a sentence ends at `.`, `!` or `?` followed
/// by whitespace. Good enough for abstracts; not a linguistic tokenizer.
pub fn split_sentences(text: &str) -> (Vec<String>, String) {
    let cleaned = text.replace('\n', " ");

    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = cleaned.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let boundary = match chars.peek() {
                Some(next) => next.is_whitespace(),
                None => true,
            };
            if boundary {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
    }
    push_sentence(&mut sentences, &current);

    let flat = sentences.join(" ");
    (sentences, flat)
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(deunicode(trimmed));
    }
}
