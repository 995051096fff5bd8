/// Split raw letter text into trimmed sentences.
///
/// A boundary is a `.`, `!` or `?` immediately followed by whitespace.
/// Abbreviations are not special-cased ("Mr. Tan" splits after "Mr."),
/// which is an accepted imprecision of the heuristic. Empty input and
/// whitespace-only pieces yield nothing.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next_ch)) = chars.peek() {
            if next_ch.is_whitespace() {
                push_trimmed(&mut sentences, &text[start..next_idx]);
                start = next_idx;
            }
        }
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_sentences() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(
            split_sentences("  no terminal punctuation here  "),
            vec!["no terminal punctuation here"]
        );
    }

    #[test]
    fn splits_on_terminator_followed_by_whitespace() {
        let text = "First sentence. Second one! Third?\nFourth";
        assert_eq!(
            split_sentences(text),
            vec!["First sentence.", "Second one!", "Third?", "Fourth"]
        );
    }

    #[test]
    fn terminator_inside_token_does_not_split() {
        assert_eq!(
            split_sentences("Write to john@example.com today."),
            vec!["Write to john@example.com today."]
        );
    }

    #[test]
    fn abbreviations_split_as_documented() {
        // Known imprecision: no abbreviation awareness.
        assert_eq!(
            split_sentences("Dear Mr. Tan, hello."),
            vec!["Dear Mr.", "Tan, hello."]
        );
    }

    #[test]
    fn trailing_terminator_keeps_single_sentence() {
        assert_eq!(split_sentences("Only one sentence."), vec!["Only one sentence."]);
    }
}
