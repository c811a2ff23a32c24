use std::num::NonZeroUsize;

pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(500) {
    Some(n) => n,
    None => unreachable!(),
};

/// Split `text` into consecutive chunks of `max_chars` characters.
///
/// The chunks cover the input exactly and in order; only the last one may be
/// shorter. Boundaries ignore words and sentences.
pub fn split(text: &str, max_chars: NonZeroUsize) -> Vec<&str> {
    let max_chars = max_chars.get();
    let mut chunks = Vec::with_capacity(text.len() / max_chars + 1);
    let mut start = 0;
    for (count, (idx, _)) in text.char_indices().enumerate() {
        if count > 0 && count % max_chars == 0 {
            chunks.push(&text[start..idx]);
            start = idx;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(size: usize) -> NonZeroUsize {
        NonZeroUsize::new(size).unwrap()
    }

    fn check_cover(text: &str, size: usize) {
        let chunks = split(text, n(size));
        assert_eq!(chunks.concat(), text);

        let total = text.chars().count();
        assert_eq!(chunks.len(), total.div_ceil(size));

        if let Some((last, full)) = chunks.split_last() {
            for chunk in full {
                assert_eq!(chunk.chars().count(), size);
            }
            assert!(last.chars().count() <= size);
            assert!(!last.is_empty());
        }
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split("", DEFAULT_CHUNK_SIZE).is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        assert_eq!(split("hello", DEFAULT_CHUNK_SIZE), vec!["hello"]);
    }

    #[test]
    fn splits_mid_word() {
        assert_eq!(split("abcdefgh", n(3)), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn exact_multiple_has_no_trailing_chunk() {
        assert_eq!(split("abcdef", n(3)), vec!["abc", "def"]);
    }

    #[test]
    fn multibyte_characters_stay_whole() {
        assert_eq!(split("äöüß€", n(2)), vec!["äö", "üß", "€"]);
    }

    #[test]
    fn covers_input_for_assorted_sizes() {
        let long = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let mixed = "naïve café, 日本語のテキスト, emoji 🦀🦀 and ascii".repeat(7);
        for text in [long.as_str(), mixed.as_str(), "x", "ab"] {
            for size in [1, 2, 3, 7, 64, 500, 5000] {
                check_cover(text, size);
            }
        }
    }
}
