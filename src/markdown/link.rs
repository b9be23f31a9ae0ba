use super::{EditResult, Selection, byte_index, char_len, split_at_selection};

pub const LINK_START_MD: &str = "[";
pub const LINK_END_MD: &str = "](url)";

/// Distance from the end of the link text to the `url` placeholder, and the
/// placeholder's own length.
const URL_SHIFT: usize = 3;

/// Toggle link markdown around the selection.
///
/// When nothing is selected the word touching the caret is linked. After
/// wrapping, the `url` placeholder is selected so it can be typed over.
pub fn apply_link_markdown(text: &str, selection: Selection) -> EditResult {
    let (prefix, selected, suffix, selection) = split_at_selection(text, selection);
    let open = char_len(LINK_START_MD);

    if prefix.ends_with(LINK_START_MD) && suffix.starts_with(LINK_END_MD) {
        let message = format!(
            "{}{selected}{}",
            &prefix[..prefix.len() - LINK_START_MD.len()],
            &suffix[LINK_END_MD.len()..]
        );
        return EditResult::new(message, selection.start - open, selection.end - open);
    }

    if text.is_empty() {
        return EditResult::new(format!("{LINK_START_MD}{LINK_END_MD}"), open, open);
    }

    if !selection.is_empty() {
        let message = format!("{prefix}{LINK_START_MD}{selected}{LINK_END_MD}{suffix}");
        let start = selection.end + URL_SHIFT;
        return EditResult::new(message, start, start + URL_SHIFT);
    }

    let caret = selection.start;
    let len = char_len(text);
    let space_before = prefix.ends_with(' ');
    let space_after = suffix.starts_with(' ');
    let cursor_before_word =
        (caret != 0 && space_before && !space_after) || (caret == 0 && !space_after);
    let cursor_after_word =
        (caret != len && space_after && !space_before) || (caret == len && !space_before);

    if cursor_before_word {
        let word_end = find_word_end(text, caret);
        let split = byte_index(text, word_end);
        let word = &text[prefix.len()..split];
        let message = format!("{prefix}{LINK_START_MD}{word}{LINK_END_MD}{}", &text[split..]);
        let start = word_end + URL_SHIFT;
        EditResult::new(message, start, start + URL_SHIFT)
    } else if cursor_after_word {
        if caret == len {
            let message = format!("{text} {LINK_START_MD}{LINK_END_MD}");
            let start = caret + 1 + open;
            EditResult::new(message, start, start)
        } else {
            let split = byte_index(text, find_word_start(text, caret));
            let message = format!(
                "{}{LINK_START_MD}{}{LINK_END_MD}{suffix}",
                &text[..split],
                &prefix[split..]
            );
            let start = caret + URL_SHIFT;
            EditResult::new(message, start, start + URL_SHIFT)
        }
    } else {
        let word_end = find_word_end(text, caret);
        let start_byte = byte_index(text, find_word_start(text, caret));
        let end_byte = byte_index(text, word_end);
        let message = format!(
            "{}{LINK_START_MD}{}{LINK_END_MD}{}",
            &text[..start_byte],
            &text[start_byte..end_byte],
            &text[end_byte..]
        );
        let start = word_end + URL_SHIFT;
        EditResult::new(message, start, start + URL_SHIFT)
    }
}

/// Index of the first space at or after `from`, or the text length.
pub fn find_word_end(text: &str, from: usize) -> usize {
    text.chars()
        .skip(from)
        .position(|c| c == ' ')
        .map_or_else(|| char_len(text).max(from), |offset| from + offset)
}

/// One past the last space strictly before `from`, or 0.
pub fn find_word_start(text: &str, from: usize) -> usize {
    text.chars()
        .take(from)
        .enumerate()
        .filter(|&(_, c)| c == ' ')
        .last()
        .map_or(0, |(idx, _)| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, start: usize, end: usize) -> (String, usize, usize) {
        let r = apply_link_markdown(text, Selection::new(start, end));
        (r.message, r.selection_start, r.selection_end)
    }

    // --- Word boundaries ---

    #[test]
    fn test_find_word_end() {
        assert_eq!(find_word_end("hello world", 0), 5);
        assert_eq!(find_word_end("hello world", 5), 5);
        assert_eq!(find_word_end("hello world", 6), 11);
        assert_eq!(find_word_end("", 0), 0);
    }

    #[test]
    fn test_find_word_start() {
        assert_eq!(find_word_start("hello world", 8), 6);
        assert_eq!(find_word_start("hello world", 6), 6);
        assert_eq!(find_word_start("hello world", 5), 0);
        assert_eq!(find_word_start("hello world", 0), 0);
        assert_eq!(find_word_start(" x", 0), 0);
    }

    // --- Existing markdown ---

    #[test]
    fn test_removes_existing_link() {
        assert_eq!(apply("[hello](url) world", 1, 6), ("hello world".into(), 0, 5));
    }

    #[test]
    fn test_only_exact_placeholder_counts_as_link() {
        assert_eq!(
            apply("[hello](http://x)", 1, 6),
            ("[[hello](url)](http://x)".into(), 9, 12)
        );
    }

    // --- Empty buffer and selections ---

    #[test]
    fn test_empty_buffer() {
        assert_eq!(apply("", 0, 0), ("[](url)".into(), 1, 1));
    }

    #[test]
    fn test_selection_is_wrapped_and_url_selected() {
        assert_eq!(apply("hello world", 0, 5), ("[hello](url) world".into(), 8, 11));
    }

    #[test]
    fn test_selection_in_middle() {
        assert_eq!(apply("say hi now", 4, 6), ("say [hi](url) now".into(), 9, 12));
    }

    // --- Caret positions ---

    #[test]
    fn test_caret_at_start_of_buffer_links_first_word() {
        assert_eq!(apply("hello world", 0, 0), ("[hello](url) world".into(), 8, 11));
    }

    #[test]
    fn test_caret_before_word() {
        assert_eq!(apply("hello world", 6, 6), ("hello [world](url)".into(), 14, 17));
    }

    #[test]
    fn test_caret_after_word_at_end_appends_empty_link() {
        assert_eq!(apply("hello", 5, 5), ("hello [](url)".into(), 7, 7));
    }

    #[test]
    fn test_caret_after_word_before_space() {
        assert_eq!(apply("hello world", 5, 5), ("[hello](url) world".into(), 8, 11));
        assert_eq!(apply("a hello world", 7, 7), ("a [hello](url) world".into(), 10, 13));
    }

    #[test]
    fn test_caret_inside_word() {
        assert_eq!(apply("hello", 2, 2), ("[hello](url)".into(), 8, 11));
        assert_eq!(apply("say hello now", 6, 6), ("say [hello](url) now".into(), 12, 15));
    }

    #[test]
    fn test_caret_between_spaces_inserts_empty_link() {
        assert_eq!(apply("a  b", 2, 2), ("a [](url) b".into(), 5, 8));
    }

    #[test]
    fn test_caret_after_trailing_space() {
        assert_eq!(apply("hi ", 3, 3), ("hi [](url)".into(), 6, 9));
    }

    #[test]
    fn test_caret_at_start_before_space() {
        assert_eq!(apply(" x", 0, 0), ("[](url) x".into(), 3, 6));
    }

    #[test]
    fn test_multibyte_word() {
        assert_eq!(apply("grüße dir", 2, 2), ("[grüße](url) dir".into(), 8, 11));
    }

    #[test]
    fn test_link_twice_on_selection_restores_after_reselecting_text() {
        let first = apply_link_markdown("hello world", Selection::new(0, 5));
        let second = apply_link_markdown(&first.message, Selection::new(1, 6));
        assert_eq!(second.message, "hello world");
        assert_eq!(second.selection(), Selection::new(0, 5));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn with_selection(pattern: &'static str) -> impl Strategy<Value = (String, usize, usize)> {
            pattern.prop_flat_map(|text| {
                let len = text.chars().count();
                (Just(text), 0..=len, 0..=len)
            })
        }

        proptest! {
            #[test]
            fn result_selection_stays_in_bounds((text, a, b) in with_selection("[ab _é\\[\\]()url]{0,20}")) {
                let r = apply_link_markdown(&text, Selection::new(a, b));
                prop_assert!(r.selection_start <= r.selection_end);
                prop_assert!(r.selection_end <= r.message.chars().count());
            }

            #[test]
            fn wrapped_selection_selects_placeholder((text, a, b) in with_selection("[ab _é]{1,20}")) {
                prop_assume!(a != b);
                let r = apply_link_markdown(&text, Selection::new(a, b));
                let placeholder: String = r.message.chars().skip(r.selection_start).take(r.selection().len()).collect();
                prop_assert_eq!(placeholder, "url");
            }

            #[test]
            fn link_twice_restores_text((text, a, b) in with_selection("[ab _é]{1,20}")) {
                prop_assume!(a != b);
                let sel = Selection::new(a, b);
                let first = apply_link_markdown(&text, sel);
                let inner = Selection::new(sel.start + 1, sel.end + 1);
                let second = apply_link_markdown(&first.message, inner);
                prop_assert_eq!(second.selection(), sel);
                prop_assert_eq!(second.message, text);
            }
        }
    }
}
