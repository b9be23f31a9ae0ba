use super::{EditResult, Hotkey, Selection, char_len, split_at_selection};

pub const BOLD_MD: &str = "**";
pub const ITALIC_MD: &str = "*";

const BOLD_ITALIC_MD: &str = "***";

/// Toggle bold or italic markdown around the selection.
///
/// The delimiter is removed when it already surrounds the selection and
/// inserted otherwise. An italic toggle directly inside a bold span
/// (`**|word|**`) adds a `*` instead of eating one from the bold markers,
/// and a selection wrapped in `***` always loses one layer.
///
/// `Hotkey::Link` is treated as italic; use [`super::apply_link_markdown`]
/// for links.
pub fn apply_bold_italic_markdown(text: &str, selection: Selection, hotkey: Hotkey) -> EditResult {
    let (prefix, selected, suffix, selection) = split_at_selection(text, selection);

    let delimiter = if hotkey == Hotkey::Bold { BOLD_MD } else { ITALIC_MD };
    let is_italic_followed_by_bold =
        delimiter == ITALIC_MD && prefix.ends_with(BOLD_MD) && suffix.starts_with(BOLD_MD);
    let has_current_markdown = prefix.ends_with(delimiter) && suffix.starts_with(delimiter);
    let has_italic_and_bold =
        prefix.ends_with(BOLD_ITALIC_MD) && suffix.starts_with(BOLD_ITALIC_MD);

    let shift = char_len(delimiter);
    if has_italic_and_bold || (has_current_markdown && !is_italic_followed_by_bold) {
        let message = format!(
            "{}{selected}{}",
            &prefix[..prefix.len() - delimiter.len()],
            &suffix[delimiter.len()..]
        );
        EditResult::new(message, selection.start - shift, selection.end - shift)
    } else {
        let message = format!("{prefix}{delimiter}{selected}{delimiter}{suffix}");
        EditResult::new(message, selection.start + shift, selection.end + shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, start: usize, end: usize, hotkey: Hotkey) -> (String, usize, usize) {
        let r = apply_bold_italic_markdown(text, Selection::new(start, end), hotkey);
        (r.message, r.selection_start, r.selection_end)
    }

    #[test]
    fn test_bold_wraps_selection() {
        assert_eq!(apply("hello", 0, 5, Hotkey::Bold), ("**hello**".into(), 2, 7));
    }

    #[test]
    fn test_bold_removes_existing_bold() {
        assert_eq!(apply("**hello**", 2, 7, Hotkey::Bold), ("hello".into(), 0, 5));
    }

    #[test]
    fn test_italic_wraps_selection() {
        assert_eq!(apply("say hi now", 4, 6, Hotkey::Italic), ("say *hi* now".into(), 5, 7));
    }

    #[test]
    fn test_italic_removes_existing_italic() {
        assert_eq!(apply("say *hi* now", 5, 7, Hotkey::Italic), ("say hi now".into(), 4, 6));
    }

    #[test]
    fn test_italic_inside_bold_adds_italic() {
        assert_eq!(apply("**hello**", 2, 7, Hotkey::Italic), ("***hello***".into(), 3, 8));
    }

    #[test]
    fn test_italic_on_bold_italic_drops_to_bold() {
        assert_eq!(apply("***hello***", 3, 8, Hotkey::Italic), ("**hello**".into(), 2, 7));
    }

    #[test]
    fn test_bold_on_bold_italic_drops_to_italic() {
        assert_eq!(apply("***hello***", 3, 8, Hotkey::Bold), ("*hello*".into(), 1, 6));
    }

    #[test]
    fn test_bold_on_caret_inserts_empty_pair() {
        assert_eq!(apply("ab", 1, 1, Hotkey::Bold), ("a****b".into(), 3, 3));
    }

    #[test]
    fn test_bold_on_empty_text() {
        assert_eq!(apply("", 0, 0, Hotkey::Bold), ("****".into(), 2, 2));
    }

    #[test]
    fn test_uneven_asterisks_follow_check_order() {
        // Three on the left, two on the right: not bold-italic, but the
        // italic check sees `**` on both sides and inserts.
        assert_eq!(apply("***hi**", 3, 5, Hotkey::Italic), ("****hi***".into(), 4, 6));
        // Bold sees its own delimiter on both sides and removes it.
        assert_eq!(apply("***hi**", 3, 5, Hotkey::Bold), ("*hi".into(), 1, 3));
    }

    #[test]
    fn test_multibyte_selection_offsets_are_chars() {
        assert_eq!(apply("héllo wörld", 6, 11, Hotkey::Bold), ("héllo **wörld**".into(), 8, 13));
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

        fn plain_text_and_selection() -> impl Strategy<Value = (String, usize, usize)> {
            with_selection("[ab _é]{0,24}")
        }

        fn text_and_selection() -> impl Strategy<Value = (String, usize, usize)> {
            with_selection("[ab *_é]{0,24}")
        }

        proptest! {
            #[test]
            fn bold_twice_restores_text((text, a, b) in plain_text_and_selection()) {
                let first = apply_bold_italic_markdown(&text, Selection::new(a, b), Hotkey::Bold);
                let second = apply_bold_italic_markdown(&first.message, first.selection(), Hotkey::Bold);
                prop_assert_eq!(second.selection(), Selection::new(a, b));
                prop_assert_eq!(second.message, text);
            }

            #[test]
            fn italic_twice_restores_text((text, a, b) in plain_text_and_selection()) {
                let first = apply_bold_italic_markdown(&text, Selection::new(a, b), Hotkey::Italic);
                let second = apply_bold_italic_markdown(&first.message, first.selection(), Hotkey::Italic);
                prop_assert_eq!(second.message, text);
            }

            #[test]
            fn result_selection_stays_in_bounds((text, a, b) in text_and_selection(), bold in any::<bool>()) {
                let hotkey = if bold { Hotkey::Bold } else { Hotkey::Italic };
                let r = apply_bold_italic_markdown(&text, Selection::new(a, b), hotkey);
                prop_assert!(r.selection_start <= r.selection_end);
                prop_assert!(r.selection_end <= r.message.chars().count());
            }

            #[test]
            fn selected_text_is_preserved((text, a, b) in text_and_selection(), bold in any::<bool>()) {
                let hotkey = if bold { Hotkey::Bold } else { Hotkey::Italic };
                let sel = Selection::new(a, b);
                let before: String = text.chars().skip(sel.start).take(sel.len()).collect();
                let r = apply_bold_italic_markdown(&text, sel, hotkey);
                let after: String = r.message.chars().skip(r.selection_start).take(r.selection().len()).collect();
                prop_assert_eq!(before, after);
            }
        }
    }
}
