//! Parsing of LLM output into scene and outline lists.

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching the `Scene N` prefix the scene-split prompt requires.
static SCENE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^scene\s*\d+\s*[.:]?\s*").expect("valid regex"));

/// Split scene-split LLM output into per-scene descriptions.
///
/// Scenes are blank-line-separated paragraphs; the `Scene N` prefix is
/// stripped. Empty paragraphs are discarded, so the result length is the
/// number of scenes the model actually produced, which may differ from the
/// number requested.
pub fn split_scenes(text: &str) -> Vec<String> {
    text.split("\n\n")
        .flat_map(|block| block.split("\r\n\r\n"))
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            SCENE_PREFIX_RE
                .replace(paragraph, "")
                .trim()
                .to_string()
        })
        .filter(|description| !description.is_empty())
        .collect()
}

/// Split deck-outline LLM output into per-page lines, capped at `max_pages`.
pub fn split_outline(text: &str, max_pages: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(max_pages)
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- split_scenes ---------------------------------------------------------

    #[test]
    fn splits_paragraphs_and_strips_prefixes() {
        let text = "Scene 1 A sunlit morning in the village.\n\n\
                    Scene 2: The climb begins on a steep trail.\n\n\
                    scene 3. The summit at dusk.";
        let scenes = split_scenes(text);
        assert_eq!(
            scenes,
            vec![
                "A sunlit morning in the village.",
                "The climb begins on a steep trail.",
                "The summit at dusk.",
            ]
        );
    }

    #[test]
    fn tolerates_extra_blank_lines() {
        let text = "Scene 1 First.\n\n\n\nScene 2 Second.\n\n";
        assert_eq!(split_scenes(text), vec!["First.", "Second."]);
    }

    #[test]
    fn keeps_paragraphs_without_prefix() {
        let text = "A quiet harbor at night.\n\nScene 2 A storm rolls in.";
        assert_eq!(
            split_scenes(text),
            vec!["A quiet harbor at night.", "A storm rolls in."]
        );
    }

    #[test]
    fn empty_input_yields_no_scenes() {
        assert!(split_scenes("").is_empty());
        assert!(split_scenes("\n\n  \n\n").is_empty());
    }

    #[test]
    fn prefix_only_paragraph_is_discarded() {
        assert_eq!(split_scenes("Scene 1\n\nScene 2 Real content."), vec!["Real content."]);
    }

    // -- split_outline --------------------------------------------------------

    #[test]
    fn splits_lines_and_drops_blanks() {
        let text = "Page one content\n\nPage two content\n   \nPage three content\n";
        assert_eq!(
            split_outline(text, 10),
            vec!["Page one content", "Page two content", "Page three content"]
        );
    }

    #[test]
    fn caps_outline_at_page_count() {
        let text = "a\nb\nc\nd\ne";
        assert_eq!(split_outline(text, 3), vec!["a", "b", "c"]);
    }
}
