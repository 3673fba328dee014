//! Prompt construction for the LLM and image-generation collaborators.
//!
//! All builders are pure string functions so handlers stay free of prompt
//! text and the templates can be tested without network access.

// ---------------------------------------------------------------------------
// Comic prompts
// ---------------------------------------------------------------------------

/// System prompt instructing the LLM to split a story into comic scenes.
///
/// The output contract matters more than the prose: one paragraph per
/// scene, paragraphs separated by blank lines, each opening with
/// `Scene N`, no markdown. [`crate::parse::split_scenes`] depends on it.
pub fn comic_scene_system_prompt(page_count: u32) -> String {
    format!(
        "You are a professional comic scriptwriter. Split the user's story \
         into distinct comic scenes.\n\n\
         Output rules:\n\
         1. Write each scene as one long paragraph of plain prose.\n\
         2. Do not use markdown syntax or list bullets.\n\
         3. Start each paragraph with its scene number (\"Scene 1\", \
         \"Scene 2\", ...) followed by the visual description: what is in \
         frame, character actions and expressions, and the background.\n\
         4. Separate paragraphs with a single blank line.\n\
         5. Produce exactly {page_count} scenes that keep the story \
         coherent and suit comic panels.\n\n\
         Example output:\n\n\
         Scene 1 A sunlit morning. Ming stands at the window gazing at \
         distant mountains, smiling with anticipation, a folded map gripped \
         in one hand. The room is simple and warm, landscape paintings on \
         the wall, climbing gear piled on the desk.\n\n\
         Scene 2 Ming in full climbing gear works up a steep rocky trail \
         under a blue sky. Gravel and weeds line the path; sweat runs down \
         his forehead as he pushes upward, breathing hard. Far peaks drift \
         in and out of the clouds.\n\n\
         Follow that format exactly. No JSON, no markdown."
    )
}

/// User message for the comic scene split.
pub fn comic_scene_user_prompt(story: &str, style: &str) -> String {
    if style.is_empty() {
        format!("Story:\n{story}")
    } else {
        format!("Story:\n{story}\nArt style: {style}")
    }
}

/// Image prompt for a single comic panel.
pub fn comic_panel_prompt(description: &str, style: &str) -> String {
    if style.is_empty() {
        format!("Black-and-white manga style, {description}")
    } else {
        format!("Black-and-white manga style, {description}, {style}")
    }
}

// ---------------------------------------------------------------------------
// Slide-deck prompts
// ---------------------------------------------------------------------------

/// Requests over this length are treated as detailed specifications and
/// converted to an outline verbatim instead of being expanded.
pub const DETAILED_PROMPT_THRESHOLD_CHARS: usize = 150;

/// System prompt for deck-outline planning.
pub const DECK_OUTLINE_SYSTEM_PROMPT: &str =
    "You are a presentation planning expert who turns user requirements \
     into clear, well-structured slide outlines.";

/// User prompt asking the LLM for a `page_count`-page deck outline.
///
/// Detailed requests (longer than [`DETAILED_PROMPT_THRESHOLD_CHARS`]) are
/// converted without rewording; short ones are expanded into a full deck.
pub fn deck_outline_prompt(prompt: &str, page_count: u32, style: &str) -> String {
    let is_detailed = prompt.trim().len() > DETAILED_PROMPT_THRESHOLD_CHARS;
    if is_detailed {
        format!(
            "Convert the following detailed requirements into a \
             {page_count}-page slide outline.\n\n\
             Rules:\n\
             1. Output one long paragraph per page.\n\
             2. Keep the user's own wording for the content; do not rephrase.\n\
             3. End each page with a one-sentence style note (for example: \
             clean professional style, rich colorful style).\n\
             4. Preserve the user's intent and logical structure.\n\
             5. Plain text only, one page per line. No JSON or markdown.\n\n\
             Requirements:\n{prompt}\n\n\
             Output the {page_count} pages now, one per line:"
        )
    } else {
        let style_rule = if style.is_empty() {
            "Overall style: clean and professional".to_string()
        } else {
            format!("Overall style requirement: {style}")
        };
        format!(
            "The user wants a {page_count}-page slide deck about \
             \"{prompt}\".\n\n\
             Expand the topic into a rich page-by-page outline.\n\n\
             Rules:\n\
             1. Page 1 is the title page with a title and subtitle.\n\
             2. The middle {middle} pages each develop one aspect in detail.\n\
             3. The last page is a summary or thank-you page.\n\
             4. Output one long paragraph per page, mostly detailed content.\n\
             5. End each page with a one-sentence style note (for example: \
             clean professional style, rich colorful style).\n\
             6. {style_rule}.\n\
             7. Plain text only, one page per line. No JSON or markdown.\n\n\
             Output the {page_count} pages now, one per line:",
            middle = page_count.saturating_sub(2),
        )
    }
}

// ---------------------------------------------------------------------------
// Diagram prompt
// ---------------------------------------------------------------------------

/// Image prompt for a technical architecture diagram.
pub fn diagram_prompt(prompt: &str, style: &str) -> String {
    if style.is_empty() {
        format!("Technical architecture diagram: {prompt}")
    } else {
        format!("Technical architecture diagram: {prompt}, style: {style}")
    }
}

// ---------------------------------------------------------------------------
// Preset chat agents
// ---------------------------------------------------------------------------

/// Mock-interview coach agent.
pub const AGENT_INTERVIEW_COACH: &str = "interview-coach";
/// Post-interview / retrospective mentor agent.
pub const AGENT_REVIEW_MENTOR: &str = "review-mentor";
/// Industry case-study analyst agent.
pub const AGENT_CASE_ANALYST: &str = "case-analyst";

const INTERVIEW_COACH_PROMPT: &str = "You are a professional mock interviewer. Your job is to:\n\
     1. Simulate a realistic interview setting\n\
     2. Ask substantive interview questions\n\
     3. Give immediate, professional feedback on the user's answers\n\
     4. Help the user sharpen their interview technique and delivery\n\
     Stay professional and friendly while helping them prepare.";

const REVIEW_MENTOR_PROMPT: &str = "You are a professional retrospective mentor. Your job is to:\n\
     1. Analyze the user's interview performance or work experience in depth\n\
     2. Identify their strengths and the areas that need improvement\n\
     3. Offer personalized suggestions and an action plan\n\
     4. Help the user grow steadily over time\n\
     Stay professional and encouraging while helping them improve.";

const CASE_ANALYST_PROMPT: &str = "You are an industry case-study analyst. Your job is to:\n\
     1. Break down real industry cases\n\
     2. Analyze the business logic and key decisions involved\n\
     3. Help the user understand industry trends and best practices\n\
     4. Share transferable lessons and takeaways\n\
     Stay professional and logically clear while giving the user real insight.";

/// Fallback system prompt when no agent or custom prompt is given.
pub const DEFAULT_AGENT_PROMPT: &str = "You are a helpful AI assistant.";

/// Resolve the system prompt for a chat request.
///
/// A caller-supplied `custom` prompt wins over a preset `agent_id`; an
/// unknown agent falls back to [`DEFAULT_AGENT_PROMPT`].
pub fn agent_system_prompt<'a>(agent_id: Option<&str>, custom: Option<&'a str>) -> &'a str {
    if let Some(custom) = custom {
        return custom;
    }
    match agent_id {
        Some(AGENT_INTERVIEW_COACH) => INTERVIEW_COACH_PROMPT,
        Some(AGENT_REVIEW_MENTOR) => REVIEW_MENTOR_PROMPT,
        Some(AGENT_CASE_ANALYST) => CASE_ANALYST_PROMPT,
        _ => DEFAULT_AGENT_PROMPT,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_system_prompt_embeds_page_count() {
        let prompt = comic_scene_system_prompt(7);
        assert!(prompt.contains("exactly 7 scenes"));
    }

    #[test]
    fn panel_prompt_appends_style_when_present() {
        let bare = comic_panel_prompt("a cat on a roof", "");
        assert!(bare.ends_with("a cat on a roof"));

        let styled = comic_panel_prompt("a cat on a roof", "watercolor");
        assert!(styled.ends_with("a cat on a roof, watercolor"));
    }

    #[test]
    fn short_request_gets_expanded_outline_prompt() {
        let prompt = deck_outline_prompt("Rust for web teams", 5, "");
        assert!(prompt.contains("Expand the topic"));
        assert!(prompt.contains("middle 3 pages"));
    }

    #[test]
    fn long_request_gets_verbatim_outline_prompt() {
        let long = "x".repeat(DETAILED_PROMPT_THRESHOLD_CHARS + 1);
        let prompt = deck_outline_prompt(&long, 5, "");
        assert!(prompt.contains("do not rephrase"));
    }

    #[test]
    fn custom_prompt_wins_over_preset() {
        let prompt = agent_system_prompt(Some(AGENT_INTERVIEW_COACH), Some("be a pirate"));
        assert_eq!(prompt, "be a pirate");
    }

    #[test]
    fn preset_agent_resolves() {
        let prompt = agent_system_prompt(Some(AGENT_CASE_ANALYST), None);
        assert!(prompt.contains("case-study analyst"));
    }

    #[test]
    fn unknown_agent_falls_back_to_default() {
        assert_eq!(agent_system_prompt(Some("poet"), None), DEFAULT_AGENT_PROMPT);
        assert_eq!(agent_system_prompt(None, None), DEFAULT_AGENT_PROMPT);
    }
}
