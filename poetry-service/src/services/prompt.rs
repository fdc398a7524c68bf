//! Prompt assembly for the poetry chat.
//!
//! Order is fixed: grounding instructions, the delimited book, the
//! `BUTTONS: ` trailer instructions, then the quoted user query. The frontend
//! parses the `BUTTONS: ` prefix out of answers, so its spelling must not
//! change.

pub const CONTENT_START_MARKER: &str = "--- POETRY BOOK CONTENT START ---";
pub const CONTENT_END_MARKER: &str = "--- POETRY BOOK CONTENT END ---";
pub const BUTTONS_PREFIX: &str = "BUTTONS: ";

const GROUNDING_INSTRUCTIONS: &str = "\
Based *only* on the following poetry book content, discuss the user's query.
Focus on themes, imagery, poetic style, or specific poems/stanzas as they appear in the text.
Provide any relevant information found, even if it's not a complete direct answer. Do not use external information.";

const BUTTONS_INSTRUCTIONS: &str = "\
If your response discusses a specific poem or a clearly defined section/theme (e.g., headings like '## Poem 1: Echoes of Dawn' or '## Themes Explored'), please list these *exact* titles or headings at the end of your response.
Prefix these with \"BUTTONS: \" and separate them with commas. For example: \"BUTTONS: Poem 1: Echoes of Dawn, Themes Explored\".
Only suggest buttons for topics that can be directly queried and fully answered from the *exact phrases* found in the document. Do not invent new topics for buttons.";

pub struct PromptBuilder;

impl PromptBuilder {
    /// The reference text is embedded verbatim, without truncation.
    pub fn build(reference_text: &str, user_query: &str) -> String {
        let mut prompt = String::with_capacity(
            reference_text.len() + user_query.len() + GROUNDING_INSTRUCTIONS.len() + 1024,
        );

        prompt.push_str(GROUNDING_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(CONTENT_START_MARKER);
        prompt.push('\n');
        prompt.push_str(reference_text);
        prompt.push('\n');
        prompt.push_str(CONTENT_END_MARKER);
        prompt.push_str("\n\n");
        prompt.push_str(BUTTONS_INSTRUCTIONS);
        prompt.push_str("\n\nUser's query: \"");
        prompt.push_str(user_query);
        prompt.push('"');
        prompt
    }
}
