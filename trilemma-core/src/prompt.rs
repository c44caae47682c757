//! Prompt sent to the text-generation service.

/// Upper bound on the length of the generated explanation.
pub const WORD_LIMIT: usize = 300;

/// Embed the user's project context in the analysis instructions.
///
/// The context is quoted verbatim; surrounding whitespace is trimmed.
pub fn build_prompt(context: &str) -> String {
    let context = context.trim();
    format!(
        "You are an experienced project manager and systems thinker.\n\
         The user is weighing the project triangle of Fast (快), Accurate/Good (准) and Cheap/Saving (省) \
         in the following context: \"{context}\".\n\
         \n\
         Please explain:\n\
         1. What \"Fast\" (快), \"Accurate\" (准) and \"Cheap\" (省) mean specifically in this context.\n\
         2. Why achieving all three at once is impossible or extremely difficult (the \"Impossible Triangle\").\n\
         3. Concrete examples of what happens when only two are chosen (e.g. Fast + Cheap = Low Quality).\n\
         \n\
         Keep the response concise, structured and insightful, at most {WORD_LIMIT} words.\n\
         Format it with Markdown.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_context() {
        let prompt = build_prompt("  Renovating a historic house \n");
        assert!(prompt.contains("context: \"Renovating a historic house\"."));
        assert!(prompt.contains("1. What \"Fast\""));
        assert!(prompt.contains("2. Why achieving all three"));
        assert!(prompt.contains("3. Concrete examples"));
        assert!(prompt.contains("at most 300 words"));
        assert!(prompt.contains("Markdown"));
    }
}
