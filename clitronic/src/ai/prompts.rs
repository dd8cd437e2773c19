//! Prompt text sent to the chat endpoint on the user's behalf.
//! The system prompt itself lives server-side.

pub const IDENTIFY_PROMPT: &str = "Identify this electronic component. Tell me what it is, \
its key specifications, how to use it, and any tips. If you can read any markings or color \
codes, decode them.";

pub fn build_list_prompt(category: Option<&str>) -> String {
    match category {
        Some(category) => format!(
            "List all {} components from your knowledge base. Format as a clean list with name and one-line description.",
            category
        ),
        None => "List all components in your knowledge base grouped by category. Format as a clean list with name and one-line description.".to_string(),
    }
}

pub fn build_info_prompt(component: &str) -> String {
    format!(
        "Look up the component \"{}\" using your lookup_component tool. Give me its full specs, pinout, circuit example, and tips.",
        component
    )
}
