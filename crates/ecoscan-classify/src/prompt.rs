//! The classification prompt.

/// Prompt sent with every scan.
///
/// This text is a fixed wire contract shared with the deployed model
/// configuration; do not reword it without coordinating a rollout.
pub const CLASSIFY_PROMPT: &str = r#"Return JSON only:
{
"item_name":"short name",
"material":"plastic|paper|metal|glass|e-waste|composite|organic",
"recyclable":true|false,
"confidence":"high|medium|low"
}
Identify recyclable item. No text outside JSON."#;
