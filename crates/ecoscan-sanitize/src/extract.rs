//! Balanced-brace extraction of a JSON object from free-form model output.
//!
//! Generative models routinely wrap JSON in explanatory prose or markdown
//! fences. A naive `find`/`rfind` pair breaks on nested objects, so the
//! scanner counts brace depth instead, and ignores braces inside quoted
//! string literals (including escaped quotes) so payload text can never
//! shift the match.

use ecoscan_core::ExtractError;

/// Extract the first balanced JSON object from `text`.
///
/// Code-fence markers (```` ``` ````, optionally annotated `json` in any
/// case) are stripped first, then the substring from the first `{` to its
/// matching `}` is returned. The result is valid JSON object *syntax*; it is
/// not yet parsed or validated.
///
/// # Errors
///
/// - [`ExtractError::NoJsonFound`] if the text contains no `{`.
/// - [`ExtractError::UnbalancedBraces`] if the opening brace is never closed.
pub fn extract_json_object(text: &str) -> Result<String, ExtractError> {
    let cleaned = strip_fences(text);

    let start = cleaned.find('{').ok_or(ExtractError::NoJsonFound)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in cleaned[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Ok(cleaned[start..end].to_string());
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::UnbalancedBraces)
}

/// Remove all code-fence markers, keeping the fenced content.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        // Fence openers may carry a language tag
        if let Some(tag) = rest.get(..4) {
            if tag.eq_ignore_ascii_case("json") {
                rest = &rest[4..];
            }
        }
    }

    out.push_str(rest);
    out
}
