//! Instructions sent to the completion model

/// Fixed system directive for every page edit
pub const SYSTEM_DIRECTIVE: &str = "\
You edit pages of the Briarcliff Youth Soccer Club (BYSC) website.
You are given the current HTML of one page and an instruction from a site admin.

Follow these rules:
- Change only the content the instruction refers to. Leave every other section as it is.
- Keep the existing HTML structure, classes, IDs and attributes exactly as they are.
- Limit changes to text, links, and adding or removing simple elements when asked.
- Reply with the COMPLETE page (the full HTML document), never just the changed part.
- Do NOT add comments or any explanation of what you changed.
- Do NOT touch CSS classes, scripts or structural markup unless the instruction explicitly asks for it.
- Keep the page's formatting and indentation style.
- If the instruction is unclear or the change could break the site, reply only with a JSON object instead:
  {\"error\": \"why this change is risky\"}";

/// User message carrying the page and the instruction
pub fn user_message(file_name: &str, instruction: &str, file_content: &str) -> String {
    format!(
        "File: {file_name}\n\n\
         Instruction: {instruction}\n\n\
         Current file content:\n```html\n{file_content}\n```\n\n\
         Return the complete updated file. Output only the HTML, nothing else."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_covers_refusal_shape() {
        assert!(SYSTEM_DIRECTIVE.contains(r#"{"error": "#));
        assert!(SYSTEM_DIRECTIVE.contains("COMPLETE page"));
    }

    #[test]
    fn test_user_message_embeds_everything() {
        let message = user_message(
            "coaching.html",
            "change the coach's phone number to 555-0100",
            "<html><span id=\"phone\">555-0000</span></html>",
        );

        assert!(message.starts_with("File: coaching.html\n\n"));
        assert!(message.contains("Instruction: change the coach's phone number to 555-0100\n"));
        assert!(message.contains(
            "```html\n<html><span id=\"phone\">555-0000</span></html>\n```"
        ));
    }
}
