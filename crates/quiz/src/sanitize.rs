//! Removal of formatting artifacts from model output.
//!
//! Models frequently wrap JSON in markdown fences or double-escape characters
//! when asked to emit code blocks. Those artifacts are corrected here, before
//! parsing, rather than worked around with parser leniency — the parser stays
//! strict and auditable.

/// Strips the formatting artifacts the model commonly injects.
///
/// Total — never fails — and idempotent: `sanitize(sanitize(x)) ==
/// sanitize(x)`. Performs, in order:
///
/// 1. remove literal ```` ```json ```` and ```` ``` ```` markers,
/// 2. unescape literal `\n` sequences into real newlines,
/// 3. unescape literal `\"` sequences into plain quotes,
/// 4. trim leading and trailing whitespace.
pub fn sanitize(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_clean_json_through() {
        let input = r#"{"success": "true"}"#;
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn strips_markdown_fences() {
        let fenced = "```json\n{\"success\": \"true\"}\n```";
        assert_eq!(sanitize(fenced), r#"{"success": "true"}"#);
    }

    #[test]
    fn fenced_and_unfenced_sanitize_identically() {
        let body = r#"{"questions": []}"#;
        let fenced = format!("```json\n{body}\n```");
        assert_eq!(sanitize(&fenced), sanitize(body));
    }

    #[test]
    fn unescapes_literal_newlines_and_quotes() {
        assert_eq!(sanitize(r#"line1\nline2"#), "line1\nline2");
        assert_eq!(sanitize(r#"say \"hi\""#), r#"say "hi""#);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  \n {\"a\": 1} \t"), r#"{"a": 1}"#);
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "```json\n{\"success\": \"true\"}\n```",
            r#"  {"a": "b\nc"}  "#,
            "no json at all",
            "",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn is_total_on_arbitrary_input() {
        // No input may panic, including stray fence fragments.
        for input in ["``", "```", "````json", "\\", "\\\""] {
            let _ = sanitize(input);
        }
    }
}
