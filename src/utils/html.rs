// src/utils/html.rs

/// Whitelist-sanitizes question text with ammonia.
///
/// Formatting tags such as <b>, <p> and <img> survive; <script>, <iframe>,
/// event-handler attributes and `javascript:` URLs are stripped. Script
/// content is removed entirely, not escaped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_and_handlers() {
        assert_eq!(clean_html("<p>Hi</p><script>steal()</script>"), "<p>Hi</p>");
        assert_eq!(
            clean_html(r#"<b onclick="steal()">x</b>"#),
            "<b>x</b>"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(clean_html("Which planet is largest?"), "Which planet is largest?");
    }
}
