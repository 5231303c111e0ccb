use regex::{Captures, Regex};
use std::sync::OnceLock;

/// One pass over the source, earliest match wins. At a given position the
/// alternatives are tried left to right: string literal, `//****/` marker
/// line left over from old contract templates, block comment, line comment.
fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)(?P<string>"(?:\\.|[^"\\])*")|//\*+/\n|/\*.*?\*/|//[^\n]*"#)
            .expect("comment regex should compile")
    })
}

/// Strip comments from contract source.
///
/// String literals are copied through untouched, so a `//` or `/*` inside a
/// string never starts a comment. The hybrid marker is matched before a block
/// comment could start inside it, and a `//` inside a block comment cannot
/// swallow its closing `*/`.
pub fn normalize(source: &str) -> String {
    comment_regex()
        .replace_all(source, |caps: &Captures| match caps.name("string") {
            Some(string) => string.as_str().to_string(),
            None => String::new(),
        })
        .into_owned()
}
