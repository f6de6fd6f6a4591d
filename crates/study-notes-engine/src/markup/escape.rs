use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Escape `&`, `<`, `>` and `"` for embedding text in markup.
///
/// Works in one pass, so an `&` introduced by escaping is never escaped again.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Reverse [`escape`] for exactly its four entities.
///
/// Other entities (`&nbsp;`, numeric references) are left as written; they
/// are not produced by the serializer.
pub fn unescape(text: &str) -> Cow<'_, str> {
    static ENTITY_REGEX: OnceLock<Regex> = OnceLock::new();
    let entity_regex = ENTITY_REGEX
        .get_or_init(|| Regex::new(r"&(amp|lt|gt|quot);").expect("Invalid entity regex"));

    entity_regex.replace_all(text, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        _ => "\"",
    })
}

/// Remove anything that looks like a tag
pub fn strip_tags(markup: &str) -> Cow<'_, str> {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let tag_regex = TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

    tag_regex.replace_all(markup, "")
}

/// Strip tags, then unescape what is left
pub fn to_plain_text(markup: &str) -> String {
    unescape(&strip_tags(markup)).into_owned()
}
