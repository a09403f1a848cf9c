use crate::parse::Type;

/// Represents the tags extracted from a `/** ... */` documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocComment {
    /// The type named by a `@type {...}` tag, if present.
    pub type_: Option<Type>,

    /// Whether the comment carries a `@const` tag.
    pub is_const: bool,
}

/// Extracts the tags this tool cares about from the text of a documentation
/// comment. `text` is the comment body as the parser reports it, without the
/// `/*` and `*/` delimiters.
pub fn parse_doc(text: &str) -> DocComment {
    DocComment {
        type_: type_tag(text).map(type_from_name),
        is_const: has_tag(text, "@const"),
    }
}

/// Finds a standalone `tag` in the comment. A following alphanumeric
/// character means a different, longer tag (ie, `@constructor`).
fn has_tag(text: &str, tag: &str) -> bool {
    let mut rest = text;
    while let Some(at) = rest.find(tag) {
        rest = &rest[at + tag.len()..];
        if !rest.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            return true;
        }
    }
    false
}

/// Returns the braced name of the first `@type {...}` tag, if any. Braces
/// nest in Closure record types (ie, `@type {{count: number}}`), so the
/// payload runs to the matching brace, not the first one.
fn type_tag(text: &str) -> Option<&str> {
    let at = text.find("@type")?;
    let rest = text[at + "@type".len()..].trim_start();
    let rest = rest.strip_prefix('{')?;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(rest[..i].trim());
                }
            }
            _ => (),
        }
    }
    None
}

/// Maps a Closure type name onto a declared type. Nullability prefixes are
/// stripped; names that are not primitives are carried verbatim.
fn type_from_name(name: &str) -> Type {
    if name.is_empty() || name == "*" || name == "?" {
        return Type::Any;
    }
    let name = name.trim_start_matches(&['!', '?'][..]);
    match name {
        "number" => Type::Number,
        "string" => Type::String,
        "boolean" => Type::Boolean,
        "" | "*" => Type::Any,
        other => Type::Named(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tags() {
        assert_eq!(parse_doc("* @type {number} ").type_, Some(Type::Number));
        assert_eq!(parse_doc("* @type {string}").type_, Some(Type::String));
        assert_eq!(parse_doc("* @type {boolean}").type_, Some(Type::Boolean));
        assert_eq!(parse_doc("* @type {*}").type_, Some(Type::Any));
        assert_eq!(parse_doc("* @type {?}").type_, Some(Type::Any));
        assert_eq!(
            parse_doc("* @type {!Foo}").type_,
            Some(Type::Named("Foo".to_string()))
        );
        assert_eq!(parse_doc("* @type {?number}").type_, Some(Type::Number));
    }

    #[test]
    fn multiline_comment() {
        let doc = parse_doc("*\n * The number of retries.\n * @type {number}\n ");
        assert_eq!(doc.type_, Some(Type::Number));
        assert!(!doc.is_const);
    }

    #[test]
    fn const_tag() {
        assert!(parse_doc("* @const ").is_const);
        assert!(parse_doc("* @const").is_const);
        assert!(!parse_doc("* @constructor ").is_const);
        assert!(parse_doc("* @constructor and @const too").is_const);
    }

    #[test]
    fn no_tags() {
        let doc = parse_doc("* Frobnicates the baz. ");
        assert_eq!(doc, DocComment::default());
    }

    #[test]
    fn record_type_tag() {
        assert_eq!(
            parse_doc("* @type {{count: number}} ").type_,
            Some(Type::Named("{count: number}".to_string()))
        );
        assert_eq!(
            parse_doc("* @type {Map<string, {id: number}>} ").type_,
            Some(Type::Named("Map<string, {id: number}>".to_string()))
        );
    }

    #[test]
    fn malformed_type_tag() {
        assert_eq!(parse_doc("* @type number ").type_, None);
        assert_eq!(parse_doc("* @type {number ").type_, None);
        assert_eq!(parse_doc("* @type {{count: number} ").type_, None);
    }
}
