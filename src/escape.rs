use std::borrow::Cow;

/// Tokens that mark a path as ordinary even though it contains non-word
/// characters: the built-in data variables, relative scope markers, and
/// dotted or snake-cased names.
const RESERVED_TOKENS: [&str; 10] = [
    "@root", "@first", "@index", "@key", "@last", "@level", "../", "./", ".", "_",
];

/// Whether `path` must be wrapped in `[...]` to be read back as one segment.
pub(crate) fn needs_brackets(path: &str) -> bool {
    path.chars().any(|c| !c.is_ascii_alphanumeric())
        && !RESERVED_TOKENS.iter().any(|token| path.contains(token))
}

/// Brackets a mustache path when it holds characters the parser would
/// otherwise reject, e.g. `@@#*&%$` becomes `[@@#*&%$]`.
pub(crate) fn escape_path(path: &str) -> Cow<'_, str> {
    if needs_brackets(path) {
        Cow::Owned(format!("[{}]", path))
    } else {
        Cow::Borrowed(path)
    }
}
