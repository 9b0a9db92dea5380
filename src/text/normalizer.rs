/// Split raw recognizer output into clean lines.
///
/// Recognizers sometimes emit newlines as literal two-character escape
/// sequences (`\n` spelled out) or carriage-return artifacts; both are
/// normalized to real line breaks before splitting. Blank lines are dropped;
/// `keep_indent` preserves leading whitespace on surviving lines so the
/// code-mode correction pass can normalize indentation instead of losing it.
pub fn normalize(raw: &str, keep_indent: bool) -> Vec<String> {
    let unescaped = raw
        .replace("\\r\\n", "\n")
        .replace("\\n", "\n")
        .replace("\\r", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    unescaped
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if keep_indent {
                line.trim_end().to_string()
            } else {
                line.trim().to_string()
            }
        })
        .collect()
}
