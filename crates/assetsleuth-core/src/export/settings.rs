/// Line scanners for the YAML settings files under `ProjectSettings/`.
///
/// Only top-level scalars and one sequence length are needed, so keys are
/// matched line by line; each key read here occurs once per file.

/// Raw text after `key:` on the first line declaring it.
pub fn scalar<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix(key)?.strip_prefix(':')?;
        Some(rest.trim())
    })
}

/// Integer value of `key`, or `None` if absent or not an integer.
pub fn int_value(text: &str, key: &str) -> Option<i64> {
    scalar(text, key)?.parse().ok()
}

/// Whether an object reference such as `{fileID: 11400000, guid: ..., type: 2}`
/// points at something. `{fileID: 0}` is the null reference.
pub fn is_reference_set(value: &str) -> bool {
    value
        .split_once("fileID:")
        .map(|(_, rest)| {
            let id: String = rest
                .trim_start()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '-')
                .collect();
            id.parse::<i64>().is_ok_and(|id| id != 0)
        })
        .unwrap_or(false)
}

/// Number of entries in the sequence under `key`, or `None` if the key is
/// absent.
///
/// Handles the flow form (`key: []`) and the block form, where items start
/// with `- ` at one indentation level, which the editor writes at the
/// key's own indentation.
pub fn sequence_len(text: &str, key: &str) -> Option<usize> {
    let mut lines = text.lines();
    let (key_indent, inline) = lines.by_ref().find_map(|line| {
        let trimmed = line.trim_start();
        let rest = trimmed.strip_prefix(key)?.strip_prefix(':')?;
        Some((line.len() - trimmed.len(), rest.trim()))
    })?;

    if !inline.is_empty() {
        return Some(flow_len(inline));
    }

    let mut item_indent = None;
    let mut count = 0;
    for line in lines {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        let indent = line.len() - trimmed.len();
        let is_item = trimmed == "-" || trimmed.starts_with("- ");
        match item_indent {
            None if is_item && indent >= key_indent => {
                item_indent = Some(indent);
                count = 1;
            }
            None => break,
            Some(level) if indent < level => break,
            Some(level) if indent == level => {
                if !is_item {
                    break;
                }
                count += 1;
            }
            // Continuation lines of the current item.
            Some(_) => {}
        }
    }
    Some(count)
}

/// Top-level entries of a flow sequence like `[{fileID: 1, guid: a}, ...]`.
fn flow_len(value: &str) -> usize {
    let Some(inner) = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .map(str::trim)
    else {
        return 0;
    };
    if inner.is_empty() {
        return 0;
    }
    let mut depth = 0i32;
    let mut entries = 1;
    for c in inner.chars() {
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth -= 1,
            ',' if depth == 0 => entries += 1,
            _ => {}
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPHICS: &str = "%YAML 1.1\n\
--- !u!30 &1\n\
GraphicsSettings:\n  \
  m_ObjectHideFlags: 0\n  \
  m_PreloadedShaders:\n  \
  - {fileID: 20000000, guid: 11111111111111111111111111111111, type: 2}\n  \
  - {fileID: 20000000, guid: 22222222222222222222222222222222, type: 2}\n  \
  m_SpritesDefaultMaterial: {fileID: 10754, guid: 0000000000000000f000000000000000, type: 0}\n  \
  m_CustomRenderPipeline: {fileID: 0}\n";

    #[test]
    fn scalars_by_key() {
        let text = "PlayerSettings:\n  webGLCompressionFormat: 1\n  stripEngineCode: 0\n";
        assert_eq!(int_value(text, "webGLCompressionFormat"), Some(1));
        assert_eq!(int_value(text, "stripEngineCode"), Some(0));
        assert_eq!(int_value(text, "stripEngine"), None);
        assert_eq!(int_value(text, "webGLNameFilesAsHashes"), None);
    }

    #[test]
    fn block_sequence_length() {
        assert_eq!(sequence_len(GRAPHICS, "m_PreloadedShaders"), Some(2));
        assert_eq!(sequence_len(GRAPHICS, "m_AlwaysIncludedShaders"), None);
    }

    #[test]
    fn block_sequence_with_multi_line_items() {
        let text = "Root:\n  list:\n    - a: 1\n      b: 2\n    - a: 3\n  next: 0\n";
        assert_eq!(sequence_len(text, "list"), Some(2));
    }

    #[test]
    fn flow_sequence_length() {
        assert_eq!(sequence_len("  m_PreloadedShaders: []\n", "m_PreloadedShaders"), Some(0));
        assert_eq!(
            sequence_len(
                "  m_PreloadedShaders: [{fileID: 1, guid: a, type: 2}, {fileID: 2, guid: b, type: 2}]\n",
                "m_PreloadedShaders"
            ),
            Some(2)
        );
    }

    #[test]
    fn key_followed_by_another_key_is_empty() {
        let text = "  m_PreloadedShaders:\n  m_CustomRenderPipeline: {fileID: 0}\n";
        assert_eq!(sequence_len(text, "m_PreloadedShaders"), Some(0));
    }

    #[test]
    fn object_references() {
        assert!(!is_reference_set("{fileID: 0}"));
        assert!(is_reference_set(
            "{fileID: 11400000, guid: 4b83569d67af61e458304325a23e5dfd, type: 2}"
        ));
        assert!(!is_reference_set(""));
    }
}
