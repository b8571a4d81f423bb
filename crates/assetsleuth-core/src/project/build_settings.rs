/// Reader for the build scene list in `ProjectSettings/EditorBuildSettings.asset`.

/// Paths of the enabled scenes, in build order.
///
/// Each scene entry is a YAML list item carrying `enabled` and `path`
/// fields; entries without a path are ignored.
pub fn parse_build_scenes(text: &str) -> Vec<String> {
    let mut scenes = Vec::new();
    let mut current: Option<(bool, Option<String>)> = None;

    let mut finish = |entry: Option<(bool, Option<String>)>| {
        if let Some((true, Some(path))) = entry {
            if !path.is_empty() {
                scenes.push(path);
            }
        }
    };

    for line in text.lines() {
        let trimmed = line.trim_start();
        let field = match trimmed.strip_prefix("- ") {
            Some(rest) => {
                finish(current.take());
                current = Some((false, None));
                rest
            }
            None => trimmed,
        };
        let Some(entry) = current.as_mut() else {
            continue;
        };
        if let Some(value) = field.strip_prefix("enabled:") {
            entry.0 = value.trim() == "1";
        } else if let Some(value) = field.strip_prefix("path:") {
            entry.1 = Some(value.trim().to_string());
        }
    }
    finish(current);
    scenes
}
