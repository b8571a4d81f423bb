/// The `Resources` folder rule: assets under a `Resources` folder ship with
/// the build even when no scene references them, unless that folder sits
/// directly inside an `Editor` folder.

/// Returns `true` when `path` lies under a qualifying `Resources` folder.
///
/// Matching is per folder segment and case-insensitive. Any qualifying
/// segment at any depth is enough, so a nested `Resources` folder inside an
/// excluded one still counts.
pub fn is_in_resources_folder(path: &str) -> bool {
    let mut segments: Vec<&str> = path.split('/').collect();
    // The last segment is the asset itself, not a folder.
    segments.pop();

    segments.iter().enumerate().any(|(i, segment)| {
        segment.eq_ignore_ascii_case("resources")
            && (i == 0 || !segments[i - 1].eq_ignore_ascii_case("editor"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_resources_matches() {
        assert!(is_in_resources_folder("Assets/Resources/x.png"));
    }

    #[test]
    fn editor_resources_does_not_match() {
        assert!(!is_in_resources_folder("Assets/Editor/Resources/x.png"));
        assert!(!is_in_resources_folder("Assets/editor/resources/x.png"));
    }

    #[test]
    fn nested_resources_matches() {
        assert!(is_in_resources_folder(
            "Assets/Sub/Resources/Nested/Resources/x.png"
        ));
        assert!(is_in_resources_folder("Assets/Foo/Resources/x.png"));
        assert!(is_in_resources_folder(
            "Assets/Editor/Resources/Deeper/Resources/x.png"
        ));
    }

    #[test]
    fn case_insensitive() {
        assert!(is_in_resources_folder("Assets/RESOURCES/x.png"));
    }

    #[test]
    fn file_or_partial_names_do_not_match() {
        assert!(!is_in_resources_folder("Assets/Resources"));
        assert!(!is_in_resources_folder("Assets/Textures/Resources.png"));
        assert!(!is_in_resources_folder("Assets/MyResources/x.png"));
    }
}
