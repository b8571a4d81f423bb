/// Minimal readers for text-serialised project files: `.meta` GUIDs and
/// the GUID references inside YAML assets.
///
/// Only the `guid: <32 hex>` token shape is recognised; nothing else in the
/// YAML is interpreted.
use compact_str::CompactString;

const GUID_LEN: usize = 32;
const GUID_TAG: &str = "guid: ";

/// Extensions of assets the editor serialises as YAML text.
const TEXT_ASSET_EXTENSIONS: [&str; 14] = [
    ".unity",
    ".prefab",
    ".mat",
    ".asset",
    ".controller",
    ".overridecontroller",
    ".anim",
    ".mask",
    ".playable",
    ".spriteatlas",
    ".physicmaterial",
    ".rendertexture",
    ".flare",
    ".guiskin",
];

/// Could this asset carry references to other assets?
pub fn may_reference_assets(extension: Option<&str>) -> bool {
    extension.is_some_and(|ext| TEXT_ASSET_EXTENSIONS.contains(&ext))
}

/// Returns `true` if the file content is YAML-serialised (not binary).
pub fn is_text_serialised(content: &str) -> bool {
    content.starts_with("%YAML")
}

fn guid_at(text: &str, start: usize) -> Option<&str> {
    let candidate = text.get(start..start + GUID_LEN)?;
    candidate
        .bytes()
        .all(|b| b.is_ascii_hexdigit())
        .then_some(candidate)
}

/// The asset GUID declared by a `.meta` file.
pub fn parse_meta_guid(meta: &str) -> Option<CompactString> {
    meta.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix(GUID_TAG)?;
        guid_at(rest, 0).map(CompactString::from)
    })
}

/// Every GUID referenced from a YAML asset, in order of appearance.
///
/// The all-zero GUID (a null reference) is skipped.
pub fn referenced_guids(content: &str) -> Vec<&str> {
    let mut guids = Vec::new();
    let mut offset = 0;
    while let Some(pos) = content[offset..].find(GUID_TAG) {
        let start = offset + pos + GUID_TAG.len();
        if let Some(guid) = guid_at(content, start) {
            if guid.bytes().any(|b| b != b'0') {
                guids.push(guid);
            }
            offset = start + GUID_LEN;
        } else {
            offset = start;
        }
    }
    guids
}
