/// Drive folders scanned by the manifest generator, in output order.
pub const SOURCE_FOLDERS: [&str; 4] = ["gardenhouse", "redstudio", "greenstudio", "algemeen"];

/// Drive folder name -> key used in `images.json`
pub fn folder_key(folder_name: &str) -> String {
    match folder_name {
        "redstudio" => "red-studio".to_string(),
        "greenstudio" => "green-studio".to_string(),
        other => other.to_string(),
    }
}

/// Drive file name -> photo key: extension stripped, lower-cased, spaces as `-`.
/// `"Front Door.JPG"` becomes `"front-door"`.
pub fn photo_key(file_name: &str) -> String {
    strip_extension(file_name).to_lowercase().replace(' ', "-")
}

// Only the last extension goes; leading dots of the base name never start one.
fn strip_extension(name: &str) -> &str {
    let base_start = name.rfind('/').map(|i| i + 1).unwrap_or(0);
    let base = &name[base_start..];
    let leading_dots = base.len() - base.trim_start_matches('.').len();

    match base[leading_dots..].rfind('.') {
        Some(dot) => &name[..base_start + leading_dots + dot],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_key_remap() {
        assert_eq!(folder_key("redstudio"), "red-studio");
        assert_eq!(folder_key("greenstudio"), "green-studio");
        assert_eq!(folder_key("gardenhouse"), "gardenhouse");
        assert_eq!(folder_key("algemeen"), "algemeen");
    }

    #[test]
    fn test_photo_key() {
        assert_eq!(photo_key("Front Door.JPG"), "front-door");
        assert_eq!(photo_key("living room 2.jpeg"), "living-room-2");
        assert_eq!(photo_key("terrace"), "terrace");
        assert_eq!(photo_key("archive.tar.gz"), "archive.tar");
    }

    #[test]
    fn test_photo_key_dotfiles() {
        assert_eq!(photo_key(".hidden"), ".hidden");
        assert_eq!(photo_key("..Odd Name.png"), "..odd-name");
        assert_eq!(photo_key("trailing."), "trailing");
        assert_eq!(photo_key("..."), "...");
    }

    #[test]
    fn test_photo_key_with_slash_in_name() {
        assert_eq!(photo_key("v1.2/Pool Side.webp"), "v1.2/pool-side");
        assert_eq!(photo_key("dir.d/noext"), "dir.d/noext");
    }
}
