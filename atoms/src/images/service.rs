use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

use super::error::ImageError;
use super::model::{FileId, ImageSize, Lh3Request, DEFAULT_IMAGE_SIZE};

pub const LH3_BASE_URL: &str = "https://lh3.googleusercontent.com/d/";

// Drive share links: https://drive.google.com/file/d/<id>/view
static DRIVE_PATH_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("drive path pattern compiles"));

// Drive open links: https://drive.google.com/open?id=<id>&usp=sharing
static DRIVE_QUERY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("drive query pattern compiles"));

// Greedy prefix: the last `/` or `=` followed by at least one id character wins.
static TRAILING_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^.*[/=]([A-Za-z0-9_-]+)").expect("trailing id pattern compiles"));

impl FileId {
    /// Normalizes a raw id, share link or query fragment down to the bare id.
    /// Input that matches no pattern is kept as-is.
    pub fn extract(raw: &str) -> FileId {
        let captured = [&*DRIVE_PATH_ID, &*DRIVE_QUERY_ID, &*TRAILING_ID]
            .into_iter()
            .find_map(|re| re.captures(raw).and_then(|caps| caps.get(1)))
            .map(|m| m.as_str());

        FileId(captured.unwrap_or(raw).to_string())
    }
}

/// Render the lh3 image URL for an already extracted id
pub fn build_lh3_url(file_id: &FileId, size: ImageSize) -> String {
    match size {
        ImageSize::Original => format!("{}{}", LH3_BASE_URL, file_id),
        ImageSize::Square(px) => format!("{}{}=w{}-h{}-c", LH3_BASE_URL, file_id, px, px),
    }
}

/// Extract + build in one go
pub fn generate_lh3_url(raw: &str, size: ImageSize) -> String {
    build_lh3_url(&FileId::extract(raw), size)
}

/// Pick the template for a request: an explicit size wins, otherwise the configured default.
pub fn resolve_size(requested: Option<u32>, default: ImageSize) -> Result<ImageSize, ImageError> {
    match requested {
        Some(0) => Err(ImageError::InvalidSize),
        Some(px) => Ok(ImageSize::Square(px)),
        None => Ok(default),
    }
}

/// Same as `resolve_size` for a raw `?size=` query value.
/// A bare `?size` asks for the sized template at `DEFAULT_IMAGE_SIZE`.
/// Only plain decimal digits without a leading zero are accepted, so the value
/// lands in the URL exactly as sent.
pub fn parse_size_param(raw: Option<&str>, default: ImageSize) -> Result<ImageSize, ImageError> {
    let requested = match raw.map(str::trim) {
        None => None,
        Some("") => Some(DEFAULT_IMAGE_SIZE),
        Some(value) => Some(parse_pixels(value)?),
    };
    resolve_size(requested, default)
}

fn parse_pixels(value: &str) -> Result<u32, ImageError> {
    if !value.bytes().all(|b| b.is_ascii_digit()) || value.starts_with('0') {
        return Err(ImageError::InvalidSize);
    }
    value.parse::<u32>().map_err(|_| ImageError::InvalidSize)
}

/// Percent-decode the `{id}` part of `/api/google-image/{id}` and drop trailing `/`.
/// Ids that do not decode to UTF-8 are rejected.
pub fn decode_path_id(raw: &str) -> Result<String, ImageError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| ImageError::MalformedFileId)?;
    Ok(decoded.trim_end_matches('/').to_string())
}

/// Reject missing ids before any extraction happens
pub fn require_file_id(raw: Option<&str>) -> Result<&str, ImageError> {
    match raw {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ImageError::MissingFileId),
    }
}

/// Decode a POST /api/generate-lh3 body into an id and template
pub fn parse_lh3_request(body: &[u8], default: ImageSize) -> Result<(FileId, ImageSize), ImageError> {
    if body.is_empty() {
        return Err(ImageError::MissingFileId);
    }
    let request: Lh3Request =
        serde_json::from_slice(body).map_err(|e| ImageError::InvalidBody(e.to_string()))?;

    let raw = require_file_id(request.file_id.as_deref())?;
    let size = resolve_size(request.size, default)?;

    Ok((FileId::extract(raw), size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(
            generate_lh3_url("abc123", ImageSize::Original),
            "https://lh3.googleusercontent.com/d/abc123"
        );
        assert_eq!(FileId::extract("1AbC-d_9xYz").as_str(), "1AbC-d_9xYz");
    }

    #[test]
    fn test_drive_share_link() {
        assert_eq!(
            generate_lh3_url("https://drive.google.com/file/d/abc123/view", ImageSize::Original),
            "https://lh3.googleusercontent.com/d/abc123"
        );
        assert_eq!(
            FileId::extract("https://drive.google.com/file/d/abc123/view?usp=sharing").as_str(),
            "abc123"
        );
    }

    #[test]
    fn test_drive_open_link() {
        assert_eq!(
            FileId::extract("https://drive.google.com/open?id=q_W-e1&usp=sharing").as_str(),
            "q_W-e1"
        );
        assert_eq!(FileId::extract("https://drive.google.com/uc?export=view&id=zz9").as_str(), "zz9");
    }

    #[test]
    fn test_last_separator_wins() {
        assert_eq!(
            generate_lh3_url("thumbnail?sz=w100&file=xyz789", ImageSize::Square(800)),
            "https://lh3.googleusercontent.com/d/xyz789=w800-h800-c"
        );
        assert_eq!(FileId::extract("foo/bar/baz").as_str(), "baz");
        assert_eq!(FileId::extract("a=b=c").as_str(), "c");
    }

    #[test]
    fn test_separator_without_id_chars_is_skipped() {
        // trailing `/` has nothing after it, so the previous segment is used
        assert_eq!(FileId::extract("folder/abc123/").as_str(), "abc123");
        assert_eq!(FileId::extract("abc.jpg").as_str(), "abc.jpg");
        assert_eq!(FileId::extract("==").as_str(), "==");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let inputs = [
            "abc123",
            "https://drive.google.com/file/d/abc123/view",
            "x=y",
            "no separators here",
            "/",
            "",
        ];
        for input in inputs {
            let once = FileId::extract(input);
            let twice = FileId::extract(once.as_str());
            assert_eq!(once, twice, "input {:?}", input);
        }
    }

    #[test]
    fn test_inputs_without_separators_unchanged() {
        for input in ["plain", "with space", "dots.and-dashes_", "ünïcode", ""] {
            assert_eq!(FileId::extract(input).as_str(), input);
        }
    }

    // Every string over a small alphabet of id characters and separators
    fn strings_up_to(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max_len {
            frontier = frontier
                .iter()
                .flat_map(|prefix| alphabet.iter().map(move |c| format!("{}{}", prefix, c)))
                .collect();
            all.extend(frontier.iter().cloned());
        }
        all
    }

    #[test]
    fn test_extraction_sweep() {
        let inputs = strings_up_to(&['a', 'd', '/', '=', '.', '-', ' '], 4);
        assert_eq!(inputs.len(), 1 + 7 + 49 + 343 + 2401);

        for input in &inputs {
            let once = FileId::extract(input);
            assert_eq!(once, FileId::extract(once.as_str()), "not idempotent for {:?}", input);

            if !input.contains(['/', '=']) {
                assert_eq!(once.as_str(), input, "changed without a separator: {:?}", input);
            }
        }
    }

    #[test]
    fn test_size_appears_in_both_positions() {
        let id = FileId::extract("abc");
        for px in [1, 64, 800, 4096] {
            let url = build_lh3_url(&id, ImageSize::Square(px));
            assert!(url.ends_with(&format!("=w{}-h{}-c", px, px)), "{}", url);
        }
        assert!(!build_lh3_url(&id, ImageSize::Original).contains('='));
    }

    #[test]
    fn test_resolve_size() {
        assert_eq!(resolve_size(None, ImageSize::Original).unwrap(), ImageSize::Original);
        assert_eq!(
            resolve_size(None, ImageSize::Square(800)).unwrap(),
            ImageSize::Square(800)
        );
        assert_eq!(
            resolve_size(Some(320), ImageSize::Original).unwrap(),
            ImageSize::Square(320)
        );
        assert!(matches!(
            resolve_size(Some(0), ImageSize::Original),
            Err(ImageError::InvalidSize)
        ));
    }

    #[test]
    fn test_parse_size_param() {
        assert_eq!(parse_size_param(None, ImageSize::Original).unwrap(), ImageSize::Original);
        assert_eq!(
            parse_size_param(Some(""), ImageSize::Original).unwrap(),
            ImageSize::Square(DEFAULT_IMAGE_SIZE)
        );
        assert_eq!(
            parse_size_param(Some("1200"), ImageSize::Original).unwrap(),
            ImageSize::Square(1200)
        );
        assert_eq!(
            parse_size_param(Some(" 64 "), ImageSize::Original).unwrap(),
            ImageSize::Square(64)
        );
        for bad in ["big", "-5", "+05", "0800", "0", "12px", "1e3", "99999999999"] {
            assert!(
                matches!(parse_size_param(Some(bad), ImageSize::Original), Err(ImageError::InvalidSize)),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_decode_path_id() {
        assert_eq!(decode_path_id("abc123").unwrap(), "abc123");
        assert_eq!(decode_path_id("abc123/").unwrap(), "abc123");
        assert_eq!(decode_path_id("abc123%2F%2F").unwrap(), "abc123");
        assert_eq!(decode_path_id("%20").unwrap(), " ");
        assert_eq!(decode_path_id("").unwrap(), "");
        assert_eq!(
            decode_path_id("https%3A%2F%2Fdrive.google.com%2Ffile%2Fd%2Fabc123%2Fview").unwrap(),
            "https://drive.google.com/file/d/abc123/view"
        );
        // a stray `%` that is not an escape stays as it is
        assert_eq!(decode_path_id("50%off").unwrap(), "50%off");
        assert!(matches!(decode_path_id("%FF%FE"), Err(ImageError::MalformedFileId)));
    }

    #[test]
    fn test_require_file_id() {
        assert_eq!(require_file_id(Some("abc")).unwrap(), "abc");
        assert!(matches!(require_file_id(None), Err(ImageError::MissingFileId)));
        assert!(matches!(require_file_id(Some("")), Err(ImageError::MissingFileId)));
        assert!(matches!(require_file_id(Some("   ")), Err(ImageError::MissingFileId)));
    }

    #[test]
    fn test_parse_lh3_request() {
        let (id, size) =
            parse_lh3_request(br#"{"fileId": "https://drive.google.com/file/d/k1/view", "size": 640}"#, ImageSize::Original)
                .unwrap();
        assert_eq!(id.as_str(), "k1");
        assert_eq!(size, ImageSize::Square(640));

        let (id, size) = parse_lh3_request(br#"{"fileId": "k2"}"#, ImageSize::Original).unwrap();
        assert_eq!(id.as_str(), "k2");
        assert_eq!(size, ImageSize::Original);
    }

    #[test]
    fn test_parse_lh3_request_errors() {
        assert!(matches!(
            parse_lh3_request(b"", ImageSize::Original),
            Err(ImageError::MissingFileId)
        ));
        assert!(matches!(
            parse_lh3_request(b"{}", ImageSize::Original),
            Err(ImageError::MissingFileId)
        ));
        assert!(matches!(
            parse_lh3_request(br#"{"fileId": null}"#, ImageSize::Original),
            Err(ImageError::MissingFileId)
        ));
        assert!(matches!(
            parse_lh3_request(b"not json", ImageSize::Original),
            Err(ImageError::InvalidBody(_))
        ));
        assert!(matches!(
            parse_lh3_request(br#"{"fileId": "a", "size": 0}"#, ImageSize::Original),
            Err(ImageError::InvalidSize)
        ));
    }
}
