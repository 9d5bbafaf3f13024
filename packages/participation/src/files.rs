//! Decoder for submission file metadata.
//!
//! The `files` field of a submission has been written in at least four
//! historical encodings: a bare URL string, a JSON-encoded string, an object
//! with `url`, and an object with a signed `downloadUrl`. Each encoding gets
//! one explicit case here; anything else fails closed as a rejection rather
//! than being guessed at.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::FileRejection;

/// Whether a file belongs to the project deliverables or the pitch deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Project,
    Presentation,
}

/// Canonical descriptor for one submission file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Display name, never empty.
    pub name: String,
    /// Resolved download URL, always http(s). When the record carried a
    /// signed `downloadUrl` it wins over the bare storage `url`.
    pub url: String,
    /// Size in bytes, 0 when unknown.
    pub size: u64,
    /// Declared MIME type, may be empty.
    #[serde(rename = "type")]
    pub content_type: String,
    pub category: FileCategory,
}

/// Extensions that mark a file as presentation material.
const PRESENTATION_EXTENSIONS: &[&str] = &["pdf", "ppt", "pptx", "key", "odp"];

/// Decode one raw file entry of unknown shape.
///
/// `fallback_name` is used when neither the record nor the URL yields a
/// usable name.
pub fn decode(raw: &Value, fallback_name: Option<&str>) -> Result<FileDescriptor, FileRejection> {
    match raw {
        Value::String(s) => decode_string(s, fallback_name),
        Value::Object(_) => decode_object(raw, fallback_name),
        other => Err(FileRejection::ParseError(format!(
            "file entry is neither a string nor an object: {other}"
        ))),
    }
}

/// Decode every entry of a raw list, dropping (and logging) rejections.
/// Tolerates an empty input and never fails.
pub fn decode_all(raws: &[Value]) -> Vec<FileDescriptor> {
    raws.iter()
        .filter_map(|raw| match decode(raw, None) {
            Ok(descriptor) => Some(descriptor),
            Err(rejection) => {
                warn!(%rejection, "Dropping undecodable file entry");
                None
            }
        })
        .collect()
}

/// Decode a whole `files` field, whichever historical shape it has:
/// `null`, a single string, a JSON array, or a single object.
pub fn decode_files(field: &Value) -> Vec<FileDescriptor> {
    match field {
        Value::Null => Vec::new(),
        Value::Array(items) => decode_all(items),
        Value::String(s) if s.trim_start().starts_with('[') => {
            // Whole field JSON-encoded as a string; decode the array inside.
            match serde_json::from_str::<Vec<Value>>(s) {
                Ok(items) => decode_all(&items),
                Err(e) => {
                    warn!(error = %e, "Dropping files field with malformed JSON array");
                    Vec::new()
                }
            }
        }
        single => decode_all(std::slice::from_ref(single)),
    }
}

fn decode_string(s: &str, fallback_name: Option<&str>) -> Result<FileDescriptor, FileRejection> {
    let trimmed = s.trim();

    if trimmed.starts_with('{') {
        let parsed: Value = serde_json::from_str(trimmed)
            .map_err(|e| FileRejection::ParseError(e.to_string()))?;
        if !parsed.is_object() {
            return Err(FileRejection::ParseError(
                "file JSON string did not decode to an object".into(),
            ));
        }
        return decode_object(&parsed, fallback_name);
    }

    if is_http_url(trimmed) {
        let name = resolve_name(None, trimmed, fallback_name);
        return Ok(build_descriptor(name, trimmed.to_string(), 0, String::new()));
    }

    // A URL in a scheme we refuse to serve (notably legacy file://) is a
    // scheme problem, not an unknown format.
    if trimmed.contains("://") {
        return Err(FileRejection::InvalidUrlScheme(trimmed.to_string()));
    }

    Err(FileRejection::UnknownStringFormat(trimmed.to_string()))
}

fn decode_object(raw: &Value, fallback_name: Option<&str>) -> Result<FileDescriptor, FileRejection> {
    // Signed download URL wins over the bare storage URL.
    let url = field_str(raw, "downloadUrl")
        .or_else(|| field_str(raw, "download_url"))
        .or_else(|| field_str(raw, "url"))
        .ok_or(FileRejection::MissingUrl)?;

    if !is_http_url(url) {
        return Err(FileRejection::InvalidUrlScheme(url.to_string()));
    }

    let name = resolve_name(field_str(raw, "name"), url, fallback_name);
    let size = field_size(raw);
    let content_type = field_str(raw, "type").unwrap_or("").trim().to_string();

    Ok(build_descriptor(name, url.to_string(), size, content_type))
}

fn build_descriptor(name: String, url: String, size: u64, content_type: String) -> FileDescriptor {
    let category = classify_category(&name, &content_type);
    FileDescriptor {
        name,
        url,
        size,
        content_type,
        category,
    }
}

fn field_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Size may be a number or (in older records) a numeric string.
fn field_size(raw: &Value) -> u64 {
    match raw.get("size") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Prefer the provided name, then the final URL path segment, then the
/// fallback. The result is never empty.
fn resolve_name(provided: Option<&str>, url: &str, fallback: Option<&str>) -> String {
    if let Some(name) = provided {
        let name = sanitize_name(name);
        if !name.is_empty() {
            return name;
        }
    }

    if let Some(segment) = url_basename(url) {
        let segment = sanitize_name(&segment);
        if !segment.is_empty() {
            return segment;
        }
    }

    match fallback.map(sanitize_name) {
        Some(name) if !name.is_empty() => name,
        _ => "file".to_string(),
    }
}

/// Final non-empty path segment of a URL, query and fragment stripped.
fn url_basename(raw: &str) -> Option<String> {
    if let Ok(url) = Url::parse(raw) {
        return url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map(str::to_string);
    }

    // Unparseable URL: take everything after the last slash, before any query.
    let without_query = raw.split(['?', '#']).next().unwrap_or(raw);
    without_query
        .rsplit('/')
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Keep only the final path component and strip control characters, so a
/// hostile name cannot smuggle path separators into the UI.
fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    let last = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed);
    last.chars().filter(|c| !c.is_control()).collect()
}

fn classify_category(name: &str, declared_type: &str) -> FileCategory {
    let effective_type = if declared_type.is_empty() {
        mime_guess::from_path(name)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_default()
    } else {
        declared_type.to_string()
    };

    let type_lower = effective_type.to_lowercase();
    if type_lower.contains("presentation")
        || type_lower.contains("pdf")
        || type_lower.contains("powerpoint")
    {
        return FileCategory::Presentation;
    }

    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
    if let Some(ext) = extension
        && PRESENTATION_EXTENSIONS.contains(&ext.as_str())
    {
        return FileCategory::Presentation;
    }

    FileCategory::Project
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_bare_url_string() {
        let raw = json!("https://cdn.example.com/uploads/demo.zip");
        let d = decode(&raw, None).unwrap();
        assert_eq!(d.name, "demo.zip");
        assert_eq!(d.url, "https://cdn.example.com/uploads/demo.zip");
        assert_eq!(d.size, 0);
        assert_eq!(d.category, FileCategory::Project);
    }

    #[test]
    fn decodes_json_encoded_string() {
        let raw = json!(
            r#"{"name":"pitch.pdf","url":"https://cdn.example.com/pitch.pdf","size":2048}"#
        );
        let d = decode(&raw, None).unwrap();
        assert_eq!(d.name, "pitch.pdf");
        assert_eq!(d.size, 2048);
        assert_eq!(d.category, FileCategory::Presentation);
    }

    #[test]
    fn download_url_wins_over_url() {
        let raw = json!({
            "name": "app.tar.gz",
            "url": "https://storage.example.com/app.tar.gz",
            "downloadUrl": "https://signed.example.com/app.tar.gz?token=abc",
            "size": 999,
        });
        let d = decode(&raw, None).unwrap();
        assert_eq!(d.url, "https://signed.example.com/app.tar.gz?token=abc");
    }

    #[test]
    fn object_with_plain_url_only() {
        let raw = json!({"url": "http://files.example.com/build/out.bin"});
        let d = decode(&raw, None).unwrap();
        assert_eq!(d.url, "http://files.example.com/build/out.bin");
        assert_eq!(d.name, "out.bin");
    }

    #[test]
    fn rejects_missing_url() {
        let raw = json!({"name": "orphan.txt", "size": 12});
        assert_eq!(decode(&raw, None), Err(FileRejection::MissingUrl));
    }

    #[test]
    fn rejects_file_scheme_without_repair() {
        let raw = json!({"name": "old.doc", "url": "file:///mnt/share/old.doc"});
        assert!(matches!(
            decode(&raw, None),
            Err(FileRejection::InvalidUrlScheme(_))
        ));

        let raw = json!("file:///mnt/share/old.doc");
        assert!(matches!(
            decode(&raw, None),
            Err(FileRejection::InvalidUrlScheme(_))
        ));
    }

    #[test]
    fn rejects_unknown_string_format() {
        let raw = json!("just a note, not a file");
        assert!(matches!(
            decode(&raw, None),
            Err(FileRejection::UnknownStringFormat(_))
        ));
    }

    #[test]
    fn rejects_malformed_json_string() {
        let raw = json!("{not valid json");
        assert!(matches!(decode(&raw, None), Err(FileRejection::ParseError(_))));
    }

    #[test]
    fn name_falls_back_to_url_segment_then_fallback() {
        let raw = json!({"url": "https://cdn.example.com/a/b/report.pdf?sig=x"});
        assert_eq!(decode(&raw, None).unwrap().name, "report.pdf");

        let raw = json!({"url": "https://cdn.example.com/"});
        assert_eq!(decode(&raw, Some("pitch deck")).unwrap().name, "pitch deck");

        let raw = json!({"url": "https://cdn.example.com"});
        assert_eq!(decode(&raw, None).unwrap().name, "file");
    }

    #[test]
    fn sanitizes_path_components_out_of_names() {
        let raw = json!({
            "name": "../../etc/passwd",
            "url": "https://cdn.example.com/f",
        });
        assert_eq!(decode(&raw, None).unwrap().name, "passwd");
    }

    #[test]
    fn size_tolerates_string_and_negative_values() {
        let raw = json!({"url": "https://x.example.com/f.zip", "size": "4096"});
        assert_eq!(decode(&raw, None).unwrap().size, 4096);

        let raw = json!({"url": "https://x.example.com/f.zip", "size": -5});
        assert_eq!(decode(&raw, None).unwrap().size, 0);
    }

    #[test]
    fn category_from_declared_type() {
        let raw = json!({
            "name": "deck",
            "url": "https://x.example.com/deck",
            "type": "application/vnd.ms-powerpoint",
        });
        assert_eq!(decode(&raw, None).unwrap().category, FileCategory::Presentation);

        let raw = json!({"name": "deck.key", "url": "https://x.example.com/deck.key"});
        assert_eq!(decode(&raw, None).unwrap().category, FileCategory::Presentation);

        let raw = json!({"name": "main.rs", "url": "https://x.example.com/main.rs"});
        assert_eq!(decode(&raw, None).unwrap().category, FileCategory::Project);
    }

    #[test]
    fn decode_all_drops_rejections_silently() {
        let raws = vec![
            json!("https://cdn.example.com/good.zip"),
            json!("file:///legacy/bad.zip"),
            json!({"name": "no-url.txt"}),
            json!({"url": "https://cdn.example.com/also-good.pdf"}),
        ];
        let decoded = decode_all(&raws);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].name, "good.zip");
        assert_eq!(decoded[1].name, "also-good.pdf");
    }

    #[test]
    fn decode_all_is_idempotent_over_reencoded_output() {
        let raws = vec![
            json!("https://cdn.example.com/good.zip"),
            json!("file:///legacy/bad.zip"),
        ];
        let first = decode_all(&raws);
        let reencoded: Vec<Value> = first
            .iter()
            .map(|d| {
                json!({"name": d.name, "url": d.url, "size": d.size, "type": d.content_type})
            })
            .collect();
        assert_eq!(decode_all(&reencoded), first);
    }

    #[test]
    fn decode_files_handles_every_field_shape() {
        assert!(decode_files(&Value::Null).is_empty());
        assert!(decode_files(&json!([])).is_empty());

        let single = decode_files(&json!("https://cdn.example.com/one.zip"));
        assert_eq!(single.len(), 1);

        let array = decode_files(&json!([
            {"url": "https://cdn.example.com/a.zip"},
            {"url": "https://cdn.example.com/b.zip"},
        ]));
        assert_eq!(array.len(), 2);

        let stringified =
            decode_files(&json!(r#"[{"url": "https://cdn.example.com/c.zip"}]"#));
        assert_eq!(stringified.len(), 1);
        assert_eq!(stringified[0].name, "c.zip");
    }
}
