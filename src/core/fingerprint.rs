//! Content fingerprinting for cache keys
//!
//! A fingerprint is a deterministic SHA-256 hash over a presentation's
//! identity and content plus the subset of export options that affects output
//! bytes. Options that only tune processing (batch size, progressive
//! streaming) are excluded so toggling them still hits the cache.

use crate::domain::presentation::{Presentation, Slide};
use crate::domain::options::ExportOptions;
use crate::domain::Result;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

/// Compute the cache fingerprint for a (presentation, options) pair
///
/// The fingerprint covers the presentation id, slide count, each slide's
/// content hash, and the output-affecting options: format, quality,
/// include_images, compression, interactive.
///
/// # Examples
///
/// ```
/// use sprintdeck::core::fingerprint::fingerprint;
/// use sprintdeck::domain::{ExportFormat, ExportOptions, Presentation};
///
/// let presentation = Presentation::new("Review", "Sprint 1", vec![]);
/// let options = ExportOptions::new(ExportFormat::Markdown);
///
/// let a = fingerprint(&presentation, &options).unwrap();
/// let b = fingerprint(&presentation, &options).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn fingerprint(presentation: &Presentation, options: &ExportOptions) -> Result<String> {
    let slide_hashes: Vec<String> = presentation
        .slides()
        .iter()
        .map(slide_content_hash)
        .collect::<Result<_>>()?;

    let key_material = json!({
        "presentation_id": presentation.id.to_string(),
        "slide_count": presentation.slide_count(),
        "slide_hashes": slide_hashes,
        "format": options.format.as_str(),
        "quality": options.quality.as_str(),
        "include_images": options.include_images,
        "compression": options.compression,
        "interactive": options.interactive,
    });

    hash_value(&key_material)
}

/// Hash of a single slide's visible content
pub fn slide_content_hash(slide: &Slide) -> Result<String> {
    let material = json!({
        "title": slide.title,
        "kind": slide.kind.as_str(),
        "index": slide.index,
        "content": serde_json::to_value(&slide.content)?,
        "issue_key": slide.issue_key.as_ref().map(|k| k.as_str()),
    });
    hash_value(&material)
}

/// SHA-256 of a JSON value with normalized key ordering
fn hash_value(value: &Value) -> Result<String> {
    let normalized = normalize_json(value);
    let data = serde_json::to_string(&normalized)?;

    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    let digest = hasher.finalize();

    Ok(format!("{digest:x}"))
}

/// Normalize JSON value to ensure consistent key ordering
///
/// This recursively sorts all object keys so semantically identical JSON
/// produces the same hash.
fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted: std::collections::BTreeMap<String, Value> =
                std::collections::BTreeMap::new();
            for (k, v) in map {
                sorted.insert(k.clone(), normalize_json(v));
            }
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::options::{ExportFormat, QualityTier};
    use crate::domain::presentation::{SlideContent, SlideKind};

    fn presentation() -> Presentation {
        Presentation::new(
            "Sprint 31 Review",
            "Sprint 31",
            vec![
                Slide::new(
                    "Sprint 31",
                    SlideKind::Title,
                    0,
                    SlideContent::Text("Team Rocket".to_string()),
                ),
                Slide::new(
                    "Numbers",
                    SlideKind::Metrics,
                    1,
                    SlideContent::Data(serde_json::json!({"velocity": 30})),
                ),
            ],
        )
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let p = presentation();
        let options = ExportOptions::new(ExportFormat::Markdown);

        let a = fingerprint(&p, &options).unwrap();
        let b = fingerprint(&p, &options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_slide_content() {
        let p1 = presentation();

        // Round-trip through serde so the identity stays fixed while one
        // slide's content changes.
        let mut value = serde_json::to_value(&p1).unwrap();
        value["slides"][0]["content"] = serde_json::json!({"text": "Team Plasma"});
        let p2: Presentation = serde_json::from_value(value).unwrap();
        assert_eq!(p1.id, p2.id);

        let options = ExportOptions::new(ExportFormat::Markdown);
        let a = fingerprint(&p1, &options).unwrap();
        let b = fingerprint(&p2, &options).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_changes_with_format_and_quality() {
        let p = presentation();
        let md = ExportOptions::new(ExportFormat::Markdown);
        let html = ExportOptions::new(ExportFormat::Html);
        let md_high = ExportOptions::new(ExportFormat::Markdown).with_quality(QualityTier::High);

        let a = fingerprint(&p, &md).unwrap();
        assert_ne!(a, fingerprint(&p, &html).unwrap());
        assert_ne!(a, fingerprint(&p, &md_high).unwrap());
    }

    #[test]
    fn test_fingerprint_ignores_processing_only_options() {
        let p = presentation();
        let base = ExportOptions::new(ExportFormat::Markdown);

        let mut tweaked = base.clone();
        tweaked.batch_size = 99;
        tweaked.progressive = true;

        assert_eq!(
            fingerprint(&p, &base).unwrap(),
            fingerprint(&p, &tweaked).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_sensitive_to_output_flags() {
        let p = presentation();
        let base = ExportOptions::new(ExportFormat::Markdown);

        let mut no_images = base.clone();
        no_images.include_images = false;

        assert_ne!(
            fingerprint(&p, &base).unwrap(),
            fingerprint(&p, &no_images).unwrap()
        );
    }

    #[test]
    fn test_slide_hash_key_order_independence() {
        let a = Slide::new(
            "Data",
            SlideKind::Custom,
            0,
            SlideContent::Data(serde_json::json!({"a": 1, "b": 2})),
        );
        let b = Slide::new(
            "Data",
            SlideKind::Custom,
            0,
            SlideContent::Data(serde_json::json!({"b": 2, "a": 1})),
        );
        assert_eq!(
            slide_content_hash(&a).unwrap(),
            slide_content_hash(&b).unwrap()
        );
    }
}
