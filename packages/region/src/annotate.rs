//! Rewrites region display properties for the map tooltip and popup.

use geojson::{Feature, FeatureCollection};

use crate::{
    DISPLAY_EMOTIONS, DISPLAY_NAME, DISPLAY_REVIEW, DISPLAY_SENTIMENT, RegionError, SHORT_REVIEW,
};

/// Suffix appended to every truncated review preview.
pub const PREVIEW_SUFFIX: &str = "... <b>Click to read more!</b>";

/// Annotates every feature in place.
///
/// Emotion and sentiment labels lose their score suffixes, a
/// `short_review` preview of `preview_length` characters is added, and
/// newlines in the full review become `<br>` tags.
///
/// # Errors
///
/// Returns [`RegionError::MissingProperty`] for the first feature lacking a
/// string `display_name`, `display_emotions`, `display_sentiment` or
/// `display_review`.
/// Features before it have already been rewritten when that happens.
pub fn annotate_regions(
    regions: &mut FeatureCollection,
    preview_length: usize,
) -> Result<(), RegionError> {
    for (index, feature) in regions.features.iter_mut().enumerate() {
        annotate_feature(index, feature, preview_length)?;
    }
    Ok(())
}

fn annotate_feature(
    index: usize,
    feature: &mut Feature,
    preview_length: usize,
) -> Result<(), RegionError> {
    string_property(feature, index, DISPLAY_NAME)?;
    let emotions = normalize_labels(string_property(feature, index, DISPLAY_EMOTIONS)?);
    let sentiment = normalize_labels(string_property(feature, index, DISPLAY_SENTIMENT)?);
    let review = string_property(feature, index, DISPLAY_REVIEW)?;
    let short = short_review(review, preview_length);
    let full = review_markup(review);

    feature.set_property(DISPLAY_EMOTIONS, emotions);
    feature.set_property(DISPLAY_SENTIMENT, sentiment);
    feature.set_property(SHORT_REVIEW, short);
    feature.set_property(DISPLAY_REVIEW, full);
    Ok(())
}

fn string_property<'a>(
    feature: &'a Feature,
    index: usize,
    property: &'static str,
) -> Result<&'a str, RegionError> {
    feature
        .property(property)
        .and_then(serde_json::Value::as_str)
        .ok_or(RegionError::MissingProperty { index, property })
}

/// Strips the parenthesized score from each label in a `", "`-separated
/// list.
///
/// `"happy(0.9), sad(0.1)"` becomes `"happy, sad"`.
#[must_use]
pub fn normalize_labels(labels: &str) -> String {
    labels
        .split(", ")
        .map(|label| label.split_once('(').map_or(label, |(name, _)| name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the first `length` characters of `review` followed by
/// [`PREVIEW_SUFFIX`].
#[must_use]
pub fn short_review(review: &str, length: usize) -> String {
    let mut preview: String = review.chars().take(length).collect();
    preview.push_str(PREVIEW_SUFFIX);
    preview
}

/// Converts literal newlines in a review to `<br>` tags.
#[must_use]
pub fn review_markup(review: &str) -> String {
    review.replace('\n', "<br>")
}
