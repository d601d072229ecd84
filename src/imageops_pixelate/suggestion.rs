//! Sanitizing externally sourced parameter suggestions.
//!
//! Suggestions come from a language model as free-form text, so anything may
//! arrive: prose around the JSON, markdown emphasis, strings instead of
//! numbers, wild values or nothing at all. Nothing here fails; every field
//! that cannot be used is replaced by its default.

use std::ops::RangeInclusive;

use log::{debug, warn};
use serde_json::Value;

use crate::imageops_pixelate::params::{
    PixelationParameters, CONTRAST_RANGE, DEFAULT_CONTRAST, DEFAULT_PIXEL_SIZE, DEFAULT_SATURATION,
    DEFAULT_SMOOTHING, PIXEL_SIZE_RANGE, SATURATION_RANGE,
};

/// Marker some models put in front of a bare answer.
const ANSWER_PREFIX: &str = "**Answer:** ";

/// Longest leading decimal literal of `text`, read the way `parseFloat` does:
/// `"1.5x"` is `1.5`, `"x1.5"` is nothing.
fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .unwrap_or_default()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = digits_from(end);
    end += integer;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if integer + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if integer + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    text[..end].parse().ok()
}

/// Reads a numeric field the way a permissive JSON consumer would.
///
/// Numbers and strings starting with a number are accepted. Zero, empty
/// strings, `null`, booleans and non-finite values count as missing.
fn numeric_field(raw: &Value, key: &str) -> Option<f64> {
    let number = match raw.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_leading_float(text),
        _ => None,
    };
    number.filter(|n| n.is_finite() && *n != 0.0)
}

fn pixel_size_field(raw: &Value) -> u32 {
    match numeric_field(raw, "pixelSize") {
        Some(size) => {
            // Halves round up, like `Math.round`.
            let rounded = (size + 0.5).floor();
            rounded.clamp(
                f64::from(*PIXEL_SIZE_RANGE.start()),
                f64::from(*PIXEL_SIZE_RANGE.end()),
            ) as u32
        }
        None => {
            debug!("pixelSize missing or not numeric, using {DEFAULT_PIXEL_SIZE}");
            DEFAULT_PIXEL_SIZE
        }
    }
}

fn float_field(raw: &Value, key: &str, range: &RangeInclusive<f32>, default: f32) -> f32 {
    match numeric_field(raw, key) {
        Some(value) => value.clamp(f64::from(*range.start()), f64::from(*range.end())) as f32,
        None => {
            debug!("{key} missing or not numeric, using {default}");
            default
        }
    }
}

/// Turns an untyped suggestion record into valid parameters.
///
/// * `pixelSize`: rounded, clamped to `[2, 32]`, default `8`
/// * `saturation`: clamped to `[0.5, 2.0]`, default `1.2`
/// * `contrast`: clamped to `[0.5, 1.5]`, default `1.1`
/// * `smoothing`: used only when it is a JSON boolean, default `true`
///
/// Non-object input yields the defaults.
///
/// # Examples
///
/// ```
/// use imageops_pixelate::sanitize;
/// use serde_json::json;
///
/// let params = sanitize(&json!({
///     "pixelSize": 50, "saturation": 0.1, "contrast": 5, "smoothing": "true"
/// }));
/// assert_eq!(params.pixel_size(), 32);
/// assert_eq!(params.saturation(), 0.5);
/// assert_eq!(params.contrast(), 1.5);
/// assert!(params.smoothing());
/// ```
pub fn sanitize(raw: &Value) -> PixelationParameters {
    let saturation = float_field(raw, "saturation", &SATURATION_RANGE, DEFAULT_SATURATION);
    let contrast = float_field(raw, "contrast", &CONTRAST_RANGE, DEFAULT_CONTRAST);
    let smoothing = match raw.get("smoothing") {
        Some(Value::Bool(flag)) => *flag,
        _ => DEFAULT_SMOOTHING,
    };

    PixelationParameters::new(pixel_size_field(raw), saturation, contrast, smoothing)
}

/// Recovers the JSON payload from free-form model output.
///
/// The span from the first `{` to the last `}` is preferred. Without one, a
/// leading `**Answer:** ` marker is dropped. Markdown asterisks are stripped
/// before parsing. Text that still does not parse yields `Value::Null`.
pub fn extract_suggestion(text: &str) -> Value {
    let candidate = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text
            .strip_prefix(ANSWER_PREFIX)
            .map(str::trim)
            .unwrap_or(text),
    };
    let cleaned = candidate.replace('*', "");

    match serde_json::from_str(cleaned.trim()) {
        Ok(value) => value,
        Err(err) => {
            warn!("Could not parse suggestion as JSON ({err}), falling back to defaults");
            Value::Null
        }
    }
}

/// [`extract_suggestion`] followed by [`sanitize`].
pub fn sanitize_text(text: &str) -> PixelationParameters {
    sanitize(&extract_suggestion(text))
}

impl From<Value> for PixelationParameters {
    fn from(raw: Value) -> Self {
        sanitize(&raw)
    }
}
