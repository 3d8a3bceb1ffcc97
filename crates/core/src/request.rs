//! Canonical generation requests and per-mode form validation.
//!
//! [`GenerationRequest::from_form`] is the single entry point: it pulls the
//! fields a mode needs out of a [`FormFields`], parses numeric overrides
//! strictly, and fails before any downstream call is made.

use serde_json::Value;

use crate::error::CoreError;
use crate::form::{FormFields, ImageBlob};
use crate::mode::GenerationMode;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_PROMPT: &str = "prompt";
pub const FIELD_JSON_PROMPT: &str = "json_prompt";
pub const FIELD_STYLE_IMAGE: &str = "style_image";
pub const FIELD_CONTENT_IMAGE: &str = "content_image";
pub const FIELD_PRODUCT_IMAGE: &str = "product_image";
pub const FIELD_ENVIRONMENT: &str = "environment";
pub const FIELD_STEPS: &str = "steps";
pub const FIELD_WIDTH: &str = "width";
pub const FIELD_HEIGHT: &str = "height";
pub const FIELD_GUIDANCE: &str = "guidance";

/// Number of positional reference-image slots the engine accepts.
pub const MAX_REFERENCE_IMAGES: usize = 4;

/// Form field name for reference slot `slot` (`input_image_0` .. `input_image_3`).
pub fn reference_image_field(slot: usize) -> String {
    format!("input_image_{slot}")
}

// ---------------------------------------------------------------------------
// Fixed prompt text
// ---------------------------------------------------------------------------

/// Prompt sent for every style-transfer request. Slot 0 is the style image,
/// slot 1 the content image.
pub const STYLE_TRANSFER_PROMPT: &str = "take the subject of image 1 and style it like image 0";

/// Environment used by product shots when the caller does not pick one.
pub const DEFAULT_PRODUCT_ENVIRONMENT: &str = "on a modern desk with soft lighting";

/// Prompt synthesized for a product shot placed in `environment`.
pub fn product_shot_prompt(environment: &str) -> String {
    format!("professional product photography, {environment}, high quality, studio lighting")
}

// ---------------------------------------------------------------------------
// Numeric bounds
// ---------------------------------------------------------------------------

pub const MIN_STEPS: u32 = 10;
pub const MAX_STEPS: u32 = 50;
pub const MIN_DIMENSION: u32 = 512;
pub const MAX_DIMENSION: u32 = 2048;
pub const MIN_GUIDANCE: f32 = 1.0;
pub const MAX_GUIDANCE: f32 = 20.0;

/// Caller-supplied numeric overrides. `None` resolves to the mode default
/// when the engine request is built.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamOverrides {
    pub steps: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub guidance: Option<f32>,
}

/// A reference image pinned to the slot the caller uploaded it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub slot: usize,
    pub image: ImageBlob,
}

/// Validated, mode-tagged request.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Basic {
        prompt: String,
        params: ParamOverrides,
    },
    MultiReference {
        prompt: String,
        reference_images: Vec<ReferenceImage>,
        params: ParamOverrides,
    },
    JsonControlled {
        structured_prompt: Value,
        params: ParamOverrides,
    },
    StyleTransfer {
        style_image: ImageBlob,
        content_image: ImageBlob,
    },
    ProductShot {
        product_image: ImageBlob,
        environment: Option<String>,
    },
}

impl GenerationRequest {
    /// Validate `form` for `mode`.
    pub fn from_form(mode: GenerationMode, form: &FormFields) -> Result<Self, CoreError> {
        match mode {
            GenerationMode::Basic => Ok(GenerationRequest::Basic {
                prompt: require_text(form, FIELD_PROMPT)?,
                params: parse_overrides(form, true)?,
            }),
            GenerationMode::MultiReference => {
                let prompt = require_text(form, FIELD_PROMPT)?;
                let reference_images = collect_reference_images(form);
                if reference_images.is_empty() {
                    return Err(CoreError::Validation(
                        "at least one reference image required".into(),
                    ));
                }
                Ok(GenerationRequest::MultiReference {
                    prompt,
                    reference_images,
                    params: parse_overrides(form, false)?,
                })
            }
            GenerationMode::JsonControlled => {
                let raw = require_text(form, FIELD_JSON_PROMPT)?;
                let structured_prompt = serde_json::from_str::<Value>(&raw).map_err(|e| {
                    CoreError::MalformedJson {
                        field: FIELD_JSON_PROMPT,
                        reason: e.to_string(),
                    }
                })?;
                Ok(GenerationRequest::JsonControlled {
                    structured_prompt,
                    params: parse_overrides(form, true)?,
                })
            }
            GenerationMode::StyleTransfer => Ok(GenerationRequest::StyleTransfer {
                style_image: require_image(form, FIELD_STYLE_IMAGE)?,
                content_image: require_image(form, FIELD_CONTENT_IMAGE)?,
            }),
            GenerationMode::ProductShot => Ok(GenerationRequest::ProductShot {
                product_image: require_image(form, FIELD_PRODUCT_IMAGE)?,
                environment: form.get_text(FIELD_ENVIRONMENT).map(str::to_string),
            }),
        }
    }

    pub fn mode(&self) -> GenerationMode {
        match self {
            GenerationRequest::Basic { .. } => GenerationMode::Basic,
            GenerationRequest::MultiReference { .. } => GenerationMode::MultiReference,
            GenerationRequest::JsonControlled { .. } => GenerationMode::JsonControlled,
            GenerationRequest::StyleTransfer { .. } => GenerationMode::StyleTransfer,
            GenerationRequest::ProductShot { .. } => GenerationMode::ProductShot,
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn require_text(form: &FormFields, name: &str) -> Result<String, CoreError> {
    form.get_text(name)
        .map(str::to_string)
        .ok_or_else(|| CoreError::MissingField(name.to_string()))
}

fn require_image(form: &FormFields, name: &str) -> Result<ImageBlob, CoreError> {
    form.get_image(name)
        .ok_or_else(|| CoreError::MissingField(name.to_string()))
}

/// Collect `input_image_0..3` in slot order, skipping absent slots.
fn collect_reference_images(form: &FormFields) -> Vec<ReferenceImage> {
    (0..MAX_REFERENCE_IMAGES)
        .filter_map(|slot| {
            form.get_image(&reference_image_field(slot))
                .map(|image| ReferenceImage { slot, image })
        })
        .collect()
}

fn parse_overrides(form: &FormFields, with_guidance: bool) -> Result<ParamOverrides, CoreError> {
    let guidance = if with_guidance {
        parse_guidance(form)?
    } else {
        None
    };
    Ok(ParamOverrides {
        steps: parse_bounded_u32(form, FIELD_STEPS, MIN_STEPS, MAX_STEPS)?,
        width: parse_bounded_u32(form, FIELD_WIDTH, MIN_DIMENSION, MAX_DIMENSION)?,
        height: parse_bounded_u32(form, FIELD_HEIGHT, MIN_DIMENSION, MAX_DIMENSION)?,
        guidance,
    })
}

fn parse_bounded_u32(
    form: &FormFields,
    name: &str,
    min: u32,
    max: u32,
) -> Result<Option<u32>, CoreError> {
    let Some(raw) = form.get_text(name) else {
        return Ok(None);
    };
    let value: u32 = raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!("{name} must be a whole number, got '{raw}'"))
    })?;
    if !(min..=max).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(Some(value))
}

fn parse_guidance(form: &FormFields) -> Result<Option<f32>, CoreError> {
    let Some(raw) = form.get_text(FIELD_GUIDANCE) else {
        return Ok(None);
    };
    let value: f32 = raw
        .trim()
        .parse()
        .ok()
        .filter(|v: &f32| v.is_finite())
        .ok_or_else(|| {
            CoreError::Validation(format!("{FIELD_GUIDANCE} must be a number, got '{raw}'"))
        })?;
    if !(MIN_GUIDANCE..=MAX_GUIDANCE).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{FIELD_GUIDANCE} must be between {MIN_GUIDANCE} and {MAX_GUIDANCE}, got {value}"
        )));
    }
    Ok(Some(value))
}
