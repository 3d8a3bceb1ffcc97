//! Mapping from a validated [`GenerationRequest`] to the parameter shape the
//! image engine consumes.

use crate::form::ImageBlob;
use crate::mode::ModeDefaults;
use crate::request::{
    product_shot_prompt, GenerationRequest, ParamOverrides, ReferenceImage,
    DEFAULT_PRODUCT_ENVIRONMENT, MAX_REFERENCE_IMAGES, STYLE_TRANSFER_PROMPT,
};

/// Fully resolved engine input. Every numeric field has been defaulted;
/// `guidance` stays `None` for modes that never send one.
///
/// Each image keeps the slot it is addressed by in the prompt text
/// ("image 0", "image 1", ...), so the list is ordered by slot but may skip
/// slots the caller left empty.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub prompt: String,
    pub images: Vec<ReferenceImage>,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
    pub guidance: Option<f32>,
}

impl From<GenerationRequest> for EngineRequest {
    fn from(request: GenerationRequest) -> Self {
        let defaults = request.mode().defaults();
        match request {
            GenerationRequest::Basic { prompt, params } => {
                resolve(prompt, Vec::new(), params, defaults)
            }
            GenerationRequest::MultiReference {
                prompt,
                mut reference_images,
                params,
            } => {
                reference_images.truncate(MAX_REFERENCE_IMAGES);
                resolve(prompt, reference_images, params, defaults)
            }
            GenerationRequest::JsonControlled {
                structured_prompt,
                params,
            } => resolve(structured_prompt.to_string(), Vec::new(), params, defaults),
            GenerationRequest::StyleTransfer {
                style_image,
                content_image,
            } => resolve(
                STYLE_TRANSFER_PROMPT.to_string(),
                slotted([style_image, content_image]),
                ParamOverrides::default(),
                defaults,
            ),
            GenerationRequest::ProductShot {
                product_image,
                environment,
            } => {
                let environment = environment.as_deref().unwrap_or(DEFAULT_PRODUCT_ENVIRONMENT);
                resolve(
                    product_shot_prompt(environment),
                    slotted([product_image]),
                    ParamOverrides::default(),
                    defaults,
                )
            }
        }
    }
}

fn slotted<const N: usize>(images: [ImageBlob; N]) -> Vec<ReferenceImage> {
    images
        .into_iter()
        .enumerate()
        .map(|(slot, image)| ReferenceImage { slot, image })
        .collect()
}

fn resolve(
    prompt: String,
    images: Vec<ReferenceImage>,
    params: ParamOverrides,
    defaults: ModeDefaults,
) -> EngineRequest {
    EngineRequest {
        prompt,
        images,
        steps: params.steps.unwrap_or(defaults.steps),
        width: params.width.unwrap_or(defaults.width),
        height: params.height.unwrap_or(defaults.height),
        // Modes without a default guidance never forward one.
        guidance: defaults.guidance.map(|d| params.guidance.unwrap_or(d)),
    }
}
