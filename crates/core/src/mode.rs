//! Generation modes and their per-mode engine defaults.
//!
//! The set of modes is closed: the API router mounts one route per entry in
//! [`GenerationMode::ALL`] and every per-mode decision is an exhaustive
//! `match`, so adding a mode is a compile-time-visible change.

// ---------------------------------------------------------------------------
// Route paths
// ---------------------------------------------------------------------------

pub const PATH_BASIC: &str = "/api/generate";
pub const PATH_MULTI_REFERENCE: &str = "/api/multi-reference";
pub const PATH_JSON_PROMPT: &str = "/api/json-prompt";
pub const PATH_STYLE_TRANSFER: &str = "/api/style-transfer";
pub const PATH_PRODUCT_SHOT: &str = "/api/product-shot";

// ---------------------------------------------------------------------------
// Shared engine defaults
// ---------------------------------------------------------------------------

/// Output width used by every mode when the caller does not supply one.
pub const DEFAULT_WIDTH: u32 = 1024;
/// Output height used by every mode when the caller does not supply one.
pub const DEFAULT_HEIGHT: u32 = 1024;

/// One of the five supported request shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    /// Plain text-to-image.
    Basic,
    /// Prompt plus up to four positional reference images.
    MultiReference,
    /// Structured JSON prompt, forwarded as JSON text.
    JsonControlled,
    /// Fixed-prompt style transfer between two images.
    StyleTransfer,
    /// Product image re-composited into a described environment.
    ProductShot,
}

/// Numeric parameters a mode falls back to when the caller omits them.
///
/// `guidance` is `None` for modes that never send a guidance value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeDefaults {
    pub steps: u32,
    pub width: u32,
    pub height: u32,
    pub guidance: Option<f32>,
}

impl GenerationMode {
    /// Every mode, in route-registration order.
    pub const ALL: [GenerationMode; 5] = [
        GenerationMode::Basic,
        GenerationMode::MultiReference,
        GenerationMode::JsonControlled,
        GenerationMode::StyleTransfer,
        GenerationMode::ProductShot,
    ];

    /// HTTP path this mode is served on.
    pub fn path(self) -> &'static str {
        match self {
            GenerationMode::Basic => PATH_BASIC,
            GenerationMode::MultiReference => PATH_MULTI_REFERENCE,
            GenerationMode::JsonControlled => PATH_JSON_PROMPT,
            GenerationMode::StyleTransfer => PATH_STYLE_TRANSFER,
            GenerationMode::ProductShot => PATH_PRODUCT_SHOT,
        }
    }

    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Basic => "basic",
            GenerationMode::MultiReference => "multi_reference",
            GenerationMode::JsonControlled => "json_controlled",
            GenerationMode::StyleTransfer => "style_transfer",
            GenerationMode::ProductShot => "product_shot",
        }
    }

    pub fn defaults(self) -> ModeDefaults {
        match self {
            GenerationMode::Basic => ModeDefaults {
                steps: 20,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                guidance: Some(7.5),
            },
            GenerationMode::MultiReference => ModeDefaults {
                steps: 25,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                guidance: None,
            },
            GenerationMode::JsonControlled => ModeDefaults {
                steps: 30,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                guidance: Some(7.5),
            },
            GenerationMode::StyleTransfer => ModeDefaults {
                steps: 25,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                guidance: None,
            },
            GenerationMode::ProductShot => ModeDefaults {
                steps: 30,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                guidance: Some(8.0),
            },
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
