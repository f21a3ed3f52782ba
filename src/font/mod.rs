//! # Font Management
//!
//! The report uses two families: a proportional sans for prose and a
//! monospace for code. Both map onto the standard PDF fonts (Helvetica and
//! Courier), which need no embedding. Widths come from their AFM metrics.

pub mod metrics;

use std::collections::HashMap;

use serde::Serialize;

pub use metrics::StandardFontMetrics;

use crate::error::FolioError;
use crate::text::Measure;

/// A font family as the layout code names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FontFamily {
    Sans,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Family, weight and size (in points) of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: f64,
}

impl Font {
    pub fn sans(size: f64) -> Self {
        Self {
            family: FontFamily::Sans,
            weight: FontWeight::Regular,
            size,
        }
    }

    pub fn sans_bold(size: f64) -> Self {
        Self {
            family: FontFamily::Sans,
            weight: FontWeight::Bold,
            size,
        }
    }

    pub fn mono(size: f64) -> Self {
        Self {
            family: FontFamily::Mono,
            weight: FontWeight::Regular,
            size,
        }
    }

    pub fn key(&self) -> FontKey {
        FontKey {
            family: self.family,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontKey {
    pub family: FontFamily,
    pub weight: FontWeight,
}

/// The standard PDF fonts the report can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            Self::Helvetica => metrics::HELVETICA,
            Self::HelveticaBold => metrics::HELVETICA_BOLD,
            Self::Courier | Self::CourierBold => metrics::COURIER,
        }
    }
}

/// Maps family + weight to a concrete font.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: HashMap<FontKey, StandardFont>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let standard_mappings = [
            ((FontFamily::Sans, FontWeight::Regular), StandardFont::Helvetica),
            ((FontFamily::Sans, FontWeight::Bold), StandardFont::HelveticaBold),
            ((FontFamily::Mono, FontWeight::Regular), StandardFont::Courier),
            ((FontFamily::Mono, FontWeight::Bold), StandardFont::CourierBold),
        ];
        for ((family, weight), font) in standard_mappings {
            registry.register(FontKey { family, weight }, font);
        }
        registry
    }

    /// A registry with no fonts at all.
    pub fn empty() -> Self {
        Self {
            fonts: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: FontKey, font: StandardFont) {
        self.fonts.insert(key, font);
    }

    /// Look up a font. There is no silent fallback: a missing font is a
    /// build failure.
    pub fn resolve(&self, key: FontKey) -> Result<StandardFont, FolioError> {
        self.fonts.get(&key).copied().ok_or_else(|| {
            FolioError::Font(format!(
                "no font registered for {:?} {:?}",
                key.family, key.weight
            ))
        })
    }
}

/// Shared font context used by measurement and PDF serialization.
#[derive(Debug, Clone, Default)]
pub struct FontContext {
    registry: FontRegistry,
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    pub fn with_registry(registry: FontRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a font to its standard PDF font.
    pub fn resolve(&self, font: &Font) -> Result<StandardFont, FolioError> {
        self.registry.resolve(font.key())
    }

    /// Width of a string in points.
    pub fn measure_points(&self, text: &str, font: &Font) -> Result<f64, FolioError> {
        let std_font = self.resolve(font)?;
        Ok(std_font.metrics().measure_string(text, font.size))
    }
}

impl Measure for FontContext {
    fn text_width(&self, text: &str, font: &Font) -> Result<f64, FolioError> {
        Ok(self.measure_points(text, font)? * crate::text::PT_TO_MM)
    }
}
