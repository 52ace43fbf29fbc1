//! Category accent colours.
//!
//! Each category carries one accent from a closed set. The accent resolves
//! to a fixed [`AccentStyle`] record of CSS classes, so templates never
//! build class names from free-form strings.

use serde::{Deserialize, Serialize};

/// Accent colour of a category.
///
/// Content files spell accents as Tailwind-style tags (`"amber-400"`).
/// Unrecognised tags fall back to [`Accent::Gray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Accent {
    Amber,
    Rose,
    Sky,
    Emerald,
    Purple,
    #[default]
    Gray,
}

/// Fixed presentation classes for one accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentStyle {
    /// Ring colour around carousel cards.
    pub ring: &'static str,
    /// Foreground text colour.
    pub text: &'static str,
    /// Solid background swatch.
    pub swatch: &'static str,
}

const AMBER: AccentStyle = AccentStyle {
    ring: "ring-amber-400",
    text: "text-amber-400",
    swatch: "bg-amber-400",
};
const ROSE: AccentStyle = AccentStyle {
    ring: "ring-rose-400",
    text: "text-rose-400",
    swatch: "bg-rose-400",
};
const SKY: AccentStyle = AccentStyle {
    ring: "ring-sky-400",
    text: "text-sky-400",
    swatch: "bg-sky-400",
};
const EMERALD: AccentStyle = AccentStyle {
    ring: "ring-emerald-400",
    text: "text-emerald-400",
    swatch: "bg-emerald-400",
};
const PURPLE: AccentStyle = AccentStyle {
    ring: "ring-purple-400",
    text: "text-purple-400",
    swatch: "bg-purple-400",
};
const GRAY: AccentStyle = AccentStyle {
    ring: "ring-gray-400",
    text: "text-gray-400",
    swatch: "bg-gray-400",
};

impl Accent {
    /// The content tag for this accent.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Amber => "amber-400",
            Self::Rose => "rose-400",
            Self::Sky => "sky-400",
            Self::Emerald => "emerald-400",
            Self::Purple => "purple-400",
            Self::Gray => "gray-400",
        }
    }

    /// Resolve the accent to its style record.
    #[must_use]
    pub const fn style(self) -> &'static AccentStyle {
        match self {
            Self::Amber => &AMBER,
            Self::Rose => &ROSE,
            Self::Sky => &SKY,
            Self::Emerald => &EMERALD,
            Self::Purple => &PURPLE,
            Self::Gray => &GRAY,
        }
    }
}

impl From<&str> for Accent {
    fn from(tag: &str) -> Self {
        match tag {
            "amber-400" => Self::Amber,
            "rose-400" => Self::Rose,
            "sky-400" => Self::Sky,
            "emerald-400" => Self::Emerald,
            "purple-400" => Self::Purple,
            _ => Self::Gray,
        }
    }
}

impl From<String> for Accent {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Accent> for String {
    fn from(accent: Accent) -> Self {
        accent.tag().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_resolve() {
        assert_eq!(Accent::from("rose-400"), Accent::Rose);
        assert_eq!(Accent::from("emerald-400").style().ring, "ring-emerald-400");
    }

    #[test]
    fn test_unknown_tag_falls_back_to_gray() {
        assert_eq!(Accent::from("teal-900"), Accent::Gray);
        assert_eq!(Accent::from("").style().ring, "ring-gray-400");
    }

    #[test]
    fn test_serde_uses_tags() {
        let accent: Accent = serde_json::from_str("\"sky-400\"").unwrap();
        assert_eq!(accent, Accent::Sky);
        assert_eq!(serde_json::to_string(&Accent::Purple).unwrap(), "\"purple-400\"");

        let fallback: Accent = serde_json::from_str("\"chartreuse\"").unwrap();
        assert_eq!(fallback, Accent::Gray);
    }
}
