//! Category keys, labels, and the category filter value.
//!
//! The catalog spells its jewellery category `jewelery`. Shoppers (and links
//! built from display labels) say `Jewelry`, so labels are normalized to the
//! catalog key when they enter the filter and mapped back for display.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ALL: &str = "all";
const JEWELRY_LABEL: &str = "Jewelry";
const JEWELRY_KEY: &str = "jewelery";

/// Map an external category label to the catalog's key.
///
/// ```
/// use emporium_core::normalize_category;
///
/// assert_eq!(normalize_category("Jewelry"), "jewelery");
/// assert_eq!(normalize_category("Electronics"), "electronics");
/// ```
#[must_use]
pub fn normalize_category(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    if lower == JEWELRY_LABEL.to_lowercase() {
        JEWELRY_KEY.to_string()
    } else {
        lower
    }
}

/// Map a catalog key to its display label.
#[must_use]
pub fn display_category(key: &str) -> String {
    if key == JEWELRY_KEY {
        return JEWELRY_LABEL.to_string();
    }
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Category predicate of a product filter.
///
/// Serialized as the plain string the filter has always used: `"all"` or the
/// catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Build a filter from an external label (query parameter, menu label).
    ///
    /// Empty input and `all` (any case) select every category.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let key = normalize_category(label);
        if key.is_empty() || key == ALL {
            Self::All
        } else {
            Self::Only(key)
        }
    }

    /// Whether a product category passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(key) => key == category,
        }
    }

    /// The raw key, `all` for [`CategoryFilter::All`].
    #[must_use]
    pub fn as_key(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(key) => key,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(key) => f.write_str(&display_category(key)),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == ALL { Self::All } else { Self::Only(raw) })
    }
}
