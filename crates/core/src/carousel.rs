//! Category carousel controller.
//!
//! Holds the active index into a fixed, ordered category list and derives
//! per-item presentation parameters from each item's distance to it.
//!
//! ```text
//!   index:    0      1      2      3      4
//!   delta:   -2     -1      0     +1     +2      (active = 2)
//!   offset: -600   -300     0    300    600  px
//!   tier:  Neutral Hovered Active Neutral Neutral (hovered = 1)
//! ```
//!
//! The controller borrows the category slice. Only the indices are stored
//! between requests, as a [`CarouselState`].

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Horizontal distance between neighbouring items, in pixels.
pub const ITEM_SPACING_PX: isize = 300;

/// z-index of the active item; others stack at `10 - |delta|`.
const ACTIVE_Z_INDEX: isize = 20;
const BASE_Z_INDEX: isize = 10;

/// Errors constructing a carousel.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselError {
    /// A carousel needs at least one item to cycle through.
    #[error("carousel requires at least one category")]
    Empty,
}

/// Discrete visual weight of a carousel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Active,
    Hovered,
    Neutral,
}

impl Tier {
    /// Classify position `index` given the active and hovered positions.
    #[must_use]
    pub fn of(index: usize, active: usize, hovered: Option<usize>) -> Self {
        if index == active {
            Self::Active
        } else if hovered == Some(index) {
            Self::Hovered
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Active => 1.0,
            Self::Hovered => 0.85,
            Self::Neutral => 0.7,
        }
    }

    #[must_use]
    pub const fn opacity(self) -> f32 {
        match self {
            Self::Active => 1.0,
            Self::Hovered => 0.8,
            Self::Neutral => 0.5,
        }
    }

    /// Blur radius applied to the card image.
    #[must_use]
    pub const fn blur_px(self) -> f32 {
        match self {
            Self::Active => 0.0,
            Self::Hovered => 0.5,
            Self::Neutral => 1.0,
        }
    }

    /// Width of the accent ring, as a `ring-N` utility suffix.
    #[must_use]
    pub const fn ring_width(self) -> u8 {
        match self {
            Self::Active => 4,
            Self::Hovered => 3,
            Self::Neutral => 2,
        }
    }

    /// Card dimensions in pixels (width, height).
    #[must_use]
    pub const fn card_size_px(self) -> (u32, u32) {
        match self {
            Self::Active => (400, 300),
            Self::Hovered | Self::Neutral => (300, 250),
        }
    }

    /// CSS modifier used by the stylesheet.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Active => "tier-active",
            Self::Hovered => "tier-hovered",
            Self::Neutral => "tier-neutral",
        }
    }
}

/// Serializable carousel position, kept in the visitor session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    pub active_index: usize,
    #[serde(default)]
    pub hovered_index: Option<usize>,
}

/// One rendered carousel item.
#[derive(Debug, Clone, Copy)]
pub struct CarouselItem<'a> {
    pub index: usize,
    pub category: &'a Category,
    /// Signed distance from the active item.
    pub delta: isize,
    pub tier: Tier,
}

impl CarouselItem<'_> {
    /// Horizontal offset from the track centre.
    #[must_use]
    pub const fn offset_px(&self) -> isize {
        self.delta * ITEM_SPACING_PX
    }

    #[must_use]
    pub const fn z_index(&self) -> isize {
        match self.tier {
            Tier::Active => ACTIVE_Z_INDEX,
            _ => BASE_Z_INDEX - self.delta.abs(),
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.tier, Tier::Active)
    }

    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        matches!(self.tier, Tier::Hovered)
    }

    /// Full ring class list, e.g. `ring ring-4 ring-amber-400`.
    #[must_use]
    pub fn ring_class(&self) -> String {
        format!(
            "ring ring-{} {}",
            self.tier.ring_width(),
            self.category.accent.style().ring
        )
    }
}

/// Pagination bar geometry, in percent of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub width_pct: f64,
    pub offset_pct: f64,
}

/// Carousel over a borrowed category list.
#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    categories: &'a [Category],
    active: usize,
    hovered: Option<usize>,
}

impl<'a> Carousel<'a> {
    /// Start at the first category with nothing hovered.
    ///
    /// # Errors
    ///
    /// Returns `CarouselError::Empty` for an empty list.
    pub const fn new(categories: &'a [Category]) -> Result<Self, CarouselError> {
        if categories.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(Self {
            categories,
            active: 0,
            hovered: None,
        })
    }

    /// Rebuild from a stored state, discarding indices that no longer fit.
    ///
    /// # Errors
    ///
    /// Returns `CarouselError::Empty` for an empty list.
    pub fn restore(
        categories: &'a [Category],
        state: CarouselState,
    ) -> Result<Self, CarouselError> {
        let mut carousel = Self::new(categories)?;
        if state.active_index < categories.len() {
            carousel.active = state.active_index;
        }
        carousel.hover(state.hovered_index);
        Ok(carousel)
    }

    /// Number of categories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub const fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// The highlighted category.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // active < len holds after every transition
    pub fn active_category(&self) -> &'a Category {
        let categories = self.categories;
        &categories[self.active]
    }

    /// Advance to the next category, wrapping past the end.
    pub fn next(&mut self) -> usize {
        self.active = (self.active + 1) % self.len();
        self.active
    }

    /// Step back to the previous category, wrapping before the start.
    pub fn prev(&mut self) -> usize {
        let len = self.len();
        self.active = (self.active + len - 1) % len;
        self.active
    }

    /// Activate the category with `handle`. Unknown handles are ignored.
    ///
    /// Returns whether a category matched.
    pub fn select(&mut self, handle: &str) -> bool {
        match self.categories.iter().position(|c| c.handle == handle) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Set or clear the hovered item. Out-of-range indices clear it.
    pub fn hover(&mut self, index: Option<usize>) {
        self.hovered = index.filter(|&i| i < self.len());
    }

    /// Indices to persist between requests.
    #[must_use]
    pub const fn state(&self) -> CarouselState {
        CarouselState {
            active_index: self.active,
            hovered_index: self.hovered,
        }
    }

    /// Presentation parameters for every item, in list order.
    #[must_use]
    pub fn items(&self) -> Vec<CarouselItem<'a>> {
        let categories = self.categories;
        categories
            .iter()
            .enumerate()
            .map(|(index, category)| CarouselItem {
                index,
                category,
                delta: signed(index) - signed(self.active),
                tier: Tier::of(index, self.active, self.hovered),
            })
            .collect()
    }

    /// Pagination bar geometry for the active index.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // category counts are tiny
    pub fn indicator(&self) -> Indicator {
        let share = 100.0 / self.len() as f64;
        Indicator {
            width_pct: share,
            offset_pct: self.active as f64 * share,
        }
    }
}

fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
