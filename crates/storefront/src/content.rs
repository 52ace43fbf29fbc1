//! Bakery content loaded from the `content/` directory at startup.
//!
//! Everything on the landing page that is not visitor state comes from a
//! single `bakery.json` file: the menu (validated into a core [`Catalog`]) and
//! the copy for the hero, story, process, chefs, testimonials, and contact
//! sections. The store is immutable once loaded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use levure_core::{
    Availability, Catalog, CatalogError, Category, Price, PriceParseError, Product, ProductId,
};
use serde::Deserialize;

/// File name of the content document inside the content directory.
pub const CONTENT_FILE: &str = "bakery.json";

/// Number of recipe ingredients shown in the story section.
pub const RECIPE_PREVIEW_LEN: usize = 4;

/// Errors that can occur while loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid price for product {product}: {source}")]
    Price {
        product: i32,
        #[source]
        source: PriceParseError,
    },
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Landing page anchors, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Products,
    About,
    Process,
    Contact,
}

impl Section {
    /// All sections in the order they appear on the page.
    pub const ALL: [Self; 5] = [
        Self::Hero,
        Self::Products,
        Self::About,
        Self::Process,
        Self::Contact,
    ];

    /// Element id used as the `#anchor`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Products => "products",
            Self::About => "about",
            Self::Process => "process",
            Self::Contact => "contact",
        }
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "The Oven",
            Self::Products => "Today's Rise",
            Self::About => "Our Recipe",
            Self::Process => "How We Rise",
            Self::Contact => "Find Our Hearth",
        }
    }

    /// Path plus anchor, used as the redirect target for plain form posts.
    #[must_use]
    pub fn href(self) -> String {
        format!("/#{}", self.id())
    }
}

/// Hero block copy.
#[derive(Debug, Clone, Deserialize)]
pub struct Hero {
    pub eyebrow: String,
    pub headline: String,
    pub tagline: String,
    pub featured: FeaturedProduct,
    pub stats: Vec<Stat>,
}

/// The product highlighted next to the hero image.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedProduct {
    pub name: String,
    pub rating: u8,
    pub reviews: String,
    /// Shown as written, e.g. `$8`.
    pub price: String,
    pub image: String,
}

impl FeaturedProduct {
    /// Star glyphs for the rating, capped at five.
    #[must_use]
    pub fn stars(&self) -> String {
        "★".repeat(usize::from(self.rating.min(5)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// "Our Recipe" section.
#[derive(Debug, Clone, Deserialize)]
pub struct Story {
    pub philosophy: String,
    pub recipe: Vec<RecipeIngredient>,
}

impl Story {
    /// The ingredients shown on the page.
    #[must_use]
    pub fn recipe_preview(&self) -> &[RecipeIngredient] {
        let len = self.recipe.len().min(RECIPE_PREVIEW_LEN);
        self.recipe.get(..len).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeIngredient {
    pub amount: String,
    pub ingredient: String,
    pub note: String,
}

/// Icon drawn next to a process step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIcon {
    Wheat,
    Clock,
    Award,
}

impl StepIcon {
    /// CSS class selecting the icon glyph.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Wheat => "icon-wheat",
            Self::Clock => "icon-clock",
            Self::Award => "icon-award",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
    pub icon: StepIcon,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chef {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub image: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub text: String,
    pub image: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    pub days: String,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub address: String,
    pub hours: Vec<OpeningHours>,
    pub closed: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    /// `mailto:` link for the email address.
    #[must_use]
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }

    /// `tel:` link with formatting characters stripped.
    #[must_use]
    pub fn tel(&self) -> String {
        let digits: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{digits}")
    }
}

/// Non-menu page copy.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub hero: Hero,
    pub story: Story,
    pub process: Vec<ProcessStep>,
    pub chefs: Vec<Chef>,
    pub testimonials: Vec<Testimonial>,
    pub contact: Contact,
}

// =============================================================================
// On-disk format
// =============================================================================

#[derive(Deserialize)]
struct ContentDocument {
    categories: Vec<Category>,
    products: Vec<ProductRecord>,
    hero: Hero,
    story: Story,
    process: Vec<ProcessStep>,
    chefs: Vec<Chef>,
    testimonials: Vec<Testimonial>,
    contact: Contact,
}

/// A product as written in the content file, with a display price string.
#[derive(Deserialize)]
struct ProductRecord {
    id: i32,
    category: String,
    name: String,
    description: String,
    price: String,
    image: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    availability: Availability,
    #[serde(default)]
    notes: Vec<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ContentError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let price = record
            .price
            .parse::<Price>()
            .map_err(|source| ContentError::Price {
                product: record.id,
                source,
            })?;

        Ok(Self {
            id: ProductId::new(record.id),
            category: record.category,
            name: record.name,
            description: record.description,
            price,
            image: record.image,
            tag: record.tag,
            availability: record.availability,
            notes: record.notes,
        })
    }
}

/// Content store that holds the catalog and page copy in memory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    catalog: Arc<Catalog>,
    page: Arc<PageContent>,
}

impl ContentStore {
    /// Load `bakery.json` from the content directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, has an
    /// unparsable price, or describes an invalid catalog.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let path = content_dir.join(CONTENT_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        let store = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            categories = store.catalog.categories().len(),
            products = store.catalog.products().len(),
            "Loaded bakery content"
        );
        Ok(store)
    }

    /// Build a store from a JSON document.
    ///
    /// # Errors
    ///
    /// Same as [`ContentStore::load`], minus I/O.
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let document: ContentDocument = serde_json::from_str(raw)?;
        let products = document
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let catalog = Catalog::new(document.categories, products)?;

        Ok(Self {
            catalog: Arc::new(catalog),
            page: Arc::new(PageContent {
                hero: document.hero,
                story: document.story,
                process: document.process,
                chefs: document.chefs,
                testimonials: document.testimonials,
                contact: document.contact,
            }),
        })
    }

    /// The validated menu.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Non-menu page copy.
    #[must_use]
    pub fn page(&self) -> &PageContent {
        &self.page
    }

    /// Shared handle to the page copy, for templates that own their data.
    #[must_use]
    pub fn page_arc(&self) -> Arc<PageContent> {
        Arc::clone(&self.page)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const BAKERY: &str = include_str!("../content/bakery.json");

    #[test]
    fn test_bundled_content_loads() {
        let store = ContentStore::from_json(BAKERY).unwrap();
        let catalog = store.catalog();
        assert_eq!(catalog.categories().len(), 5);
        assert_eq!(catalog.products().len(), 16);
        assert_eq!(catalog.featured("bread", 3).len(), 3);
        assert_eq!(catalog.featured("sandwiches", 3).len(), 2);

        let page = store.page();
        assert_eq!(page.hero.featured.name, "Golden Crust Sourdough");
        assert_eq!(page.hero.featured.price, "$8");
        assert_eq!(page.hero.stats.len(), 4);
        assert_eq!(page.process.len(), 3);
        assert_eq!(page.chefs.len(), 4);
        assert_eq!(page.testimonials.len(), 3);
        assert_eq!(page.contact.email, "hello@flourbakery.com");
    }

    #[test]
    fn test_category_accents() {
        let store = ContentStore::from_json(BAKERY).unwrap();
        let accents: Vec<_> = store
            .catalog()
            .categories()
            .iter()
            .map(|category| category.accent)
            .collect();
        assert_eq!(accents.first(), Some(&levure_core::Accent::Amber));
        assert!(!accents.contains(&levure_core::Accent::Gray));
    }

    #[test]
    fn test_prices_are_parsed_to_decimals() {
        let store = ContentStore::from_json(BAKERY).unwrap();
        let croissant = store.catalog().product(ProductId::new(5)).unwrap();
        assert_eq!(croissant.price.to_string(), "$4.50");
        assert_eq!(croissant.availability, Availability::FreshOut);
    }

    #[test]
    fn test_recipe_preview_shows_four() {
        let store = ContentStore::from_json(BAKERY).unwrap();
        let preview = store.page().story.recipe_preview();
        assert_eq!(preview.len(), RECIPE_PREVIEW_LEN);
        assert_eq!(store.page().story.recipe.len(), 5);
    }

    #[test]
    fn test_contact_links() {
        let store = ContentStore::from_json(BAKERY).unwrap();
        let contact = &store.page().contact;
        assert_eq!(contact.tel(), "tel:2125550123");
        assert_eq!(contact.mailto(), "mailto:hello@flourbakery.com");
    }

    #[test]
    fn test_stars_are_capped() {
        let mut featured = ContentStore::from_json(BAKERY)
            .unwrap()
            .page()
            .hero
            .featured
            .clone();
        assert_eq!(featured.stars().chars().count(), 5);
        featured.rating = 9;
        assert_eq!(featured.stars().chars().count(), 5);
    }

    #[test]
    fn test_bad_price_is_reported() {
        let broken = BAKERY.replacen("\"$8\"", "\"eight\"", 1);
        let err = ContentStore::from_json(&broken).unwrap_err();
        assert!(matches!(err, ContentError::Price { product: 1, .. }));
    }

    #[test]
    fn test_mixed_currency_menu_is_rejected() {
        let broken = BAKERY.replacen("\"$4.50\"", "\"€4.50\"", 1);
        let err = ContentStore::from_json(&broken).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Catalog(CatalogError::MixedCurrency { product, .. })
                if product == ProductId::new(5)
        ));
    }

    #[test]
    fn test_unknown_category_is_reported() {
        let broken = BAKERY.replacen("\"category\": \"bread\"", "\"category\": \"pies\"", 1);
        let err = ContentStore::from_json(&broken).unwrap_err();
        assert!(matches!(
            err,
            ContentError::Catalog(CatalogError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ContentStore::load(Path::new("/nonexistent/levure")).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }

    #[test]
    fn test_section_anchors() {
        assert_eq!(Section::ALL.len(), 5);
        assert_eq!(Section::Products.href(), "/#products");
        assert_eq!(Section::Contact.label(), "Find Our Hearth");
    }
}
