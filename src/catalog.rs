//! Category catalog
//!
//! The catalog maps each category label to the ordered list of secret words
//! that may be drawn from it. It is loaded once, validated on construction,
//! and read-only for the rest of the process.

use std::sync::LazyLock;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{error::Error, random::RandomSource};

/// The catalog shipped with the crate, parsed on first use
static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../catalog/default.json"))
        .expect("built-in catalog is valid")
});

type ValidationResult = garde::Result;

/// Rejects catalogs that list the same category label twice
fn validate_unique_names(categories: &[Category]) -> ValidationResult {
    match categories.iter().map(|c| c.name.as_str()).duplicates().next() {
        Some(name) => Err(garde::Error::new(format!(
            "category {name:?} is listed more than once"
        ))),
        None => Ok(()),
    }
}

/// A labelled set of candidate secret words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    /// Label shown to players (and the only hint the imposter receives)
    #[garde(length(min = 1))]
    name: String,
    /// Candidate secret words, in catalog order
    #[garde(length(min = 1), inner(length(min = 1)))]
    words: Vec<String>,
}

impl Category {
    /// Creates a category from a label and its words
    pub fn new(
        name: impl Into<String>,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The category label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The candidate words, in catalog order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draws one word uniformly from this category
    ///
    /// Returns `None` for a category with no words. Categories held by a
    /// [`Catalog`] always have at least one.
    pub fn pick_word<R: RandomSource>(&self, rng: &mut R) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        Some(&self.words[rng.index(self.words.len())])
    }
}

/// Serialization helper for Catalog, validated before it becomes a Catalog
#[derive(Deserialize, Validate)]
struct CatalogSerde {
    #[garde(length(min = 1), custom(|v: &Vec<Category>, _| validate_unique_names(v)), dive)]
    categories: Vec<Category>,
}

/// The fixed mapping of categories to words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogSerde")]
pub struct Catalog {
    /// Categories in presentation order
    categories: Vec<Category>,
}

impl TryFrom<CatalogSerde> for Catalog {
    type Error = garde::Report;

    fn try_from(serde: CatalogSerde) -> Result<Self, Self::Error> {
        serde.validate()?;
        Ok(Self {
            categories: serde.categories,
        })
    }
}

impl Default for Catalog {
    /// Returns a copy of the built-in catalog
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Which category a new round should draw its word from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryChoice {
    /// Pick any category, each equally likely regardless of its word count
    #[default]
    Random,
    /// Use the category with this label
    Named(String),
}

impl From<&str> for CategoryChoice {
    fn from(value: &str) -> Self {
        if value == "Random" {
            Self::Random
        } else {
            Self::Named(value.to_owned())
        }
    }
}

impl Catalog {
    /// Builds a catalog from a list of categories
    ///
    /// # Errors
    ///
    /// Returns the validation report if the list is empty, a category has
    /// an empty label or word list, or a label appears twice.
    pub fn new(categories: Vec<Category>) -> Result<Self, garde::Report> {
        CatalogSerde { categories }.try_into()
    }

    /// The catalog shipped with the crate
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Looks up a category by label
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Category labels in presentation order
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(Category::name).collect()
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the catalog holds no categories (never true once validated)
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Resolves a choice to a concrete category
    ///
    /// # Errors
    ///
    /// * `Error::UnknownCategory` - the named category is not in the catalog
    pub fn resolve<R: RandomSource>(
        &self,
        choice: &CategoryChoice,
        rng: &mut R,
    ) -> Result<&Category, Error> {
        match choice {
            CategoryChoice::Random => {
                if self.categories.is_empty() {
                    return Err(Error::UnknownCategory);
                }
                Ok(&self.categories[rng.index(self.categories.len())])
            }
            CategoryChoice::Named(name) => self.get(name).ok_or(Error::UnknownCategory),
        }
    }

    /// Whether a choice refers to something this catalog can satisfy
    pub fn accepts(&self, choice: &CategoryChoice) -> bool {
        match choice {
            CategoryChoice::Random => !self.is_empty(),
            CategoryChoice::Named(name) => self.get(name).is_some(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::random::Scripted;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.names(),
            [
                "Indian Food",
                "Bollywood",
                "Indian Cities",
                "Indian Culture",
                "General",
                "Animals",
                "Jobs"
            ]
        );
        for name in catalog.names() {
            assert_eq!(catalog.get(name).unwrap().words().len(), 10);
        }
        assert_eq!(catalog.get("Animals").unwrap().words()[0], "Lion");
    }

    #[test]
    fn test_default_matches_builtin() {
        assert_eq!(&Catalog::default(), Catalog::builtin());
    }

    #[test]
    fn test_resolve_named() {
        let catalog = Catalog::default();
        let mut rng = Scripted::default();
        let category = catalog
            .resolve(&CategoryChoice::Named("Jobs".to_string()), &mut rng)
            .unwrap();
        assert_eq!(category.name(), "Jobs");
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = Catalog::default();
        let mut rng = Scripted::default();
        assert_eq!(
            catalog.resolve(&CategoryChoice::Named("Planets".to_string()), &mut rng),
            Err(Error::UnknownCategory)
        );
        assert!(!catalog.accepts(&CategoryChoice::Named("Planets".to_string())));
    }

    #[test]
    fn test_resolve_random_is_uniform_over_categories() {
        let catalog = Catalog::new(vec![
            Category::new("Big", (0..100).map(|i| format!("w{i}"))),
            Category::new("Small", ["only"]),
        ])
        .unwrap();
        let mut rng = Scripted::new([1]);
        let category = catalog.resolve(&CategoryChoice::Random, &mut rng).unwrap();
        assert_eq!(category.name(), "Small");
    }

    #[test]
    fn test_pick_word() {
        let category = Category::new("Animals", ["Lion", "Penguin", "Giraffe"]);
        let mut rng = Scripted::new([2]);
        assert_eq!(category.pick_word(&mut rng), Some("Giraffe"));
    }

    #[test]
    fn test_pick_word_from_empty_category() {
        let category = Category::new("Nothing", Vec::<String>::new());
        let mut rng = Scripted::new([3]);
        assert_eq!(category.pick_word(&mut rng), None);
        assert!(Catalog::new(vec![category]).is_err());
    }

    #[test]
    fn test_choice_from_str() {
        assert_eq!(CategoryChoice::from("Random"), CategoryChoice::Random);
        assert_eq!(
            CategoryChoice::from("Animals"),
            CategoryChoice::Named("Animals".to_string())
        );
        assert_eq!(CategoryChoice::default(), CategoryChoice::Random);
    }

    #[test]
    fn test_validation_rejects_empty_catalog() {
        assert!(Catalog::new(vec![]).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_word_list() {
        let empty: [&str; 0] = [];
        assert!(Catalog::new(vec![Category::new("Nothing", empty)]).is_err());
    }

    #[test]
    fn test_validation_rejects_blank_word() {
        assert!(Catalog::new(vec![Category::new("Blank", ["ok", ""])]).is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_labels() {
        let result = Catalog::new(vec![
            Category::new("Animals", ["Lion"]),
            Category::new("Animals", ["Tiger"]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"categories": []}"#;
        assert!(serde_json::from_str::<Catalog>(bad).is_err());

        let good = r#"{"categories": [{"name": "Colors", "words": ["Red", "Blue"]}]}"#;
        let catalog: Catalog = serde_json::from_str(good).unwrap();
        assert_eq!(catalog.names(), ["Colors"]);
        assert_eq!(catalog.len(), 1);
    }
}
