//! ============================================================================
//! Recipe Catalog - Static explore-page content
//! ============================================================================
//! The featured recipes, categories, and expert chefs shown on the explore
//! page. Content is hard-coded and immutable; there is no create/update/delete
//! lifecycle.
//! ============================================================================

use crate::types::{CatalogError, Difficulty, Expert, Recipe};

/// Category that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered by the explore page filter bar
pub const CATEGORIES: &[&str] = &[ALL_CATEGORIES, "Asian", "Italian", "Mexican", "Desserts", "Vegan"];

/// In-memory recipe catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    experts: Vec<Expert>,
}

impl Catalog {
    /// Catalog backed by the explore page's featured recipes
    pub fn featured() -> Self {
        Self {
            recipes: featured_recipes(),
            experts: featured_experts(),
        }
    }

    /// Custom recipe list; no experts are listed
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            experts: Vec::new(),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Expert chefs, in display order
    pub fn experts(&self) -> &[Expert] {
        &self.experts
    }

    pub fn get(&self, id: &str) -> Result<&Recipe, CatalogError> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::RecipeNotFound(id.to_string()))
    }

    /// Filter by category (case-insensitive, "All" matches everything) and a
    /// free-text query matched against title and chef.
    pub fn filter(&self, category: Option<&str>, query: Option<&str>) -> Result<Vec<&Recipe>, CatalogError> {
        let category = match category {
            Some(c) => Some(canonical_category(c)?),
            None => None,
        };
        let query = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        Ok(self
            .recipes
            .iter()
            .filter(|r| match category {
                Some(c) if c != ALL_CATEGORIES => r.category.eq_ignore_ascii_case(c),
                _ => true,
            })
            .filter(|r| match &query {
                Some(q) => r.title.to_lowercase().contains(q) || r.chef.to_lowercase().contains(q),
                None => true,
            })
            .collect())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::featured()
    }
}

/// Resolve user input to one of the known categories
pub fn canonical_category(input: &str) -> Result<&'static str, CatalogError> {
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(input.trim()))
        .ok_or_else(|| CatalogError::UnknownCategory(input.to_string()))
}

fn featured_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".into(),
            title: "Japanese Ramen".into(),
            chef: "Chef Tanaka".into(),
            rating: 4.9,
            coin_cost: 250,
            time: "1h 30m".into(),
            difficulty: Difficulty::Medium,
            category: "Asian".into(),
            image: "https://d2rdhxfof4qmbb.cloudfront.net/wp-content/uploads/20180323163421/Ramen.jpg".into(),
        },
        Recipe {
            id: "2".into(),
            title: "Tiramisu".into(),
            chef: "Marco Rossi".into(),
            rating: 4.8,
            coin_cost: 150,
            time: "2h".into(),
            difficulty: Difficulty::Easy,
            category: "Desserts".into(),
            image: "https://i.redd.it/7a7tcnjv78l31.jpg".into(),
        },
        Recipe {
            id: "3".into(),
            title: "Pad Thai".into(),
            chef: "Lisa Wong".into(),
            rating: 4.7,
            coin_cost: 200,
            time: "45m".into(),
            difficulty: Difficulty::Medium,
            category: "Asian".into(),
            image: "https://www.elmundoeats.com/wp-content/uploads/2024/06/FP-Authentic-pad-Thai-in-a-plate.jpg".into(),
        },
    ]
}

fn featured_experts() -> Vec<Expert> {
    vec![
        Expert {
            id: "1".into(),
            name: "Chef Maria Garcia".into(),
            specialty: "Mediterranean Cuisine".into(),
            rating: 4.9,
            students: 15_000,
            recipes: 89,
            image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQaf9F6CloKMFxBBFyxw2TKV8Al573KfpH96A&s".into(),
        },
        Expert {
            id: "2".into(),
            name: "Chef John Smith".into(),
            specialty: "French Pastry".into(),
            rating: 4.8,
            students: 12_000,
            recipes: 64,
            image: "https://thumbs.dreamstime.com/b/chef-cook-character-ai-generated-cartoon-avatar-cartoon-avatar-ai-generated-chef-character-computer-generative-art-image-neural-286003200.jpg".into(),
        },
        Expert {
            id: "3".into(),
            name: "Chef Sarah Lee".into(),
            specialty: "Asian Fusion".into(),
            rating: 4.9,
            students: 18_000,
            recipes: 95,
            image: "https://lirp.cdn-website.com/155d819e/dms3rep/multi/opt/artwork-640w.png".into(),
        },
    ]
}
