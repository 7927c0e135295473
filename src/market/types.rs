//! Market-related types for PredictX prediction markets.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use time::Date;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Market category, one per category page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    /// Elections, courts and diplomacy.
    Politics,
    /// Leagues, tournaments and awards.
    Sports,
    /// Digital asset prices and regulation.
    Crypto,
    /// Rates, indices and macro.
    Finance,
    /// Products, labs and launches.
    Tech,
}

impl Category {
    /// All categories in navigation order.
    pub const ALL: [Category; 5] = [
        Category::Politics,
        Category::Sports,
        Category::Crypto,
        Category::Finance,
        Category::Tech,
    ];

    /// Title-cased label for page headings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Politics => "Politics",
            Category::Sports => "Sports",
            Category::Crypto => "Crypto",
            Category::Finance => "Finance",
            Category::Tech => "Tech",
        }
    }
}

/// One possible resolution of a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Outcome identifier (e.g., "p1-1").
    pub id: String,
    /// Display name (e.g., "Yes", "Republican").
    pub name: String,
    /// Author-supplied probability in percent, 0-100.
    pub probability: u8,
}

/// A tradable question with one or more outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Market identifier (e.g., "c1").
    pub id: String,
    /// Headline question.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Category the market is listed under.
    pub category: Category,
    /// Outcomes in display order. Probabilities need not sum to 100.
    pub outcomes: Vec<Outcome>,
    /// Traded volume label (e.g., "$12.5M").
    pub volume: String,
    /// Resolution date.
    #[serde(with = "calendar_date")]
    pub end_date: Date,
    /// Optional artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the market is shown on the home page.
    #[serde(default)]
    pub featured: bool,
}

impl Market {
    /// Look up an outcome by its identifier.
    pub fn outcome(&self, outcome_id: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id == outcome_id)
    }

    /// A binary market has exactly two outcomes named Yes and No.
    pub fn is_binary(&self) -> bool {
        match self.outcomes.as_slice() {
            [a, b] => {
                a.name.eq_ignore_ascii_case("yes") && b.name.eq_ignore_ascii_case("no")
            }
            _ => false,
        }
    }

    /// Sum of all outcome probabilities; not guaranteed to be 100.
    pub fn total_probability(&self) -> u32 {
        self.outcomes.iter().map(|o| u32::from(o.probability)).sum()
    }

    /// Case-insensitive substring match over title and description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
