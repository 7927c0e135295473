//! Static market fixtures and lookup helpers.
//!
//! The fixture list stands in for a real market catalogue. It is built once
//! and never mutated; every helper recomputes its answer from it.

use once_cell::sync::Lazy;
use time::macros::date;
use time::Date;

use super::types::{Category, Market, Outcome};

static MARKETS: Lazy<Vec<Market>> = Lazy::new(|| {
    vec![
        // Politics
        market(
            "p1",
            "US Presidential Election 2028",
            "Who will win the 2028 US Presidential Election?",
            Category::Politics,
            &[("p1-1", "Republican", 52), ("p1-2", "Democrat", 48)],
            "$12.5M",
            date!(2028 - 11 - 05),
            true,
        ),
        market(
            "p2",
            "Supreme Court Ruling on AI Regulation",
            "Will the Supreme Court rule in favor of federal AI oversight?",
            Category::Politics,
            &[("p2-1", "Yes", 35), ("p2-2", "No", 65)],
            "$3.2M",
            date!(2026 - 06 - 30),
            false,
        ),
        market(
            "p3",
            "UK General Election Outcome",
            "Which party will form the next UK government?",
            Category::Politics,
            &[
                ("p3-1", "Labour", 58),
                ("p3-2", "Conservative", 32),
                ("p3-3", "Coalition", 10),
            ],
            "$5.8M",
            date!(2029 - 01 - 15),
            false,
        ),
        market(
            "p4",
            "China-Taiwan Diplomatic Resolution",
            "Will there be a formal diplomatic agreement by 2027?",
            Category::Politics,
            &[("p4-1", "Yes", 12), ("p4-2", "No", 88)],
            "$8.1M",
            date!(2027 - 12 - 31),
            false,
        ),
        // Sports
        market(
            "s1",
            "Super Bowl LXII Champion",
            "Which team will win Super Bowl LXII?",
            Category::Sports,
            &[
                ("s1-1", "Kansas City Chiefs", 28),
                ("s1-2", "Philadelphia Eagles", 22),
                ("s1-3", "Buffalo Bills", 18),
                ("s1-4", "Other", 32),
            ],
            "$45.2M",
            date!(2027 - 02 - 14),
            true,
        ),
        market(
            "s2",
            "FIFA World Cup 2026 Winner",
            "Who will lift the trophy in USA/Canada/Mexico?",
            Category::Sports,
            &[
                ("s2-1", "Brazil", 22),
                ("s2-2", "France", 20),
                ("s2-3", "Argentina", 18),
                ("s2-4", "Other", 40),
            ],
            "$67.8M",
            date!(2026 - 07 - 19),
            false,
        ),
        market(
            "s3",
            "NBA MVP 2026-27 Season",
            "Who will be named NBA Most Valuable Player?",
            Category::Sports,
            &[
                ("s3-1", "Luka Dončić", 32),
                ("s3-2", "Giannis Antetokounmpo", 25),
                ("s3-3", "Victor Wembanyama", 20),
                ("s3-4", "Other", 23),
            ],
            "$18.9M",
            date!(2027 - 05 - 01),
            false,
        ),
        // Crypto
        market(
            "c1",
            "Bitcoin Above $150K by 2026",
            "Will Bitcoin exceed $150,000 before December 31, 2026?",
            Category::Crypto,
            &[("c1-1", "Yes", 45), ("c1-2", "No", 55)],
            "$89.3M",
            date!(2026 - 12 - 31),
            true,
        ),
        market(
            "c2",
            "Ethereum Flippening",
            "Will ETH market cap surpass BTC by end of 2027?",
            Category::Crypto,
            &[("c2-1", "Yes", 18), ("c2-2", "No", 82)],
            "$23.1M",
            date!(2027 - 12 - 31),
            false,
        ),
        market(
            "c3",
            "Solana All-Time High",
            "Will Solana reach $500 in 2026?",
            Category::Crypto,
            &[("c3-1", "Yes", 38), ("c3-2", "No", 62)],
            "$15.7M",
            date!(2026 - 12 - 31),
            false,
        ),
        market(
            "c4",
            "US Spot Crypto ETF Approval",
            "Will the SEC approve a multi-asset crypto ETF?",
            Category::Crypto,
            &[("c4-1", "Yes", 72), ("c4-2", "No", 28)],
            "$31.2M",
            date!(2026 - 06 - 30),
            false,
        ),
        // Finance
        market(
            "f1",
            "Fed Rate Decision Q2 2026",
            "What will the Fed funds rate be after June 2026 meeting?",
            Category::Finance,
            &[
                ("f1-1", "Cut 25bps", 42),
                ("f1-2", "No Change", 45),
                ("f1-3", "Hike 25bps", 13),
            ],
            "$56.4M",
            date!(2026 - 06 - 15),
            true,
        ),
        market(
            "f2",
            "S&P 500 Above 6500 EOY 2026",
            "Will S&P 500 close above 6500 on December 31, 2026?",
            Category::Finance,
            &[("f2-1", "Yes", 58), ("f2-2", "No", 42)],
            "$34.8M",
            date!(2026 - 12 - 31),
            false,
        ),
        market(
            "f3",
            "US Recession by 2027",
            "Will the NBER declare a US recession before 2027?",
            Category::Finance,
            &[("f3-1", "Yes", 28), ("f3-2", "No", 72)],
            "$41.2M",
            date!(2026 - 12 - 31),
            false,
        ),
        // Tech
        market(
            "t1",
            "Apple Vision Pro Sales 10M Units",
            "Will Apple sell 10M Vision Pro units by end of 2026?",
            Category::Tech,
            &[("t1-1", "Yes", 35), ("t1-2", "No", 65)],
            "$8.9M",
            date!(2026 - 12 - 31),
            false,
        ),
        market(
            "t2",
            "AGI Announcement by 2027",
            "Will a major lab announce AGI capabilities by 2027?",
            Category::Tech,
            &[("t2-1", "Yes", 22), ("t2-2", "No", 78)],
            "$67.3M",
            date!(2027 - 12 - 31),
            true,
        ),
        market(
            "t3",
            "Tesla Full Self-Driving Approval",
            "Will Tesla FSD receive federal Level 4 approval?",
            Category::Tech,
            &[("t3-1", "Yes", 41), ("t3-2", "No", 59)],
            "$29.4M",
            date!(2026 - 12 - 31),
            false,
        ),
        market(
            "t4",
            "SpaceX Mars Mission 2026",
            "Will SpaceX launch a crewed Mars mission in 2026?",
            Category::Tech,
            &[("t4-1", "Yes", 8), ("t4-2", "No", 92)],
            "$12.1M",
            date!(2026 - 12 - 31),
            false,
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn market(
    id: &str,
    title: &str,
    description: &str,
    category: Category,
    outcomes: &[(&str, &str, u8)],
    volume: &str,
    end_date: Date,
    featured: bool,
) -> Market {
    Market {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        outcomes: outcomes
            .iter()
            .map(|(id, name, probability)| Outcome {
                id: id.to_string(),
                name: name.to_string(),
                probability: *probability,
            })
            .collect(),
        volume: volume.to_string(),
        end_date,
        image_url: None,
        featured,
    }
}

/// All markets in fixture order.
pub fn all_markets() -> &'static [Market] {
    &MARKETS
}

/// Markets in the given category, fixture order preserved.
pub fn markets_by_category(category: Category) -> Vec<Market> {
    MARKETS
        .iter()
        .filter(|m| m.category == category)
        .cloned()
        .collect()
}

/// Markets flagged for the home page.
pub fn featured_markets() -> Vec<Market> {
    MARKETS.iter().filter(|m| m.featured).cloned().collect()
}

/// Exact id lookup.
pub fn market_by_id(id: &str) -> Option<Market> {
    MARKETS.iter().find(|m| m.id == id).cloned()
}

/// Markets whose title or description contains `query`, ignoring case.
///
/// An empty query matches every market.
pub fn search_markets(query: &str) -> Vec<Market> {
    MARKETS.iter().filter(|m| m.matches(query)).cloned().collect()
}
