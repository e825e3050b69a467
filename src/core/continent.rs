//! # Continent Tags
//!
//! Classifies a country's continent list into the tag that selects its
//! border treatment. Pure and total: every input maps to exactly one tag.
//!
//! ```text
//! ["Europe"]            → Europe
//! ["Europe", "Asia"]    → Eurasia
//! ["Asia", "Europe"]    → None
//! []                    → None
//! ["Mars"]              → None
//! ```

/// Continent names as the country data provider spells them, in filter-key order.
pub const CONTINENTS: [&str; 7] = [
    "Africa",
    "Antarctica",
    "Asia",
    "Europe",
    "North America",
    "Oceania",
    "South America",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContinentTag {
    Asia,
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Oceania,
    Antarctica,
    Eurasia,
    None,
}

impl ContinentTag {
    /// All tags that carry a border treatment, in legend order.
    pub const STYLED: [ContinentTag; 8] = [
        ContinentTag::Africa,
        ContinentTag::NorthAmerica,
        ContinentTag::SouthAmerica,
        ContinentTag::Antarctica,
        ContinentTag::Asia,
        ContinentTag::Europe,
        ContinentTag::Oceania,
        ContinentTag::Eurasia,
    ];

    /// Maps a single continent name to its tag. Unknown names map to `None`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Asia" => ContinentTag::Asia,
            "North America" => ContinentTag::NorthAmerica,
            "South America" => ContinentTag::SouthAmerica,
            "Europe" => ContinentTag::Europe,
            "Africa" => ContinentTag::Africa,
            "Oceania" => ContinentTag::Oceania,
            "Antarctica" => ContinentTag::Antarctica,
            _ => ContinentTag::None,
        }
    }

    /// Resolves the tag for a country's ordered continent list.
    pub fn resolve<S: AsRef<str>>(continents: &[S]) -> Self {
        match continents {
            [only] => Self::from_name(only.as_ref()),
            [first, _] if first.as_ref() == "Europe" => ContinentTag::Eurasia,
            _ => ContinentTag::None,
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            ContinentTag::Asia => "Asia",
            ContinentTag::NorthAmerica => "North America",
            ContinentTag::SouthAmerica => "South America",
            ContinentTag::Europe => "Europe",
            ContinentTag::Africa => "Africa",
            ContinentTag::Oceania => "Oceania",
            ContinentTag::Antarctica => "Antarctica",
            ContinentTag::Eurasia => "Asia & Europe",
            ContinentTag::None => "Other",
        }
    }
}
