//! # Country Records
//!
//! The normalized country entity shared by every store, plus the
//! locale-aware name ordering used wherever a list is sorted.
//!
//! Records are created once by the normalizer and never mutated afterwards.
//! They travel as `Arc<CountryRecord>` so the catalog, the favorites and the
//! hover slot can all point at the same object.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A currency used by a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    /// Identity and sort key within a catalog snapshot.
    pub common_name: String,
    pub official_name: String,
    pub iso_code2: String,
    pub flag_image_url: String,
    pub population: u64,
    /// Order as provided by the source.
    pub continents: Vec<String>,
    pub subregion: Option<String>,
    pub capitals: Vec<String>,
    pub demonym_masculine_english: Option<String>,
    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
    pub maps_link: Option<String>,
    /// Source field "independent".
    pub is_sovereign: bool,
}

impl CountryRecord {
    /// A record with only the identity fields set. Everything else is empty.
    pub fn new(common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            official_name: String::new(),
            iso_code2: String::new(),
            flag_image_url: String::new(),
            population: 0,
            continents: Vec::new(),
            subregion: None,
            capitals: Vec::new(),
            demonym_masculine_english: None,
            languages: BTreeMap::new(),
            currencies: BTreeMap::new(),
            maps_link: None,
            is_sovereign: false,
        }
    }

    /// Same logical country (by common name), regardless of instance.
    pub fn same_country(&self, other: &CountryRecord) -> bool {
        self.common_name == other.common_name
    }

    /// Flag emoji built from the ISO alpha-2 code (regional indicator pair).
    ///
    /// Returns `None` when the code is not two ASCII letters.
    pub fn flag_emoji(&self) -> Option<String> {
        let code = self.iso_code2.as_bytes();
        if code.len() != 2 || !code.iter().all(u8::is_ascii_alphabetic) {
            return None;
        }
        code.iter()
            .map(|b| char::from_u32(0x1F1E6 + u32::from(b.to_ascii_uppercase() - b'A')))
            .collect()
    }
}

/// Collation key: NFD with combining marks stripped, lowercased.
fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-aware name comparison.
///
/// Accents and case are ignored on the first pass ("Åland Islands" sorts
/// next to "Aland"); ties fall back to the raw strings so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Orders records ascending by common name.
pub fn by_common_name(a: &CountryRecord, b: &CountryRecord) -> Ordering {
    compare_names(&a.common_name, &b.common_name)
}

/// Formats a population with `,` thousands separators (en-US style).
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
