//! Country summaries derived from the visited-city list

use serde::{Deserialize, Serialize};

use crate::models::City;

/// First regional indicator symbol, `🇦` (U+1F1E6)
const REGIONAL_INDICATOR_BASE: u32 = 0x1F1E6;

/// A country represented in the travel log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub emoji: String,
}

/// Distinct countries of the visited cities, in first-visit order.
///
/// A country appears once no matter how many of its cities were visited;
/// the emoji is taken from the first city seen for that country.
#[must_use]
pub fn countries_of(cities: &[City]) -> Vec<CountrySummary> {
    let mut countries: Vec<CountrySummary> = Vec::new();
    for city in cities {
        if !countries.iter().any(|entry| entry.country == city.country) {
            countries.push(CountrySummary {
                country: city.country.clone(),
                emoji: city.emoji.clone(),
            });
        }
    }
    countries
}

/// Convert a flag emoji into its lowercase two-letter country code.
///
/// Flags are pairs of regional indicator symbols (`"🇵🇹"` → `"pt"`).
/// Returns `None` for anything that is not exactly such a pair.
#[must_use]
pub fn flag_to_country_code(flag: &str) -> Option<String> {
    let mut code = String::new();
    for symbol in flag.chars() {
        let codepoint = symbol as u32;
        if !(REGIONAL_INDICATOR_BASE..=REGIONAL_INDICATOR_BASE + 25).contains(&codepoint) {
            return None;
        }
        code.push(char::from_u32(
            codepoint - REGIONAL_INDICATOR_BASE + u32::from(b'a'),
        )?);
    }
    if code.chars().count() == 2 {
        Some(code)
    } else {
        None
    }
}

/// Convert a two-letter country code into its flag emoji (`"pt"` → `"🇵🇹"`).
#[must_use]
pub fn country_code_to_flag(code: &str) -> Option<String> {
    if code.chars().count() != 2 {
        return None;
    }
    code.chars()
        .map(|letter| {
            if !letter.is_ascii_alphabetic() {
                return None;
            }
            let offset = u32::from(letter.to_ascii_uppercase()) - u32::from(b'A');
            char::from_u32(REGIONAL_INDICATOR_BASE + offset)
        })
        .collect()
}
