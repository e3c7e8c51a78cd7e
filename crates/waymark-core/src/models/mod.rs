//! Data models for Waymark

mod city;
mod country;

pub use city::{City, CityDraft, CityId, Position};
pub use country::{countries_of, country_code_to_flag, flag_to_country_code, CountrySummary};
