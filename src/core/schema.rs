use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PropertyRecord {
    #[serde(rename = "Building_name")]
    #[schemars(description = "Name of the building/property")]
    pub building_name: String,

    #[serde(rename = "Property_type")]
    #[schemars(description = "Type of property (commercial, residential, etc)")]
    pub property_type: String,

    #[schemars(description = "Complete address of the property")]
    pub location_address: String,

    // Left as text: sources mix currency units and ranges.
    #[serde(rename = "Price")]
    #[schemars(description = "Price of the property")]
    pub price: String,

    #[serde(rename = "Description")]
    #[schemars(description = "Detailed description of the property")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PropertyCollection {
    #[schemars(description = "List of property details")]
    pub properties: Vec<PropertyRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LocationTrendPoint {
    pub location: String,
    pub price_per_sqft: f64,
    pub percent_increase: f64,
    pub rental_yield: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LocationTrendCollection {
    #[schemars(description = "List of location data points")]
    pub locations: Vec<LocationTrendPoint>,
}

impl PropertyCollection {
    /// Key under which the extraction payload carries the listings.
    pub const KEY: &'static str = "properties";
}

impl LocationTrendCollection {
    pub const KEY: &'static str = "locations";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PropertyCategory {
    #[default]
    Residential,
    Commercial,
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyCategory::Residential => f.write_str("Residential"),
            PropertyCategory::Commercial => f.write_str("Commercial"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PropertyType {
    #[default]
    Flat,
    IndividualHouse,
}

impl PropertyType {
    /// Plural form used inside extraction directives.
    pub fn plural(self) -> &'static str {
        match self {
            PropertyType::Flat => "Flats",
            PropertyType::IndividualHouse => "Individual Houses",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Flat => f.write_str("Flat"),
            PropertyType::IndividualHouse => f.write_str("Individual House"),
        }
    }
}

/// Search criteria for a property lookup. `max_price` is in crores.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub city: String,
    pub max_price: f64,
    pub category: PropertyCategory,
    pub property_type: PropertyType,
}

impl SearchParams {
    pub fn new(city: impl Into<String>, max_price: f64) -> Self {
        Self {
            city: city.into(),
            max_price,
            category: PropertyCategory::default(),
            property_type: PropertyType::default(),
        }
    }

    pub fn with_category(mut self, category: PropertyCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = property_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn property_record_uses_source_field_names() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "Building_name": "Lodha Park",
            "Property_type": "Residential",
            "location_address": "Worli, Mumbai",
            "Price": "4.5 Cr",
            "Description": "3 BHK"
        }))
        .unwrap();
        assert_eq!(record.building_name, "Lodha Park");
        assert_eq!(record.price, "4.5 Cr");
    }

    #[test]
    fn search_params_defaults() {
        let params = SearchParams::new("Pune", 5.0);
        assert_eq!(params.category, PropertyCategory::Residential);
        assert_eq!(params.property_type, PropertyType::Flat);
        assert_eq!(params.property_type.plural(), "Flats");
        assert_eq!(PropertyType::IndividualHouse.plural(), "Individual Houses");
    }
}
