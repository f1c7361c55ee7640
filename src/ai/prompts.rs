use crate::core::schema::SearchParams;

pub const LISTINGS_REPORT_FORMAT: &str = r#"
Provide analysis in this format:

🏠 SELECTED PROPERTIES
• List 5-6 best matching properties
• For each include:
  - Name and Location
  - Price analysis
  - Key Features
  - Pros and Cons

💰 BEST VALUE ANALYSIS
• Compare properties on:
  - Price per sq ft
  - Location
  - Amenities

📍 LOCATION INSIGHTS
• Area advantages

💡 RECOMMENDATIONS
• Top 3 properties with reasoning
• Investment potential
• Purchase considerations

🤝 NEGOTIATION TIPS
• Property-specific strategies
"#;

pub const TRENDS_REPORT_FORMAT: &str = r#"
Format:

📊 LOCATION TRENDS SUMMARY
• [Bullet points]

🏆 TOP PERFORMING AREAS
• [Bullet points]

💡 INVESTMENT INSIGHTS
• [Bullet points]

🎯 RECOMMENDATIONS
• [Bullet points]
"#;

pub const TRENDS_DIRECTIVE: &str = r#"Extract price trends data for ALL major localities in the city.
IMPORTANT:
- Return data for at least 5-10 different localities
- Include both premium and affordable areas
- Do not skip any locality mentioned in the source
- Format as a list of locations with their respective data
"#;

/// Extraction directive for a property search.
pub fn listings_directive(params: &SearchParams) -> String {
    let SearchParams {
        city,
        max_price,
        category,
        property_type,
    } = params;
    let kind = property_type.plural();

    format!(
        "Extract ONLY 10 OR LESS different {category} {kind} from {city} that cost less than {max_price} crores.

Requirements:
- Property Category: {category} properties only
- Property Type: {kind} only
- Location: {city}
- Maximum Price: {max_price} crores
- Include complete property details with exact location
- IMPORTANT: Return data for at least 3 different properties. MAXIMUM 10.
- Format as a list of properties with their respective details
"
    )
}

/// Analysis prompt embedding the raw listings and restating the filters.
/// Selection against the filters is left to the model.
pub fn listings_analysis(params: &SearchParams, listings: &str) -> String {
    let SearchParams {
        city,
        max_price,
        category,
        property_type,
    } = params;

    format!(
        "As a real estate expert, analyze these properties in {city} and market trends:

Properties Found:
{listings}

**IMPORTANT INSTRUCTIONS:**
1. ONLY analyze properties from the above data that match:
   - Property Category: {category}
   - Property Type: {property_type}
   - Maximum Price: {max_price} crores
2. Select 5-6 properties with prices closest to {max_price} crores
{LISTINGS_REPORT_FORMAT}"
    )
}

pub fn trends_analysis(city: &str, locations: &str) -> String {
    format!(
        "Analyze these location price trends for {city}:

{locations}

Provide:
1. Summary of price trends for each location
2. Top 3 locations for:
   - Price appreciation
   - Rental yields
   - Value for money
3. Investment recommendations:
   - Long-term investments
   - Rental income
   - Emerging areas
4. Specific investor advice
{TRENDS_REPORT_FORMAT}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{PropertyCategory, PropertyType};

    #[test]
    fn directive_names_every_filter() {
        let params = SearchParams::new("Hyderabad", 2.5)
            .with_category(PropertyCategory::Commercial)
            .with_property_type(PropertyType::IndividualHouse);
        let directive = listings_directive(&params);

        assert!(directive.contains("Commercial Individual Houses from Hyderabad"));
        assert!(directive.contains("less than 2.5 crores"));
        assert!(directive.contains("at least 3"));
        assert!(directive.contains("MAXIMUM 10"));
    }

    #[test]
    fn listings_analysis_has_all_sections() {
        let prompt = listings_analysis(&SearchParams::new("Pune", 5.0), "[]");

        assert!(prompt.contains("Properties Found:\n[]"));
        assert!(prompt.contains("closest to 5 crores"));
        for section in [
            "SELECTED PROPERTIES",
            "BEST VALUE ANALYSIS",
            "LOCATION INSIGHTS",
            "RECOMMENDATIONS",
            "NEGOTIATION TIPS",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
    }

    #[test]
    fn trends_analysis_has_all_sections() {
        let prompt = trends_analysis("Chennai", "[{\"location\":\"Adyar\"}]");

        assert!(prompt.contains("trends for Chennai"));
        assert!(prompt.contains("Adyar"));
        for section in [
            "LOCATION TRENDS SUMMARY",
            "TOP PERFORMING AREAS",
            "INVESTMENT INSIGHTS",
            "RECOMMENDATIONS",
        ] {
            assert!(prompt.contains(section), "missing {section}");
        }
    }
}
