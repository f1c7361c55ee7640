//! Source pages handed to the extraction service, derived from the city name.

fn slug(city: &str) -> String {
    city.trim().to_lowercase()
}

pub fn listing_sources(city: &str) -> Vec<String> {
    let city = slug(city);
    vec![
        format!("https://www.squareyards.com/sale/property-for-sale-in-{city}/*"),
        format!("https://www.99acres.com/property-in-{city}-ffid/*"),
        format!("https://housing.com/in/buy/{city}/{city}"),
    ]
}

pub fn trend_sources(city: &str) -> Vec<String> {
    vec![format!(
        "https://www.99acres.com/property-rates-and-price-trends-in-{}-prffid/*",
        slug(city)
    )]
}
