//! Static centroid coordinates for the regions the dashboard plots.

struct RegionSite {
    country: &'static str,
    region: &'static str,
    lat: f64,
    lng: f64,
}

const REGION_SITES: &[RegionSite] = &[
    RegionSite { country: "United States", region: "California", lat: 36.78, lng: -119.42 },
    RegionSite { country: "United States", region: "Texas", lat: 31.97, lng: -99.90 },
    RegionSite { country: "United States", region: "New York", lat: 43.00, lng: -75.00 },
    RegionSite { country: "United Kingdom", region: "England", lat: 52.36, lng: -1.17 },
    RegionSite { country: "United Kingdom", region: "Scotland", lat: 56.49, lng: -4.20 },
    RegionSite { country: "Germany", region: "Bavaria", lat: 48.79, lng: 11.50 },
    RegionSite { country: "Germany", region: "Berlin", lat: 52.52, lng: 13.40 },
    RegionSite { country: "France", region: "Ile-de-France", lat: 48.85, lng: 2.35 },
    RegionSite { country: "Spain", region: "Community of Madrid", lat: 40.42, lng: -3.70 },
    RegionSite { country: "Canada", region: "Ontario", lat: 51.25, lng: -85.32 },
    RegionSite { country: "Brazil", region: "Sao Paulo", lat: -23.55, lng: -46.63 },
    RegionSite { country: "India", region: "Maharashtra", lat: 19.75, lng: 75.71 },
    RegionSite { country: "Japan", region: "Tokyo", lat: 35.68, lng: 139.69 },
    RegionSite { country: "Australia", region: "New South Wales", lat: -31.84, lng: 145.61 },
];

/// Map-bubble coordinates for a region, when we know them.
pub fn centroid(country: &str, region: &str) -> Option<(f64, f64)> {
    REGION_SITES
        .iter()
        .find(|site| site.country == country && site.region == region)
        .map(|site| (site.lat, site.lng))
}

/// Stable slug identifying a region, used as the series key. Includes the
/// country so same-named regions in different countries stay distinct.
pub fn region_code(country: &str, region: &str) -> String {
    let mut code = String::with_capacity(country.len() + region.len() + 1);
    for ch in country.chars().chain([' ']).chain(region.chars()) {
        if ch.is_alphanumeric() {
            code.extend(ch.to_lowercase());
        } else if !code.ends_with('-') && !code.is_empty() {
            code.push('-');
        }
    }
    code.trim_end_matches('-').to_string()
}
