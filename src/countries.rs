//! Countries offered for life-expectancy lookups, keyed by display name.

/// `(display name, ISO3 code)` in the order they are offered to the user.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("Japan", "JPN"),
    ("United Kingdom", "GBR"),
    ("Germany", "DEU"),
    ("France", "FRA"),
    ("Canada", "CAN"),
    ("Australia", "AUS"),
    ("Spain", "ESP"),
    ("Italy", "ITA"),
    ("South Korea", "KOR"),
    ("Brazil", "BRA"),
    ("Mexico", "MEX"),
    ("India", "IND"),
    ("China", "CHN"),
    ("Russia", "RUS"),
    ("Netherlands", "NLD"),
    ("Sweden", "SWE"),
    ("Switzerland", "CHE"),
    ("Norway", "NOR"),
    ("Denmark", "DNK"),
    ("Finland", "FIN"),
    ("Belgium", "BEL"),
    ("Austria", "AUT"),
    ("Portugal", "PRT"),
    ("Greece", "GRC"),
    ("Poland", "POL"),
    ("Czech Republic", "CZE"),
    ("Hungary", "HUN"),
    ("Ireland", "IRL"),
    ("New Zealand", "NZL"),
    ("Singapore", "SGP"),
    ("Hong Kong", "HKG"),
    // Not a World Bank economy; lookups fall back to the static table.
    ("Taiwan", "TWN"),
    ("Thailand", "THA"),
    ("Indonesia", "IDN"),
    ("Philippines", "PHL"),
    ("Vietnam", "VNM"),
    ("Malaysia", "MYS"),
    ("Turkey", "TUR"),
    ("Israel", "ISR"),
    ("United Arab Emirates", "ARE"),
    ("Saudi Arabia", "SAU"),
    ("South Africa", "ZAF"),
    ("Nigeria", "NGA"),
    ("Egypt", "EGY"),
    ("Argentina", "ARG"),
    ("Chile", "CHL"),
    ("Colombia", "COL"),
    ("Peru", "PER"),
];

/// Country preselected when a member is first configured.
pub const DEFAULT_COUNTRY: &str = "United States";

/// ISO3 code for a display name (case-insensitive, surrounding whitespace ignored).
pub fn iso3(name: &str) -> Option<&'static str> {
    let name = name.trim();
    COUNTRIES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}
