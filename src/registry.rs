//! Compiled-in ISO 3166-1 country catalog.
//!
//! Each entry carries the alpha-2 / alpha-3 codes, the short name, a few
//! alternative spellings (official names, common names, the spellings used by
//! the Kaggle survey exports) and a continent code (`AF`, `AN`, `AS`, `EU`,
//! `NA`, `OC`, `SA`).
//!
//! Lookups are case-insensitive and ignore surrounding whitespace, repeated
//! inner whitespace and a trailing ellipsis:
//!
//! ```
//! use kaggle_insights::registry::{CountryCatalog, CountryLookup};
//!
//! let catalog = CountryCatalog::global();
//! assert_eq!(catalog.alpha2("  viet nam ").as_deref(), Some("VN"));
//! assert_eq!(catalog.continent_code("VN").as_deref(), Some("AS"));
//! assert!(catalog.alpha2("Other").is_none());
//! ```

use ahash::AHashMap;
use std::sync::OnceLock;

/// Resolution of free-text country names, injected into the region resolver
/// and the flag lookup so tests can substitute a stub.
pub trait CountryLookup {
    /// Resolve a country name (or code) to its ISO alpha-2 code.
    fn alpha2(&self, name: &str) -> Option<String>;

    /// Continent code for an ISO alpha-2 code.
    fn continent_code(&self, alpha2: &str) -> Option<String>;
}

impl<L: CountryLookup + ?Sized> CountryLookup for &L {
    fn alpha2(&self, name: &str) -> Option<String> {
        (**self).alpha2(name)
    }

    fn continent_code(&self, alpha2: &str) -> Option<String> {
        (**self).continent_code(alpha2)
    }
}

/// A single entry in the country catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryEntry {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub continent: &'static str,
}

const fn c(
    alpha2: &'static str,
    alpha3: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    continent: &'static str,
) -> CountryEntry {
    CountryEntry {
        alpha2,
        alpha3,
        name,
        aliases,
        continent,
    }
}

// ============================================================================
// STATIC CATALOG DATA
// ============================================================================

pub const CATALOG: &[CountryEntry] = &[
    // ── Africa ───────────────────────────────────────────────────────────
    c("DZ", "DZA", "Algeria", &["People's Democratic Republic of Algeria"], "AF"),
    c("AO", "AGO", "Angola", &["Republic of Angola"], "AF"),
    c("BJ", "BEN", "Benin", &["Republic of Benin"], "AF"),
    c("BW", "BWA", "Botswana", &["Republic of Botswana"], "AF"),
    c("BF", "BFA", "Burkina Faso", &[], "AF"),
    c("BI", "BDI", "Burundi", &["Republic of Burundi"], "AF"),
    c("CV", "CPV", "Cabo Verde", &["Cape Verde", "Republic of Cabo Verde"], "AF"),
    c("CM", "CMR", "Cameroon", &["Republic of Cameroon"], "AF"),
    c("CF", "CAF", "Central African Republic", &[], "AF"),
    c("TD", "TCD", "Chad", &["Republic of Chad"], "AF"),
    c("KM", "COM", "Comoros", &["Union of the Comoros"], "AF"),
    c("CG", "COG", "Congo", &["Republic of the Congo", "Congo-Brazzaville"], "AF"),
    c(
        "CD",
        "COD",
        "Congo, The Democratic Republic of the",
        &["Democratic Republic of the Congo", "DR Congo", "Congo-Kinshasa"],
        "AF",
    ),
    c(
        "CI",
        "CIV",
        "Côte d'Ivoire",
        &["Cote d'Ivoire", "Ivory Coast", "Republic of Côte d'Ivoire"],
        "AF",
    ),
    c("DJ", "DJI", "Djibouti", &["Republic of Djibouti"], "AF"),
    c("EG", "EGY", "Egypt", &["Arab Republic of Egypt"], "AF"),
    c("GQ", "GNQ", "Equatorial Guinea", &["Republic of Equatorial Guinea"], "AF"),
    c("ER", "ERI", "Eritrea", &["the State of Eritrea"], "AF"),
    c("SZ", "SWZ", "Eswatini", &["Swaziland", "Kingdom of Eswatini"], "AF"),
    c("ET", "ETH", "Ethiopia", &["Federal Democratic Republic of Ethiopia"], "AF"),
    c("GA", "GAB", "Gabon", &["Gabonese Republic"], "AF"),
    c("GM", "GMB", "Gambia", &["The Gambia", "Republic of the Gambia"], "AF"),
    c("GH", "GHA", "Ghana", &["Republic of Ghana"], "AF"),
    c("GN", "GIN", "Guinea", &["Republic of Guinea"], "AF"),
    c("GW", "GNB", "Guinea-Bissau", &["Republic of Guinea-Bissau"], "AF"),
    c("KE", "KEN", "Kenya", &["Republic of Kenya"], "AF"),
    c("LS", "LSO", "Lesotho", &["Kingdom of Lesotho"], "AF"),
    c("LR", "LBR", "Liberia", &["Republic of Liberia"], "AF"),
    c("LY", "LBY", "Libya", &["State of Libya"], "AF"),
    c("MG", "MDG", "Madagascar", &["Republic of Madagascar"], "AF"),
    c("MW", "MWI", "Malawi", &["Republic of Malawi"], "AF"),
    c("ML", "MLI", "Mali", &["Republic of Mali"], "AF"),
    c("MR", "MRT", "Mauritania", &["Islamic Republic of Mauritania"], "AF"),
    c("MU", "MUS", "Mauritius", &["Republic of Mauritius"], "AF"),
    c("YT", "MYT", "Mayotte", &[], "AF"),
    c("MA", "MAR", "Morocco", &["Kingdom of Morocco"], "AF"),
    c("MZ", "MOZ", "Mozambique", &["Republic of Mozambique"], "AF"),
    c("NA", "NAM", "Namibia", &["Republic of Namibia"], "AF"),
    c("NE", "NER", "Niger", &["Republic of the Niger"], "AF"),
    c("NG", "NGA", "Nigeria", &["Federal Republic of Nigeria"], "AF"),
    c("RE", "REU", "Réunion", &["Reunion"], "AF"),
    c("RW", "RWA", "Rwanda", &["Rwandese Republic"], "AF"),
    c(
        "SH",
        "SHN",
        "Saint Helena, Ascension and Tristan da Cunha",
        &["Saint Helena"],
        "AF",
    ),
    c(
        "ST",
        "STP",
        "Sao Tome and Principe",
        &["Democratic Republic of Sao Tome and Principe"],
        "AF",
    ),
    c("SN", "SEN", "Senegal", &["Republic of Senegal"], "AF"),
    c("SC", "SYC", "Seychelles", &["Republic of Seychelles"], "AF"),
    c("SL", "SLE", "Sierra Leone", &["Republic of Sierra Leone"], "AF"),
    c("SO", "SOM", "Somalia", &["Federal Republic of Somalia"], "AF"),
    c("ZA", "ZAF", "South Africa", &["Republic of South Africa"], "AF"),
    c("SS", "SSD", "South Sudan", &["Republic of South Sudan"], "AF"),
    c("SD", "SDN", "Sudan", &["Republic of the Sudan"], "AF"),
    c(
        "TZ",
        "TZA",
        "Tanzania, United Republic of",
        &["Tanzania", "United Republic of Tanzania"],
        "AF",
    ),
    c("TG", "TGO", "Togo", &["Togolese Republic"], "AF"),
    c("TN", "TUN", "Tunisia", &["Republic of Tunisia"], "AF"),
    c("UG", "UGA", "Uganda", &["Republic of Uganda"], "AF"),
    c("EH", "ESH", "Western Sahara", &[], "AF"),
    c("ZM", "ZMB", "Zambia", &["Republic of Zambia"], "AF"),
    c("ZW", "ZWE", "Zimbabwe", &["Republic of Zimbabwe"], "AF"),
    // ── Antarctica ───────────────────────────────────────────────────────
    c("AQ", "ATA", "Antarctica", &[], "AN"),
    c("BV", "BVT", "Bouvet Island", &[], "AN"),
    c("TF", "ATF", "French Southern Territories", &[], "AN"),
    c("HM", "HMD", "Heard Island and McDonald Islands", &[], "AN"),
    c(
        "GS",
        "SGS",
        "South Georgia and the South Sandwich Islands",
        &[],
        "AN",
    ),
    // ── Asia ─────────────────────────────────────────────────────────────
    c("AF", "AFG", "Afghanistan", &["Islamic Republic of Afghanistan"], "AS"),
    c("AM", "ARM", "Armenia", &["Republic of Armenia"], "AS"),
    c("AZ", "AZE", "Azerbaijan", &["Republic of Azerbaijan"], "AS"),
    c("BH", "BHR", "Bahrain", &["Kingdom of Bahrain"], "AS"),
    c("BD", "BGD", "Bangladesh", &["People's Republic of Bangladesh"], "AS"),
    c("BT", "BTN", "Bhutan", &["Kingdom of Bhutan"], "AS"),
    c("IO", "IOT", "British Indian Ocean Territory", &[], "AS"),
    c("BN", "BRN", "Brunei Darussalam", &["Brunei"], "AS"),
    c("KH", "KHM", "Cambodia", &["Kingdom of Cambodia"], "AS"),
    c("CN", "CHN", "China", &["People's Republic of China"], "AS"),
    c("CX", "CXR", "Christmas Island", &[], "AS"),
    c("CC", "CCK", "Cocos (Keeling) Islands", &[], "AS"),
    c("CY", "CYP", "Cyprus", &["Republic of Cyprus"], "AS"),
    c("GE", "GEO", "Georgia", &[], "AS"),
    c(
        "HK",
        "HKG",
        "Hong Kong",
        &["Hong Kong (S.A.R.)", "Hong Kong Special Administrative Region of China"],
        "AS",
    ),
    c("IN", "IND", "India", &["Republic of India"], "AS"),
    c("ID", "IDN", "Indonesia", &["Republic of Indonesia"], "AS"),
    c(
        "IR",
        "IRN",
        "Iran, Islamic Republic of",
        &["Iran", "Islamic Republic of Iran"],
        "AS",
    ),
    c("IQ", "IRQ", "Iraq", &["Republic of Iraq"], "AS"),
    c("IL", "ISR", "Israel", &["State of Israel"], "AS"),
    c("JP", "JPN", "Japan", &[], "AS"),
    c("JO", "JOR", "Jordan", &["Hashemite Kingdom of Jordan"], "AS"),
    c("KZ", "KAZ", "Kazakhstan", &["Republic of Kazakhstan"], "AS"),
    c(
        "KP",
        "PRK",
        "Korea, Democratic People's Republic of",
        &["North Korea", "Democratic People's Republic of Korea"],
        "AS",
    ),
    c(
        "KR",
        "KOR",
        "Korea, Republic of",
        &["South Korea", "Republic of Korea"],
        "AS",
    ),
    c("KW", "KWT", "Kuwait", &["State of Kuwait"], "AS"),
    c("KG", "KGZ", "Kyrgyzstan", &["Kyrgyz Republic"], "AS"),
    c(
        "LA",
        "LAO",
        "Lao People's Democratic Republic",
        &["Laos"],
        "AS",
    ),
    c("LB", "LBN", "Lebanon", &["Lebanese Republic"], "AS"),
    c("MO", "MAC", "Macao", &["Macau", "Macao Special Administrative Region of China"], "AS"),
    c("MY", "MYS", "Malaysia", &[], "AS"),
    c("MV", "MDV", "Maldives", &["Republic of Maldives"], "AS"),
    c("MN", "MNG", "Mongolia", &[], "AS"),
    c("MM", "MMR", "Myanmar", &["Burma", "Republic of Myanmar"], "AS"),
    c("NP", "NPL", "Nepal", &["Federal Democratic Republic of Nepal"], "AS"),
    c("OM", "OMN", "Oman", &["Sultanate of Oman"], "AS"),
    c("PK", "PAK", "Pakistan", &["Islamic Republic of Pakistan"], "AS"),
    c("PS", "PSE", "Palestine, State of", &["Palestine", "State of Palestine"], "AS"),
    c("PH", "PHL", "Philippines", &["Republic of the Philippines"], "AS"),
    c("QA", "QAT", "Qatar", &["State of Qatar"], "AS"),
    c("SA", "SAU", "Saudi Arabia", &["Kingdom of Saudi Arabia"], "AS"),
    c("SG", "SGP", "Singapore", &["Republic of Singapore"], "AS"),
    c("LK", "LKA", "Sri Lanka", &["Democratic Socialist Republic of Sri Lanka"], "AS"),
    c("SY", "SYR", "Syrian Arab Republic", &["Syria"], "AS"),
    c(
        "TW",
        "TWN",
        "Taiwan, Province of China",
        &["Taiwan"],
        "AS",
    ),
    c("TJ", "TJK", "Tajikistan", &["Republic of Tajikistan"], "AS"),
    c("TH", "THA", "Thailand", &["Kingdom of Thailand"], "AS"),
    c("TL", "TLS", "Timor-Leste", &["East Timor", "Democratic Republic of Timor-Leste"], "AS"),
    c("TR", "TUR", "Türkiye", &["Turkey", "Republic of Türkiye"], "AS"),
    c("TM", "TKM", "Turkmenistan", &[], "AS"),
    c("AE", "ARE", "United Arab Emirates", &["UAE"], "AS"),
    c("UZ", "UZB", "Uzbekistan", &["Republic of Uzbekistan"], "AS"),
    c("VN", "VNM", "Viet Nam", &["Vietnam", "Socialist Republic of Viet Nam"], "AS"),
    c("YE", "YEM", "Yemen", &["Republic of Yemen"], "AS"),
    // ── Europe ───────────────────────────────────────────────────────────
    c("AX", "ALA", "Åland Islands", &["Aland Islands"], "EU"),
    c("AL", "ALB", "Albania", &["Republic of Albania"], "EU"),
    c("AD", "AND", "Andorra", &["Principality of Andorra"], "EU"),
    c("AT", "AUT", "Austria", &["Republic of Austria"], "EU"),
    c("BY", "BLR", "Belarus", &["Republic of Belarus"], "EU"),
    c("BE", "BEL", "Belgium", &["Kingdom of Belgium"], "EU"),
    c("BA", "BIH", "Bosnia and Herzegovina", &["Republic of Bosnia and Herzegovina"], "EU"),
    c("BG", "BGR", "Bulgaria", &["Republic of Bulgaria"], "EU"),
    c("HR", "HRV", "Croatia", &["Republic of Croatia"], "EU"),
    c("CZ", "CZE", "Czechia", &["Czech Republic"], "EU"),
    c("DK", "DNK", "Denmark", &["Kingdom of Denmark"], "EU"),
    c("EE", "EST", "Estonia", &["Republic of Estonia"], "EU"),
    c("FO", "FRO", "Faroe Islands", &[], "EU"),
    c("FI", "FIN", "Finland", &["Republic of Finland"], "EU"),
    c("FR", "FRA", "France", &["French Republic"], "EU"),
    c("DE", "DEU", "Germany", &["Federal Republic of Germany"], "EU"),
    c("GI", "GIB", "Gibraltar", &[], "EU"),
    c("GR", "GRC", "Greece", &["Hellenic Republic"], "EU"),
    c("GG", "GGY", "Guernsey", &[], "EU"),
    c("VA", "VAT", "Holy See (Vatican City State)", &["Holy See", "Vatican City"], "EU"),
    c("HU", "HUN", "Hungary", &[], "EU"),
    c("IS", "ISL", "Iceland", &["Republic of Iceland"], "EU"),
    c("IE", "IRL", "Ireland", &[], "EU"),
    c("IM", "IMN", "Isle of Man", &[], "EU"),
    c("IT", "ITA", "Italy", &["Italian Republic"], "EU"),
    c("JE", "JEY", "Jersey", &[], "EU"),
    c("XK", "XKX", "Kosovo", &["Republic of Kosovo"], "EU"),
    c("LV", "LVA", "Latvia", &["Republic of Latvia"], "EU"),
    c("LI", "LIE", "Liechtenstein", &["Principality of Liechtenstein"], "EU"),
    c("LT", "LTU", "Lithuania", &["Republic of Lithuania"], "EU"),
    c("LU", "LUX", "Luxembourg", &["Grand Duchy of Luxembourg"], "EU"),
    c("MT", "MLT", "Malta", &["Republic of Malta"], "EU"),
    c("MD", "MDA", "Moldova, Republic of", &["Moldova", "Republic of Moldova"], "EU"),
    c("MC", "MCO", "Monaco", &["Principality of Monaco"], "EU"),
    c("ME", "MNE", "Montenegro", &[], "EU"),
    c(
        "NL",
        "NLD",
        "Netherlands",
        &["Kingdom of the Netherlands", "The Netherlands", "Holland"],
        "EU",
    ),
    c("MK", "MKD", "North Macedonia", &["Republic of North Macedonia", "Macedonia"], "EU"),
    c("NO", "NOR", "Norway", &["Kingdom of Norway"], "EU"),
    c("PL", "POL", "Poland", &["Republic of Poland"], "EU"),
    c("PT", "PRT", "Portugal", &["Portuguese Republic"], "EU"),
    c("RO", "ROU", "Romania", &[], "EU"),
    c("RU", "RUS", "Russian Federation", &["Russia"], "EU"),
    c("SM", "SMR", "San Marino", &["Republic of San Marino"], "EU"),
    c("RS", "SRB", "Serbia", &["Republic of Serbia"], "EU"),
    c("SK", "SVK", "Slovakia", &["Slovak Republic"], "EU"),
    c("SI", "SVN", "Slovenia", &["Republic of Slovenia"], "EU"),
    c("ES", "ESP", "Spain", &["Kingdom of Spain"], "EU"),
    c("SJ", "SJM", "Svalbard and Jan Mayen", &[], "EU"),
    c("SE", "SWE", "Sweden", &["Kingdom of Sweden"], "EU"),
    c("CH", "CHE", "Switzerland", &["Swiss Confederation"], "EU"),
    c("UA", "UKR", "Ukraine", &[], "EU"),
    c(
        "GB",
        "GBR",
        "United Kingdom",
        &[
            "United Kingdom of Great Britain and Northern Ireland",
            "Great Britain",
            "UK",
        ],
        "EU",
    ),
    // ── North America ────────────────────────────────────────────────────
    c("AI", "AIA", "Anguilla", &[], "NA"),
    c("AG", "ATG", "Antigua and Barbuda", &[], "NA"),
    c("AW", "ABW", "Aruba", &[], "NA"),
    c("BS", "BHS", "Bahamas", &["Commonwealth of the Bahamas"], "NA"),
    c("BB", "BRB", "Barbados", &[], "NA"),
    c("BZ", "BLZ", "Belize", &[], "NA"),
    c("BM", "BMU", "Bermuda", &[], "NA"),
    c("BQ", "BES", "Bonaire, Sint Eustatius and Saba", &[], "NA"),
    c("CA", "CAN", "Canada", &[], "NA"),
    c("KY", "CYM", "Cayman Islands", &[], "NA"),
    c("CR", "CRI", "Costa Rica", &["Republic of Costa Rica"], "NA"),
    c("CU", "CUB", "Cuba", &["Republic of Cuba"], "NA"),
    c("CW", "CUW", "Curaçao", &["Curacao"], "NA"),
    c("DM", "DMA", "Dominica", &["Commonwealth of Dominica"], "NA"),
    c("DO", "DOM", "Dominican Republic", &[], "NA"),
    c("SV", "SLV", "El Salvador", &["Republic of El Salvador"], "NA"),
    c("GL", "GRL", "Greenland", &[], "NA"),
    c("GD", "GRD", "Grenada", &[], "NA"),
    c("GP", "GLP", "Guadeloupe", &[], "NA"),
    c("GT", "GTM", "Guatemala", &["Republic of Guatemala"], "NA"),
    c("HT", "HTI", "Haiti", &["Republic of Haiti"], "NA"),
    c("HN", "HND", "Honduras", &["Republic of Honduras"], "NA"),
    c("JM", "JAM", "Jamaica", &[], "NA"),
    c("MQ", "MTQ", "Martinique", &[], "NA"),
    c("MX", "MEX", "Mexico", &["United Mexican States"], "NA"),
    c("MS", "MSR", "Montserrat", &[], "NA"),
    c("NI", "NIC", "Nicaragua", &["Republic of Nicaragua"], "NA"),
    c("PA", "PAN", "Panama", &["Republic of Panama"], "NA"),
    c("PR", "PRI", "Puerto Rico", &[], "NA"),
    c("BL", "BLM", "Saint Barthélemy", &["Saint Barthelemy"], "NA"),
    c("KN", "KNA", "Saint Kitts and Nevis", &[], "NA"),
    c("LC", "LCA", "Saint Lucia", &[], "NA"),
    c("MF", "MAF", "Saint Martin (French part)", &["Saint Martin"], "NA"),
    c("PM", "SPM", "Saint Pierre and Miquelon", &[], "NA"),
    c("VC", "VCT", "Saint Vincent and the Grenadines", &[], "NA"),
    c("SX", "SXM", "Sint Maarten (Dutch part)", &["Sint Maarten"], "NA"),
    c("TT", "TTO", "Trinidad and Tobago", &["Republic of Trinidad and Tobago"], "NA"),
    c("TC", "TCA", "Turks and Caicos Islands", &[], "NA"),
    c(
        "US",
        "USA",
        "United States",
        &["United States of America", "USA", "US"],
        "NA",
    ),
    c("VG", "VGB", "Virgin Islands, British", &["British Virgin Islands"], "NA"),
    c("VI", "VIR", "Virgin Islands, U.S.", &["U.S. Virgin Islands", "US Virgin Islands"], "NA"),
    // ── Oceania ──────────────────────────────────────────────────────────
    c("AS", "ASM", "American Samoa", &[], "OC"),
    c("AU", "AUS", "Australia", &["Commonwealth of Australia"], "OC"),
    c("CK", "COK", "Cook Islands", &[], "OC"),
    c("FJ", "FJI", "Fiji", &["Republic of Fiji"], "OC"),
    c("PF", "PYF", "French Polynesia", &[], "OC"),
    c("GU", "GUM", "Guam", &[], "OC"),
    c("KI", "KIR", "Kiribati", &["Republic of Kiribati"], "OC"),
    c("MH", "MHL", "Marshall Islands", &["Republic of the Marshall Islands"], "OC"),
    c(
        "FM",
        "FSM",
        "Micronesia, Federated States of",
        &["Micronesia", "Federated States of Micronesia"],
        "OC",
    ),
    c("NR", "NRU", "Nauru", &["Republic of Nauru"], "OC"),
    c("NC", "NCL", "New Caledonia", &[], "OC"),
    c("NZ", "NZL", "New Zealand", &[], "OC"),
    c("NU", "NIU", "Niue", &[], "OC"),
    c("NF", "NFK", "Norfolk Island", &[], "OC"),
    c(
        "MP",
        "MNP",
        "Northern Mariana Islands",
        &["Commonwealth of the Northern Mariana Islands"],
        "OC",
    ),
    c("PW", "PLW", "Palau", &["Republic of Palau"], "OC"),
    c("PG", "PNG", "Papua New Guinea", &["Independent State of Papua New Guinea"], "OC"),
    c("PN", "PCN", "Pitcairn", &["Pitcairn Islands"], "OC"),
    c("WS", "WSM", "Samoa", &["Independent State of Samoa"], "OC"),
    c("SB", "SLB", "Solomon Islands", &[], "OC"),
    c("TK", "TKL", "Tokelau", &[], "OC"),
    c("TO", "TON", "Tonga", &["Kingdom of Tonga"], "OC"),
    c("TV", "TUV", "Tuvalu", &[], "OC"),
    c("UM", "UMI", "United States Minor Outlying Islands", &[], "OC"),
    c("VU", "VUT", "Vanuatu", &["Republic of Vanuatu"], "OC"),
    c("WF", "WLF", "Wallis and Futuna", &[], "OC"),
    // ── South America ────────────────────────────────────────────────────
    c("AR", "ARG", "Argentina", &["Argentine Republic"], "SA"),
    c(
        "BO",
        "BOL",
        "Bolivia, Plurinational State of",
        &["Bolivia", "Plurinational State of Bolivia"],
        "SA",
    ),
    c("BR", "BRA", "Brazil", &["Federative Republic of Brazil"], "SA"),
    c("CL", "CHL", "Chile", &["Republic of Chile"], "SA"),
    c("CO", "COL", "Colombia", &["Republic of Colombia"], "SA"),
    c("EC", "ECU", "Ecuador", &["Republic of Ecuador"], "SA"),
    c("FK", "FLK", "Falkland Islands (Malvinas)", &["Falkland Islands"], "SA"),
    c("GF", "GUF", "French Guiana", &[], "SA"),
    c("GY", "GUY", "Guyana", &["Republic of Guyana"], "SA"),
    c("PY", "PRY", "Paraguay", &["Republic of Paraguay"], "SA"),
    c("PE", "PER", "Peru", &["Republic of Peru"], "SA"),
    c("SR", "SUR", "Suriname", &["Republic of Suriname"], "SA"),
    c("UY", "URY", "Uruguay", &["Eastern Republic of Uruguay"], "SA"),
    c(
        "VE",
        "VEN",
        "Venezuela, Bolivarian Republic of",
        &["Venezuela", "Bolivarian Republic of Venezuela"],
        "SA",
    ),
];

// ============================================================================
// QUERY API
// ============================================================================

/// Normalize a free-text name into a lookup key.
///
/// Lower-cases, trims, collapses inner whitespace and drops a trailing
/// ellipsis (`"Iran, Islamic Republic of..."`).
pub fn normalize_key(name: &str) -> String {
    let mut s = name.trim();
    loop {
        let stripped = s
            .strip_suffix("...")
            .or_else(|| s.strip_suffix('…'))
            .map(str::trim_end);
        match stripped {
            Some(rest) => s = rest,
            None => break,
        }
    }
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Query interface over [`CATALOG`], indexed by every code and spelling.
pub struct CountryCatalog {
    by_key: AHashMap<String, &'static CountryEntry>,
    by_alpha2: AHashMap<&'static str, &'static CountryEntry>,
}

impl CountryCatalog {
    /// Shared instance, built on first use.
    pub fn global() -> &'static CountryCatalog {
        static INSTANCE: OnceLock<CountryCatalog> = OnceLock::new();
        INSTANCE.get_or_init(|| CountryCatalog::from_entries(CATALOG))
    }

    pub fn from_entries(entries: &'static [CountryEntry]) -> Self {
        let mut by_key = AHashMap::new();
        let mut by_alpha2 = AHashMap::new();
        for entry in entries {
            by_alpha2.insert(entry.alpha2, entry);
            let spellings = [entry.alpha2, entry.alpha3, entry.name]
                .into_iter()
                .chain(entry.aliases.iter().copied());
            for s in spellings {
                // first spelling wins; later entries never shadow an earlier key
                by_key.entry(normalize_key(s)).or_insert(entry);
            }
        }
        Self { by_key, by_alpha2 }
    }

    pub fn get(&self, name: &str) -> Option<&'static CountryEntry> {
        let key = normalize_key(name);
        if key.is_empty() {
            return None;
        }
        self.by_key.get(&key).copied()
    }

    pub fn by_alpha2(&self, alpha2: &str) -> Option<&'static CountryEntry> {
        self.by_alpha2
            .get(alpha2.trim().to_ascii_uppercase().as_str())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_alpha2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alpha2.is_empty()
    }
}

impl CountryLookup for CountryCatalog {
    fn alpha2(&self, name: &str) -> Option<String> {
        self.get(name).map(|e| e.alpha2.to_string())
    }

    fn continent_code(&self, alpha2: &str) -> Option<String> {
        self.by_alpha2(alpha2).map(|e| e.continent.to_string())
    }
}
