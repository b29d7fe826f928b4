use serde::Serialize;

use crate::models::document::Document;

/// Visual kind of a locker document, derived from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentIcon {
    Passport,
    License,
    BirthCertificate,
    DeathCertificate,
    MarriageCertificate,
    PoliceRecord,
    Firearm,
    VehicleRegistration,
    VehicleInspection,
    Resume,
    Diploma,
    Medical,
    Insurance,
    NationalInsurance,
    Generic,
}

impl DocumentIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            DocumentIcon::Passport => "🛂",
            DocumentIcon::License => "🪪",
            DocumentIcon::BirthCertificate => "👶",
            DocumentIcon::DeathCertificate => "🕊️",
            DocumentIcon::MarriageCertificate => "💍",
            DocumentIcon::PoliceRecord => "👮",
            DocumentIcon::Firearm => "🔫",
            DocumentIcon::VehicleRegistration => "🚗",
            DocumentIcon::VehicleInspection => "🔧",
            DocumentIcon::Resume => "📝",
            DocumentIcon::Diploma => "🎓",
            DocumentIcon::Medical => "🏥",
            DocumentIcon::Insurance => "🛡️",
            DocumentIcon::NationalInsurance => "🏛️",
            DocumentIcon::Generic => "📄",
        }
    }
}

type TitleMatcher = fn(&str) -> bool;

/// Title matchers, evaluated top to bottom against the lower-cased title.
///
/// Order is significant: titles share substrings, so the first hit wins.
/// "Vehicle Registration Renewal" must land on the registration row before the
/// catch-all vehicle row sees it, and "Firearm License" resolves to the
/// license row because that row comes first.
const ICON_TABLE: &[(TitleMatcher, DocumentIcon)] = &[
    (|t: &str| t.contains("passport"), DocumentIcon::Passport),
    (|t: &str| t.contains("license"), DocumentIcon::License),
    (|t: &str| t.contains("birth"), DocumentIcon::BirthCertificate),
    (|t: &str| t.contains("death"), DocumentIcon::DeathCertificate),
    (|t: &str| t.contains("marriage"), DocumentIcon::MarriageCertificate),
    (|t: &str| t.contains("police"), DocumentIcon::PoliceRecord),
    (|t: &str| t.contains("firearm"), DocumentIcon::Firearm),
    (
        |t: &str| t.contains("vehicle") && t.contains("registration"),
        DocumentIcon::VehicleRegistration,
    ),
    (|t: &str| t.contains("vehicle"), DocumentIcon::VehicleInspection),
    (|t: &str| t.contains("resume"), DocumentIcon::Resume),
    (|t: &str| t.contains("diploma"), DocumentIcon::Diploma),
    (|t: &str| t.contains("medical"), DocumentIcon::Medical),
    // National insurance has its own row below.
    (
        |t: &str| t.contains("insurance") && !t.contains("national"),
        DocumentIcon::Insurance,
    ),
    (
        |t: &str| t.contains("national") && t.contains("insurance"),
        DocumentIcon::NationalInsurance,
    ),
];

/// Resolve the icon for a title (case-insensitive).
pub fn resolve_title_icon(title: &str) -> DocumentIcon {
    let title = title.to_lowercase();
    ICON_TABLE
        .iter()
        .find(|(matcher, _)| matcher(title.as_str()))
        .map(|(_, icon)| *icon)
        .unwrap_or(DocumentIcon::Generic)
}

/// Resolve the icon of a locker document.
pub fn resolve_icon(document: &Document) -> DocumentIcon {
    resolve_title_icon(document.title())
}
