//! Istanbul relevance filter
//!
//! Pure text predicate deciding whether a news entry is Istanbul-related,
//! used as the strict gate after normalization.

/// Istanbul districts, lower-case with Turkish diacritics, matched as
/// substrings of the lowered title.
const IST_DISTRICTS: &[&str] = &[
    "adalar",
    "arnavutköy",
    "ataşehir",
    "avcılar",
    "bağcılar",
    "bahçelievler",
    "bakırköy",
    "başakşehir",
    "bayrampaşa",
    "beşiktaş",
    "beykoz",
    "beylikdüzü",
    "beyoğlu",
    "büyükçekmece",
    "çatalca",
    "çekmeköy",
    "esenler",
    "esenyurt",
    "eyüpsultan",
    "fatih",
    "gaziosmanpaşa",
    "güngören",
    "kadıköy",
    "kağıthane",
    "kartal",
    "küçükçekmece",
    "maltepe",
    "pendik",
    "sancaktepe",
    "sarıyer",
    "silivri",
    "sultanbeyli",
    "sultangazi",
    "şile",
    "şişli",
    "tuzla",
    "ümraniye",
    "üsküdar",
    "zeytinburnu",
];

/// Check whether a title/link pair is Istanbul-related.
///
/// Case-insensitive; lowercasing the dotted capital İ yields `i` plus a
/// combining dot, so both spellings of "istanbul" are checked.
pub fn is_istanbul_related(title: &str, link: &str) -> bool {
    let t = title.to_lowercase();
    let l = link.to_lowercase();

    if t.contains("istanbul") || t.contains("i\u{307}stanbul") || l.contains("istanbul") {
        return true;
    }

    IST_DISTRICTS.iter().any(|d| t.contains(d))
}
