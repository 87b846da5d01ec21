//! Normalization of registry rows to display-ready company records
//!
//! Pure functions, no I/O. The short display name is derived from the full
//! legal name via an ordered rule table; rule order is load-bearing because
//! the generic "АКЦИОНЕРНОЕ ОБЩЕСТВО" phrase is a substring of every
//! specific joint-stock variant (and "ПУБЛИЧНОЕ…" is itself a substring of
//! "НЕПУБЛИЧНОЕ…").

use super::types::{NormalizedCompany, RegistryRow, TaxId, TaxIdKind};

/// Marker phrase for sole proprietors in full legal names
const SOLE_PROPRIETOR_MARKER: &str = "ИНДИВИДУАЛЬНЫЙ ПРЕДПРИНИМАТЕЛЬ";

/// Legal-form phrases and their abbreviations, most specific first
const LEGAL_FORMS: &[(&str, &str)] = &[
    ("НЕПУБЛИЧНОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО", "НАО"),
    ("ПУБЛИЧНОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО", "ПАО"),
    ("ЗАКРЫТОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО", "ЗАО"),
    ("ОТКРЫТОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО", "ОАО"),
    ("ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ", "ООО"),
    ("АКЦИОНЕРНОЕ ОБЩЕСТВО", "АО"),
];

/// Quote pairs recognized when extracting the organization name proper
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('«', '»'), ('„', '“')];

/// Build a [`NormalizedCompany`] from the winning registry row
pub fn normalize_row(row: &RegistryRow, tax_id: &TaxId) -> NormalizedCompany {
    NormalizedCompany {
        name: display_name(&row.full_name, row.short_name.as_deref(), tax_id.kind()),
        inn: row
            .inn
            .clone()
            .unwrap_or_else(|| tax_id.digits().to_string()),
        kpp: row.kpp.clone(),
        address: row.address.clone(),
        ogrn: row.ogrn.clone(),
    }
}

/// Derive the short display name for a legal entity
///
/// Prefers the registry's own abbreviated name when present; otherwise
/// applies the sole-proprietor rule, then the legal-form table in order.
/// Falls back to the full name unmodified.
pub fn display_name(full_name: &str, short_name: Option<&str>, kind: TaxIdKind) -> String {
    if let Some(short) = short_name {
        let short = short.trim();
        if !short.is_empty() {
            return short.to_string();
        }
    }

    let full_name = full_name.trim();

    if let Some((start, end)) = find_phrase(full_name, SOLE_PROPRIETOR_MARKER) {
        let rest = format!("{} {}", &full_name[..start], &full_name[end..]);
        let rest = rest.trim();
        return if rest.is_empty() {
            "ИП".to_string()
        } else {
            format!("ИП {}", rest)
        };
    }

    if kind == TaxIdKind::SoleProprietor {
        return format!("ИП {}", full_name);
    }

    for (phrase, abbreviation) in LEGAL_FORMS {
        if let Some((_, end)) = find_phrase(full_name, phrase) {
            let rest = full_name[end..].trim();
            let body = quoted_span(rest).unwrap_or(rest);
            return if body.is_empty() {
                (*abbreviation).to_string()
            } else {
                format!("{} {}", abbreviation, body)
            };
        }
    }

    full_name.to_string()
}

/// Case-insensitive search for `phrase`, returning the byte range of the
/// first match in `haystack`
fn find_phrase(haystack: &str, phrase: &str) -> Option<(usize, usize)> {
    let hay: Vec<(usize, char)> = haystack.char_indices().collect();
    let needle: Vec<char> = phrase.chars().collect();

    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }

    'outer: for start in 0..=hay.len() - needle.len() {
        for (offset, expected) in needle.iter().enumerate() {
            let actual = hay[start + offset].1;
            if !actual.to_lowercase().eq(expected.to_lowercase()) {
                continue 'outer;
            }
        }

        let begin = hay[start].0;
        let end = hay
            .get(start + needle.len())
            .map_or(haystack.len(), |(idx, _)| *idx);
        return Some((begin, end));
    }

    None
}

/// Content of a leading quoted span, if `text` starts with one
fn quoted_span(text: &str) -> Option<&str> {
    let first = text.chars().next()?;
    let (open, close) = QUOTE_PAIRS.iter().find(|(o, _)| *o == first)?;

    let inner = &text[open.len_utf8()..];
    let close_at = inner.find(*close)?;
    Some(&inner[..close_at])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(full_name: &str) -> String {
        display_name(full_name, None, TaxIdKind::Organization)
    }

    #[test]
    fn test_prefers_registry_short_name() {
        let name = display_name(
            "ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ \"ТЕХНО\"",
            Some("ООО \"ТЕХНО\""),
            TaxIdKind::Organization,
        );
        assert_eq!(name, "ООО \"ТЕХНО\"");
    }

    #[test]
    fn test_blank_short_name_falls_through() {
        let name = display_name(
            "ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ \"ТЕХНО\"",
            Some("   "),
            TaxIdKind::Organization,
        );
        assert_eq!(name, "ООО ТЕХНО");
    }

    #[test]
    fn test_ooo_quoted_extraction() {
        assert_eq!(
            derive("ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ \"ТЕХНО\""),
            "ООО ТЕХНО"
        );
        assert_eq!(
            derive("ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ «ВЕСЫ И СИСТЕМЫ»"),
            "ООО ВЕСЫ И СИСТЕМЫ"
        );
    }

    #[test]
    fn test_ooo_unquoted_remainder() {
        assert_eq!(
            derive("ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ ТЕХНО"),
            "ООО ТЕХНО"
        );
    }

    #[test]
    fn test_public_jsc_before_generic_jsc() {
        // ПАО must win over the bare АО rule
        assert_eq!(
            derive("ПУБЛИЧНОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО \"СБЕРБАНК\""),
            "ПАО СБЕРБАНК"
        );
    }

    #[test]
    fn test_non_public_jsc_before_public_jsc() {
        // "ПУБЛИЧНОЕ…" is a substring of "НЕПУБЛИЧНОЕ…"
        assert_eq!(
            derive("НЕПУБЛИЧНОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО \"ВЕКТОР\""),
            "НАО ВЕКТОР"
        );
    }

    #[test]
    fn test_closed_open_and_bare_jsc() {
        assert_eq!(
            derive("ЗАКРЫТОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО \"ЛУЧ\""),
            "ЗАО ЛУЧ"
        );
        assert_eq!(
            derive("ОТКРЫТОЕ АКЦИОНЕРНОЕ ОБЩЕСТВО \"ЗАРЯ\""),
            "ОАО ЗАРЯ"
        );
        assert_eq!(derive("АКЦИОНЕРНОЕ ОБЩЕСТВО \"ТАНДЕР\""), "АО ТАНДЕР");
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(
            derive("Общество с ограниченной ответственностью \"Техно\""),
            "ООО Техно"
        );
    }

    #[test]
    fn test_sole_proprietor_marker_stripped() {
        assert_eq!(
            derive("ИНДИВИДУАЛЬНЫЙ ПРЕДПРИНИМАТЕЛЬ ИВАНОВ ИВАН ИВАНОВИЧ"),
            "ИП ИВАНОВ ИВАН ИВАНОВИЧ"
        );
    }

    #[test]
    fn test_twelve_digit_id_gets_ip_prefix() {
        let name = display_name(
            "ИВАНОВ ИВАН ИВАНОВИЧ",
            None,
            TaxIdKind::SoleProprietor,
        );
        assert_eq!(name, "ИП ИВАНОВ ИВАН ИВАНОВИЧ");
    }

    #[test]
    fn test_no_rule_matches_keeps_full_name() {
        assert_eq!(
            derive("ФОНД РАЗВИТИЯ ПРОМЫШЛЕННОСТИ"),
            "ФОНД РАЗВИТИЯ ПРОМЫШЛЕННОСТИ"
        );
    }

    #[test]
    fn test_normalize_row_falls_back_to_query_inn() {
        let tax_id = TaxId::parse("7707083893").unwrap();
        let row = RegistryRow {
            full_name: "ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ \"ТЕХНО\"".to_string(),
            short_name: None,
            kpp: Some("123".to_string()),
            address: Some("г. Москва".to_string()),
            ogrn: None,
            inn: None,
            region: None,
        };

        let company = normalize_row(&row, &tax_id);
        assert_eq!(company.name, "ООО ТЕХНО");
        assert_eq!(company.inn, "7707083893");
        assert_eq!(company.kpp.as_deref(), Some("123"));
    }
}
