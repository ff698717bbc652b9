use std::cmp::Ordering;

/// Unaccented spellings seen in the source data → canonical accented names.
const SUBSTITUTIONS: &[(&str, &str)] = &[("Limon", "Limón"), ("San Jose", "San José")];

/// Map a raw province cell to its canonical name.
///
/// Only the fixed substitution table is applied; anything else passes
/// through unchanged (apart from surrounding whitespace).
pub fn normalize_province(raw: &str) -> String {
    let trimmed = raw.trim();
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Transliterate to ASCII and lowercase (`"Limón"` → `"limon"`).
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent-aware ordering: compare folded keys, break ties on the raw string
/// so the order stays total.
pub fn compare_provinces(a: &str, b: &str) -> Ordering {
    fold_key(a).cmp(&fold_key(b)).then_with(|| a.cmp(b))
}

/// Sort province names so that `"É"` lands next to `"E"`.
pub fn sort_provinces(names: &mut [String]) {
    names.sort_by_cached_key(|n| (fold_key(n), n.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_variants() {
        assert_eq!(normalize_province("Limon"), "Limón");
        assert_eq!(normalize_province("San Jose"), "San José");
        assert_eq!(normalize_province("  San Jose "), "San José");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(normalize_province("Heredia"), "Heredia");
        assert_eq!(normalize_province("Limón"), "Limón");
        // Only exact spellings are in the table.
        assert_eq!(normalize_province("limon"), "limon");
        assert_eq!(normalize_province(""), "");
    }

    #[test]
    fn sorts_accented_names_in_place() {
        let mut names = vec![
            "San José".to_string(),
            "Alajuela".to_string(),
            "Limón".to_string(),
        ];
        sort_provinces(&mut names);
        assert_eq!(names, ["Alajuela", "Limón", "San José"]);
    }

    #[test]
    fn accented_initial_sorts_with_plain_letter() {
        let mut names = vec![
            "Zarcero".to_string(),
            "Éxito".to_string(),
            "Escazú".to_string(),
            "Fortuna".to_string(),
        ];
        sort_provinces(&mut names);
        assert_eq!(names, ["Escazú", "Éxito", "Fortuna", "Zarcero"]);
        assert_eq!(compare_provinces("Éxito", "Fortuna"), Ordering::Less);
    }
}
