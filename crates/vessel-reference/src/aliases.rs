//! Historical and colloquial flag codes that are not in the ISO table.

/// Alias → canonical ISO alpha-3 code.
pub const FLAG_ALIASES: &[(&str, &str)] = &[
    ("UK", "GBR"),
    ("ENG", "GBR"),
    ("SCO", "GBR"),
    ("GER", "DEU"),
    ("NED", "NLD"),
    ("POR", "PRT"),
];

/// Look up an upper-cased flag code in the alias table.
pub fn flag_alias(code: &str) -> Option<&'static str> {
    FLAG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_aliases_resolve() {
        assert_eq!(flag_alias("UK"), Some("GBR"));
        assert_eq!(flag_alias("GER"), Some("DEU"));
        assert_eq!(flag_alias("uk"), None);
        assert_eq!(flag_alias("GBR"), None);
    }
}
