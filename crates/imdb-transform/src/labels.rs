//! Display label normalization.

/// Display labels for title kinds.
pub const TITLE_TYPE_LABELS: &[(&str, &str)] = &[
    ("movie", "Movie"),
    ("short", "Short"),
    ("tvEpisode", "TV Episode"),
    ("tvMiniSeries", "TV MiniSeries"),
    ("tvMovie", "TV Movie"),
    ("tvPilot", "TV Pilot"),
    ("tvSeries", "TV Series"),
    ("tvShort", "TV Short"),
    ("tvSpecial", "TV Special"),
    ("video", "Video"),
    ("videoGame", "Video Game"),
];

/// How a label column is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    /// Truncate, title-case, then turn `_` into spaces.
    Humanize { max_chars: Option<usize> },
    /// Replace values found in a fixed table; others are kept as-is.
    Lookup(&'static [(&'static str, &'static str)]),
}

impl LabelRule {
    pub fn apply(&self, value: &str) -> String {
        match self {
            LabelRule::Humanize { max_chars } => humanize(value, *max_chars),
            LabelRule::Lookup(table) => lookup_label(table, value).unwrap_or(value).to_string(),
        }
    }
}

/// The first `max_chars` characters of `value`.
pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Upper-cases the first letter of each alphabetic run and lower-cases the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

pub fn humanize(value: &str, max_chars: Option<usize>) -> String {
    let value = match max_chars {
        Some(max_chars) => truncate_chars(value, max_chars),
        None => value,
    };
    title_case(value).replace('_', " ")
}

pub fn lookup_label(table: &[(&'static str, &'static str)], value: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(raw, _)| *raw == value)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_runs() {
        assert_eq!(title_case("actor"), "Actor");
        assert_eq!(title_case("archive_footage"), "Archive_Footage");
        assert_eq!(title_case("DIRECTOR of photography"), "Director Of Photography");
        assert_eq!(title_case("3rd unit"), "3Rd Unit");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("production_designer", None), "Production Designer");
        assert_eq!(humanize("abcdefgh", Some(3)), "Abc");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 36), "hi");
    }

    #[test]
    fn test_lookup() {
        let rule = LabelRule::Lookup(TITLE_TYPE_LABELS);
        assert_eq!(rule.apply("tvMiniSeries"), "TV MiniSeries");
        assert_eq!(rule.apply("movie"), "Movie");
        assert_eq!(rule.apply("podcast"), "podcast");
    }
}
