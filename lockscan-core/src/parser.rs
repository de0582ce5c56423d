use std::sync::LazyLock;

use regex::Regex;

use lockscan_db::models::{Bottom2, Draw, Top3};

/// "123 - 45" as a whole token; spaces around the hyphen are optional.
static PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{3})\s*-\s*([0-9]{2})\b").expect("valid pair regex")
});

/// A lone three-digit word, used only when no pair is present.
static TOP3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{3})\b").expect("valid top3 regex"));

/// Results recovered from free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// Full "top3 - bottom2" results, in text order.
    Paired(Vec<Draw>),
    /// Bare three-digit values; only the combination formula can use them.
    TopOnly(Vec<Top3>),
}

impl ParsedInput {
    pub fn top3s(&self) -> Vec<Top3> {
        match self {
            ParsedInput::Paired(draws) => draws.iter().map(|d| d.top3).collect(),
            ParsedInput::TopOnly(values) => values.clone(),
        }
    }

    pub fn draws(&self) -> &[Draw] {
        match self {
            ParsedInput::Paired(draws) => draws,
            ParsedInput::TopOnly(_) => &[],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ParsedInput::Paired(draws) => draws.len(),
            ParsedInput::TopOnly(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `None` when the text holds neither pairs nor three-digit words.
pub fn parse_results(text: &str) -> Option<ParsedInput> {
    let draws: Vec<Draw> = PAIR_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let top3 = Top3::parse(&caps[1])?;
            let bottom2 = Bottom2::parse(&caps[2])?;
            Some(Draw::new(None, top3, bottom2))
        })
        .collect();
    if !draws.is_empty() {
        return Some(ParsedInput::Paired(draws));
    }

    let values: Vec<Top3> = TOP3_RE
        .captures_iter(text)
        .filter_map(|caps| Top3::parse(&caps[1]))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(ParsedInput::TopOnly(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tops(parsed: &ParsedInput) -> Vec<String> {
        parsed.top3s().iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_pairs_with_and_without_spaces() {
        let parsed = parse_results("123 - 45\n671-89\n102 -33\n550-  10").unwrap();
        let ParsedInput::Paired(draws) = &parsed else {
            panic!("expected pairs, got {:?}", parsed);
        };
        assert_eq!(draws.len(), 4);
        assert_eq!(draws[1].top3.to_string(), "671");
        assert_eq!(draws[1].bottom2.to_string(), "89");
        assert!(draws.iter().all(|d| d.round.is_none()));
    }

    #[test]
    fn test_pairs_ignore_embedded_digits() {
        // 4-digit run and a 3-digit bottom are not whole tokens
        let parsed = parse_results("1234 - 56 and 789 - 012 and 131: 456 - 78");
        assert_eq!(parsed.map(|p| tops(&p)), Some(vec!["456".to_string()]));
    }

    #[test]
    fn test_pairs_win_over_bare_numbers() {
        let parsed = parse_results("round 131 gave 456 - 78").unwrap();
        assert_eq!(tops(&parsed), vec!["456"]);
        assert_eq!(parsed.draws().len(), 1);
    }

    #[test]
    fn test_fallback_to_bare_numbers() {
        let parsed = parse_results("results: 123, 4567, 890 x12 ab345").unwrap();
        assert!(matches!(parsed, ParsedInput::TopOnly(_)));
        assert_eq!(tops(&parsed), vec!["123", "890"]);
        assert!(parsed.draws().is_empty());
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(parse_results(""), None);
        assert_eq!(parse_results("no numbers 12 here 4567"), None);
    }
}
