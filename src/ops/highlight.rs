use regex::Regex;

/// A run of display text, flagged if it is the query match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Segment {
            text: text.to_string(),
            matched: false,
        }
    }
}

/// Build the case-insensitive literal matcher for a query.
/// Returns None for an empty query.
pub fn query_regex(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

/// Split `text` around the first case-insensitive occurrence of `query`.
///
/// The query is matched literally: regex metacharacters in user input are
/// escaped. With an empty query, or no occurrence, the text comes back as a
/// single unmatched segment.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let found = query_regex(query).and_then(|re| re.find(text).map(|m| m.range()));
    let range = match found {
        Some(r) => r,
        None => return vec![Segment::plain(text)],
    };

    let mut segments = Vec::with_capacity(3);
    if range.start > 0 {
        segments.push(Segment::plain(&text[..range.start]));
    }
    segments.push(Segment {
        text: text[range.clone()].to_string(),
        matched: true,
    });
    if range.end < text.len() {
        segments.push(Segment::plain(&text[range.end..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(text: &str, matched: bool) -> Segment {
        Segment {
            text: text.into(),
            matched,
        }
    }

    #[test]
    fn empty_query_returns_text_unchanged() {
        assert_eq!(highlight("Pie chart", ""), vec![seg("Pie chart", false)]);
    }

    #[test]
    fn marks_first_occurrence_only() {
        assert_eq!(
            highlight("Bar chart bar", "BAR"),
            vec![seg("Bar", true), seg(" chart bar", false)]
        );
    }

    #[test]
    fn match_in_the_middle() {
        assert_eq!(
            highlight("Doughnut chart", "nut"),
            vec![seg("Dough", false), seg("nut", true), seg(" chart", false)]
        );
    }

    #[test]
    fn metacharacters_match_literally() {
        assert_eq!(
            highlight("C++ (legacy)", "+ ("),
            vec![seg("C+", false), seg("+ (", true), seg("legacy)", false)]
        );
        assert_eq!(highlight("anything", ".*"), vec![seg("anything", false)]);
        assert_eq!(
            highlight("a.b", "."),
            vec![seg("a", false), seg(".", true), seg("b", false)]
        );
    }

    #[test]
    fn no_occurrence_is_one_plain_segment() {
        assert_eq!(highlight("Line chart", "xyz"), vec![seg("Line chart", false)]);
    }

    #[test]
    fn unicode_case_folding() {
        assert_eq!(
            highlight("Größe", "GRÖ"),
            vec![seg("Grö", true), seg("ße", false)]
        );
    }
}
