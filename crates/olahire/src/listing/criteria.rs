use std::collections::BTreeMap;

use super::ListRecord;

/// Active filter predicates, combined with logical AND.
///
/// An unset categorical filter and an absent numeric range are wildcards, so
/// the default value is the identity filter: every row passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    text_query: String,
    categorical: BTreeMap<&'static str, String>,
    numeric_range: BTreeMap<&'static str, (i64, i64)>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, query: impl Into<String>) -> Self {
        self.set_text(query);
        self
    }

    pub fn with_categorical(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.set_categorical(field, Some(value.into()));
        self
    }

    pub fn with_numeric_range(mut self, field: &'static str, min: i64, max: i64) -> Self {
        self.set_numeric_range(field, Some((min, max)));
        self
    }

    pub fn set_text(&mut self, query: impl Into<String>) {
        self.text_query = query.into();
    }

    /// `None` or an empty value clears the filter back to wildcard.
    pub fn set_categorical(&mut self, field: &'static str, value: Option<String>) {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.categorical.insert(field, value);
            }
            None => {
                self.categorical.remove(field);
            }
        }
    }

    pub fn set_numeric_range(&mut self, field: &'static str, range: Option<(i64, i64)>) {
        match range {
            Some(range) => {
                self.numeric_range.insert(field, range);
            }
            None => {
                self.numeric_range.remove(field);
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        self.text_query.is_empty() && self.categorical.is_empty() && self.numeric_range.is_empty()
    }

    /// AND of the text, categorical, and numeric predicates.
    pub fn matches<R: ListRecord>(&self, row: &R) -> bool {
        if !self.text_query.is_empty() {
            let needle = self.text_query.to_lowercase();
            let hit = row
                .haystacks()
                .iter()
                .any(|hay| hay.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        for (field, expected) in &self.categorical {
            if row.categorical(field) != Some(expected.as_str()) {
                return false;
            }
        }

        for (field, (min, max)) in &self.numeric_range {
            let key = row.numeric(field);
            if key < *min || key > *max {
                return false;
            }
        }

        true
    }
}

/// Derive a numeric key from a free-text amount such as a salary estimate.
///
/// The first digit run is parsed (commas allowed inside it) and scaled by
/// 1000 when suffixed with `k`/`K`; no digits yields 0. The origin stripped
/// every non-digit globally, which collapsed `"$90k"` to 90 and made
/// dollar-bounded range filters useless; this parser fixes that rather than
/// replicating it.
pub fn numeric_key(text: &str) -> i64 {
    let mut digits = String::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            break;
        }
        chars.next();
    }
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else if c == ',' {
            chars.next();
        } else {
            break;
        }
    }

    if digits.is_empty() {
        return 0;
    }

    let value: i64 = digits.parse().unwrap_or(0);
    match chars.peek() {
        Some('k') | Some('K') => value * 1000,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        title: &'static str,
        location: &'static str,
        salary: &'static str,
    }

    impl ListRecord for Row {
        fn haystacks(&self) -> Vec<&str> {
            vec![self.title]
        }

        fn categorical(&self, field: &str) -> Option<&str> {
            (field == "location").then_some(self.location)
        }

        fn numeric(&self, field: &str) -> i64 {
            if field == "salary" {
                numeric_key(self.salary)
            } else {
                0
            }
        }

        fn sort_key(&self, _field: &str) -> f64 {
            0.0
        }
    }

    #[test]
    fn numeric_key_parses_salary_shapes() {
        assert_eq!(numeric_key("$90k"), 90_000);
        assert_eq!(numeric_key("$80k - $120k"), 80_000);
        assert_eq!(numeric_key("$75,000"), 75_000);
        assert_eq!(numeric_key("75000"), 75_000);
        assert_eq!(numeric_key("Competitive"), 0);
        assert_eq!(numeric_key(""), 0);
    }

    #[test]
    fn default_criteria_is_identity() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_identity());
        assert!(criteria.matches(&Row {
            title: "Engineer",
            location: "NY",
            salary: "$90k",
        }));
    }

    #[test]
    fn text_match_is_case_insensitive_substring() {
        let criteria = FilterCriteria::new().with_text("ENG");
        assert!(criteria.matches(&Row {
            title: "Software Engineer",
            location: "NY",
            salary: "$90k",
        }));
        assert!(!criteria.matches(&Row {
            title: "Nurse",
            location: "NY",
            salary: "$40k",
        }));
    }

    #[test]
    fn unset_categorical_is_wildcard_and_set_is_exact() {
        let mut criteria = FilterCriteria::new();
        criteria.set_categorical("location", Some("NY".to_string()));
        assert!(criteria.matches(&Row {
            title: "Engineer",
            location: "NY",
            salary: "$90k",
        }));
        assert!(!criteria.matches(&Row {
            title: "Engineer",
            location: "Austin, TX",
            salary: "$90k",
        }));

        criteria.set_categorical("location", None);
        assert!(criteria.matches(&Row {
            title: "Engineer",
            location: "Austin, TX",
            salary: "$90k",
        }));
    }

    #[test]
    fn numeric_range_is_inclusive() {
        let criteria = FilterCriteria::new().with_numeric_range("salary", 90_000, 90_000);
        assert!(criteria.matches(&Row {
            title: "Engineer",
            location: "NY",
            salary: "$90k",
        }));
        assert!(!criteria.matches(&Row {
            title: "Nurse",
            location: "NY",
            salary: "$40k",
        }));
    }

    #[test]
    fn predicates_combine_with_and() {
        let criteria = FilterCriteria::new()
            .with_text("eng")
            .with_numeric_range("salary", 50_000, 200_000);
        assert!(criteria.matches(&Row {
            title: "Engineer",
            location: "NY",
            salary: "$90k",
        }));
        // Passes text, fails salary.
        assert!(!criteria.matches(&Row {
            title: "Engineering Intern",
            location: "NY",
            salary: "$20k",
        }));
    }
}
