use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Candidate shown on the review panel. `name` is the join key to selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub name: String,
    pub course: String,
    pub availability: String,
    pub skills: String,
    pub credentials: String,
}

impl Applicant {
    /// Comma-delimited skills split into trimmed display tags.
    pub fn skill_tags(&self) -> Vec<&str> {
        self.skills.split(',').map(str::trim).collect()
    }
}

/// Reviewer-assigned preference. Lower values are preferred.
///
/// The UI constrains input to 1–5 but the store keeps whatever the input parse produced,
/// including a not-a-number value when the input was not numeric. Not-a-number is written as
/// JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rank(Option<i64>);

impl Rank {
    pub const DEFAULT: Rank = Rank(Some(1));
    pub const NOT_A_NUMBER: Rank = Rank(None);

    pub const fn new(value: i64) -> Self {
        Self(Some(value))
    }

    pub const fn value(self) -> Option<i64> {
        self.0
    }

    pub const fn is_not_a_number(self) -> bool {
        self.0.is_none()
    }

    /// Integer parse with `parseInt` leniency: leading whitespace, an optional sign, then the
    /// longest run of decimal digits. Anything without digits is not-a-number, and so is a
    /// digit run that overflows `i64` (where `parseInt` would keep an imprecise large value).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits_len = unsigned
            .bytes()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if digits_len == 0 {
            return Self::NOT_A_NUMBER;
        }

        match unsigned[..digits_len].parse::<i64>() {
            Ok(value) if negative => Self::new(-value),
            Ok(value) => Self::new(value),
            Err(_) => Self::NOT_A_NUMBER,
        }
    }

    fn from_json(value: Option<serde_json::Number>) -> Self {
        let Some(number) = value else {
            return Self::NOT_A_NUMBER;
        };
        if let Some(int) = number.as_i64() {
            return Self::new(int);
        }
        match number.as_f64() {
            Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                Self::new(float as i64)
            }
            _ => Self::NOT_A_NUMBER,
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for Rank {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("NaN"),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<serde_json::Number>::deserialize(deserializer).map(Rank::from_json)
    }
}

/// Reviewer input attached to one applicant.
///
/// A record that exists but is `unselected` is kept around so re-selecting starts from
/// cleared fields instead of resurrecting the old comment and rank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub comment: String,
    pub rank: Rank,
    pub unselected: bool,
}

impl Selection {
    pub fn fresh() -> Self {
        Self::default()
    }

    pub const fn is_active(&self) -> bool {
        !self.unselected
    }
}

/// Persisted shape of a selection, one element of the `selectedReviewData` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "missing_rank")]
    pub rank: Rank,
    #[serde(default, deserialize_with = "null_as_false")]
    pub unselected: bool,
}

fn missing_rank() -> Rank {
    Rank::NOT_A_NUMBER
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl SelectionEntry {
    pub fn new(name: impl Into<String>, selection: &Selection) -> Self {
        Self {
            name: name.into(),
            comment: selection.comment.clone(),
            rank: selection.rank,
            unselected: selection.unselected,
        }
    }

    pub fn into_parts(self) -> (String, Selection) {
        (
            self.name,
            Selection {
                comment: self.comment,
                rank: self.rank,
                unselected: self.unselected,
            },
        )
    }
}

/// Derived shortlist label; at most one applies to an applicant at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    MostChosen,
    LeastChosen,
    Unchosen,
    /// Selected but not covered by any labelling rule.
    Unlabeled,
}

impl Classification {
    pub const fn is_most_chosen(self) -> bool {
        matches!(self, Classification::MostChosen)
    }

    pub const fn is_least_chosen(self) -> bool {
        matches!(self, Classification::LeastChosen)
    }

    pub const fn is_unchosen(self) -> bool {
        matches!(self, Classification::Unchosen)
    }

    pub const fn label(self) -> Option<&'static str> {
        match self {
            Classification::MostChosen => Some("Most Chosen"),
            Classification::LeastChosen => Some("Least Chosen"),
            Classification::Unchosen => Some("Not Selected"),
            Classification::Unlabeled => None,
        }
    }
}

/// Applicant paired with the labels computed for the current selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantStats {
    #[serde(flatten)]
    pub applicant: Applicant,
    pub is_most_chosen: bool,
    pub is_least_chosen: bool,
    pub is_unchosen: bool,
}

impl ApplicantStats {
    pub fn new(applicant: Applicant, classification: Classification) -> Self {
        Self {
            applicant,
            is_most_chosen: classification.is_most_chosen(),
            is_least_chosen: classification.is_least_chosen(),
            is_unchosen: classification.is_unchosen(),
        }
    }

    pub fn classification(&self) -> Classification {
        if self.is_most_chosen {
            Classification::MostChosen
        } else if self.is_least_chosen {
            Classification::LeastChosen
        } else if self.is_unchosen {
            Classification::Unchosen
        } else {
            Classification::Unlabeled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_parse_follows_lenient_integer_rules() {
        assert_eq!(Rank::parse("3"), Rank::new(3));
        assert_eq!(Rank::parse("  4"), Rank::new(4));
        assert_eq!(Rank::parse("2.9"), Rank::new(2));
        assert_eq!(Rank::parse("5stars"), Rank::new(5));
        assert_eq!(Rank::parse("-1"), Rank::new(-1));
        assert_eq!(Rank::parse("+7"), Rank::new(7));
        assert_eq!(Rank::parse(""), Rank::NOT_A_NUMBER);
        assert_eq!(Rank::parse("abc"), Rank::NOT_A_NUMBER);
        assert_eq!(Rank::parse("-"), Rank::NOT_A_NUMBER);
        assert_eq!(Rank::parse("99999999999999999999"), Rank::NOT_A_NUMBER);
    }

    #[test]
    fn not_a_number_rank_is_written_as_null() {
        let entry = SelectionEntry::new(
            "Leo Wang",
            &Selection {
                comment: String::new(),
                rank: Rank::NOT_A_NUMBER,
                unselected: false,
            },
        );
        let json = serde_json::to_value(&entry).expect("entry serializes");
        assert_eq!(json["rank"], serde_json::Value::Null);
        assert_eq!(Rank::NOT_A_NUMBER.to_string(), "NaN");
    }

    #[test]
    fn lenient_entry_defaults() {
        let entry: SelectionEntry =
            serde_json::from_str(r#"{"name":"Jess Smith","unselected":null}"#)
                .expect("sparse entry deserializes");
        assert_eq!(entry.comment, "");
        assert!(entry.rank.is_not_a_number());
        assert!(!entry.unselected);

        let entry: SelectionEntry =
            serde_json::from_str(r#"{"name":"Jess Smith","comment":"ok","rank":3.0}"#)
                .expect("float rank deserializes");
        assert_eq!(entry.rank, Rank::new(3));

        let entry: SelectionEntry =
            serde_json::from_str(r#"{"name":"Jess Smith","rank":2.5}"#).expect("deserializes");
        assert!(entry.rank.is_not_a_number());
    }

    #[test]
    fn skill_tags_are_trimmed() {
        let applicant = Applicant {
            name: "Leo Wang".to_string(),
            course: "COSC2761".to_string(),
            availability: "Full-time".to_string(),
            skills: "Java, Spring Boot ,SQL".to_string(),
            credentials: "Bachelor of CS".to_string(),
        };
        assert_eq!(applicant.skill_tags(), vec!["Java", "Spring Boot", "SQL"]);
    }

    #[test]
    fn stats_flags_mirror_classification() {
        let applicant = Applicant {
            name: "Alice".to_string(),
            course: String::new(),
            availability: String::new(),
            skills: String::new(),
            credentials: String::new(),
        };
        for classification in [
            Classification::MostChosen,
            Classification::LeastChosen,
            Classification::Unchosen,
            Classification::Unlabeled,
        ] {
            let stats = ApplicantStats::new(applicant.clone(), classification);
            assert_eq!(stats.classification(), classification);
        }
        assert_eq!(Classification::Unlabeled.label(), None);
    }
}
