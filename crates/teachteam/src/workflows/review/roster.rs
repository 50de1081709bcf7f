use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::domain::Applicant;
use crate::storage::{KeyValueStore, TUTOR_APPLICATION_KEY};
use crate::workflows::intake::TutorApplication;

/// Name shown when the submitted application left the name blank.
pub const FALLBACK_APPLICANT_NAME: &str = "Test User";

/// Demo applicants that always follow the submitted application.
pub fn seed_applicants() -> Vec<Applicant> {
    vec![
        Applicant {
            name: "Leo Wang".to_string(),
            course: "COSC2761".to_string(),
            availability: "Full-time".to_string(),
            skills: "Java, Spring Boot".to_string(),
            credentials: "Bachelor of CS".to_string(),
        },
        Applicant {
            name: "Jess Smith".to_string(),
            course: "COSC2531".to_string(),
            availability: "Casual".to_string(),
            skills: "Python, Django".to_string(),
            credentials: "PhD in AI".to_string(),
        },
    ]
}

/// Ordered, name-unique list of applicants under review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    applicants: Vec<Applicant>,
}

impl Roster {
    /// Keeps the first applicant for each name.
    pub fn from_applicants(applicants: impl IntoIterator<Item = Applicant>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for applicant in applicants {
            if seen.insert(applicant.name.clone()) {
                unique.push(applicant);
            } else {
                warn!(name = %applicant.name, "dropping duplicate roster applicant");
            }
        }
        Self { applicants: unique }
    }

    /// One-shot composition of the stored tutor application (if any) and the seed applicants.
    pub fn hydrate<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        let submitted = match storage.load(TUTOR_APPLICATION_KEY) {
            Ok(Some(blob)) => match decode_application(&blob) {
                Ok(application) => Some(applicant_from_application(&application)),
                Err(reason) => {
                    warn!(error = %reason, "ignoring unreadable tutor application");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "tutor application unavailable");
                None
            }
        };

        Self::from_applicants(submitted.into_iter().chain(seed_applicants()))
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn get(&self, name: &str) -> Option<&Applicant> {
        self.applicants
            .iter()
            .find(|applicant| applicant.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }

    /// Case-insensitive substring filter followed by an optional stable, case-insensitive sort.
    pub fn search(&self, query: &RosterQuery) -> Vec<&Applicant> {
        let needle = query.query.to_lowercase();
        let mut matches: Vec<&Applicant> = self
            .applicants
            .iter()
            .filter(|applicant| {
                [
                    &applicant.name,
                    &applicant.course,
                    &applicant.availability,
                    &applicant.skills,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect();

        if let Some(field) = query.sort_by {
            matches.sort_by_cached_key(|applicant| field.key(applicant).to_lowercase());
        }
        matches
    }
}

/// A stored application must be an object carrying a `selectedCourses` list; the form
/// defaults the remaining fields.
fn decode_application(blob: &str) -> Result<TutorApplication, String> {
    let value: Value = serde_json::from_str(blob).map_err(|err| err.to_string())?;
    match value.get("selectedCourses") {
        Some(Value::Array(_)) => serde_json::from_value(value).map_err(|err| err.to_string()),
        Some(_) => Err("selectedCourses is not a list".to_string()),
        None => Err("record has no selectedCourses".to_string()),
    }
}

pub fn applicant_from_application(application: &TutorApplication) -> Applicant {
    let name = application.name.trim();
    Applicant {
        name: if name.is_empty() {
            FALLBACK_APPLICANT_NAME.to_string()
        } else {
            name.to_string()
        },
        course: application.selected_courses.join(", "),
        availability: application.availability.clone(),
        skills: application.skills.clone(),
        credentials: application.credentials.clone(),
    }
}

/// Free-text search and sort over the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub query: String,
    /// An empty value means no sort, as the "-- Sort By --" option sends.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sort_by: Option<SortField>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<SortField>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(field) => field.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Course,
    Availability,
}

impl SortField {
    fn key(self, applicant: &Applicant) -> &str {
        match self {
            SortField::Course => &applicant.course,
            SortField::Availability => &applicant.availability,
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "course" => Ok(SortField::Course),
            "availability" => Ok(SortField::Availability),
            other => Err(format!(
                "unknown sort field '{other}' (expected course or availability)"
            )),
        }
    }
}
