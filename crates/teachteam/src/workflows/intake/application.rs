use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::storage::{KeyValueStore, StorageError, TUTOR_APPLICATION_KEY};

pub const ROLE_OPTIONS: [&str; 2] = ["Tutor", "Lab Assistant"];
pub const COURSE_OPTIONS: [&str; 3] = ["COSC2758", "COSC2531", "COSC2761"];
pub const AVAILABILITY_OPTIONS: [&str; 3] = ["Full-time", "Part-time", "Casual"];

/// Tutor application as written to the `tutorApplication` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TutorApplication {
    pub name: String,
    pub roles: Vec<String>,
    pub selected_courses: Vec<String>,
    pub availability: String,
    pub skills: String,
    pub credentials: String,
}

impl TutorApplication {
    /// Every field is required; all gaps are reported together.
    pub fn validate(&self) -> Result<(), ApplicationFormError> {
        let checks = [
            (MissingField::Name, self.name.trim().is_empty()),
            (MissingField::Roles, self.roles.is_empty()),
            (MissingField::Courses, self.selected_courses.is_empty()),
            (MissingField::Availability, self.availability.trim().is_empty()),
            (MissingField::Skills, self.skills.trim().is_empty()),
            (MissingField::Credentials, self.credentials.trim().is_empty()),
        ];

        let missing: Vec<MissingField> = checks
            .into_iter()
            .filter_map(|(field, is_missing)| is_missing.then_some(field))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApplicationFormError { missing })
        }
    }

    /// Add `value` if absent, remove it otherwise, as the form checkboxes do.
    pub fn toggle_role(&mut self, value: &str) {
        toggle_value(&mut self.roles, value);
    }

    pub fn toggle_course(&mut self, value: &str) {
        toggle_value(&mut self.selected_courses, value);
    }
}

fn toggle_value(list: &mut Vec<String>, value: &str) {
    if let Some(position) = list.iter().position(|item| item == value) {
        list.remove(position);
    } else {
        list.push(value.to_string());
    }
}

/// Validate and store the application, replacing any earlier submission.
pub fn submit_application<S: KeyValueStore + ?Sized>(
    storage: &S,
    application: &TutorApplication,
) -> Result<(), ApplicationSubmitError> {
    application.validate()?;
    let blob = serde_json::to_string(application)?;
    storage.save(TUTOR_APPLICATION_KEY, &blob)?;
    info!(
        courses = application.selected_courses.len(),
        roles = application.roles.len(),
        "tutor application submitted"
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Name,
    Roles,
    Courses,
    Availability,
    Skills,
    Credentials,
}

impl MissingField {
    pub const fn label(self) -> &'static str {
        match self {
            MissingField::Name => "name",
            MissingField::Roles => "roles",
            MissingField::Courses => "courses",
            MissingField::Availability => "availability",
            MissingField::Skills => "skills",
            MissingField::Credentials => "credentials",
        }
    }
}

/// The application is missing one or more required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFormError {
    pub missing: Vec<MissingField>,
}

impl fmt::Display for ApplicationFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.missing.iter().map(|field| field.label()).collect();
        write!(f, "please fill in all fields (missing: {})", fields.join(", "))
    }
}

impl std::error::Error for ApplicationFormError {}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationSubmitError {
    #[error(transparent)]
    Invalid(#[from] ApplicationFormError),
    #[error("failed to encode tutor application: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
