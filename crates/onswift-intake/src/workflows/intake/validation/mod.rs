pub(crate) mod rules;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::domain::{Application, ApplicationDraft, Field};
use rules::{
    char_len, is_valid_email, is_valid_url, word_count, MAX_ANSWER_CHARS, MAX_PROJECT_CHARS,
    MIN_ANSWER_WORDS, MIN_NAME_CHARS, MIN_PHONE_CHARS, MIN_PROJECT_CHARS,
};

/// Rule a field value failed. Displays as the message shown under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldViolation {
    NameTooShort,
    InvalidEmail,
    InvalidPhone,
    CategoryRequired,
    ExperienceRequired,
    PortfolioRequired,
    InvalidUrl,
    ProjectTooLong,
    ProjectTooShort,
    HourlyRateRequired,
    AvailabilityRequired,
    AnswerRequired,
    AnswerTooLong,
    AnswerTooFewWords,
}

impl FieldViolation {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NameTooShort => "Name must be at least 2 characters",
            Self::InvalidEmail => "Please enter a valid email address",
            Self::InvalidPhone => "Please enter a valid phone number",
            Self::CategoryRequired => "Please select a category",
            Self::ExperienceRequired => "Please select your experience level",
            Self::PortfolioRequired => "Portfolio link is required",
            Self::InvalidUrl => "Please enter a valid URL",
            Self::ProjectTooLong => "Maximum 100 characters",
            Self::ProjectTooShort => "Please describe your project",
            Self::HourlyRateRequired => "Please select your hourly rate",
            Self::AvailabilityRequired => "Please select your weekly availability",
            Self::AnswerRequired => "This field is required",
            Self::AnswerTooLong => "Maximum 500 characters",
            Self::AnswerTooFewWords => "Please write at least 20 words",
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldViolation {}

impl Serialize for FieldViolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Per-field error map. Valid fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldViolation>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldViolation> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldViolation)> + '_ {
        self.0.iter().map(|(field, violation)| (*field, *violation))
    }
}

impl FromIterator<(Field, FieldViolation)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, FieldViolation)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(|field| field.form_name()).collect();
        write!(f, "{} invalid field(s): {}", fields.len(), fields.join(", "))
    }
}

/// Check one field of the draft, returning the first rule it breaks.
pub fn validate_field(draft: &ApplicationDraft, field: Field) -> Option<FieldViolation> {
    match field {
        Field::FullName => {
            (char_len(&draft.full_name) < MIN_NAME_CHARS).then_some(FieldViolation::NameTooShort)
        }
        Field::Email => (!is_valid_email(&draft.email)).then_some(FieldViolation::InvalidEmail),
        Field::Phone => {
            (char_len(&draft.phone) < MIN_PHONE_CHARS).then_some(FieldViolation::InvalidPhone)
        }
        Field::Category => draft
            .category
            .is_none()
            .then_some(FieldViolation::CategoryRequired),
        Field::Experience => draft
            .experience
            .is_none()
            .then_some(FieldViolation::ExperienceRequired),
        Field::Portfolio => check_portfolio(&draft.portfolio),
        Field::Project1 => check_project(&draft.project1),
        Field::Project2 => check_project(&draft.project2),
        Field::Project3 => check_project(&draft.project3),
        Field::HourlyRate => draft
            .hourly_rate
            .is_none()
            .then_some(FieldViolation::HourlyRateRequired),
        Field::Availability => draft
            .availability
            .is_none()
            .then_some(FieldViolation::AvailabilityRequired),
        Field::WhyOnSwift => check_answer(&draft.why_on_swift),
    }
}

/// Run every field rule against the draft.
pub fn validate(draft: &ApplicationDraft) -> FieldErrors {
    Field::ordered()
        .into_iter()
        .filter_map(|field| validate_field(draft, field).map(|violation| (field, violation)))
        .collect()
}

/// Final gate before submission. Freezes the draft into an [`Application`].
pub fn validate_for_submission(draft: &ApplicationDraft) -> Result<Application, FieldErrors> {
    let errors = validate(draft);
    match (
        errors.is_empty(),
        draft.category,
        draft.experience,
        draft.hourly_rate,
        draft.availability,
    ) {
        (true, Some(category), Some(experience), Some(hourly_rate), Some(availability)) => {
            Ok(Application {
                full_name: draft.full_name.clone(),
                email: draft.email.clone(),
                phone: draft.phone.clone(),
                category,
                experience,
                portfolio: draft.portfolio.clone(),
                projects: [
                    draft.project1.clone(),
                    draft.project2.clone(),
                    draft.project3.clone(),
                ],
                hourly_rate,
                availability,
                why_on_swift: draft.why_on_swift.clone(),
            })
        }
        _ => Err(errors),
    }
}

fn check_portfolio(value: &str) -> Option<FieldViolation> {
    if value.is_empty() {
        Some(FieldViolation::PortfolioRequired)
    } else if !is_valid_url(value) {
        Some(FieldViolation::InvalidUrl)
    } else {
        None
    }
}

fn check_project(value: &str) -> Option<FieldViolation> {
    let len = char_len(value);
    if len > MAX_PROJECT_CHARS {
        Some(FieldViolation::ProjectTooLong)
    } else if len < MIN_PROJECT_CHARS {
        Some(FieldViolation::ProjectTooShort)
    } else {
        None
    }
}

fn check_answer(value: &str) -> Option<FieldViolation> {
    if value.is_empty() {
        Some(FieldViolation::AnswerRequired)
    } else if char_len(value) > MAX_ANSWER_CHARS {
        Some(FieldViolation::AnswerTooLong)
    } else if word_count(value) < MIN_ANSWER_WORDS {
        Some(FieldViolation::AnswerTooFewWords)
    } else {
        None
    }
}
