use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Closed option set rendered as a select input on the application form.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    const ALL: &'static [Self];
    const FIELD: Field;

    /// Code exchanged with the form and the backend.
    fn code(self) -> &'static str;

    /// Human readable option text.
    fn label(self) -> &'static str;
}

/// Raised when a select input carries a code outside its closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a known option for {field}")]
pub struct UnknownOption {
    pub field: Field,
    pub value: String,
}

pub fn parse_choice<T: Choice>(raw: &str) -> Result<T, UnknownOption> {
    let trimmed = raw.trim();
    T::ALL
        .iter()
        .copied()
        .find(|option| option.code() == trimmed)
        .ok_or_else(|| UnknownOption {
            field: T::FIELD,
            value: raw.to_string(),
        })
}

/// One entry of a select input, as presented to the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn options_of<T: Choice>(selected: Option<T>) -> Vec<ChoiceOption> {
    T::ALL
        .iter()
        .map(|option| ChoiceOption {
            code: option.code(),
            label: option.label(),
            selected: selected == Some(*option),
        })
        .collect()
}

/// Primary service category offered by the freelancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "logo-brand")]
    LogoBrand,
    #[serde(rename = "social-graphics")]
    SocialGraphics,
    #[serde(rename = "copywriting")]
    Copywriting,
    #[serde(rename = "content-writing")]
    ContentWriting,
    #[serde(rename = "social-management")]
    SocialManagement,
    #[serde(rename = "virtual-assistant")]
    VirtualAssistant,
    #[serde(rename = "digital-marketing")]
    DigitalMarketing,
    #[serde(rename = "frontend-dev")]
    FrontendDev,
    #[serde(rename = "backend-dev")]
    BackendDev,
    #[serde(rename = "video-editing")]
    VideoEditing,
    #[serde(rename = "ui-ux")]
    UiUx,
}

impl Choice for Category {
    const ALL: &'static [Self] = &[
        Self::LogoBrand,
        Self::SocialGraphics,
        Self::Copywriting,
        Self::ContentWriting,
        Self::SocialManagement,
        Self::VirtualAssistant,
        Self::DigitalMarketing,
        Self::FrontendDev,
        Self::BackendDev,
        Self::VideoEditing,
        Self::UiUx,
    ];
    const FIELD: Field = Field::Category;

    fn code(self) -> &'static str {
        match self {
            Self::LogoBrand => "logo-brand",
            Self::SocialGraphics => "social-graphics",
            Self::Copywriting => "copywriting",
            Self::ContentWriting => "content-writing",
            Self::SocialManagement => "social-management",
            Self::VirtualAssistant => "virtual-assistant",
            Self::DigitalMarketing => "digital-marketing",
            Self::FrontendDev => "frontend-dev",
            Self::BackendDev => "backend-dev",
            Self::VideoEditing => "video-editing",
            Self::UiUx => "ui-ux",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::LogoBrand => "Logo & Brand Identity Design",
            Self::SocialGraphics => "Social Media Graphics",
            Self::Copywriting => "Copywriting (Sales Copy)",
            Self::ContentWriting => "Content Writing (Blogs & SEO)",
            Self::SocialManagement => "Social Media Management",
            Self::VirtualAssistant => "Virtual Assistance",
            Self::DigitalMarketing => "Digital Marketing (FB/IG Ads)",
            Self::FrontendDev => "Frontend Development",
            Self::BackendDev => "Backend Development",
            Self::VideoEditing => "Video Editing",
            Self::UiUx => "Product Design (UI/UX)",
        }
    }
}

/// Years of professional experience, bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceBand {
    #[serde(rename = "0-2")]
    ZeroToTwo,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "6-10")]
    SixToTen,
    #[serde(rename = "10+")]
    TenPlus,
}

impl ExperienceBand {
    /// Three or more years.
    pub const fn is_seasoned(self) -> bool {
        !matches!(self, Self::ZeroToTwo)
    }
}

impl Choice for ExperienceBand {
    const ALL: &'static [Self] = &[
        Self::ZeroToTwo,
        Self::ThreeToFive,
        Self::SixToTen,
        Self::TenPlus,
    ];
    const FIELD: Field = Field::Experience;

    fn code(self) -> &'static str {
        match self {
            Self::ZeroToTwo => "0-2",
            Self::ThreeToFive => "3-5",
            Self::SixToTen => "6-10",
            Self::TenPlus => "10+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ZeroToTwo => "0–2 years",
            Self::ThreeToFive => "3–5 years",
            Self::SixToTen => "6–10 years",
            Self::TenPlus => "10+ years",
        }
    }
}

/// Hourly rate band in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HourlyRate {
    #[serde(rename = "15-30")]
    FifteenToThirty,
    #[serde(rename = "30-50")]
    ThirtyToFifty,
    #[serde(rename = "50-80")]
    FiftyToEighty,
    #[serde(rename = "80-120")]
    EightyToOneTwenty,
    #[serde(rename = "120+")]
    OneTwentyPlus,
}

impl Choice for HourlyRate {
    const ALL: &'static [Self] = &[
        Self::FifteenToThirty,
        Self::ThirtyToFifty,
        Self::FiftyToEighty,
        Self::EightyToOneTwenty,
        Self::OneTwentyPlus,
    ];
    const FIELD: Field = Field::HourlyRate;

    fn code(self) -> &'static str {
        match self {
            Self::FifteenToThirty => "15-30",
            Self::ThirtyToFifty => "30-50",
            Self::FiftyToEighty => "50-80",
            Self::EightyToOneTwenty => "80-120",
            Self::OneTwentyPlus => "120+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FifteenToThirty => "$15–30",
            Self::ThirtyToFifty => "$30–50",
            Self::FiftyToEighty => "$50–80",
            Self::EightyToOneTwenty => "$80–120",
            Self::OneTwentyPlus => "$120+",
        }
    }
}

/// Weekly availability band in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "10-20")]
    TenToTwenty,
    #[serde(rename = "20-30")]
    TwentyToThirty,
    #[serde(rename = "30-40")]
    ThirtyToForty,
    #[serde(rename = "40+")]
    FortyPlus,
}

impl Choice for Availability {
    const ALL: &'static [Self] = &[
        Self::TenToTwenty,
        Self::TwentyToThirty,
        Self::ThirtyToForty,
        Self::FortyPlus,
    ];
    const FIELD: Field = Field::Availability;

    fn code(self) -> &'static str {
        match self {
            Self::TenToTwenty => "10-20",
            Self::TwentyToThirty => "20-30",
            Self::ThirtyToForty => "30-40",
            Self::FortyPlus => "40+",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::TenToTwenty => "10–20 hours",
            Self::TwentyToThirty => "20–30 hours",
            Self::ThirtyToForty => "30–40 hours",
            Self::FortyPlus => "40+ hours",
        }
    }
}

/// Form inputs in display order. Serialized with the form's camelCase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Category,
    Experience,
    Portfolio,
    Project1,
    Project2,
    Project3,
    HourlyRate,
    Availability,
    WhyOnSwift,
}

impl Field {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::FullName,
            Self::Email,
            Self::Phone,
            Self::Category,
            Self::Experience,
            Self::Portfolio,
            Self::Project1,
            Self::Project2,
            Self::Project3,
            Self::HourlyRate,
            Self::Availability,
            Self::WhyOnSwift,
        ]
    }

    pub const fn form_name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Category => "category",
            Self::Experience => "experience",
            Self::Portfolio => "portfolio",
            Self::Project1 => "project1",
            Self::Project2 => "project2",
            Self::Project3 => "project3",
            Self::HourlyRate => "hourlyRate",
            Self::Availability => "availability",
            Self::WhyOnSwift => "whyOnSwift",
        }
    }

    /// Key used by the applications backend.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::HourlyRate => "hourly_rate",
            Self::WhyOnSwift => "why_on_swift",
            other => other.form_name(),
        }
    }

    pub const fn is_choice(self) -> bool {
        matches!(
            self,
            Self::Category | Self::Experience | Self::HourlyRate | Self::Availability
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

/// Mutable form state. Text inputs start empty and selects start unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "deserialize_optional_choice")]
    pub category: Option<Category>,
    #[serde(deserialize_with = "deserialize_optional_choice")]
    pub experience: Option<ExperienceBand>,
    pub portfolio: String,
    pub project1: String,
    pub project2: String,
    pub project3: String,
    #[serde(deserialize_with = "deserialize_optional_choice")]
    pub hourly_rate: Option<HourlyRate>,
    #[serde(deserialize_with = "deserialize_optional_choice")]
    pub availability: Option<Availability>,
    pub why_on_swift: String,
}

impl ApplicationDraft {
    /// Apply a raw input value. An empty value clears a select.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), UnknownOption> {
        match field {
            Field::FullName => self.full_name = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::Phone => self.phone = value.to_string(),
            Field::Category => self.category = optional_choice(value)?,
            Field::Experience => self.experience = optional_choice(value)?,
            Field::Portfolio => self.portfolio = value.to_string(),
            Field::Project1 => self.project1 = value.to_string(),
            Field::Project2 => self.project2 = value.to_string(),
            Field::Project3 => self.project3 = value.to_string(),
            Field::HourlyRate => self.hourly_rate = optional_choice(value)?,
            Field::Availability => self.availability = optional_choice(value)?,
            Field::WhyOnSwift => self.why_on_swift = value.to_string(),
        }
        Ok(())
    }

    /// Options of a select input with the current choice marked. Empty for text inputs.
    pub fn options(&self, field: Field) -> Vec<ChoiceOption> {
        match field {
            Field::Category => options_of(self.category),
            Field::Experience => options_of(self.experience),
            Field::HourlyRate => options_of(self.hourly_rate),
            Field::Availability => options_of(self.availability),
            _ => Vec::new(),
        }
    }
}

fn optional_choice<T: Choice>(raw: &str) -> Result<Option<T>, UnknownOption> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_choice(raw).map(Some)
    }
}

pub(crate) fn deserialize_optional_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(raw) => optional_choice(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// A draft that passed every field rule. Values are frozen from this point on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) category: Category,
    pub(crate) experience: ExperienceBand,
    pub(crate) portfolio: String,
    pub(crate) projects: [String; 3],
    pub(crate) hourly_rate: HourlyRate,
    pub(crate) availability: Availability,
    pub(crate) why_on_swift: String,
}

impl Application {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn experience(&self) -> ExperienceBand {
        self.experience
    }

    pub fn portfolio(&self) -> &str {
        &self.portfolio
    }

    pub fn projects(&self) -> &[String; 3] {
        &self.projects
    }

    pub fn hourly_rate(&self) -> HourlyRate {
        self.hourly_rate
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn why_on_swift(&self) -> &str {
        &self.why_on_swift
    }
}
