use serde::{Deserialize, Serialize};

use super::domain::{Application, Availability, Category, ExperienceBand, HourlyRate};

/// Request body for the applications backend, keyed in snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub category: Category,
    pub experience: ExperienceBand,
    pub portfolio: String,
    pub project1: String,
    pub project2: String,
    pub project3: String,
    pub hourly_rate: HourlyRate,
    pub availability: Availability,
    pub why_on_swift: String,
}

impl From<&Application> for ApplicationPayload {
    fn from(application: &Application) -> Self {
        let [project1, project2, project3] = application.projects.clone();
        Self {
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            category: application.category,
            experience: application.experience,
            portfolio: application.portfolio.clone(),
            project1,
            project2,
            project3,
            hourly_rate: application.hourly_rate,
            availability: application.availability,
            why_on_swift: application.why_on_swift.clone(),
        }
    }
}
