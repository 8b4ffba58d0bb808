use crate::infra::read_draft;
use clap::Args;
use onswift_intake::config::AppConfig;
use onswift_intake::error::AppError;
use onswift_intake::telemetry;
use onswift_intake::workflows::intake::{
    char_len, pass_criteria, validate, ApplicationDraft, Field, HttpApplicationGateway,
    IntakeSession, ResetPolicy, SubmitError, SubmitResult, MAX_ANSWER_CHARS, MIN_ANSWER_WORDS,
    THOUGHTFUL_ANSWER_WORDS,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Application draft as JSON with the form's camelCase field names
    #[arg(long)]
    draft: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Application draft as JSON with the form's camelCase field names
    #[arg(long)]
    draft: PathBuf,
    /// Override the configured applications backend base URL
    #[arg(long)]
    base_url: Option<String>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let draft = read_draft(&args.draft)?;
    print!("{}", render_check(&draft));
    Ok(())
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.intake.api_base_url = base_url;
    }
    telemetry::init(&config.telemetry)?;

    let draft = read_draft(&args.draft)?;
    let gateway = Arc::new(HttpApplicationGateway::new(&config.intake.api_base_url)?);
    let mut session =
        IntakeSession::with_draft(gateway, draft).with_reset_policy(config.intake.reset_policy);

    match session.submit().await {
        Ok(report) => {
            println!("{}", render_terminal_screen(report.result));
            if let Some(err) = report.transport_error {
                println!("(delivery failed: {err})");
            }
            session.return_to_form();
            println!("{}", render_return(session.reset_policy(), session.draft()));
        }
        Err(SubmitError::Blocked(errors)) => {
            println!("Submission blocked; fix the following fields:");
            for (field, violation) in errors.iter() {
                println!("- {field}: {violation}");
            }
        }
        Err(SubmitError::InFlight) => println!("A submission is already in progress."),
    }

    Ok(())
}

fn render_check(draft: &ApplicationDraft) -> String {
    let errors = validate(draft);
    let signal = pass_criteria(draft);
    let mut out = String::new();

    out.push_str(&format!("Pass criteria ({}/3 met)\n", signal.met_count()));
    for criterion in signal.criteria() {
        let mark = if criterion.met { "x" } else { " " };
        out.push_str(&format!("[{mark}] {}\n", criterion.label));
    }

    out.push_str("\nSelections\n");
    for field in Field::ordered().into_iter().filter(|field| field.is_choice()) {
        let chosen = draft
            .options(field)
            .into_iter()
            .find(|option| option.selected)
            .map(|option| option.label)
            .unwrap_or("(not selected)");
        out.push_str(&format!("- {field}: {chosen}\n"));
    }

    if errors.is_empty() {
        out.push_str("\nAll fields valid; ready to submit\n");
    } else {
        out.push_str("\nField errors\n");
        for field in Field::ordered() {
            if let Some(violation) = errors.get(field) {
                out.push_str(&format!("- {field}: {violation}\n"));
            }
        }
    }

    out.push_str(&format!(
        "\nWord count: {} (minimum {MIN_ANSWER_WORDS} words, {THOUGHTFUL_ANSWER_WORDS}+ recommended)\n",
        signal.word_count
    ));
    out.push_str(&format!(
        "Answer length: {}/{MAX_ANSWER_CHARS}\n",
        char_len(&draft.why_on_swift)
    ));
    out
}

fn render_return(policy: ResetPolicy, draft: &ApplicationDraft) -> String {
    match policy {
        ResetPolicy::PreserveFields => format!(
            "Your answers are kept. Edit the draft and submit again as {}.",
            draft.full_name
        ),
        ResetPolicy::ClearFields => "The form has been cleared.".to_string(),
    }
}

fn render_terminal_screen(result: SubmitResult) -> &'static str {
    match result {
        SubmitResult::Success => {
            "Application Submitted!\nThanks for applying to OnSwift! We'll review your application within 48 hours and email you next steps."
        }
        SubmitResult::Rejected => {
            "Thanks for your interest\nUnfortunately, your application doesn't meet our current criteria. You're welcome to reapply once you have more experience or a stronger portfolio."
        }
        SubmitResult::NotSubmitted => "Application not submitted.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onswift_intake::workflows::intake::ExperienceBand;

    #[test]
    fn check_lists_errors_in_form_order() {
        let mut draft = ApplicationDraft::default();
        draft.full_name = "Ada Lovelace".to_string();
        draft.experience = Some(ExperienceBand::ThreeToFive);

        let rendered = render_check(&draft);

        assert!(rendered.contains("[x] 3+ years of experience"));
        assert!(rendered.contains("[ ] Portfolio link provided"));
        assert!(!rendered.contains("- fullName"));
        let email = rendered.find("- email:").expect("email listed");
        let answer = rendered.find("- whyOnSwift:").expect("answer listed");
        assert!(email < answer);
        assert!(rendered.contains("Word count: 0"));
        assert!(rendered.contains("Pass criteria (1/3 met)"));
        assert!(rendered.contains("- experience: 3–5 years"));
        assert!(rendered.contains("- category: (not selected)"));
    }

    #[test]
    fn answer_length_counts_utf16_units() {
        let mut draft = ApplicationDraft::default();
        draft.why_on_swift = "😀".repeat(3);

        assert!(render_check(&draft).contains("Answer length: 6/500"));
    }

    #[test]
    fn return_message_follows_reset_policy() {
        let mut draft = ApplicationDraft::default();
        draft.full_name = "Ada Lovelace".to_string();

        assert!(render_return(ResetPolicy::PreserveFields, &draft).contains("Ada Lovelace"));
        assert_eq!(
            render_return(ResetPolicy::ClearFields, &ApplicationDraft::default()),
            "The form has been cleared."
        );
    }

    #[test]
    fn terminal_screens_match_result() {
        assert!(render_terminal_screen(SubmitResult::Success).starts_with("Application Submitted!"));
        assert!(render_terminal_screen(SubmitResult::Rejected).starts_with("Thanks for your interest"));
    }
}
