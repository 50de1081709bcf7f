use crate::cli::ReviewCommand;
use crate::infra::bootstrap;
use clap::Args;
use teachteam::error::AppError;
use teachteam::workflows::intake::{
    authenticate, submit_application, LoginAttempt, TutorApplication,
};
use teachteam::workflows::review::{
    Rank, ReviewPanel, ReviewRow, RosterQuery, Selection, SortField,
};

#[derive(Args, Debug, Default)]
pub(crate) struct RosterArgs {
    /// Case-insensitive text matched against name, course, availability, and skills
    #[arg(long, default_value = "")]
    pub(crate) query: String,
    /// Sort by `course` or `availability`
    #[arg(long)]
    pub(crate) sort_by: Option<SortField>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ApplyArgs {
    #[arg(long)]
    pub(crate) name: String,
    /// Repeat for each role (Tutor, Lab Assistant)
    #[arg(long = "role")]
    pub(crate) roles: Vec<String>,
    /// Repeat for each course code
    #[arg(long = "course")]
    pub(crate) courses: Vec<String>,
    #[arg(long, default_value = "")]
    pub(crate) availability: String,
    #[arg(long, default_value = "")]
    pub(crate) skills: String,
    #[arg(long, default_value = "")]
    pub(crate) credentials: String,
}

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) password: String,
    /// Confirms the CAPTCHA step was completed
    #[arg(long)]
    pub(crate) captcha_verified: bool,
}

pub(crate) fn run_review(command: ReviewCommand) -> Result<(), AppError> {
    let (_, storage) = bootstrap(true)?;
    let mut panel = ReviewPanel::open(storage);

    match command {
        ReviewCommand::List => {}
        ReviewCommand::Toggle { name } => {
            let selection = panel.toggle(&name)?;
            print_selection(&name, &selection);
        }
        ReviewCommand::Comment { name, text } => {
            let selection = panel.update_comment(&name, &text)?;
            print_selection(&name, &selection);
        }
        ReviewCommand::Rank { name, value } => {
            let selection = panel.update_rank(&name, Rank::parse(&value))?;
            print_selection(&name, &selection);
        }
    }

    println!("Lecturer Review Panel");
    let rows = panel.rows();
    if rows.is_empty() {
        println!("  No applicant data found.");
    }
    for row in &rows {
        println!("{}", render_row(row));
    }
    Ok(())
}

pub(crate) fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let (_, storage) = bootstrap(true)?;
    let panel = ReviewPanel::new(storage);
    let query = RosterQuery {
        query: args.query,
        sort_by: args.sort_by,
    };

    for applicant in panel.roster().search(&query) {
        println!(
            "{} - {} - {}\n  Skills: {}",
            applicant.name, applicant.course, applicant.availability, applicant.skills
        );
    }
    Ok(())
}

pub(crate) fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let (_, storage) = bootstrap(true)?;
    let application = application_from_args(args);
    submit_application(storage.as_ref(), &application)?;
    println!("Application submitted for {}", application.name.trim());
    Ok(())
}

pub(crate) fn run_login(args: LoginArgs) -> Result<(), AppError> {
    let (_, storage) = bootstrap(true)?;
    let attempt = LoginAttempt {
        email: args.email,
        password: args.password,
        captcha_verified: args.captcha_verified,
    };
    authenticate(storage.as_ref(), &attempt)?;
    println!("Login successful");
    Ok(())
}

fn application_from_args(args: ApplyArgs) -> TutorApplication {
    TutorApplication {
        name: args.name,
        roles: args.roles,
        selected_courses: args.courses,
        availability: args.availability,
        skills: args.skills,
        credentials: args.credentials,
    }
}

fn print_selection(name: &str, selection: &Selection) {
    if selection.is_active() {
        println!(
            "{name}: selected (rank {}, comment {:?})",
            selection.rank, selection.comment
        );
    } else {
        println!("{name}: not selected");
    }
}

fn render_row(row: &ReviewRow) -> String {
    let applicant = &row.stats.applicant;
    let mut lines = vec![format!(
        "- {}{}",
        applicant.name,
        if row.selection.is_some() { " [selected]" } else { "" }
    )];
    lines.push(format!("    Course: {}", applicant.course));
    lines.push(format!("    Availability: {}", applicant.availability));
    lines.push(format!("    Skills: {}", row.skill_tags.join(" | ")));
    lines.push(format!("    Credentials: {}", applicant.credentials));
    if let Some(selection) = &row.selection {
        lines.push(format!("    Rank: {}", selection.rank));
        if !selection.comment.is_empty() {
            lines.push(format!("    Comment: {}", selection.comment));
        }
    }
    if let Some(label) = row.stats.classification().label() {
        lines.push(format!("    {label}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use teachteam::storage::MemoryStore;

    #[test]
    fn render_row_shows_selection_and_label() {
        let mut panel = ReviewPanel::open(MemoryStore::new());
        panel.toggle("Leo Wang").expect("toggle");
        panel
            .update_comment("Leo Wang", "solid backend skills")
            .expect("comment");

        let rows = panel.rows();
        let leo = render_row(&rows[0]);
        assert!(leo.starts_with("- Leo Wang [selected]"));
        assert!(leo.contains("Skills: Java | Spring Boot"));
        assert!(leo.contains("Rank: 1"));
        assert!(leo.contains("Comment: solid backend skills"));
        assert!(leo.ends_with("Most Chosen"));

        let jess = render_row(&rows[1]);
        assert!(!jess.contains("Rank:"));
        assert!(jess.ends_with("Not Selected"));
    }

    #[test]
    fn apply_args_map_to_application_fields() {
        let application = application_from_args(ApplyArgs {
            name: "Zehua Liu".to_string(),
            roles: vec!["Tutor".to_string()],
            courses: vec!["COSC2758".to_string()],
            availability: "Casual".to_string(),
            skills: "Rust".to_string(),
            credentials: "BSc".to_string(),
        });
        assert_eq!(application.selected_courses, vec!["COSC2758".to_string()]);
        assert!(application.validate().is_ok());
    }
}
