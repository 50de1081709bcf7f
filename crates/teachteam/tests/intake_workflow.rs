//! Application intake feeding the review roster, plus the demo login gate.

use teachteam::storage::{KeyValueStore, MemoryStore, USER_KEY};
use teachteam::workflows::intake::{
    authenticate, seed_demo_user, submit_application, LoginAttempt, LoginError,
    TutorApplication,
};
use teachteam::workflows::review::{Classification, Rank, ReviewPanel};

fn application() -> TutorApplication {
    let mut application = TutorApplication {
        name: "Zehua Liu".to_string(),
        availability: "Part-time".to_string(),
        skills: "React, TypeScript, Java".to_string(),
        credentials: "Master of IT at RMIT".to_string(),
        ..TutorApplication::default()
    };
    application.toggle_role("Tutor");
    application.toggle_course("COSC2758");
    application.toggle_course("COSC2761");
    application
}

#[test]
fn submitted_application_joins_the_review_roster() {
    let storage = MemoryStore::new();
    submit_application(&storage, &application()).expect("application submits");

    let mut panel = ReviewPanel::open(storage);
    let names: Vec<&str> = panel
        .roster()
        .applicants()
        .iter()
        .map(|applicant| applicant.name.as_str())
        .collect();
    assert_eq!(names, vec!["Zehua Liu", "Leo Wang", "Jess Smith"]);
    assert_eq!(
        panel.roster().get("Zehua Liu").map(|a| a.course.as_str()),
        Some("COSC2758, COSC2761")
    );

    panel.toggle("Zehua Liu").expect("toggle");
    panel.update_rank("Zehua Liu", Rank::new(1)).expect("rank");
    panel.toggle("Jess Smith").expect("toggle");
    panel.update_rank("Jess Smith", Rank::new(2)).expect("rank");

    let stats = panel.stats();
    assert_eq!(stats[0].classification(), Classification::MostChosen);
    assert_eq!(stats[1].classification(), Classification::Unchosen);
    assert_eq!(stats[2].classification(), Classification::Unlabeled);
}

#[test]
fn roster_is_not_rehydrated_after_opening() {
    let storage = MemoryStore::new();
    let panel = ReviewPanel::open(storage.clone());
    submit_application(&storage, &application()).expect("application submits");

    assert_eq!(panel.roster().len(), 2);
    assert_eq!(ReviewPanel::open(storage).roster().len(), 3);
}

#[test]
fn demo_login_flow() {
    let storage = MemoryStore::new();
    assert!(seed_demo_user(&storage).expect("seed"));
    assert!(storage.load(USER_KEY).expect("readable").is_some());

    let attempt = LoginAttempt {
        email: "test@rmit.edu.au".to_string(),
        password: "StrongPass123".to_string(),
        captcha_verified: false,
    };
    assert!(matches!(
        authenticate(&storage, &attempt),
        Err(LoginError::CaptchaRequired)
    ));

    let attempt = LoginAttempt {
        captcha_verified: true,
        ..attempt
    };
    authenticate(&storage, &attempt).expect("demo credentials accepted");
}
