//! Tutor application intake and the demo reviewer login that gate the review panel.

pub mod application;
pub mod login;
pub mod router;

pub use application::{
    submit_application, ApplicationFormError, ApplicationSubmitError, MissingField,
    TutorApplication, AVAILABILITY_OPTIONS, COURSE_OPTIONS, ROLE_OPTIONS,
};
pub use login::{authenticate, seed_demo_user, LoginAttempt, LoginError, UserCredentials};
pub use router::intake_router;
