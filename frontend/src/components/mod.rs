pub mod calendar;
pub mod dashboard;
pub mod header;
pub mod onboarding;
pub mod settings;
pub mod ui;
