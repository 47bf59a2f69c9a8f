pub mod onboarding_wizard;

pub use onboarding_wizard::OnboardingWizard;
