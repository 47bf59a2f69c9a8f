pub mod badge;
pub mod button;
pub mod card;
pub mod feedback;
pub mod loading_skeleton;
pub mod modal;
pub mod progress;

pub use badge::Badge;
pub use button::{Button, ButtonSize, ButtonVariant};
pub use card::Card;
pub use feedback::{EmptyState, ErrorBanner};
pub use loading_skeleton::SkeletonVariant;
pub use modal::Modal;
pub use progress::Progress;
