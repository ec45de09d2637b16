mod achievements;
mod admin;
mod cuisine;
mod cuisines;
mod home;
mod lesson;
mod login;
mod profile;
mod quiz;
mod signup;
mod skill;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use achievements::AchievementsView;
pub use admin::AdminView;
pub use cuisine::CuisineView;
pub use cuisines::CuisinesView;
pub use home::HomeView;
pub use lesson::LessonView;
pub use login::LoginView;
pub use profile::ProfileView;
pub use quiz::QuizView;
pub use signup::SignupView;
pub use skill::SkillView;
pub use state::{ViewError, ViewState, view_state_from_resource};
