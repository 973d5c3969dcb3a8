pub mod search_results_page;
pub mod user_profile;

pub use search_results_page::SearchResultsPage;
pub use user_profile::UserProfile;
