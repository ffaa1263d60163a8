pub mod detail;
pub mod providers;
pub mod recommender;
