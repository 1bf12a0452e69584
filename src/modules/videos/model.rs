pub use learnhub_models::videos::*;
