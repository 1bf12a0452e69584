pub use learnhub_models::courses::*;
