pub use learnhub_models::users::*;
