pub use learnhub_models::auth::*;
