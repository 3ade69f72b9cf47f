pub mod annotation;
pub mod errors;
pub mod logging;
