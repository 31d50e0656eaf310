pub mod simplify;
pub mod summary;
pub mod validation;
