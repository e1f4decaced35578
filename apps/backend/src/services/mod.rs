//! Application services layered over the repository

pub mod study;
pub mod transfer;

pub use study::StudyService;
