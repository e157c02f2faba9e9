pub mod aggregate;
pub mod compare;
pub mod insights;
pub mod streaks;
