pub mod exercises;
pub mod pricing;
pub mod simulate;
