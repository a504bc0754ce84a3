pub mod serve;
pub mod tick;
