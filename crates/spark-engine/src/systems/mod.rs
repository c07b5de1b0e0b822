pub mod linking;
pub mod motion;
