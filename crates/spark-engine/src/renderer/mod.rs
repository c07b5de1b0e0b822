pub mod frame;
pub mod instance;
