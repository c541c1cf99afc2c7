pub mod chart;
pub mod config;
pub mod vocabulary;
