pub mod cli;
pub mod config;
pub mod doxygen;
pub mod github;
pub mod output;
pub mod run;
