pub mod bootstrap_tests;
pub mod config_tests;
pub mod extractor_tests;
pub mod validation_tests;
