pub mod test_config;
pub mod tester;
pub use test_config::TestConfig;
pub use tester::Tester;
