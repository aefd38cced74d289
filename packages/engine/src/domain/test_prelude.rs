//! Shared configuration for the property-test modules.

use proptest::test_runner::Config;

/// Proptest configuration with test logging initialized.
///
/// Case count is kept moderate; the playout properties run a full game per
/// case.
pub fn proptest_config() -> Config {
    engine_test_support::test_logging::init();
    Config {
        cases: 64,
        ..Config::default()
    }
}
