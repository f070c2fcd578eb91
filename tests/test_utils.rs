#![allow(dead_code)] // Each test binary uses its own subset of these helpers.

use pricer_lib::{CalibrationConfig, OptionContract, OptionKind};

/// The workhorse fixture: S=K=100, T=1y, r=5%, sigma=20%, q=0.
pub fn atm_call() -> OptionContract {
    OptionContract::european(100.0, 100.0, 1.0, 0.05, 0.20, 0.0, OptionKind::Call)
}

pub fn atm_put() -> OptionContract {
    OptionContract::european(100.0, 100.0, 1.0, 0.05, 0.20, 0.0, OptionKind::Put)
}

/// Same fixture with a 2% continuous dividend yield.
pub fn atm_call_with_dividend() -> OptionContract {
    OptionContract::european(100.0, 100.0, 1.0, 0.05, 0.20, 0.02, OptionKind::Call)
}

pub fn create_test_config() -> CalibrationConfig {
    CalibrationConfig::production()
}
