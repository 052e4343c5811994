//! Native tax rule advisory check interface.

/// Detects platform-native tax rules that conflict with service-side
/// calculation. Returns zero or more advisory notice strings.
pub trait NativeTaxRuleChecker: Send + Sync {
    fn check(&self) -> Vec<String>;
}
