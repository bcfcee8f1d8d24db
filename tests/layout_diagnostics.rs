//! Build-time layout violations, pinned against the compiler's own output.
//!
//! The snapshots in `tests/ui/*.stderr` track the toolchain's diagnostic
//! format. After a toolchain upgrade, regenerate them with
//! `TRYBUILD=overwrite cargo test --test layout_diagnostics` and review that the
//! rule, declared and actual values are still in the message.

#[test]
#[cfg_attr(miri, ignore)]
fn test_violations_report_declared_and_actual_layout() {
    let cases = trybuild::TestCases::new();
    cases.compile_fail("tests/ui/size_too_small.rs");
    cases.compile_fail("tests/ui/strict_oversize.rs");
    cases.compile_fail("tests/ui/under_aligned.rs");
}
