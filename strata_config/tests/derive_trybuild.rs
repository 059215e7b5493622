//! trybuild coverage for `#[derive(MergeLeft)]`.
//!
//! Ensures generated code compiles outside the crate, including when the
//! runtime crate is renamed and its path given with `#[merge(crate = "...")]`
//! and when a local module shares the runtime crate's name.

#[test]
fn derive_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/derive_shapes.rs");
    t.pass("tests/trybuild/crate_path_alias.rs");
    t.pass("tests/trybuild/shadowed_crate_name.rs");
}
