//! The runtime crate may be reached through another path.

mod reexport {
    pub use strata_config as runtime;
}

use strata_config::MergeLeft;

#[derive(Default, MergeLeft)]
#[merge(crate = "crate::reexport::runtime")]
pub struct Aliased {
    pub port: u16,
}

fn main() {
    let merged = Aliased::default().merge_left(Aliased { port: 1 });
    assert_eq!(merged.port, 1);
}
