//! A local item named like the runtime crate does not capture the
//! generated path.

mod settings {
    mod strata_config {}

    use ::strata_config::MergeLeft;

    #[derive(Default, MergeLeft)]
    pub struct Local {
        pub port: u16,
    }
}

use strata_config::MergeLeft;

fn main() {
    let merged = settings::Local::default().merge_left(settings::Local { port: 7 });
    assert_eq!(merged.port, 7);
}
