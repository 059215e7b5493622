//! Every supported shape derives without extra imports.

use strata_config::MergeLeft;

#[derive(Default, MergeLeft)]
pub struct Named {
    pub a: u8,
    b: String,
    #[merge(skip)]
    pub c: Vec<u8>,
}

#[derive(Default, MergeLeft)]
pub struct Tuple(pub u8, String);

#[derive(Default, MergeLeft)]
pub struct Unit;

#[derive(Default, MergeLeft)]
pub struct Generic<T, U: Clone> {
    pub t: T,
    pub u: Option<U>,
}

#[derive(Default, PartialEq, MergeLeft)]
pub enum Mode {
    #[default]
    Off,
    On,
}

fn main() {
    let named = Named::default().merge_left(Named::default());
    let _ = (named.a, named.b, named.c);
    let tuple = Tuple::default().merge_left(Tuple(1, String::new()));
    let _ = (tuple.0, tuple.1);
    let _ = Unit.merge_left(Unit);
    let generic: Generic<Named, u8> = Generic::default().merge_left(Generic::default());
    let _ = generic.u;
    let _ = Mode::Off.merge_left(Mode::On);
}
