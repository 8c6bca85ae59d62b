use quickcheck::{Arbitrary, Gen};
use simplelog::{Config, LevelFilter, TestLogger};

mod ordered;

/// Routes the tree's `trace!` output through the test harness so it only shows up for failing
/// tests. Later calls are no-ops because the logger is already installed.
pub(crate) fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the T into the data structure
    Insert(T),
    /// Remove one copy of the T from the data structure
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(T::arbitrary(g))
        } else {
            Op::Remove(T::arbitrary(g))
        }
    }
}
