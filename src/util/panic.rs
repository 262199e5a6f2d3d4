/// Asserts that running `$run` panics, catching the panic so that the test can continue. Any
/// values created inside the block are dropped during unwinding.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "block was expected to panic but returned normally")
    };
    ($run:block, $msg:literal) => {
        let outcome = std::panic::catch_unwind(|| $run);
        assert!(outcome.is_err(), $msg);
        println!("^ expected panic caught");
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
