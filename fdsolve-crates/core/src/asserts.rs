//! Leveled assertions for internal invariants of the engine.
//!
//! The level is fixed at compile time. Tests and the `debug-checks` feature enable the more
//! expensive checks, release builds only keep the simple ones.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const FDSOLVE_ASSERT_LEVEL_DEFINITION: u8 = FDSOLVE_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const FDSOLVE_ASSERT_LEVEL_DEFINITION: u8 = FDSOLVE_ASSERT_ADVANCED;

pub const FDSOLVE_ASSERT_SIMPLE: u8 = 1;
pub const FDSOLVE_ASSERT_MODERATE: u8 = 2;
pub const FDSOLVE_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! fdsolve_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FDSOLVE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FDSOLVE_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fdsolve_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FDSOLVE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FDSOLVE_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fdsolve_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::FDSOLVE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FDSOLVE_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fdsolve_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::FDSOLVE_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FDSOLVE_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
