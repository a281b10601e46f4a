//! Logging macros that forward to `defmt` or `log`, or compile away.

#![allow(unused_macros)]

#[cfg(all(feature = "log", feature = "defmt", not(doc)))]
compile_error!("features `log` and `defmt` are mutually exclusive");

#[cfg(all(not(doc), feature = "defmt"))]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::trace!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "defmt"))]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::debug!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "defmt"))]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::info!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "defmt"))]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::defmt::warn!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "log", not(feature = "defmt")))]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::log::trace!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "log", not(feature = "defmt")))]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::log::debug!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "log", not(feature = "defmt")))]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::log::info!($s $(, $x)*)
    };
}

#[cfg(all(not(doc), feature = "log", not(feature = "defmt")))]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        ::log::warn!($s $(, $x)*)
    };
}

// Without a logger the arguments are still borrowed so they count as used.
#[cfg(any(doc, not(any(feature = "defmt", feature = "log"))))]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( &$x, )*);
    }};
}

#[cfg(any(doc, not(any(feature = "defmt", feature = "log"))))]
macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( &$x, )*);
    }};
}

#[cfg(any(doc, not(any(feature = "defmt", feature = "log"))))]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( &$x, )*);
    }};
}

#[cfg(any(doc, not(any(feature = "defmt", feature = "log"))))]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($( &$x, )*);
    }};
}
