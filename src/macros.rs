// Crate-private logging. Every event goes through `vlog!` under one target; without the
// `tracing` feature the arguments are dropped unevaluated.

#[cfg(feature = "tracing")]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "sticky_virtualizer", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! vlog {
    ($level:ident, $($tt:tt)*) => {};
}

/// Per-query detail (mode, range, distribution shares).
macro_rules! vtrace {
    ($($tt:tt)*) => {
        vlog!(trace, $($tt)*)
    };
}

/// Index construction.
macro_rules! vdebug {
    ($($tt:tt)*) => {
        vlog!(debug, $($tt)*)
    };
}

/// Rejected entries or options, logged before the error is returned.
macro_rules! vwarn {
    ($($tt:tt)*) => {
        vlog!(warn, $($tt)*)
    };
}
