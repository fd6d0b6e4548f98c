// Per-frame logging for scroll animation; compiled out of release builds.
#[cfg(debug_assertions)]
macro_rules! trace_hot_path {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
macro_rules! trace_hot_path {
    ($($arg:tt)*) => {};
}

pub(crate) use trace_hot_path;
