// Logging front-end shared by the core and the runners.
// Every line goes to the `log` facade; with the `defmt` feature it is also
// sent over defmt so probe-attached targets see it.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        $crate::__defmt_log!(info, $($arg)*);
        ::log::info!($($arg)*);
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::__defmt_log!(warn, $($arg)*);
        ::log::warn!($($arg)*);
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::__defmt_log!(error, $($arg)*);
        ::log::error!($($arg)*);
    }};
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        $crate::__defmt_log!(debug, $($arg)*);
        ::log::debug!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
#[doc(hidden)]
#[macro_export]
macro_rules! __defmt_log {
    ($level:ident, $($arg:tt)*) => {
        ::defmt::$level!($($arg)*)
    };
}

#[cfg(not(feature = "defmt"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __defmt_log {
    ($level:ident, $($arg:tt)*) => {};
}
