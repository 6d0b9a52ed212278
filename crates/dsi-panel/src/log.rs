//! Logging shim
//!
//! Routes driver log lines to `defmt` on target builds and to `tracing` on
//! host builds. With neither feature enabled the arguments are still
//! type-checked but nothing is emitted.
//!
//! Format strings must use plain `{}` placeholders only so they stay valid
//! for both back ends.

macro_rules! panel_log {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        defmt::$level!($($arg)+);
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            let _ = format_args!($($arg)+);
        }
    }};
}

macro_rules! panel_debug {
    ($($arg:tt)+) => {
        panel_log!(debug, $($arg)+)
    };
}

macro_rules! panel_info {
    ($($arg:tt)+) => {
        panel_log!(info, $($arg)+)
    };
}

macro_rules! panel_warn {
    ($($arg:tt)+) => {
        panel_log!(warn, $($arg)+)
    };
}

macro_rules! panel_error {
    ($($arg:tt)+) => {
        panel_log!(error, $($arg)+)
    };
}
