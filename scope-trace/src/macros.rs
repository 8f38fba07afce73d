//! Region-marking macros
//!
//! With the `profiling` feature enabled (the default) these expand to a
//! [`ScopedTimer`](crate::ScopedTimer) bound until the end of the enclosing
//! block. Without it they create no timer and do no work.

/// Time the rest of the enclosing block under `name`.
///
/// ```
/// use scope_trace::{profile_scope, SessionWriter};
///
/// fn load(writer: &SessionWriter) {
///     profile_scope!(writer, "load");
///     // ...
/// }
/// ```
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_scope {
    ($writer:expr, $name:expr) => {
        let _profile_scope_timer = $crate::ScopedTimer::new(&$writer, $name);
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($writer:expr, $name:expr) => {
        let _ = &$writer;
    };
}

/// Time the rest of the enclosing function, labelled with its path.
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_function {
    ($writer:expr) => {
        $crate::profile_scope!($writer, $crate::function_name!());
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    ($writer:expr) => {
        let _ = &$writer;
    };
}

/// Fully qualified path of the function the macro is expanded in
#[doc(hidden)]
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}
