//! Shorthand for the default timer

/// Open a timing scope on [`DEFAULT`](crate::DEFAULT).
///
/// * `timeprint!()` returns a guard reporting as `it`
/// * `timeprint!("label")` returns a guard reporting as `label`
/// * `timeprint!("label", { ... })` times the block and yields its value
///
/// Bind the guard to a named variable (`let _t = timeprint!();`); binding it
/// to `_` drops it, and reports, immediately.
#[macro_export]
macro_rules! timeprint {
    () => {
        $crate::DEFAULT.enter()
    };
    ($label:expr, $body:block) => {{
        let _scope = $crate::DEFAULT.named($label).into_scope();
        $body
    }};
    ($label:expr $(,)?) => {
        $crate::DEFAULT.named($label).into_scope()
    };
}

/// Define a function whose every call is timed.
///
/// The function keeps its name, attributes, doc comments, visibility and
/// signature. Reports use the function name unless a label is given:
///
/// ```
/// timeprint::timed! {
///     /// Adds three numbers.
///     pub fn add(x: i32, y: i32, z: i32) -> i32 {
///         x + y + z
///     }
/// }
///
/// timeprint::timed! {
///     "loading fixtures" => fn load() -> usize { 3 }
/// }
///
/// assert_eq!(add(1, 2, 3), 6);
/// assert_eq!(load(), 3);
/// ```
///
/// Arguments must be plain identifiers; generic functions are not supported.
#[macro_export]
macro_rules! timed {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ($($arg:ident : $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name($($arg: $ty),*) $(-> $ret)? {
            let _scope = $crate::DEFAULT.named(stringify!($name)).into_scope();
            $body
        }
    };
    (
        $label:expr =>
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ($($arg:ident : $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name($($arg: $ty),*) $(-> $ret)? {
            let _scope = $crate::DEFAULT.named($label).into_scope();
            $body
        }
    };
}
