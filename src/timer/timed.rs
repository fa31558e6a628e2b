//! Function wrapping
//!
//! [`Timed`] is the decorator form of a timer: it owns a function and its own
//! timer, and every call runs inside a timing scope.

use std::any;
use std::fmt;

use crate::timer::Timeprint;

/// Calling convention shared by plain functions and closures.
///
/// Arguments are passed as a tuple, so `f(1, 2, 3)` becomes
/// `timed.call((1, 2, 3))`. Implemented for `Fn` with up to eight arguments.
pub trait Invoke<Args> {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg),*> Invoke<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Ret,
        {
            type Output = Ret;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Ret {
                (self)($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A);
impl_invoke!(A, B);
impl_invoke!(A, B, C);
impl_invoke!(A, B, C, D);
impl_invoke!(A, B, C, D, E);
impl_invoke!(A, B, C, D, E, G);
impl_invoke!(A, B, C, D, E, G, H);
impl_invoke!(A, B, C, D, E, G, H, I);

/// A function whose calls are timed.
pub struct Timed<F> {
    func: F,
    timer: Timeprint,
}

impl<F> Timed<F> {
    pub(crate) fn new(func: F, timer: Timeprint) -> Self {
        Self { func, timer }
    }

    /// Label used in reports: an explicit name, the function's own name, or
    /// the default label when the callable has no name.
    pub fn name(&self) -> &str {
        self.timer
            .label()
            .unwrap_or(&self.timer.config().default_label)
    }

    pub fn inner(&self) -> &F {
        &self.func
    }

    pub fn into_inner(self) -> F {
        self.func
    }

    /// Call the wrapped function, reporting once it returns or unwinds.
    pub fn call<Args>(&self, args: Args) -> F::Output
    where
        F: Invoke<Args>,
    {
        let _scope = self.timer.enter();
        self.func.invoke(args)
    }
}

impl<F> fmt::Debug for Timed<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timed").field("name", &self.name()).finish()
    }
}

/// Name of a function item, taken from the last segment of its type path.
///
/// Generic arguments are dropped, and closures resolve to the function
/// they are defined in. Anything else that is callable, such as function
/// pointers, references or smart pointers around a closure, has no name of
/// its own and yields `None`.
pub(crate) fn function_name<F>() -> Option<String> {
    let full = any::type_name::<F>();
    if ["fn(", "unsafe ", "extern ", "&", "*", "dyn ", "("]
        .iter()
        .any(|prefix| full.starts_with(prefix))
    {
        return None;
    }

    // Path with every `<...>` group removed.
    let mut path = String::with_capacity(full.len());
    let mut depth = 0usize;
    for c in full.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            _ if depth == 0 => path.push(c),
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }

    let name = path
        .rsplit("::")
        .find(|segment| !segment.is_empty() && !segment.starts_with("{{"))?;
    // Function items are snake_case; a capitalised segment is a type such
    // as `Box` or `Arc` wrapping the callable.
    if !name.starts_with(|c: char| c == '_' || c.is_ascii_lowercase()) {
        return None;
    }
    Some(name.to_string())
}
