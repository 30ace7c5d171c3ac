//! Diagnostic names for builders and assertions.
//!
//! Names are derived from the function's type, which for a `fn` item is its
//! fully qualified path. Closures only get a synthesized path ending in
//! `{{closure}}`, so define builders and assertions as named functions, or
//! give them an explicit name, if you want readable failure messages.

/// Returns the best-effort name of the function type `F`.
#[must_use]
pub fn function_name<F: ?Sized>() -> &'static str {
    std::any::type_name::<F>()
}

/// Returns the best-effort name of `function`.
#[must_use]
pub fn name_of<F: ?Sized>(_function: &F) -> &'static str {
    function_name::<F>()
}
