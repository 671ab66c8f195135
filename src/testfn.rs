// # Test Function Forms
//
// This module defines the callable side of the dispatch engine: the closed
// set of shapes a test function may take, and the conversion that binds an
// arbitrary caller-supplied closure to one of them.
//
// ## Accepted Forms
//
// A test function takes the case alone or the case with its index, and
// either returns nothing or returns a continue verdict:
//
// - `FnMut(&T)`
// - `FnMut(&T) -> bool`
// - `FnMut(usize, &T)`
// - `FnMut(usize, &T) -> bool`
//
// The index parameter is exactly `usize` and the verdict is exactly `bool`;
// there are no coercions. Anything outside these four shapes has no
// [`IntoTestFn`] impl and is rejected when the run call is compiled.
//
// ## CRITICAL: Verdict Semantics
//
// The two verdict-returning forms control early stop: the run continues
// while the verdict is `true` and stops immediately after the invocation
// that returns `false`. The verdict-free forms always continue. [`call`]
// adapts all four forms to one internal convention so the invocation loop
// never needs to know which form it is driving.
//
// [`call`]: TestFn::call

use std::fmt;

/// How a bound test function expects to be called and interpreted.
///
/// Derived from the [`TestFn`] variant, never stored across runs: every
/// run call rebinds its callable and classifies it afresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// The function takes the case index as its first parameter.
    pub expects_index: bool,
    /// The function returns a continue verdict.
    pub expects_result: bool,
}

/// A test function bound to one of the four accepted forms.
///
/// This is a closed union; each variant is one calling convention. Values
/// are normally produced implicitly through [`IntoTestFn`] at the run call
/// site, but the per-variant constructors are available when a form must
/// be selected explicitly (for example, for a closure whose parameter
/// types would otherwise need annotating).
pub enum TestFn<'f, T> {
    /// `FnMut(&T)`
    Plain(Box<dyn FnMut(&T) + 'f>),
    /// `FnMut(&T) -> bool`
    Checked(Box<dyn FnMut(&T) -> bool + 'f>),
    /// `FnMut(usize, &T)`
    Indexed(Box<dyn FnMut(usize, &T) + 'f>),
    /// `FnMut(usize, &T) -> bool`
    IndexedChecked(Box<dyn FnMut(usize, &T) -> bool + 'f>),
}

impl<'f, T> TestFn<'f, T> {
    pub fn plain(f: impl FnMut(&T) + 'f) -> Self {
        Self::Plain(Box::new(f))
    }

    pub fn checked(f: impl FnMut(&T) -> bool + 'f) -> Self {
        Self::Checked(Box::new(f))
    }

    pub fn indexed(f: impl FnMut(usize, &T) + 'f) -> Self {
        Self::Indexed(Box::new(f))
    }

    pub fn indexed_checked(f: impl FnMut(usize, &T) -> bool + 'f) -> Self {
        Self::IndexedChecked(Box::new(f))
    }

    /// Classifies this function's calling convention.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Plain(_) => Shape {
                expects_index: false,
                expects_result: false,
            },
            Self::Checked(_) => Shape {
                expects_index: false,
                expects_result: true,
            },
            Self::Indexed(_) => Shape {
                expects_index: true,
                expects_result: false,
            },
            Self::IndexedChecked(_) => Shape {
                expects_index: true,
                expects_result: true,
            },
        }
    }

    /// Invokes the function for one case and returns the continue verdict.
    /// Verdict-free forms always continue.
    pub fn call(&mut self, index: usize, case: &T) -> bool {
        match self {
            Self::Plain(f) => {
                f(case);
                true
            }
            Self::Checked(f) => f(case),
            Self::Indexed(f) => {
                f(index, case);
                true
            }
            Self::IndexedChecked(f) => f(index, case),
        }
    }

    fn form_name(&self) -> &'static str {
        match self {
            Self::Plain(_) => "Plain",
            Self::Checked(_) => "Checked",
            Self::Indexed(_) => "Indexed",
            Self::IndexedChecked(_) => "IndexedChecked",
        }
    }
}

impl<T> fmt::Debug for TestFn<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFn")
            .field("form", &self.form_name())
            .field("shape", &self.shape())
            .finish()
    }
}

/// Marker types that select the [`IntoTestFn`] conversion for each form.
///
/// Callers never name these; the compiler infers the marker from the
/// closure's signature at the run call site.
pub mod form {
    pub enum Plain {}
    pub enum Checked {}
    pub enum Indexed {}
    pub enum IndexedChecked {}
    /// An already-bound [`TestFn`](super::TestFn) passed through as-is.
    pub enum Prebuilt {}
}

/// Binds a caller-supplied callable to its [`TestFn`] form.
///
/// This trait is the shape validator. Each accepted form has exactly one
/// impl, keyed by a marker type in [`form`] so the impls cannot overlap,
/// and the conversion runs inside every run call so a different callable
/// may be passed each time. A callable outside the accepted forms fails
/// overload resolution:
///
/// ```compile_fail
/// // three parameters is not an accepted form
/// tabula::cases![1, 2].run(|extra: usize, idx: usize, case: &i32| {});
/// ```
///
/// ```compile_fail
/// // the index parameter must be usize
/// tabula::cases![1, 2].run(|idx: String, case: &i32| {});
/// ```
///
/// ```compile_fail
/// // the case parameter must match the collection's element type
/// tabula::cases![1, 2].run(|case: &String| {});
/// ```
///
/// ```compile_fail
/// // a verdict must be exactly bool
/// tabula::cases![1, 2].run(|case: &i32| -> u8 { 0 });
/// ```
pub trait IntoTestFn<'f, T, Form> {
    fn into_test_fn(self) -> TestFn<'f, T>;
}

impl<'f, T, F> IntoTestFn<'f, T, form::Plain> for F
where
    F: FnMut(&T) + 'f,
{
    fn into_test_fn(self) -> TestFn<'f, T> {
        TestFn::Plain(Box::new(self))
    }
}

impl<'f, T, F> IntoTestFn<'f, T, form::Checked> for F
where
    F: FnMut(&T) -> bool + 'f,
{
    fn into_test_fn(self) -> TestFn<'f, T> {
        TestFn::Checked(Box::new(self))
    }
}

impl<'f, T, F> IntoTestFn<'f, T, form::Indexed> for F
where
    F: FnMut(usize, &T) + 'f,
{
    fn into_test_fn(self) -> TestFn<'f, T> {
        TestFn::Indexed(Box::new(self))
    }
}

impl<'f, T, F> IntoTestFn<'f, T, form::IndexedChecked> for F
where
    F: FnMut(usize, &T) -> bool + 'f,
{
    fn into_test_fn(self) -> TestFn<'f, T> {
        TestFn::IndexedChecked(Box::new(self))
    }
}

impl<'f, T> IntoTestFn<'f, T, form::Prebuilt> for TestFn<'f, T> {
    fn into_test_fn(self) -> TestFn<'f, T> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_classification_per_form() {
        let plain: TestFn<i32> = TestFn::plain(|_| {});
        let checked: TestFn<i32> = TestFn::checked(|_| true);
        let indexed: TestFn<i32> = TestFn::indexed(|_, _| {});
        let both: TestFn<i32> = TestFn::indexed_checked(|_, _| true);

        assert_eq!(
            plain.shape(),
            Shape {
                expects_index: false,
                expects_result: false
            }
        );
        assert_eq!(
            checked.shape(),
            Shape {
                expects_index: false,
                expects_result: true
            }
        );
        assert_eq!(
            indexed.shape(),
            Shape {
                expects_index: true,
                expects_result: false
            }
        );
        assert_eq!(
            both.shape(),
            Shape {
                expects_index: true,
                expects_result: true
            }
        );
    }

    #[test]
    fn test_verdict_free_forms_always_continue() {
        let mut plain: TestFn<i32> = TestFn::plain(|_| {});
        let mut indexed: TestFn<i32> = TestFn::indexed(|_, _| {});
        assert!(plain.call(0, &1));
        assert!(indexed.call(0, &1));
    }

    #[test]
    fn test_checked_forms_relay_their_verdict() {
        let mut checked: TestFn<i32> = TestFn::checked(|case| *case > 0);
        assert!(checked.call(0, &1));
        assert!(!checked.call(1, &-1));
    }

    #[test]
    fn test_indexed_forms_receive_the_index() {
        let mut seen = Vec::new();
        let mut indexed: TestFn<&str> = TestFn::indexed(|idx, _| seen.push(idx));
        indexed.call(2, &"x");
        indexed.call(0, &"y");
        drop(indexed);
        assert_eq!(seen, vec![2, 0]);
    }

    #[test]
    fn test_closure_binding_selects_the_matching_form() {
        fn bind<'f, T, Form>(f: impl IntoTestFn<'f, T, Form>) -> TestFn<'f, T> {
            f.into_test_fn()
        }

        let plain = bind(|_: &i32| {});
        let checked = bind(|_: &i32| false);
        let indexed = bind(|_: usize, _: &i32| {});
        let both = bind(|_: usize, _: &i32| false);

        assert!(!plain.shape().expects_result);
        assert!(checked.shape().expects_result);
        assert!(indexed.shape().expects_index);
        assert!(both.shape().expects_index && both.shape().expects_result);
    }
}
