//! Adapts statically typed solution functions into uniform exports.

use crate::errors::InvokeError;
use crate::marshal::{release_all, DomainValue, FromDomain, IntoDomain};
use std::sync::Arc;

/// A type-erased solution entry point taking marshalled positional arguments.
pub type ExportFn = Arc<dyn Fn(Vec<DomainValue>) -> Result<DomainValue, InvokeError> + Send + Sync>;

/// Implemented for plain `fn` items and closures of arity 0..=4 whose parameters
/// implement [`FromDomain`] and whose return type implements [`IntoDomain`].
pub trait IntoExport<Args>: Send + Sync + 'static {
    fn into_export(self) -> ExportFn;
}

fn check_arity(expected: usize, got: usize) -> Result<(), InvokeError> {
    if expected == got {
        Ok(())
    } else {
        Err(InvokeError::ArgumentMismatch(format!(
            "function takes {expected} argument(s), case supplies {got}"
        )))
    }
}

macro_rules! one {
    ($x:ident) => {
        1usize
    };
}

macro_rules! impl_into_export {
    ($($arg:ident),*) => {
        impl<F, R, $($arg,)*> IntoExport<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: IntoDomain + 'static,
            $($arg: FromDomain + 'static,)*
        {
            #[allow(
                non_snake_case,
                unused_mut,
                unused_variables,
                unused_assignments,
                unreachable_patterns
            )]
            fn into_export(self) -> ExportFn {
                Arc::new(move |args: Vec<DomainValue>| {
                    let arity: usize = 0 $(+ one!($arg))*;
                    if let Err(e) = check_arity(arity, args.len()) {
                        release_all(args);
                        return Err(e);
                    }

                    // Convert every argument before failing so converted chains
                    // can be discarded without recursion.
                    let mut values = args.into_iter();
                    let mut index = 0usize;
                    $(
                        let $arg: Result<$arg, InvokeError> = match values.next() {
                            Some(value) => <$arg as FromDomain>::from_domain(value)
                                .map_err(|source| InvokeError::Argument { index, source }),
                            None => Err(InvokeError::ArgumentMismatch("missing argument".into())),
                        };
                        index += 1;
                    )*

                    match ($($arg,)*) {
                        ($(Ok($arg),)*) => (self)($($arg),*).into_domain().map_err(InvokeError::Result),
                        ($($arg,)*) => {
                            let mut first: Option<InvokeError> = None;
                            $(
                                match $arg {
                                    Ok(v) => v.discard(),
                                    Err(e) => {
                                        first.get_or_insert(e);
                                    }
                                }
                            )*
                            Err(first.unwrap_or_else(|| {
                                InvokeError::ArgumentMismatch("argument conversion failed".into())
                            }))
                        }
                    }
                })
            }
        }
    };
}

impl_into_export!();
impl_into_export!(A1);
impl_into_export!(A1, A2);
impl_into_export!(A1, A2, A3);
impl_into_export!(A1, A2, A3, A4);
