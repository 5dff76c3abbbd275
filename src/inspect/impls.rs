//! [`Inspect`] for standard library types.

use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{Entries, Inspect, Items, MapKind, SeqKind, Shape};

impl Inspect for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Unit("()")
    }
}

impl Inspect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

impl Inspect for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Char(*self)
    }
}

macro_rules! inspect_int {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl Inspect for $t {
                fn shape(&self) -> Shape<'_> {
                    Shape::$variant(<$wide>::from(*self))
                }
            }
        )*
    };
}

inspect_int!(Int, i128: i8, i16, i32, i64, i128);
inspect_int!(UInt, u128: u8, u16, u32, u64, u128);

impl Inspect for isize {
    fn shape(&self) -> Shape<'_> {
        Shape::Int(*self as i128)
    }
}

impl Inspect for usize {
    fn shape(&self) -> Shape<'_> {
        Shape::UInt(*self as u128)
    }
}

impl Inspect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(*self)
    }
}

impl Inspect for f32 {
    fn shape(&self) -> Shape<'_> {
        // widen through the shortest decimal form so 0.1f32 stays `0.1`
        let widened = format!("{self:?}")
            .parse()
            .unwrap_or_else(|_| f64::from(*self));
        Shape::Float(widened)
    }
}

impl Inspect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Inspect for &'static str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }

    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("str")
    }
}

impl Inspect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Inspect for Cow<'static, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }

    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed("str")
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(SeqKind::List, Items::of(self.iter()).with_tail(self.last()))
    }
}

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(SeqKind::List, Items::of(self.iter()).with_tail(self.last()))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(SeqKind::List, Items::of(self.iter()).with_tail(self.last()))
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(SeqKind::Queue, Items::of(self.iter()).with_tail(self.back()))
    }
}

impl<T: Inspect + Ord> Inspect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(Items::of(self.iter()).with_tail(self.last()))
    }
}

impl<T: Inspect, S: 'static> Inspect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(Items::of(self.iter()))
    }
}

impl<K: Inspect + Ord, V: Inspect> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(
            MapKind::Plain,
            Entries::of(self.iter()).with_tail(self.last_key_value()),
        )
    }
}

impl<K: Inspect, V: Inspect, S: 'static> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(MapKind::Plain, Entries::of(self.iter()))
    }
}

/// `Some` is transparent; `None` renders as the literal `None`.
impl<T: Inspect> Inspect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => Shape::Pointer(value),
            None => Shape::Unit("None"),
        }
    }

    fn type_name(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.type_name(),
            None => Cow::Borrowed("Option"),
        }
    }
}

macro_rules! inspect_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Inspect> Inspect for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    Shape::Pointer(&**self)
                }

                fn type_name(&self) -> Cow<'_, str> {
                    (**self).type_name()
                }
            }

            impl Inspect for $ptr<dyn Inspect> {
                fn shape(&self) -> Shape<'_> {
                    Shape::Pointer(&**self)
                }

                fn type_name(&self) -> Cow<'_, str> {
                    (**self).type_name()
                }
            }
        )*
    };
}

inspect_pointer!(Box, Rc, Arc);

impl<T: Inspect> Inspect for &'static T {
    fn shape(&self) -> Shape<'_> {
        Shape::Pointer(*self)
    }

    fn type_name(&self) -> Cow<'_, str> {
        (**self).type_name()
    }
}

/// Renders through a shared borrow; a value that is mutably borrowed at
/// render time shows as `<borrowed>`.
impl<T: Inspect> Inspect for RefCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.try_borrow() {
            Ok(value) => Shape::Borrowed(Ref::map(value, |v| v as &dyn Inspect)),
            Err(_) => Shape::Opaque(Some(Cow::Borrowed("<borrowed>"))),
        }
    }

    fn type_name(&self) -> Cow<'_, str> {
        match self.try_borrow() {
            Ok(value) => Cow::Owned(value.type_name().into_owned()),
            Err(_) => Cow::Borrowed("RefCell"),
        }
    }
}

macro_rules! inspect_tuple {
    ($(($($name:ident . $idx:tt),+)),* $(,)?) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                fn shape(&self) -> Shape<'_> {
                    Shape::Sequence(SeqKind::Tuple, Items::dynamic(vec![$(&self.$idx as &dyn Inspect),+]))
                }
            }
        )*
    };
}

inspect_tuple!(
    (A.0),
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
    (A.0, B.1, C.2, D.3, E.4),
    (A.0, B.1, C.2, D.3, E.4, F.5),
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6),
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7),
);
