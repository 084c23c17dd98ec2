/// Construct a [`Value`][crate::Value] using a JSON-like literal syntax.
///
/// Map keys are identifiers, values are any expression that converts into a
/// `Value`, `None`, or a nested list `[...]` or map `{...}`.
///
/// ```
/// let ctx = plantilla::value! {
///     eventMunicipality: "Cartagena",
///     otherOpjs: [
///         { opjNumber: "123", officerName: "Ana Pérez" },
///     ],
///     penitentiaryName: None,
/// };
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)+) => {
        $crate::_value!({ $($tt)+ })
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value {
    //////////////////////////////////////////////////////////////////////////
    // List muncher, invoked as: _value!(@list [] $($tt)*)
    //////////////////////////////////////////////////////////////////////////

    (@list [$($elems:expr,)*]) => {
        $crate::_value_list![$($elems,)*]
    };

    (@list [$($elems:expr),*]) => {
        $crate::_value_list![$($elems),*]
    };

    (@list [$($elems:expr,)*] None $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!(None)] $($rest)*)
    };

    (@list [$($elems:expr,)*] [$($list:tt)*] $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!([$($list)*])] $($rest)*)
    };

    (@list [$($elems:expr,)*] {$($map:tt)*} $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!({$($map)*})] $($rest)*)
    };

    (@list [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!($next),] $($rest)*)
    };

    (@list [$($elems:expr,)*] $last:expr) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!($last)])
    };

    (@list [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::_value!(@list [$($elems,)*] $($rest)*)
    };

    //////////////////////////////////////////////////////////////////////////
    // Map muncher, invoked as: _value!(@map map $($tt)*)
    //////////////////////////////////////////////////////////////////////////

    (@map $map:ident) => {};

    (@map $map:ident ,) => {};

    (@map $map:ident $key:ident : None $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::Value::None);
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:ident : [$($list:tt)*] $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::_value!([$($list)*]));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:ident : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::_value!({$($inner)*}));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:ident : $value:expr $(, $($rest:tt)*)?) => {
        let _ = $map.insert(stringify!($key).into(), $crate::Value::from($value));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    //////////////////////////////////////////////////////////////////////////
    // Entry points
    //////////////////////////////////////////////////////////////////////////

    (None) => {
        $crate::Value::None
    };

    ([]) => {
        $crate::Value::List($crate::_value_list![])
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::List($crate::_value!(@list [] $($tt)+))
    };

    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::Map({
            let mut map = $crate::Map::new();
            $crate::_value!(@map map $($tt)+);
            map
        })
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

// Kept separate so that `vec!` resolves to the standard library macro.
#[macro_export]
#[doc(hidden)]
macro_rules! _value_list {
    ($($content:tt)*) => {
        ::std::vec![$($content)*]
    };
}
