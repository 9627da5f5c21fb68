#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

#[macro_export]
/// Implements `From` for every primitive that converts to `f64` without loss.
macro_rules! from_prims {
    ($to:tt) => {
        compose_from!($to, f64, i32);
        compose_from!($to, f64, i16);
        compose_from!($to, f64, i8);

        compose_from!($to, f64, u32);
        compose_from!($to, f64, u16);
        compose_from!($to, f64, u8);

        compose_from!($to, f64, f32);
    };
}
