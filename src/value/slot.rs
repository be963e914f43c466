//! Typed write targets for option values.
//!
//! A [`Slot`] borrows caller-owned storage. The variant doubles as the
//! option's declared [`ValueType`], so coercion and storage happen in one
//! exhaustive match and a value can never land in a slot of another type.

use std::cell::{Cell, RefCell};

use super::{Coerce, CoerceError, ValueType};

/// Caller-owned storage an option writes into when matched.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    Bool(&'a Cell<bool>),
    U8(&'a Cell<u8>),
    U16(&'a Cell<u16>),
    U32(&'a Cell<u32>),
    U64(&'a Cell<u64>),
    Usize(&'a Cell<usize>),
    I8(&'a Cell<i8>),
    I16(&'a Cell<i16>),
    I32(&'a Cell<i32>),
    I64(&'a Cell<i64>),
    Isize(&'a Cell<isize>),
    F32(&'a Cell<f32>),
    F64(&'a Cell<f64>),
    String(&'a RefCell<Option<String>>),
}

/// Numeric types that can be bumped by a delta.
trait Step: Copy {
    const ONE: Self;

    fn step(self, delta: Self) -> Option<Self>;
}

macro_rules! impl_step_int {
    ($($int:ty),*) => {
        $(
            impl Step for $int {
                const ONE: Self = 1;

                fn step(self, delta: Self) -> Option<Self> {
                    self.checked_add(delta)
                }
            }
        )*
    };
}

impl_step_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

macro_rules! impl_step_float {
    ($($float:ty),*) => {
        $(
            impl Step for $float {
                const ONE: Self = 1.0;

                fn step(self, delta: Self) -> Option<Self> {
                    let sum = self + delta;
                    sum.is_finite().then_some(sum)
                }
            }
        )*
    };
}

impl_step_float!(f32, f64);

fn store_into<T: Coerce + Copy>(cell: &Cell<T>, raw: &str) -> Result<(), CoerceError> {
    cell.set(T::coerce(raw)?);
    Ok(())
}

fn accumulate_into<T: Coerce + Step>(cell: &Cell<T>, raw: Option<&str>) -> Result<(), CoerceError> {
    let delta = raw.map(T::coerce).transpose()?.unwrap_or(T::ONE);
    let next = cell.get().step(delta).ok_or(CoerceError::Overflow(T::TYPE))?;
    cell.set(next);
    Ok(())
}

impl Slot<'_> {
    /// Returns the declared type of the slot.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::U8(_) => ValueType::U8,
            Self::U16(_) => ValueType::U16,
            Self::U32(_) => ValueType::U32,
            Self::U64(_) => ValueType::U64,
            Self::Usize(_) => ValueType::Usize,
            Self::I8(_) => ValueType::I8,
            Self::I16(_) => ValueType::I16,
            Self::I32(_) => ValueType::I32,
            Self::I64(_) => ValueType::I64,
            Self::Isize(_) => ValueType::Isize,
            Self::F32(_) => ValueType::F32,
            Self::F64(_) => ValueType::F64,
            Self::String(_) => ValueType::String,
        }
    }

    /// Overwrites the slot with the coerced argument.
    ///
    /// A bool slot without an argument is set to `true`.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError`] if the argument does not parse as the slot's
    /// type, or if a non-bool slot is given no argument.
    pub fn store(&self, raw: Option<&str>) -> Result<(), CoerceError> {
        let Some(raw) = raw else {
            return match self {
                Self::Bool(cell) => {
                    cell.set(true);
                    Ok(())
                }
                other => Err(CoerceError::Malformed(other.value_type())),
            };
        };

        match self {
            Self::Bool(cell) => store_into(cell, raw),
            Self::U8(cell) => store_into(cell, raw),
            Self::U16(cell) => store_into(cell, raw),
            Self::U32(cell) => store_into(cell, raw),
            Self::U64(cell) => store_into(cell, raw),
            Self::Usize(cell) => store_into(cell, raw),
            Self::I8(cell) => store_into(cell, raw),
            Self::I16(cell) => store_into(cell, raw),
            Self::I32(cell) => store_into(cell, raw),
            Self::I64(cell) => store_into(cell, raw),
            Self::Isize(cell) => store_into(cell, raw),
            Self::F32(cell) => store_into(cell, raw),
            Self::F64(cell) => store_into(cell, raw),
            Self::String(cell) => {
                cell.replace(Some(raw.to_owned()));
                Ok(())
            }
        }
    }

    /// Adds the coerced argument (or 1 without one) to a numeric slot, or
    /// flips a bool slot.
    ///
    /// Returns `None` for a string slot, which cannot accumulate.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError`] if the argument does not parse or the sum
    /// leaves the slot's range.
    pub fn accumulate(&self, raw: Option<&str>) -> Option<Result<(), CoerceError>> {
        let result = match self {
            Self::Bool(cell) => {
                cell.set(cell.get() ^ true);
                Ok(())
            }
            Self::U8(cell) => accumulate_into(cell, raw),
            Self::U16(cell) => accumulate_into(cell, raw),
            Self::U32(cell) => accumulate_into(cell, raw),
            Self::U64(cell) => accumulate_into(cell, raw),
            Self::Usize(cell) => accumulate_into(cell, raw),
            Self::I8(cell) => accumulate_into(cell, raw),
            Self::I16(cell) => accumulate_into(cell, raw),
            Self::I32(cell) => accumulate_into(cell, raw),
            Self::I64(cell) => accumulate_into(cell, raw),
            Self::Isize(cell) => accumulate_into(cell, raw),
            Self::F32(cell) => accumulate_into(cell, raw),
            Self::F64(cell) => accumulate_into(cell, raw),
            Self::String(_) => return None,
        };
        Some(result)
    }
}

macro_rules! impl_from_cell {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a Cell<$ty>> for Slot<'a> {
                fn from(cell: &'a Cell<$ty>) -> Self {
                    Self::$variant(cell)
                }
            }
        )*
    };
}

impl_from_cell! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    f32 => F32,
    f64 => F64,
}

impl<'a> From<&'a RefCell<Option<String>>> for Slot<'a> {
    fn from(cell: &'a RefCell<Option<String>>) -> Self {
        Self::String(cell)
    }
}
