//! Environment Store: named, typed, read-mostly simulation parameters.
//!
//! # Access discipline
//!
//! Properties are defined once during model setup.  During a step agent
//! functions receive `&Environment` and can only read; `set` needs
//! `&mut Environment`, which the driver hands out only at step boundaries
//! (host functions) or through `Sim::environment_mut` between steps.  The
//! borrow checker therefore enforces "immutable during a step".
//!
//! # Typing
//!
//! Every property carries its [`EnvType`] from definition onwards.  Reads and
//! writes name the Rust type they expect, either via a turbofish
//! (`env.get::<f32>("TIME_SCALE")`) or a typed [`EnvKey`] constant; a mismatch
//! is reported as [`FlError::UndefinedProperty`] rather than coerced.

use std::fmt;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::{FlError, FlResult};

// ── EnvType / EnvValue ────────────────────────────────────────────────────────

/// The scalar type a property was defined with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnvType {
    F32,
    F64,
    I32,
    I64,
    U32,
    U64,
}

impl EnvType {
    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self, EnvType::F32 | EnvType::F64)
    }
}

impl fmt::Display for EnvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnvType::F32 => "f32",
            EnvType::F64 => "f64",
            EnvType::I32 => "i32",
            EnvType::I64 => "i64",
            EnvType::U32 => "u32",
            EnvType::U64 => "u64",
        })
    }
}

/// A stored property value tagged with its type.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnvValue {
    F32(f32),
    F64(f64),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
}

impl EnvValue {
    pub fn ty(self) -> EnvType {
        match self {
            EnvValue::F32(_) => EnvType::F32,
            EnvValue::F64(_) => EnvType::F64,
            EnvValue::I32(_) => EnvType::I32,
            EnvValue::I64(_) => EnvType::I64,
            EnvValue::U32(_) => EnvType::U32,
            EnvValue::U64(_) => EnvType::U64,
        }
    }

    /// Widen to `f64` for logging and export.
    pub fn as_f64(self) -> f64 {
        match self {
            EnvValue::F32(v) => v as f64,
            EnvValue::F64(v) => v,
            EnvValue::I32(v) => v as f64,
            EnvValue::I64(v) => v as f64,
            EnvValue::U32(v) => v as f64,
            EnvValue::U64(v) => v as f64,
        }
    }

    /// Convert an untyped number (e.g. from a JSON config) to `ty`.
    ///
    /// Integer targets reject fractional or out-of-range input; returns
    /// `None` in that case.
    pub fn from_f64(ty: EnvType, v: f64) -> Option<EnvValue> {
        if !v.is_finite() {
            return None;
        }
        if !ty.is_float() && v.fract() != 0.0 {
            return None;
        }
        Some(match ty {
            EnvType::F32 => EnvValue::F32(v as f32),
            EnvType::F64 => EnvValue::F64(v),
            EnvType::I32 => EnvValue::I32(in_range(v, -TWO_31, TWO_31)? as i32),
            EnvType::I64 => EnvValue::I64(in_range(v, -TWO_63, TWO_63)? as i64),
            EnvType::U32 => EnvValue::U32(in_range(v, 0.0, 2.0 * TWO_31)? as u32),
            EnvType::U64 => EnvValue::U64(in_range(v, 0.0, 2.0 * TWO_63)? as u64),
        })
    }
}

// Powers of two are exact in f64, unlike the integer maxima themselves.
const TWO_31: f64 = 2_147_483_648.0;
const TWO_63: f64 = 9_223_372_036_854_775_808.0;

/// `v` if it lies in `[lo, end)`.  Callers have already rejected fractions.
fn in_range(v: f64, lo: f64, end: f64) -> Option<f64> {
    (lo <= v && v < end).then_some(v)
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::F32(v) => write!(f, "{v}"),
            EnvValue::F64(v) => write!(f, "{v}"),
            EnvValue::I32(v) => write!(f, "{v}"),
            EnvValue::I64(v) => write!(f, "{v}"),
            EnvValue::U32(v) => write!(f, "{v}"),
            EnvValue::U64(v) => write!(f, "{v}"),
        }
    }
}

// ── EnvScalar ─────────────────────────────────────────────────────────────────

/// Rust scalar types that can be stored in the environment.
pub trait EnvScalar: Copy + Send + Sync + 'static {
    const TYPE: EnvType;
    fn into_value(self) -> EnvValue;
    fn from_value(value: EnvValue) -> Option<Self>;
}

macro_rules! env_scalar {
    ($t:ty, $variant:ident) => {
        impl EnvScalar for $t {
            const TYPE: EnvType = EnvType::$variant;

            #[inline]
            fn into_value(self) -> EnvValue {
                EnvValue::$variant(self)
            }

            #[inline]
            fn from_value(value: EnvValue) -> Option<Self> {
                match value {
                    EnvValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

env_scalar!(f32, F32);
env_scalar!(f64, F64);
env_scalar!(i32, I32);
env_scalar!(i64, I64);
env_scalar!(u32, U32);
env_scalar!(u64, U64);

// ── EnvKey ────────────────────────────────────────────────────────────────────

/// A property name bound to its Rust type at compile time.
///
/// ```ignore
/// const TIME_SCALE: EnvKey<f32> = EnvKey::new("TIME_SCALE");
/// let dt = env.read(TIME_SCALE)?;
/// ```
pub struct EnvKey<T> {
    name: &'static str,
    _ty:  PhantomData<fn() -> T>,
}

impl<T: EnvScalar> EnvKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self { name, _ty: PhantomData }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn ty(&self) -> EnvType {
        T::TYPE
    }
}

// Manual impls: derives would add a `T: Clone` bound.
impl<T> Clone for EnvKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EnvKey<T> {}

impl<T> fmt::Debug for EnvKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnvKey({})", self.name)
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

/// The Environment Store.
///
/// Entries are kept in definition order so logging and export are stable;
/// an `FxHashMap` maps names to entry positions for O(1) lookup.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Vec<(String, EnvValue)>", try_from = "Vec<(String, EnvValue)>")
)]
pub struct Environment {
    entries: Vec<(String, EnvValue)>,
    index:   FxHashMap<String, usize>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new property.  Fails with `DuplicateProperty` if `name` exists.
    pub fn define<T: EnvScalar>(&mut self, name: impl Into<String>, value: T) -> FlResult<()> {
        self.define_value(name, value.into_value())
    }

    /// Untyped variant of [`define`](Self::define).
    pub fn define_value(&mut self, name: impl Into<String>, value: EnvValue) -> FlResult<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(FlError::DuplicateProperty(name));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, value));
        Ok(())
    }

    /// Read a property as `T`.
    pub fn get<T: EnvScalar>(&self, name: &str) -> FlResult<T> {
        let value = self.value(name).ok_or_else(|| undefined(name, T::TYPE, None))?;
        T::from_value(value).ok_or_else(|| undefined(name, T::TYPE, Some(value.ty())))
    }

    /// Read a property through a typed key.
    #[inline]
    pub fn read<T: EnvScalar>(&self, key: EnvKey<T>) -> FlResult<T> {
        self.get(key.name)
    }

    /// Overwrite an existing property.  The new value must have the defined type.
    pub fn set<T: EnvScalar>(&mut self, name: &str, value: T) -> FlResult<()> {
        let &pos = self.index.get(name).ok_or_else(|| undefined(name, T::TYPE, None))?;
        let slot = &mut self.entries[pos].1;
        if slot.ty() != T::TYPE {
            return Err(undefined(name, T::TYPE, Some(slot.ty())));
        }
        *slot = value.into_value();
        Ok(())
    }

    /// Typed-key variant of [`set`](Self::set).
    #[inline]
    pub fn write<T: EnvScalar>(&mut self, key: EnvKey<T>, value: T) -> FlResult<()> {
        self.set(key.name, value)
    }

    /// Check that `name` exists with type `ty`.  Used by model validation.
    pub fn require(&self, name: &str, ty: EnvType) -> FlResult<()> {
        match self.type_of(name) {
            Some(t) if t == ty => Ok(()),
            defined => Err(undefined(name, ty, defined)),
        }
    }

    /// Apply untyped overrides (typically parsed from a config file).
    ///
    /// Each override must name a defined property and be representable in its
    /// type.  Overrides are applied in order; the first failure stops and
    /// leaves earlier overrides applied.
    pub fn apply_overrides<I, K>(&mut self, overrides: I) -> FlResult<()>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        for (name, raw) in overrides {
            let name = name.as_ref();
            let &pos = self.index.get(name).ok_or_else(|| undefined(name, EnvType::F64, None))?;
            let ty = self.entries[pos].1.ty();
            let value = EnvValue::from_f64(ty, raw).ok_or_else(|| {
                FlError::Config(format!("override {name} = {raw} is not a valid {ty}"))
            })?;
            self.entries[pos].1 = value;
        }
        Ok(())
    }

    pub fn value(&self, name: &str) -> Option<EnvValue> {
        self.index.get(name).map(|&pos| self.entries[pos].1)
    }

    pub fn type_of(&self, name: &str) -> Option<EnvType> {
        self.value(name).map(EnvValue::ty)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EnvValue)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

fn undefined(name: &str, requested: EnvType, defined: Option<EnvType>) -> FlError {
    FlError::UndefinedProperty { name: name.to_string(), requested, defined }
}

impl From<Environment> for Vec<(String, EnvValue)> {
    fn from(env: Environment) -> Self {
        env.entries
    }
}

impl TryFrom<Vec<(String, EnvValue)>> for Environment {
    type Error = FlError;

    fn try_from(entries: Vec<(String, EnvValue)>) -> FlResult<Self> {
        let mut env = Environment::new();
        for (name, value) in entries {
            env.define_value(name, value)?;
        }
        Ok(env)
    }
}
