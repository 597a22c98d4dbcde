//! Runtime-typed bindings to caller-owned primitive variables.
//!
//! A [`VariableCell`] is a closed tagged union: one variant per supported
//! primitive, each carrying a shared handle to storage the application
//! owns. Labels hold cells without being generic over the value type, so
//! every Label in a Layout has the same concrete type.
//!
//! Storage is `Rc<Cell<T>>`: the application keeps its own clone and reads
//! the value whenever it likes; the menu writes through the same handle.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CellError;

// ============================================================================
// KIND TAG
// ============================================================================

/// The type tag of a [`VariableCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    U8,
    U16,
    I32,
    U64,
    F32,
    Bool,
    F64,
    /// No storage bound.
    None,
}

impl Kind {
    /// Every kind, in tag order.
    pub const ALL: [Kind; 8] = [
        Kind::U8,
        Kind::U16,
        Kind::I32,
        Kind::U64,
        Kind::F32,
        Kind::Bool,
        Kind::F64,
        Kind::None,
    ];

    /// Short type name shown in prompts.
    pub fn name(self) -> &'static str {
        match self {
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::I32 => "i32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::Bool => "bool",
            Kind::F64 => "f64",
            Kind::None => "none",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = CellError;

    /// Accepts Rust names and the C-style aliases menu files tend to use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "u8" | "uint8_t" => Ok(Kind::U8),
            "u16" | "uint16_t" => Ok(Kind::U16),
            "i32" | "int32_t" => Ok(Kind::I32),
            "u64" | "uint64_t" => Ok(Kind::U64),
            "f32" | "float" => Ok(Kind::F32),
            "bool" => Ok(Kind::Bool),
            "f64" | "double" => Ok(Kind::F64),
            "none" | "void" => Ok(Kind::None),
            other => Err(CellError::InvalidType {
                kind: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// CELL
// ============================================================================

/// A binding to external storage of one primitive kind.
///
/// `VariableCell::None` means nothing is bound; reading it yields empty
/// text and writing it does nothing.
#[derive(Debug, Clone, Default)]
pub enum VariableCell {
    #[default]
    None,
    U8(Rc<Cell<u8>>),
    U16(Rc<Cell<u16>>),
    I32(Rc<Cell<i32>>),
    U64(Rc<Cell<u64>>),
    F32(Rc<Cell<f32>>),
    Bool(Rc<Cell<bool>>),
    F64(Rc<Cell<f64>>),
}

/// Primitive types a [`VariableCell`] can bind to.
///
/// Sealed: the set of kinds is closed.
pub trait Primitive: Copy + Default + 'static + sealed::Sealed {
    const KIND: Kind;

    /// Wrap a storage handle in the matching variant.
    fn wrap(storage: Rc<Cell<Self>>) -> VariableCell;

    /// Borrow the storage handle if `cell` holds this kind.
    fn storage(cell: &VariableCell) -> Option<&Rc<Cell<Self>>>;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! primitive {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Primitive for $ty {
            const KIND: Kind = Kind::$variant;

            fn wrap(storage: Rc<Cell<Self>>) -> VariableCell {
                VariableCell::$variant(storage)
            }

            fn storage(cell: &VariableCell) -> Option<&Rc<Cell<Self>>> {
                match cell {
                    VariableCell::$variant(storage) => Some(storage),
                    _ => None,
                }
            }
        }
    };
}

primitive!(u8, U8);
primitive!(u16, U16);
primitive!(i32, I32);
primitive!(u64, U64);
primitive!(f32, F32);
primitive!(bool, Bool);
primitive!(f64, F64);

/// Downcast type-erased storage to the handle for `T`.
fn downcast<T: Primitive>(storage: Rc<dyn Any>) -> Result<VariableCell, CellError> {
    storage
        .downcast::<Cell<T>>()
        .map(T::wrap)
        .map_err(|_| CellError::InvalidType {
            kind: format!("storage is not a {}", T::KIND),
        })
}

impl VariableCell {
    /// Bind to statically typed storage.
    pub fn bind<T: Primitive>(storage: &Rc<Cell<T>>) -> Self {
        T::wrap(Rc::clone(storage))
    }

    /// Bind to type-erased storage, checked against `kind` at runtime.
    ///
    /// `Kind::None` ignores `storage` and yields an unbound cell.
    pub fn bind_any(storage: Rc<dyn Any>, kind: Kind) -> Result<Self, CellError> {
        match kind {
            Kind::U8 => downcast::<u8>(storage),
            Kind::U16 => downcast::<u16>(storage),
            Kind::I32 => downcast::<i32>(storage),
            Kind::U64 => downcast::<u64>(storage),
            Kind::F32 => downcast::<f32>(storage),
            Kind::Bool => downcast::<bool>(storage),
            Kind::F64 => downcast::<f64>(storage),
            Kind::None => Ok(VariableCell::None),
        }
    }

    /// Create fresh storage of `kind`, optionally initialised from text.
    pub fn allocate(kind: Kind, initial: Option<&str>) -> Result<Self, CellError> {
        let cell = match kind {
            Kind::U8 => VariableCell::U8(Rc::default()),
            Kind::U16 => VariableCell::U16(Rc::default()),
            Kind::I32 => VariableCell::I32(Rc::default()),
            Kind::U64 => VariableCell::U64(Rc::default()),
            Kind::F32 => VariableCell::F32(Rc::default()),
            Kind::Bool => VariableCell::Bool(Rc::default()),
            Kind::F64 => VariableCell::F64(Rc::default()),
            Kind::None => VariableCell::None,
        };
        if let Some(text) = initial {
            cell.parse_into(text)?;
        }
        Ok(cell)
    }

    pub fn kind(&self) -> Kind {
        match self {
            VariableCell::None => Kind::None,
            VariableCell::U8(_) => Kind::U8,
            VariableCell::U16(_) => Kind::U16,
            VariableCell::I32(_) => Kind::I32,
            VariableCell::U64(_) => Kind::U64,
            VariableCell::F32(_) => Kind::F32,
            VariableCell::Bool(_) => Kind::Bool,
            VariableCell::F64(_) => Kind::F64,
        }
    }

    pub fn is_bound(&self) -> bool {
        !matches!(self, VariableCell::None)
    }

    /// Typed read. `None` when unbound or bound to another kind.
    pub fn get<T: Primitive>(&self) -> Option<T> {
        T::storage(self).map(|s| s.get())
    }

    /// Human-readable rendering of the current value; empty when unbound.
    pub fn format(&self) -> String {
        match self {
            VariableCell::None => String::new(),
            VariableCell::U8(s) => s.get().to_string(),
            VariableCell::U16(s) => s.get().to_string(),
            VariableCell::I32(s) => s.get().to_string(),
            VariableCell::U64(s) => s.get().to_string(),
            VariableCell::F32(s) => s.get().to_string(),
            VariableCell::Bool(s) => s.get().to_string(),
            VariableCell::F64(s) => s.get().to_string(),
        }
    }

    /// Parse `text` as this cell's kind and overwrite the storage.
    ///
    /// The value is parsed in full before anything is written, so a
    /// failure leaves the storage exactly as it was.
    pub fn parse_into(&self, text: &str) -> Result<(), CellError> {
        let input = text.trim();
        let fail = || CellError::Parse {
            kind: self.kind(),
            input: input.to_string(),
        };
        match self {
            VariableCell::None => {}
            VariableCell::U8(s) => s.set(input.parse().map_err(|_| fail())?),
            VariableCell::U16(s) => s.set(input.parse().map_err(|_| fail())?),
            VariableCell::I32(s) => s.set(input.parse().map_err(|_| fail())?),
            VariableCell::U64(s) => s.set(input.parse().map_err(|_| fail())?),
            VariableCell::F32(s) => s.set(input.parse().map_err(|_| fail())?),
            VariableCell::Bool(s) => s.set(parse_bool(input).ok_or_else(fail)?),
            VariableCell::F64(s) => s.set(input.parse().map_err(|_| fail())?),
        }
        Ok(())
    }

    /// Flip a bound boolean in place.
    pub fn toggle(&self) -> Result<bool, CellError> {
        match self {
            VariableCell::Bool(s) => {
                let flipped = !s.get();
                s.set(flipped);
                Ok(flipped)
            }
            other => Err(CellError::UnsupportedOperation {
                kind: other.kind(),
                operation: "toggle",
            }),
        }
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Serializes the current value, not the binding.
impl Serialize for VariableCell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            VariableCell::None => serializer.serialize_none(),
            VariableCell::U8(s) => serializer.serialize_u8(s.get()),
            VariableCell::U16(s) => serializer.serialize_u16(s.get()),
            VariableCell::I32(s) => serializer.serialize_i32(s.get()),
            VariableCell::U64(s) => serializer.serialize_u64(s.get()),
            VariableCell::F32(s) => serializer.serialize_f32(s.get()),
            VariableCell::Bool(s) => serializer.serialize_bool(s.get()),
            VariableCell::F64(s) => serializer.serialize_f64(s.get()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: Primitive + PartialEq + fmt::Debug>(value: T) {
        let storage = Rc::new(Cell::new(value));
        let cell = VariableCell::bind(&storage);
        let text = cell.format();
        storage.set(T::default());
        cell.parse_into(&text).expect("formatted value should parse back");
        assert_eq!(storage.get(), value, "round trip through {:?}", text);
    }

    #[test]
    fn kind_of_unbound_cell_is_none() {
        let cell = VariableCell::default();
        assert_eq!(cell.kind(), Kind::None);
        assert!(!cell.is_bound());
        assert_eq!(cell.format(), "");
    }

    #[test]
    fn parse_into_unbound_cell_is_noop() {
        assert_eq!(VariableCell::None.parse_into("anything"), Ok(()));
    }

    #[test]
    fn bind_records_kind() {
        let storage = Rc::new(Cell::new(7u16));
        let cell = VariableCell::bind(&storage);
        assert_eq!(cell.kind(), Kind::U16);
        assert_eq!(cell.get::<u16>(), Some(7));
        assert_eq!(cell.get::<u8>(), None);
    }

    #[test]
    fn writes_are_visible_through_callers_handle() {
        let storage = Rc::new(Cell::new(1i32));
        let cell = VariableCell::bind(&storage);
        cell.parse_into("-40").unwrap();
        assert_eq!(storage.get(), -40);
    }

    #[test]
    fn format_parse_round_trips_zero() {
        round_trip(0u8);
        round_trip(0u16);
        round_trip(0i32);
        round_trip(0u64);
        round_trip(0f32);
        round_trip(0f64);
    }

    #[test]
    fn format_parse_round_trips_max() {
        round_trip(u8::MAX);
        round_trip(u16::MAX);
        round_trip(i32::MAX);
        round_trip(i32::MIN);
        round_trip(u64::MAX);
        round_trip(f32::MAX);
        round_trip(f64::MAX);
    }

    #[test]
    fn format_parse_round_trips_fractions_and_negatives() {
        round_trip(4.2f32);
        round_trip(4.2f64);
        round_trip(-1i32);
        round_trip(-0.001f64);
    }

    #[test]
    fn bool_round_trips() {
        round_trip(true);
        round_trip(false);
    }

    #[test]
    fn unsigned_kinds_reject_negative_input() {
        let storage = Rc::new(Cell::new(5u8));
        let cell = VariableCell::bind(&storage);
        let err = cell.parse_into("-1").unwrap_err();
        assert_eq!(
            err,
            CellError::Parse {
                kind: Kind::U8,
                input: "-1".into()
            }
        );
        assert_eq!(storage.get(), 5);

        let wide = Rc::new(Cell::new(9u64));
        assert!(VariableCell::bind(&wide).parse_into("-1").is_err());
        assert_eq!(wide.get(), 9);
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        let storage = Rc::new(Cell::new(3u8));
        assert!(VariableCell::bind(&storage).parse_into("256").is_err());
        assert_eq!(storage.get(), 3);
    }

    #[test]
    fn malformed_input_leaves_storage_unchanged() {
        let int = Rc::new(Cell::new(1234i32));
        assert!(VariableCell::bind(&int).parse_into("12ab").is_err());
        assert_eq!(int.get(), 1234);

        let float = Rc::new(Cell::new(4.2f32));
        assert!(VariableCell::bind(&float).parse_into("four").is_err());
        assert_eq!(float.get().to_bits(), 4.2f32.to_bits());

        let flag = Rc::new(Cell::new(true));
        assert!(VariableCell::bind(&flag).parse_into("maybe").is_err());
        assert!(flag.get());
    }

    #[test]
    fn input_is_trimmed() {
        let storage = Rc::new(Cell::new(0u16));
        VariableCell::bind(&storage).parse_into("  42\n").unwrap();
        assert_eq!(storage.get(), 42);
    }

    #[test]
    fn bool_accepts_common_spellings() {
        let storage = Rc::new(Cell::new(false));
        let cell = VariableCell::bind(&storage);
        for (text, expected) in [("1", true), ("off", false), ("YES", true), ("False", false)] {
            cell.parse_into(text).unwrap();
            assert_eq!(storage.get(), expected, "input {:?}", text);
        }
    }

    #[test]
    fn toggle_flips_bool_and_back() {
        let storage = Rc::new(Cell::new(false));
        let cell = VariableCell::bind(&storage);
        assert_eq!(cell.toggle(), Ok(true));
        assert!(storage.get());
        assert_eq!(cell.toggle(), Ok(false));
        assert!(!storage.get());
    }

    #[test]
    fn toggle_on_non_bool_is_unsupported() {
        let storage = Rc::new(Cell::new(8u8));
        let cell = VariableCell::bind(&storage);
        assert!(matches!(
            cell.toggle(),
            Err(CellError::UnsupportedOperation { kind: Kind::U8, .. })
        ));
        assert_eq!(storage.get(), 8);
        assert!(VariableCell::None.toggle().is_err());
    }

    #[test]
    fn bind_any_checks_storage_type() {
        let storage: Rc<dyn Any> = Rc::new(Cell::new(2.5f64));
        let cell = VariableCell::bind_any(Rc::clone(&storage), Kind::F64).unwrap();
        assert_eq!(cell.get::<f64>(), Some(2.5));

        let mismatch = VariableCell::bind_any(storage, Kind::F32);
        assert!(matches!(mismatch, Err(CellError::InvalidType { .. })));
    }

    #[test]
    fn bind_any_with_none_kind_is_unbound() {
        let storage: Rc<dyn Any> = Rc::new(Cell::new(1u8));
        let cell = VariableCell::bind_any(storage, Kind::None).unwrap();
        assert!(!cell.is_bound());
    }

    #[test]
    fn kind_parses_rust_and_c_names() {
        assert_eq!("u8".parse::<Kind>(), Ok(Kind::U8));
        assert_eq!("uint64_t".parse::<Kind>(), Ok(Kind::U64));
        assert_eq!("double".parse::<Kind>(), Ok(Kind::F64));
        assert_eq!("void".parse::<Kind>(), Ok(Kind::None));
        assert!(matches!(
            "string".parse::<Kind>(),
            Err(CellError::InvalidType { .. })
        ));
    }

    #[test]
    fn kind_names_parse_back() {
        for kind in Kind::ALL {
            assert_eq!(kind.name().parse::<Kind>(), Ok(kind));
        }
    }

    #[test]
    fn allocate_applies_initial_value() {
        let cell = VariableCell::allocate(Kind::F32, Some("4.2")).unwrap();
        assert_eq!(cell.get::<f32>(), Some(4.2));

        let bad = VariableCell::allocate(Kind::U8, Some("-3"));
        assert!(matches!(bad, Err(CellError::Parse { .. })));
    }

    #[test]
    fn serializes_current_value() {
        let storage = Rc::new(Cell::new(true));
        let cell = VariableCell::bind(&storage);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "true");
        storage.set(false);
        assert_eq!(serde_json::to_string(&cell).unwrap(), "false");
        assert_eq!(serde_json::to_string(&VariableCell::None).unwrap(), "null");
    }
}
