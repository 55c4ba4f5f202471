//! Decoded constant values from the metadata source.
//!
//! Constants appear as literal field values, parameter defaults, and attribute arguments.
//! The metadata source decodes the raw blob into one of these variants; the formatter turns
//! them back into literal text, and the resolver matches integer constants against enum
//! field sets.

use crate::metadata::typeref::PrimitiveCode;

/// A decoded compile-time constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    /// Boolean value
    Boolean(bool),
    /// Character value
    Char(char),
    /// 8-bit signed integer
    I1(i8),
    /// 8-bit unsigned integer
    U1(u8),
    /// 16-bit signed integer
    I2(i16),
    /// 16-bit unsigned integer
    U2(u16),
    /// 32-bit signed integer
    I4(i32),
    /// 32-bit unsigned integer
    U4(u32),
    /// 64-bit signed integer
    I8(i64),
    /// 64-bit unsigned integer
    U8(u64),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// String value
    String(String),
    /// Null reference
    Null,
}

impl ConstantValue {
    /// Widen any integer variant to a signed 128-bit value.
    ///
    /// Enum field sets mix signed and unsigned underlying widths; widening to `i128`
    /// gives one key under which the full `u64` and `i64` ranges order correctly.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            ConstantValue::Boolean(value) => Some(i128::from(*value)),
            ConstantValue::Char(value) => Some(i128::from(u32::from(*value))),
            ConstantValue::I1(value) => Some(i128::from(*value)),
            ConstantValue::U1(value) => Some(i128::from(*value)),
            ConstantValue::I2(value) => Some(i128::from(*value)),
            ConstantValue::U2(value) => Some(i128::from(*value)),
            ConstantValue::I4(value) => Some(i128::from(*value)),
            ConstantValue::U4(value) => Some(i128::from(*value)),
            ConstantValue::I8(value) => Some(i128::from(*value)),
            ConstantValue::U8(value) => Some(i128::from(*value)),
            _ => None,
        }
    }

    /// Check if this constant is an integer zero (the enum `default` case).
    #[must_use]
    pub fn is_integer_zero(&self) -> bool {
        self.as_i128() == Some(0)
    }

    /// The primitive code this constant decodes as, if it has one.
    #[must_use]
    pub fn primitive_code(&self) -> Option<PrimitiveCode> {
        match self {
            ConstantValue::Boolean(_) => Some(PrimitiveCode::Boolean),
            ConstantValue::Char(_) => Some(PrimitiveCode::Char),
            ConstantValue::I1(_) => Some(PrimitiveCode::I1),
            ConstantValue::U1(_) => Some(PrimitiveCode::U1),
            ConstantValue::I2(_) => Some(PrimitiveCode::I2),
            ConstantValue::U2(_) => Some(PrimitiveCode::U2),
            ConstantValue::I4(_) => Some(PrimitiveCode::I4),
            ConstantValue::U4(_) => Some(PrimitiveCode::U4),
            ConstantValue::I8(_) => Some(PrimitiveCode::I8),
            ConstantValue::U8(_) => Some(PrimitiveCode::U8),
            ConstantValue::R4(_) => Some(PrimitiveCode::R4),
            ConstantValue::R8(_) => Some(PrimitiveCode::R8),
            ConstantValue::String(_) => Some(PrimitiveCode::String),
            ConstantValue::Null => None,
        }
    }
}
