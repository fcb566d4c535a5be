//! Scalar property types that may appear in a PLY header.
//!
//! Splat columns are always stored as `f32`; properties declared with any
//! other scalar type are converted on read.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use num_traits::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScalarType {
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Float32 = 9,
    Float64 = 10,
}

impl ScalarType {
    /// Returns the size of this type in bytes.
    ///
    /// # Examples
    /// ```
    /// use splat_core::data_types::ScalarType;
    /// assert_eq!(ScalarType::Float32.byte_length(), 4);
    /// assert_eq!(ScalarType::UInt8.byte_length(), 1);
    /// ```
    pub const fn byte_length(self) -> usize {
        match self {
            ScalarType::Int8 | ScalarType::UInt8 => 1,
            ScalarType::Int16 | ScalarType::UInt16 => 2,
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => 4,
            ScalarType::Float64 => 8,
        }
    }

    /// Parses a PLY scalar type name. Both the classic names (`uchar`,
    /// `float`, ...) and the sized aliases (`uint8`, `float32`, ...) are
    /// accepted.
    pub fn from_ply_name(name: &str) -> Option<Self> {
        let ty = match name {
            "char" | "int8" => ScalarType::Int8,
            "uchar" | "uint8" => ScalarType::UInt8,
            "short" | "int16" => ScalarType::Int16,
            "ushort" | "uint16" => ScalarType::UInt16,
            "int" | "int32" => ScalarType::Int32,
            "uint" | "uint32" => ScalarType::UInt32,
            "float" | "float32" => ScalarType::Float32,
            "double" | "float64" => ScalarType::Float64,
            _ => return None,
        };
        Some(ty)
    }

    /// The name written for this type in a PLY header.
    pub const fn ply_name(self) -> &'static str {
        match self {
            ScalarType::Int8 => "char",
            ScalarType::UInt8 => "uchar",
            ScalarType::Int16 => "short",
            ScalarType::UInt16 => "ushort",
            ScalarType::Int32 => "int",
            ScalarType::UInt32 => "uint",
            ScalarType::Float32 => "float",
            ScalarType::Float64 => "double",
        }
    }

    /// Whether values of this type need conversion to a float column.
    pub const fn is_integral(self) -> bool {
        !matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }

    /// Decodes one little-endian value of this type from the start of
    /// `bytes` and converts it to `f32`.
    ///
    /// `bytes` must hold at least [`byte_length`](Self::byte_length) bytes.
    pub fn read_le_f32(self, bytes: &[u8]) -> f32 {
        let value = match self {
            ScalarType::Int8 => (bytes[0] as i8).to_f32(),
            ScalarType::UInt8 => bytes[0].to_f32(),
            ScalarType::Int16 => LittleEndian::read_i16(bytes).to_f32(),
            ScalarType::UInt16 => LittleEndian::read_u16(bytes).to_f32(),
            ScalarType::Int32 => LittleEndian::read_i32(bytes).to_f32(),
            ScalarType::UInt32 => LittleEndian::read_u32(bytes).to_f32(),
            ScalarType::Float32 => Some(LittleEndian::read_f32(bytes)),
            ScalarType::Float64 => LittleEndian::read_f64(bytes).to_f32(),
        };
        // Integer and f64 -> f32 conversions never fail; out-of-range doubles saturate.
        value.unwrap_or(f32::NAN)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ply_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classic_and_sized_names() {
        assert_eq!(ScalarType::from_ply_name("float"), Some(ScalarType::Float32));
        assert_eq!(ScalarType::from_ply_name("float32"), Some(ScalarType::Float32));
        assert_eq!(ScalarType::from_ply_name("uchar"), Some(ScalarType::UInt8));
        assert_eq!(ScalarType::from_ply_name("double"), Some(ScalarType::Float64));
        assert_eq!(ScalarType::from_ply_name("list"), None);
    }

    #[test]
    fn only_float_types_are_non_integral() {
        assert!(ScalarType::UInt8.is_integral());
        assert!(ScalarType::Int32.is_integral());
        assert!(!ScalarType::Float32.is_integral());
        assert!(!ScalarType::Float64.is_integral());
    }

    #[test]
    fn reads_little_endian_values() {
        assert_eq!(ScalarType::Float32.read_le_f32(&1.5f32.to_le_bytes()), 1.5);
        assert_eq!(ScalarType::Float64.read_le_f32(&(-2.25f64).to_le_bytes()), -2.25);
        assert_eq!(ScalarType::UInt8.read_le_f32(&[200]), 200.0);
        assert_eq!(ScalarType::Int16.read_le_f32(&(-7i16).to_le_bytes()), -7.0);
        assert_eq!(ScalarType::UInt32.read_le_f32(&640u32.to_le_bytes()), 640.0);
    }
}
