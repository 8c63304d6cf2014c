use serde::{Deserialize, Serialize};

use super::core::Size;

/// Pixel layout of a host texture. Discriminants are the host's wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum TextureFormat {
    #[default]
    Invalid = 0,
    Rgba32 = 1,
    Bgra32 = 2,
    Argb32 = 3,
    Abgr32 = 4,
    Rgb24 = 5,
    Bgr24 = 6,
    Rgba4444 = 7,
    Rgba5551 = 8,
    Rgb565 = 9,
}

impl TextureFormat {
    /// Decode a host wire value. Unrecognized values decode to `Invalid`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Rgba32,
            2 => Self::Bgra32,
            3 => Self::Argb32,
            4 => Self::Abgr32,
            5 => Self::Rgb24,
            6 => Self::Bgr24,
            7 => Self::Rgba4444,
            8 => Self::Rgba5551,
            9 => Self::Rgb565,
            _ => Self::Invalid,
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            Self::Rgba32 | Self::Bgra32 | Self::Argb32 | Self::Abgr32 => 4,
            Self::Rgb24 | Self::Bgr24 => 3,
            Self::Rgba4444 | Self::Rgba5551 | Self::Rgb565 => 2,
            Self::Invalid => 0,
        }
    }

    /// Bytes needed to hold a `size` image in this format. Zero for an
    /// empty size or an invalid format.
    pub fn buffer_size(self, size: Size) -> u64 {
        size.area().saturating_mul(u64::from(self.bytes_per_pixel()))
    }
}

/// Buffer size for raw host arguments, as exposed through the C ABI.
pub fn buffer_size_for_format(width: i32, height: i32, format: i32) -> u64 {
    if width <= 0 || height <= 0 {
        return 0;
    }
    TextureFormat::from_raw(format).buffer_size(Size::from_host(width, height))
}
