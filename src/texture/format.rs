//! Formats passed through to the driver.
//!
//! gltex doesn't translate formats, it only needs to carry them. Each of them is a wrapper around
//! the raw `GLenum` so that any value the driver understands can be used, including the ones of
//! extensions that have no constant here.

use crate::gl;
use crate::ToGlEnum;

macro_rules! gl_format {
    ($(#[$attr:meta])* $name:ident { $($cst:ident),* $(,)* }) => {
        $(#[$attr])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub gl::types::GLenum);

        #[allow(missing_docs)]
        impl $name {
            $(
                pub const $cst: $name = $name(gl::$cst);
            )*
        }

        impl ToGlEnum for $name {
            #[inline]
            fn to_glenum(&self) -> gl::types::GLenum {
                self.0
            }
        }
    };
}

gl_format!(
    /// Internal format of an uncompressed or compressed texture, as given to `glTexStorage*`.
    TextureFormat {
        R8, R8_SNORM, R16, RG8, RG16, RGB8, RGBA4, RGB10_A2, RGBA8, RGBA16, SRGB8, SRGB8_ALPHA8,
        R16F, RG16F, RGB16F, RGBA16F, R32F, RG32F, RGB32F, RGBA32F, R11F_G11F_B10F,
        R8I, R8UI, R16I, R16UI, R32I, R32UI, RG32UI, RGBA8I, RGBA8UI, RGBA32I, RGBA32UI,
        DEPTH_COMPONENT16, DEPTH_COMPONENT24, DEPTH_COMPONENT32, DEPTH_COMPONENT32F,
        DEPTH24_STENCIL8, DEPTH32F_STENCIL8, STENCIL_INDEX8,
        COMPRESSED_RED_RGTC1, COMPRESSED_RG_RGTC2, COMPRESSED_RGBA_BPTC_UNORM,
        COMPRESSED_SRGB_ALPHA_BPTC_UNORM, COMPRESSED_RGB8_ETC2, COMPRESSED_RGBA8_ETC2_EAC,
    }
);

gl_format!(
    /// Layout of the pixels in client memory.
    PixelFormat {
        RED, RG, RGB, BGR, RGBA, BGRA, RED_INTEGER, RG_INTEGER, RGB_INTEGER, RGBA_INTEGER,
        DEPTH_COMPONENT, STENCIL_INDEX, DEPTH_STENCIL,
    }
);

gl_format!(
    /// Type of each component in client memory.
    PixelType {
        UNSIGNED_BYTE, BYTE, UNSIGNED_SHORT, SHORT, UNSIGNED_INT, INT, HALF_FLOAT, FLOAT,
        UNSIGNED_INT_24_8, FLOAT_32_UNSIGNED_INT_24_8_REV, UNSIGNED_INT_2_10_10_10_REV,
    }
);

gl_format!(
    /// Format of compressed data in client memory.
    CompressedPixelFormat {
        COMPRESSED_RED_RGTC1, COMPRESSED_RG_RGTC2, COMPRESSED_RGBA_BPTC_UNORM,
        COMPRESSED_SRGB_ALPHA_BPTC_UNORM, COMPRESSED_RGB8_ETC2, COMPRESSED_RGBA8_ETC2_EAC,
    }
);

gl_format!(
    /// Format in which shaders access an image unit.
    ImageFormat {
        R8, RG8, RGBA8, R16F, RGBA16F, R32F, RGBA32F, R32I, R32UI, RGBA32I, RGBA32UI,
    }
);

impl TextureFormat {
    /// Returns a pixel format and type that the driver accepts together with this internal
    /// format when allocating a level without uploading anything.
    pub fn allocation_transfer(&self) -> (PixelFormat, PixelType) {
        match self.0 {
            gl::DEPTH_COMPONENT16 | gl::DEPTH_COMPONENT24 | gl::DEPTH_COMPONENT32 |
            gl::DEPTH_COMPONENT32F => (PixelFormat::DEPTH_COMPONENT, PixelType::FLOAT),

            gl::DEPTH24_STENCIL8 => (PixelFormat::DEPTH_STENCIL, PixelType::UNSIGNED_INT_24_8),
            gl::DEPTH32F_STENCIL8 => {
                (PixelFormat::DEPTH_STENCIL, PixelType::FLOAT_32_UNSIGNED_INT_24_8_REV)
            },

            gl::STENCIL_INDEX8 => (PixelFormat::STENCIL_INDEX, PixelType::UNSIGNED_BYTE),

            gl::R8UI | gl::R16UI | gl::R32UI | gl::RG32UI | gl::RGBA8UI | gl::RGBA32UI => {
                (PixelFormat::RGBA_INTEGER, PixelType::UNSIGNED_INT)
            },

            gl::R8I | gl::R16I | gl::R32I | gl::RGBA8I | gl::RGBA32I => {
                (PixelFormat::RGBA_INTEGER, PixelType::INT)
            },

            _ => (PixelFormat::RGBA, PixelType::UNSIGNED_BYTE),
        }
    }
}

impl PixelFormat {
    /// Returns the size in bytes of one pixel of this format with components of type `ty`.
    ///
    /// Returns `None` if gltex doesn't know the size of the format or of the type.
    pub fn pixel_size(&self, ty: PixelType) -> Option<usize> {
        // packed types hold the whole pixel
        match ty.0 {
            gl::UNSIGNED_INT_24_8 | gl::UNSIGNED_INT_2_10_10_10_REV => return Some(4),
            gl::FLOAT_32_UNSIGNED_INT_24_8_REV => return Some(8),
            _ => (),
        }

        let components = match self.0 {
            gl::RED | gl::RED_INTEGER | gl::DEPTH_COMPONENT | gl::STENCIL_INDEX => 1,
            gl::RG | gl::RG_INTEGER => 2,
            gl::RGB | gl::BGR | gl::RGB_INTEGER => 3,
            gl::RGBA | gl::BGRA | gl::RGBA_INTEGER => 4,
            _ => return None,
        };

        let component_size = match ty.0 {
            gl::UNSIGNED_BYTE | gl::BYTE => 1,
            gl::UNSIGNED_SHORT | gl::SHORT | gl::HALF_FLOAT => 2,
            gl::UNSIGNED_INT | gl::INT | gl::FLOAT => 4,
            _ => return None,
        };

        Some(components * component_size)
    }
}

/// Kind of access that shaders get to an image unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ImageAccess {
    /// `GL_READ_ONLY`
    ReadOnly,
    /// `GL_WRITE_ONLY`
    WriteOnly,
    /// `GL_READ_WRITE`
    ReadWrite,
}

impl ToGlEnum for ImageAccess {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            ImageAccess::ReadOnly => gl::READ_ONLY,
            ImageAccess::WriteOnly => gl::WRITE_ONLY,
            ImageAccess::ReadWrite => gl::READ_WRITE,
        }
    }
}
