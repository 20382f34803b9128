/*!

A texture is an OpenGL object that holds one or more images.

The `RawTexture` type is a handle to such an object. It doesn't know anything about the size or
the format of its content, it only knows its target and how to talk to the driver. Every
operation goes through the table of implementations that the `Context` picked when it was
created, see the `dispatch` module.

Texture units and image units are shared by all the textures of a context. The context keeps a
mirror of their content, so that binding a texture where it is already bound doesn't reach the
driver:

```no_run
# fn example(context: std::rc::Rc<gltex::Context>) {
use gltex::texture::{self, RawTexture, TextureTarget};

let a = RawTexture::new(&context, TextureTarget::Texture2d);
let b = RawTexture::new(&context, TextureTarget::Texture3d);

texture::bind_multi(&context, 0, &[Some(&a), Some(&b), None]);
texture::unbind_range(&context, 0, 3);
# }
```

*/

use crate::gl;
use crate::ToGlEnum;

pub use crate::backend::Extent;

pub use self::bind::{bind_images, bind_multi, unbind, unbind_image, unbind_images};
pub use self::bind::unbind_range;
pub use self::format::{CompressedPixelFormat, ImageAccess, ImageFormat, PixelFormat, PixelType};
pub use self::format::TextureFormat;
pub use self::image::{compressed_block_data_size, compressed_block_size};
pub use self::raw::{ObjectFlags, RawTexture, TextureObjectState};
pub use self::sampler::{DepthStencilMode, MagnifySamplerFilter, MinifySamplerFilter};
pub use self::sampler::{DepthTextureComparison, SamplerWrapFunction, Swizzle};

pub mod dispatch;
pub mod limits;

mod bind;
mod buffer;
mod cube;
mod format;
mod image;
mod raw;
mod sampler;

/// Type of a texture. It is fixed when the texture is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// `GL_TEXTURE_1D`
    Texture1d,
    /// `GL_TEXTURE_1D_ARRAY`
    Texture1dArray,
    /// `GL_TEXTURE_2D`
    Texture2d,
    /// `GL_TEXTURE_2D_ARRAY`
    Texture2dArray,
    /// `GL_TEXTURE_2D_MULTISAMPLE`
    Texture2dMultisample,
    /// `GL_TEXTURE_2D_MULTISAMPLE_ARRAY`
    Texture2dMultisampleArray,
    /// `GL_TEXTURE_3D`
    Texture3d,
    /// `GL_TEXTURE_CUBE_MAP`
    CubeMap,
    /// `GL_TEXTURE_CUBE_MAP_ARRAY`
    CubeMapArray,
    /// `GL_TEXTURE_RECTANGLE`
    Rectangle,
    /// `GL_TEXTURE_BUFFER`
    Buffer,
}

impl TextureTarget {
    /// Number of dimensions of the storage of a texture of this type, layers included.
    #[inline]
    pub fn dimensions(&self) -> u8 {
        match *self {
            TextureTarget::Texture1d | TextureTarget::Buffer => 1,
            TextureTarget::Texture1dArray | TextureTarget::Texture2d |
            TextureTarget::Texture2dMultisample | TextureTarget::CubeMap |
            TextureTarget::Rectangle => 2,
            TextureTarget::Texture2dArray | TextureTarget::Texture2dMultisampleArray |
            TextureTarget::Texture3d | TextureTarget::CubeMapArray => 3,
        }
    }

    /// Returns true if the last dimension of the storage is a list of layers that share the
    /// mipmap chain, instead of being scaled down with the level.
    #[inline]
    pub fn is_layered(&self) -> bool {
        matches!(*self, TextureTarget::Texture1dArray | TextureTarget::Texture2dArray |
                        TextureTarget::Texture2dMultisampleArray | TextureTarget::CubeMapArray)
    }

    /// Returns true for the targets whose storage has several samples per texel.
    #[inline]
    pub fn is_multisample(&self) -> bool {
        matches!(*self, TextureTarget::Texture2dMultisample |
                        TextureTarget::Texture2dMultisampleArray)
    }
}

impl ToGlEnum for TextureTarget {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            TextureTarget::Texture1d => gl::TEXTURE_1D,
            TextureTarget::Texture1dArray => gl::TEXTURE_1D_ARRAY,
            TextureTarget::Texture2d => gl::TEXTURE_2D,
            TextureTarget::Texture2dArray => gl::TEXTURE_2D_ARRAY,
            TextureTarget::Texture2dMultisample => gl::TEXTURE_2D_MULTISAMPLE,
            TextureTarget::Texture2dMultisampleArray => gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
            TextureTarget::Texture3d => gl::TEXTURE_3D,
            TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
            TextureTarget::CubeMapArray => gl::TEXTURE_CUBE_MAP_ARRAY,
            TextureTarget::Rectangle => gl::TEXTURE_RECTANGLE,
            TextureTarget::Buffer => gl::TEXTURE_BUFFER,
        }
    }
}

/// One of the six faces of a cube map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CubeMapFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeMapFace {
    /// The faces in the order of their layer index.
    pub const ALL: [CubeMapFace; 6] = [
        CubeMapFace::PositiveX, CubeMapFace::NegativeX,
        CubeMapFace::PositiveY, CubeMapFace::NegativeY,
        CubeMapFace::PositiveZ, CubeMapFace::NegativeZ,
    ];

    /// Index of the face when the cube map is seen as a 2D array of six layers.
    #[inline]
    pub fn layer(&self) -> i32 {
        match *self {
            CubeMapFace::PositiveX => 0,
            CubeMapFace::NegativeX => 1,
            CubeMapFace::PositiveY => 2,
            CubeMapFace::NegativeY => 3,
            CubeMapFace::PositiveZ => 4,
            CubeMapFace::NegativeZ => 5,
        }
    }
}

impl ToGlEnum for CubeMapFace {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            CubeMapFace::PositiveX => gl::TEXTURE_CUBE_MAP_POSITIVE_X,
            CubeMapFace::NegativeX => gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
            CubeMapFace::PositiveY => gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
            CubeMapFace::NegativeY => gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
            CubeMapFace::PositiveZ => gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
            CubeMapFace::NegativeZ => gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
        }
    }
}
