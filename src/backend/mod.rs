/*!

The `backend` module allows one to link between gltex and the OpenGL context.

There are three parts in this module:

 - The `Backend` trait. It represents a context inside gltex, and is what `GlDriver` loads
   its function pointers from.
 - The `Driver` trait. It is the catalog of primitive calls made by the texture code. Every
   call that reaches OpenGL goes through it, which also makes it possible to run the whole
   library against a recording implementation.
 - The `Facade` trait. Calling `get_context` on any object that implements this trait gives
   you the `Context` that the texture functions expect.

*/
use std::ffi::c_void;
use std::ops::Deref;
use std::rc::Rc;

use crate::context::Context;
use crate::gl;

pub use self::gl_driver::GlDriver;

mod gl_driver;

/// Trait for types that can be used as a backend for a gltex context.
///
/// This trait is unsafe, as you can get undefined behaviors or crashes if you don't implement
/// the methods correctly.
pub unsafe trait Backend {
    /// Returns the address of an OpenGL function.
    ///
    /// Supposes that the context has been made current before this function is called.
    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void;

    /// Returns true if the OpenGL context is the current one in the thread.
    fn is_current(&self) -> bool;

    /// Makes the OpenGL context the current context in the current thread.
    unsafe fn make_current(&self);
}

unsafe impl<T> Backend for Rc<T> where T: Backend {
    unsafe fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.deref().get_proc_address(symbol)
    }

    fn is_current(&self) -> bool {
        self.deref().is_current()
    }

    unsafe fn make_current(&self) {
        self.deref().make_current();
    }
}

/// Trait for types that provide a safe access for gltex functions.
pub trait Facade {
    /// Returns an opaque type that contains the OpenGL state, extensions, version, etc.
    fn get_context(&self) -> &Rc<Context>;
}

impl Facade for Rc<Context> {
    #[inline]
    fn get_context(&self) -> &Rc<Context> {
        self
    }
}

/// How a driver call designates the texture it operates on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureRef {
    /// The texture bound to this target in the active texture unit.
    ///
    /// For cube maps the target may be one of the face targets.
    Bound(gl::types::GLenum),

    /// The texture with this name, through `ARB_direct_state_access`.
    Named(gl::types::GLuint),

    /// The texture with this name and target, through `EXT_direct_state_access`.
    NamedExt(gl::types::GLuint, gl::types::GLenum),
}

/// Value passed to one of the `glTexParameter` family of functions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParameterValue<'a> {
    /// `glTexParameteri`.
    Int(gl::types::GLint),
    /// `glTexParameterf`.
    Float(gl::types::GLfloat),
    /// `glTexParameteriv`.
    Ints(&'a [gl::types::GLint]),
    /// `glTexParameterfv`.
    Floats(&'a [gl::types::GLfloat]),
    /// `glTexParameterIiv`, values are not normalized.
    IntegerInts(&'a [gl::types::GLint]),
    /// `glTexParameterIuiv`, values are not normalized.
    IntegerUints(&'a [gl::types::GLuint]),
}

/// Size or offset of a region of a texture, in one, two or three dimensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Extent {
    /// One dimension: width.
    D1(i32),
    /// Two dimensions: width and height.
    D2(i32, i32),
    /// Three dimensions: width, height and depth.
    D3(i32, i32, i32),
}

impl Extent {
    /// Returns the number of dimensions.
    #[inline]
    pub fn dimensions(&self) -> u8 {
        match *self {
            Extent::D1(..) => 1,
            Extent::D2(..) => 2,
            Extent::D3(..) => 3,
        }
    }

    /// Returns the three components, filling the missing ones with `0`.
    #[inline]
    pub fn as_offset(&self) -> [i32; 3] {
        match *self {
            Extent::D1(x) => [x, 0, 0],
            Extent::D2(x, y) => [x, y, 0],
            Extent::D3(x, y, z) => [x, y, z],
        }
    }

    /// Returns the three components, filling the missing ones with `1`.
    #[inline]
    pub fn as_size(&self) -> [i32; 3] {
        match *self {
            Extent::D1(w) => [w, 1, 1],
            Extent::D2(w, h) => [w, h, 1],
            Extent::D3(w, h, d) => [w, h, d],
        }
    }
}

/// The primitive OpenGL calls that the texture code relies on.
///
/// Every method maps to one OpenGL function, or to a small family of them when the texture
/// can be designated in several ways (see `TextureRef`). None of the methods do any caching,
/// this is the job of the `Context`.
///
/// The context that owns the driver must be current when any of these methods is called.
pub trait Driver {
    /// Returns true if the context the driver talks to is current in this thread.
    #[inline]
    fn is_current(&self) -> bool {
        true
    }

    /// Makes the context current in this thread.
    #[inline]
    unsafe fn make_current(&self) {
    }

    /// `glGetString`.
    fn get_string(&self, name: gl::types::GLenum) -> Option<String>;

    /// `glGetStringi`.
    fn get_string_i(&self, name: gl::types::GLenum, index: gl::types::GLuint) -> Option<String>;

    /// `glGetIntegerv` with a single value.
    fn get_integer(&self, name: gl::types::GLenum) -> gl::types::GLint;

    /// `glGetFloatv` with a single value.
    fn get_float(&self, name: gl::types::GLenum) -> gl::types::GLfloat;

    /// `glGenTextures` for one name. The name is reserved but no object exists yet.
    fn gen_texture(&self) -> gl::types::GLuint;

    /// `glCreateTextures` for one texture, the object exists right away.
    fn create_texture(&self, target: gl::types::GLenum) -> gl::types::GLuint;

    /// `glDeleteTextures`.
    fn delete_texture(&self, id: gl::types::GLuint);

    /// `glActiveTexture(GL_TEXTURE0 + unit)`.
    fn active_texture(&self, unit: gl::types::GLuint);

    /// `glBindTexture`.
    fn bind_texture(&self, target: gl::types::GLenum, id: gl::types::GLuint);

    /// `glBindTextureUnit`.
    fn bind_texture_unit(&self, unit: gl::types::GLuint, id: gl::types::GLuint);

    /// `glBindMultiTextureEXT(GL_TEXTURE0 + unit, target, id)`.
    fn bind_multi_texture(&self, unit: gl::types::GLuint, target: gl::types::GLenum,
                          id: gl::types::GLuint);

    /// `glBindTextures`.
    fn bind_textures(&self, first: gl::types::GLuint, ids: &[gl::types::GLuint]);

    /// `glBindImageTexture`.
    #[allow(clippy::too_many_arguments)]
    fn bind_image_texture(&self, unit: gl::types::GLuint, id: gl::types::GLuint,
                          level: gl::types::GLint, layered: bool, layer: gl::types::GLint,
                          access: gl::types::GLenum, format: gl::types::GLenum);

    /// `glBindImageTextures`.
    fn bind_image_textures(&self, first: gl::types::GLuint, ids: &[gl::types::GLuint]);

    /// `glTexParameter*`, `glTextureParameter*` or `glTextureParameter*EXT`.
    fn tex_parameter(&self, texture: TextureRef, pname: gl::types::GLenum,
                     value: ParameterValue<'_>);

    /// `glGetTexParameteriv` and its direct access variants.
    fn get_tex_parameter(&self, texture: TextureRef, pname: gl::types::GLenum)
                         -> gl::types::GLint;

    /// `glGetTexLevelParameteriv` and its direct access variants.
    fn get_tex_level_parameter(&self, texture: TextureRef, level: gl::types::GLint,
                               pname: gl::types::GLenum) -> gl::types::GLint;

    /// `glGenerateMipmap` and its direct access variants.
    fn generate_mipmap(&self, texture: TextureRef);

    /// `glTexStorage1D/2D/3D` and their direct access variants.
    fn tex_storage(&self, texture: TextureRef, levels: gl::types::GLsizei,
                   internal_format: gl::types::GLenum, size: Extent);

    /// `glTexStorage2D/3DMultisample` and their direct access variants.
    fn tex_storage_multisample(&self, texture: TextureRef, samples: gl::types::GLsizei,
                               internal_format: gl::types::GLenum, size: Extent,
                               fixed_sample_locations: bool);

    /// `glTexImage2D/3DMultisample`.
    fn tex_image_multisample(&self, target: gl::types::GLenum, samples: gl::types::GLsizei,
                             internal_format: gl::types::GLenum, size: Extent,
                             fixed_sample_locations: bool);

    /// `glTexImage1D/2D/3D` on the texture bound to `target` in the active unit.
    ///
    /// `None` allocates the level without uploading anything.
    #[allow(clippy::too_many_arguments)]
    fn tex_image(&self, target: gl::types::GLenum, level: gl::types::GLint,
                 internal_format: gl::types::GLenum, size: Extent, format: gl::types::GLenum,
                 ty: gl::types::GLenum, data: Option<&[u8]>);

    /// `glTexSubImage1D/2D/3D` and their direct access variants.
    #[allow(clippy::too_many_arguments)]
    fn tex_sub_image(&self, texture: TextureRef, level: gl::types::GLint, offset: Extent,
                     size: Extent, format: gl::types::GLenum, ty: gl::types::GLenum,
                     data: &[u8]);

    /// `glCompressedTexSubImage1D/2D/3D` and their direct access variants.
    fn compressed_tex_sub_image(&self, texture: TextureRef, level: gl::types::GLint,
                                offset: Extent, size: Extent, format: gl::types::GLenum,
                                data: &[u8]);

    /// `glGetTexImage` and its direct access variants.
    fn get_tex_image(&self, texture: TextureRef, level: gl::types::GLint,
                     format: gl::types::GLenum, ty: gl::types::GLenum, data: &mut [u8]);

    /// `glGetnTexImageARB` on the texture bound to `target` in the active unit.
    fn getn_tex_image(&self, target: gl::types::GLenum, level: gl::types::GLint,
                      format: gl::types::GLenum, ty: gl::types::GLenum, data: &mut [u8]);

    /// `glGetCompressedTexImage` and its direct access variants.
    fn get_compressed_tex_image(&self, texture: TextureRef, level: gl::types::GLint,
                                data: &mut [u8]);

    /// `glGetnCompressedTexImageARB` on the texture bound to `target` in the active unit.
    fn getn_compressed_tex_image(&self, target: gl::types::GLenum, level: gl::types::GLint,
                                 data: &mut [u8]);

    /// `glGetTextureSubImage`.
    #[allow(clippy::too_many_arguments)]
    fn get_texture_sub_image(&self, id: gl::types::GLuint, level: gl::types::GLint,
                             offset: Extent, size: Extent, format: gl::types::GLenum,
                             ty: gl::types::GLenum, data: &mut [u8]);

    /// `glGetCompressedTextureSubImage`.
    fn get_compressed_texture_sub_image(&self, id: gl::types::GLuint, level: gl::types::GLint,
                                        offset: Extent, size: Extent, data: &mut [u8]);

    /// `glInvalidateTexImage`.
    fn invalidate_tex_image(&self, id: gl::types::GLuint, level: gl::types::GLint);

    /// `glInvalidateTexSubImage`.
    fn invalidate_tex_sub_image(&self, id: gl::types::GLuint, level: gl::types::GLint,
                                offset: Extent, size: Extent);

    /// `glGetInternalformativ` with a single value.
    fn get_internal_format(&self, target: gl::types::GLenum, internal_format: gl::types::GLenum,
                           pname: gl::types::GLenum) -> gl::types::GLint;

    /// `glObjectLabel`.
    fn object_label(&self, identifier: gl::types::GLenum, id: gl::types::GLuint, label: &str);

    /// `glTexBuffer` and its direct access variants.
    fn tex_buffer(&self, texture: TextureRef, internal_format: gl::types::GLenum,
                  buffer: gl::types::GLuint);

    /// `glTexBufferRange` and its direct access variants.
    fn tex_buffer_range(&self, texture: TextureRef, internal_format: gl::types::GLenum,
                        buffer: gl::types::GLuint, offset: isize, size: isize);
}
