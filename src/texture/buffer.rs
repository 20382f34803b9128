use crate::gl;
use crate::texture::{RawTexture, TextureFormat, TextureTarget};
use crate::ToGlEnum;

impl RawTexture {
    /// Makes a buffer texture use the whole content of `buffer`, seen with `format`.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a buffer texture or if `ARB_texture_buffer_object` is not
    /// available.
    pub fn set_buffer(&self, format: TextureFormat, buffer: gl::types::GLuint) {
        assert!(self.get_target() == TextureTarget::Buffer,
                "{:?} is not a buffer texture", self.get_target());
        assert!(self.get_context().get_extensions().gl_arb_texture_buffer_object,
                "GL_ARB_texture_buffer_object is not supported");

        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.buffer;
        let texture = self.texture_ref(&mut ctxt, path);
        ctxt.driver.tex_buffer(texture, format.to_glenum(), buffer);
    }

    /// Makes a buffer texture use `size` bytes of `buffer` starting at `offset`.
    ///
    /// `offset` must be a multiple of `limits::buffer_offset_alignment`.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a buffer texture or if `ARB_texture_buffer_range` is not
    /// available.
    pub fn set_buffer_range(&self, format: TextureFormat, buffer: gl::types::GLuint,
                            offset: isize, size: isize)
    {
        assert!(self.get_target() == TextureTarget::Buffer,
                "{:?} is not a buffer texture", self.get_target());
        assert!(self.get_context().get_extensions().gl_arb_texture_buffer_range,
                "GL_ARB_texture_buffer_range is not supported");

        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.buffer;
        let texture = self.texture_ref(&mut ctxt, path);
        ctxt.driver.tex_buffer_range(texture, format.to_glenum(), buffer, offset, size);
    }
}
