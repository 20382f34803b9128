use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::ptr;

use crate::backend::{Backend, Driver, Extent, ParameterValue, TextureRef};
use crate::gl;

/// Implementation of `Driver` that calls the real OpenGL functions.
pub struct GlDriver<B> {
    backend: B,
    gl: gl::Gl,
}

impl<B> GlDriver<B> where B: Backend {
    /// Makes the backend current and loads the OpenGL function pointers from it.
    ///
    /// # Safety
    ///
    /// The backend must return valid function pointers for the context it represents.
    pub unsafe fn new(backend: B) -> GlDriver<B> {
        backend.make_current();
        let gl = gl::Gl::load_with(|symbol| backend.get_proc_address(symbol) as *const _);

        GlDriver {
            backend,
            gl,
        }
    }

    /// Returns the backend the functions were loaded from.
    #[inline]
    pub fn get_backend(&self) -> &B {
        &self.backend
    }
}

#[inline]
fn to_glboolean(value: bool) -> gl::types::GLboolean {
    if value { gl::TRUE } else { gl::FALSE }
}

#[inline]
fn data_ptr(data: &[u8]) -> *const c_void {
    data.as_ptr() as *const c_void
}

#[inline]
fn data_ptr_mut(data: &mut [u8]) -> *mut c_void {
    data.as_mut_ptr() as *mut c_void
}

impl<B> Driver for GlDriver<B> where B: Backend {
    #[inline]
    fn is_current(&self) -> bool {
        self.backend.is_current()
    }

    #[inline]
    unsafe fn make_current(&self) {
        self.backend.make_current();
    }

    fn get_string(&self, name: gl::types::GLenum) -> Option<String> {
        unsafe {
            let value = self.gl.GetString(name);
            if value.is_null() {
                return None;
            }
            Some(CStr::from_ptr(value as *const c_char).to_string_lossy().into_owned())
        }
    }

    fn get_string_i(&self, name: gl::types::GLenum, index: gl::types::GLuint) -> Option<String> {
        unsafe {
            let value = self.gl.GetStringi(name, index);
            if value.is_null() {
                return None;
            }
            Some(CStr::from_ptr(value as *const c_char).to_string_lossy().into_owned())
        }
    }

    fn get_integer(&self, name: gl::types::GLenum) -> gl::types::GLint {
        let mut value = 0;
        unsafe { self.gl.GetIntegerv(name, &mut value) };
        value
    }

    fn get_float(&self, name: gl::types::GLenum) -> gl::types::GLfloat {
        let mut value = 0.0;
        unsafe { self.gl.GetFloatv(name, &mut value) };
        value
    }

    fn gen_texture(&self) -> gl::types::GLuint {
        let mut id = 0;
        unsafe { self.gl.GenTextures(1, &mut id) };
        id
    }

    fn create_texture(&self, target: gl::types::GLenum) -> gl::types::GLuint {
        let mut id = 0;
        unsafe { self.gl.CreateTextures(target, 1, &mut id) };
        id
    }

    fn delete_texture(&self, id: gl::types::GLuint) {
        unsafe { self.gl.DeleteTextures(1, [id].as_ptr()) };
    }

    fn active_texture(&self, unit: gl::types::GLuint) {
        unsafe { self.gl.ActiveTexture(gl::TEXTURE0 + unit) };
    }

    fn bind_texture(&self, target: gl::types::GLenum, id: gl::types::GLuint) {
        unsafe { self.gl.BindTexture(target, id) };
    }

    fn bind_texture_unit(&self, unit: gl::types::GLuint, id: gl::types::GLuint) {
        unsafe { self.gl.BindTextureUnit(unit, id) };
    }

    fn bind_multi_texture(&self, unit: gl::types::GLuint, target: gl::types::GLenum,
                          id: gl::types::GLuint)
    {
        unsafe { self.gl.BindMultiTextureEXT(gl::TEXTURE0 + unit, target, id) };
    }

    fn bind_textures(&self, first: gl::types::GLuint, ids: &[gl::types::GLuint]) {
        unsafe { self.gl.BindTextures(first, ids.len() as gl::types::GLsizei, ids.as_ptr()) };
    }

    fn bind_image_texture(&self, unit: gl::types::GLuint, id: gl::types::GLuint,
                          level: gl::types::GLint, layered: bool, layer: gl::types::GLint,
                          access: gl::types::GLenum, format: gl::types::GLenum)
    {
        unsafe {
            self.gl.BindImageTexture(unit, id, level, to_glboolean(layered), layer, access,
                                     format)
        };
    }

    fn bind_image_textures(&self, first: gl::types::GLuint, ids: &[gl::types::GLuint]) {
        unsafe {
            self.gl.BindImageTextures(first, ids.len() as gl::types::GLsizei, ids.as_ptr())
        };
    }

    fn tex_parameter(&self, texture: TextureRef, pname: gl::types::GLenum,
                     value: ParameterValue<'_>)
    {
        unsafe {
            match (texture, value) {
                (TextureRef::Bound(t), ParameterValue::Int(v)) => self.gl.TexParameteri(t, pname, v),
                (TextureRef::Bound(t), ParameterValue::Float(v)) => self.gl.TexParameterf(t, pname, v),
                (TextureRef::Bound(t), ParameterValue::Ints(v)) => {
                    self.gl.TexParameteriv(t, pname, v.as_ptr())
                },
                (TextureRef::Bound(t), ParameterValue::Floats(v)) => {
                    self.gl.TexParameterfv(t, pname, v.as_ptr())
                },
                (TextureRef::Bound(t), ParameterValue::IntegerInts(v)) => {
                    self.gl.TexParameterIiv(t, pname, v.as_ptr())
                },
                (TextureRef::Bound(t), ParameterValue::IntegerUints(v)) => {
                    self.gl.TexParameterIuiv(t, pname, v.as_ptr())
                },

                (TextureRef::Named(id), ParameterValue::Int(v)) => {
                    self.gl.TextureParameteri(id, pname, v)
                },
                (TextureRef::Named(id), ParameterValue::Float(v)) => {
                    self.gl.TextureParameterf(id, pname, v)
                },
                (TextureRef::Named(id), ParameterValue::Ints(v)) => {
                    self.gl.TextureParameteriv(id, pname, v.as_ptr())
                },
                (TextureRef::Named(id), ParameterValue::Floats(v)) => {
                    self.gl.TextureParameterfv(id, pname, v.as_ptr())
                },
                (TextureRef::Named(id), ParameterValue::IntegerInts(v)) => {
                    self.gl.TextureParameterIiv(id, pname, v.as_ptr())
                },
                (TextureRef::Named(id), ParameterValue::IntegerUints(v)) => {
                    self.gl.TextureParameterIuiv(id, pname, v.as_ptr())
                },

                (TextureRef::NamedExt(id, t), ParameterValue::Int(v)) => {
                    self.gl.TextureParameteriEXT(id, t, pname, v)
                },
                (TextureRef::NamedExt(id, t), ParameterValue::Float(v)) => {
                    self.gl.TextureParameterfEXT(id, t, pname, v)
                },
                (TextureRef::NamedExt(id, t), ParameterValue::Ints(v)) => {
                    self.gl.TextureParameterivEXT(id, t, pname, v.as_ptr())
                },
                (TextureRef::NamedExt(id, t), ParameterValue::Floats(v)) => {
                    self.gl.TextureParameterfvEXT(id, t, pname, v.as_ptr())
                },
                (TextureRef::NamedExt(id, t), ParameterValue::IntegerInts(v)) => {
                    self.gl.TextureParameterIivEXT(id, t, pname, v.as_ptr())
                },
                (TextureRef::NamedExt(id, t), ParameterValue::IntegerUints(v)) => {
                    self.gl.TextureParameterIuivEXT(id, t, pname, v.as_ptr())
                },
            }
        }
    }

    fn get_tex_parameter(&self, texture: TextureRef, pname: gl::types::GLenum)
                         -> gl::types::GLint
    {
        let mut value = 0;
        unsafe {
            match texture {
                TextureRef::Bound(t) => self.gl.GetTexParameteriv(t, pname, &mut value),
                TextureRef::Named(id) => self.gl.GetTextureParameteriv(id, pname, &mut value),
                TextureRef::NamedExt(id, t) => {
                    self.gl.GetTextureParameterivEXT(id, t, pname, &mut value)
                },
            }
        }
        value
    }

    fn get_tex_level_parameter(&self, texture: TextureRef, level: gl::types::GLint,
                               pname: gl::types::GLenum) -> gl::types::GLint
    {
        let mut value = 0;
        unsafe {
            match texture {
                TextureRef::Bound(t) => self.gl.GetTexLevelParameteriv(t, level, pname, &mut value),
                TextureRef::Named(id) => {
                    self.gl.GetTextureLevelParameteriv(id, level, pname, &mut value)
                },
                TextureRef::NamedExt(id, t) => {
                    self.gl.GetTextureLevelParameterivEXT(id, t, level, pname, &mut value)
                },
            }
        }
        value
    }

    fn generate_mipmap(&self, texture: TextureRef) {
        unsafe {
            match texture {
                TextureRef::Bound(t) => self.gl.GenerateMipmap(t),
                TextureRef::Named(id) => self.gl.GenerateTextureMipmap(id),
                TextureRef::NamedExt(id, t) => self.gl.GenerateTextureMipmapEXT(id, t),
            }
        }
    }

    fn tex_storage(&self, texture: TextureRef, levels: gl::types::GLsizei,
                   internal_format: gl::types::GLenum, size: Extent)
    {
        let f = internal_format;
        unsafe {
            match (texture, size) {
                (TextureRef::Bound(t), Extent::D1(w)) => self.gl.TexStorage1D(t, levels, f, w),
                (TextureRef::Bound(t), Extent::D2(w, h)) => {
                    self.gl.TexStorage2D(t, levels, f, w, h)
                },
                (TextureRef::Bound(t), Extent::D3(w, h, d)) => {
                    self.gl.TexStorage3D(t, levels, f, w, h, d)
                },
                (TextureRef::Named(id), Extent::D1(w)) => {
                    self.gl.TextureStorage1D(id, levels, f, w)
                },
                (TextureRef::Named(id), Extent::D2(w, h)) => {
                    self.gl.TextureStorage2D(id, levels, f, w, h)
                },
                (TextureRef::Named(id), Extent::D3(w, h, d)) => {
                    self.gl.TextureStorage3D(id, levels, f, w, h, d)
                },
                (TextureRef::NamedExt(id, t), Extent::D1(w)) => {
                    self.gl.TextureStorage1DEXT(id, t, levels, f, w)
                },
                (TextureRef::NamedExt(id, t), Extent::D2(w, h)) => {
                    self.gl.TextureStorage2DEXT(id, t, levels, f, w, h)
                },
                (TextureRef::NamedExt(id, t), Extent::D3(w, h, d)) => {
                    self.gl.TextureStorage3DEXT(id, t, levels, f, w, h, d)
                },
            }
        }
    }

    fn tex_storage_multisample(&self, texture: TextureRef, samples: gl::types::GLsizei,
                               internal_format: gl::types::GLenum, size: Extent,
                               fixed_sample_locations: bool)
    {
        let (f, fixed) = (internal_format, to_glboolean(fixed_sample_locations));
        unsafe {
            match (texture, size) {
                (_, Extent::D1(_)) => panic!("Multisample storage needs two or three dimensions"),
                (TextureRef::Bound(t), Extent::D2(w, h)) => {
                    self.gl.TexStorage2DMultisample(t, samples, f, w, h, fixed)
                },
                (TextureRef::Bound(t), Extent::D3(w, h, d)) => {
                    self.gl.TexStorage3DMultisample(t, samples, f, w, h, d, fixed)
                },
                (TextureRef::Named(id), Extent::D2(w, h)) => {
                    self.gl.TextureStorage2DMultisample(id, samples, f, w, h, fixed)
                },
                (TextureRef::Named(id), Extent::D3(w, h, d)) => {
                    self.gl.TextureStorage3DMultisample(id, samples, f, w, h, d, fixed)
                },
                (TextureRef::NamedExt(id, t), Extent::D2(w, h)) => {
                    self.gl.TextureStorage2DMultisampleEXT(id, t, samples, f, w, h, fixed)
                },
                (TextureRef::NamedExt(id, t), Extent::D3(w, h, d)) => {
                    self.gl.TextureStorage3DMultisampleEXT(id, t, samples, f, w, h, d, fixed)
                },
            }
        }
    }

    fn tex_image_multisample(&self, target: gl::types::GLenum, samples: gl::types::GLsizei,
                             internal_format: gl::types::GLenum, size: Extent,
                             fixed_sample_locations: bool)
    {
        let fixed = to_glboolean(fixed_sample_locations);
        unsafe {
            match size {
                Extent::D1(_) => panic!("Multisample images need two or three dimensions"),
                Extent::D2(w, h) => {
                    self.gl.TexImage2DMultisample(target, samples, internal_format, w, h, fixed)
                },
                Extent::D3(w, h, d) => {
                    self.gl.TexImage3DMultisample(target, samples, internal_format, w, h, d,
                                                  fixed)
                },
            }
        }
    }

    fn tex_image(&self, target: gl::types::GLenum, level: gl::types::GLint,
                 internal_format: gl::types::GLenum, size: Extent, format: gl::types::GLenum,
                 ty: gl::types::GLenum, data: Option<&[u8]>)
    {
        let f = internal_format as gl::types::GLint;
        let ptr = data.map_or(ptr::null(), data_ptr);
        unsafe {
            if data.is_some() {
                self.gl.PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            }

            match size {
                Extent::D1(w) => self.gl.TexImage1D(target, level, f, w, 0, format, ty, ptr),
                Extent::D2(w, h) => {
                    self.gl.TexImage2D(target, level, f, w, h, 0, format, ty, ptr)
                },
                Extent::D3(w, h, d) => {
                    self.gl.TexImage3D(target, level, f, w, h, d, 0, format, ty, ptr)
                },
            }
        }
    }

    fn tex_sub_image(&self, texture: TextureRef, level: gl::types::GLint, offset: Extent,
                     size: Extent, format: gl::types::GLenum, ty: gl::types::GLenum,
                     data: &[u8])
    {
        assert_eq!(offset.dimensions(), size.dimensions());
        let [x, y, z] = offset.as_offset();
        let [w, h, d] = size.as_size();
        let ptr = data_ptr(data);

        unsafe {
            // the sizes checked by the texture functions assume tightly packed rows
            self.gl.PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            match (texture, size.dimensions()) {
                (TextureRef::Bound(t), 1) => {
                    self.gl.TexSubImage1D(t, level, x, w, format, ty, ptr)
                },
                (TextureRef::Bound(t), 2) => {
                    self.gl.TexSubImage2D(t, level, x, y, w, h, format, ty, ptr)
                },
                (TextureRef::Bound(t), _) => {
                    self.gl.TexSubImage3D(t, level, x, y, z, w, h, d, format, ty, ptr)
                },
                (TextureRef::Named(id), 1) => {
                    self.gl.TextureSubImage1D(id, level, x, w, format, ty, ptr)
                },
                (TextureRef::Named(id), 2) => {
                    self.gl.TextureSubImage2D(id, level, x, y, w, h, format, ty, ptr)
                },
                (TextureRef::Named(id), _) => {
                    self.gl.TextureSubImage3D(id, level, x, y, z, w, h, d, format, ty, ptr)
                },
                (TextureRef::NamedExt(id, t), 1) => {
                    self.gl.TextureSubImage1DEXT(id, t, level, x, w, format, ty, ptr)
                },
                (TextureRef::NamedExt(id, t), 2) => {
                    self.gl.TextureSubImage2DEXT(id, t, level, x, y, w, h, format, ty, ptr)
                },
                (TextureRef::NamedExt(id, t), _) => {
                    self.gl.TextureSubImage3DEXT(id, t, level, x, y, z, w, h, d, format, ty, ptr)
                },
            }
        }
    }

    fn compressed_tex_sub_image(&self, texture: TextureRef, level: gl::types::GLint,
                                offset: Extent, size: Extent, format: gl::types::GLenum,
                                data: &[u8])
    {
        assert_eq!(offset.dimensions(), size.dimensions());
        let [x, y, z] = offset.as_offset();
        let [w, h, d] = size.as_size();
        let (len, ptr) = (data.len() as gl::types::GLsizei, data_ptr(data));

        unsafe {
            match (texture, size.dimensions()) {
                (TextureRef::Bound(t), 1) => {
                    self.gl.CompressedTexSubImage1D(t, level, x, w, format, len, ptr)
                },
                (TextureRef::Bound(t), 2) => {
                    self.gl.CompressedTexSubImage2D(t, level, x, y, w, h, format, len, ptr)
                },
                (TextureRef::Bound(t), _) => {
                    self.gl.CompressedTexSubImage3D(t, level, x, y, z, w, h, d, format, len, ptr)
                },
                (TextureRef::Named(id), 1) => {
                    self.gl.CompressedTextureSubImage1D(id, level, x, w, format, len, ptr)
                },
                (TextureRef::Named(id), 2) => {
                    self.gl.CompressedTextureSubImage2D(id, level, x, y, w, h, format, len, ptr)
                },
                (TextureRef::Named(id), _) => {
                    self.gl.CompressedTextureSubImage3D(id, level, x, y, z, w, h, d, format, len,
                                                        ptr)
                },
                (TextureRef::NamedExt(id, t), 1) => {
                    self.gl.CompressedTextureSubImage1DEXT(id, t, level, x, w, format, len, ptr)
                },
                (TextureRef::NamedExt(id, t), 2) => {
                    self.gl.CompressedTextureSubImage2DEXT(id, t, level, x, y, w, h, format, len,
                                                           ptr)
                },
                (TextureRef::NamedExt(id, t), _) => {
                    self.gl.CompressedTextureSubImage3DEXT(id, t, level, x, y, z, w, h, d, format,
                                                           len, ptr)
                },
            }
        }
    }

    fn get_tex_image(&self, texture: TextureRef, level: gl::types::GLint,
                     format: gl::types::GLenum, ty: gl::types::GLenum, data: &mut [u8])
    {
        let len = data.len() as gl::types::GLsizei;
        let ptr = data_ptr_mut(data);
        unsafe {
            self.gl.PixelStorei(gl::PACK_ALIGNMENT, 1);

            match texture {
                TextureRef::Bound(t) => self.gl.GetTexImage(t, level, format, ty, ptr),
                TextureRef::Named(id) => self.gl.GetTextureImage(id, level, format, ty, len, ptr),
                TextureRef::NamedExt(id, t) => {
                    self.gl.GetTextureImageEXT(id, t, level, format, ty, ptr)
                },
            }
        }
    }

    fn getn_tex_image(&self, target: gl::types::GLenum, level: gl::types::GLint,
                      format: gl::types::GLenum, ty: gl::types::GLenum, data: &mut [u8])
    {
        let len = data.len() as gl::types::GLsizei;
        unsafe {
            self.gl.PixelStorei(gl::PACK_ALIGNMENT, 1);
            self.gl.GetnTexImageARB(target, level, format, ty, len, data_ptr_mut(data));
        }
    }

    fn get_compressed_tex_image(&self, texture: TextureRef, level: gl::types::GLint,
                                data: &mut [u8])
    {
        let len = data.len() as gl::types::GLsizei;
        let ptr = data_ptr_mut(data);
        unsafe {
            match texture {
                TextureRef::Bound(t) => self.gl.GetCompressedTexImage(t, level, ptr),
                TextureRef::Named(id) => self.gl.GetCompressedTextureImage(id, level, len, ptr),
                TextureRef::NamedExt(id, t) => {
                    self.gl.GetCompressedTextureImageEXT(id, t, level, ptr)
                },
            }
        }
    }

    fn getn_compressed_tex_image(&self, target: gl::types::GLenum, level: gl::types::GLint,
                                 data: &mut [u8])
    {
        let len = data.len() as gl::types::GLsizei;
        unsafe { self.gl.GetnCompressedTexImageARB(target, level, len, data_ptr_mut(data)) };
    }

    fn get_texture_sub_image(&self, id: gl::types::GLuint, level: gl::types::GLint,
                             offset: Extent, size: Extent, format: gl::types::GLenum,
                             ty: gl::types::GLenum, data: &mut [u8])
    {
        let [x, y, z] = offset.as_offset();
        let [w, h, d] = size.as_size();
        let len = data.len() as gl::types::GLsizei;
        unsafe {
            self.gl.PixelStorei(gl::PACK_ALIGNMENT, 1);
            self.gl.GetTextureSubImage(id, level, x, y, z, w, h, d, format, ty, len,
                                       data_ptr_mut(data))
        };
    }

    fn get_compressed_texture_sub_image(&self, id: gl::types::GLuint, level: gl::types::GLint,
                                        offset: Extent, size: Extent, data: &mut [u8])
    {
        let [x, y, z] = offset.as_offset();
        let [w, h, d] = size.as_size();
        let len = data.len() as gl::types::GLsizei;
        unsafe {
            self.gl.GetCompressedTextureSubImage(id, level, x, y, z, w, h, d, len,
                                                 data_ptr_mut(data))
        };
    }

    fn invalidate_tex_image(&self, id: gl::types::GLuint, level: gl::types::GLint) {
        unsafe { self.gl.InvalidateTexImage(id, level) };
    }

    fn invalidate_tex_sub_image(&self, id: gl::types::GLuint, level: gl::types::GLint,
                                offset: Extent, size: Extent)
    {
        let [x, y, z] = offset.as_offset();
        let [w, h, d] = size.as_size();
        unsafe { self.gl.InvalidateTexSubImage(id, level, x, y, z, w, h, d) };
    }

    fn get_internal_format(&self, target: gl::types::GLenum, internal_format: gl::types::GLenum,
                           pname: gl::types::GLenum) -> gl::types::GLint
    {
        let mut value = 0;
        unsafe { self.gl.GetInternalformativ(target, internal_format, pname, 1, &mut value) };
        value
    }

    fn object_label(&self, identifier: gl::types::GLenum, id: gl::types::GLuint, label: &str) {
        unsafe {
            self.gl.ObjectLabel(identifier, id, label.len() as gl::types::GLsizei,
                                label.as_ptr() as *const gl::types::GLchar)
        };
    }

    fn tex_buffer(&self, texture: TextureRef, internal_format: gl::types::GLenum,
                  buffer: gl::types::GLuint)
    {
        unsafe {
            match texture {
                TextureRef::Bound(t) => self.gl.TexBuffer(t, internal_format, buffer),
                TextureRef::Named(id) => self.gl.TextureBuffer(id, internal_format, buffer),
                TextureRef::NamedExt(id, t) => {
                    self.gl.TextureBufferEXT(id, t, internal_format, buffer)
                },
            }
        }
    }

    fn tex_buffer_range(&self, texture: TextureRef, internal_format: gl::types::GLenum,
                        buffer: gl::types::GLuint, offset: isize, size: isize)
    {
        unsafe {
            match texture {
                TextureRef::Bound(t) => {
                    self.gl.TexBufferRange(t, internal_format, buffer, offset, size)
                },
                TextureRef::Named(id) => {
                    self.gl.TextureBufferRange(id, internal_format, buffer, offset, size)
                },
                TextureRef::NamedExt(id, t) => {
                    self.gl.TextureBufferRangeEXT(id, t, internal_format, buffer, offset, size)
                },
            }
        }
    }
}
