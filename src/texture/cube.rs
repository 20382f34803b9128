//! Operations specific to cube maps.
//!
//! With the classic functions a cube map is addressed face by face through the face targets.
//! With direct state access it is seen as an array of six layers, in the order of
//! `CubeMapFace::ALL`.

use crate::backend::{Extent, TextureRef};
use crate::context::CommandContext;
use crate::gl;
use crate::texture::dispatch::{AccessPath, CubeCompressedSizePath, CubeFaceReadPath};
use crate::texture::dispatch::{CubeReadPath, CubeUploadPath};
use crate::texture::image::{assert_image_data, image_data_size, slice_stride};
use crate::texture::{CompressedPixelFormat, CubeMapFace, PixelFormat, PixelType, RawTexture};
use crate::texture::TextureTarget;
use crate::GlObject;
use crate::ToGlEnum;

impl RawTexture {
    /// Returns the size in bytes of one compressed face of a level.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map.
    pub fn compressed_face_size(&self, level: u32) -> usize {
        self.assert_cube_map();

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        let value = match ctxt.dispatch.cube_compressed_image_size {
            CubeCompressedSizePath::Classic => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.get_tex_level_parameter(
                    TextureRef::Bound(gl::TEXTURE_CUBE_MAP_POSITIVE_X), level,
                    gl::TEXTURE_COMPRESSED_IMAGE_SIZE)
            },
            CubeCompressedSizePath::Dsa => {
                ctxt.driver.get_tex_level_parameter(TextureRef::Named(self.get_id()), level,
                                                    gl::TEXTURE_COMPRESSED_IMAGE_SIZE)
            },
            CubeCompressedSizePath::ClassicImmutableWorkaround => {
                self.bind_internal(&mut ctxt);
                let value = ctxt.driver.get_tex_level_parameter(
                    TextureRef::Bound(gl::TEXTURE_CUBE_MAP_POSITIVE_X), level,
                    gl::TEXTURE_COMPRESSED_IMAGE_SIZE);
                let immutable = ctxt.driver.get_tex_parameter(
                    TextureRef::Bound(gl::TEXTURE_CUBE_MAP), gl::TEXTURE_IMMUTABLE_LEVELS);

                // the driver reports all six faces for immutable storage
                if immutable != 0 { value / 6 } else { value }
            },
            CubeCompressedSizePath::DsaImmutableWorkaround => {
                let texture = TextureRef::Named(self.get_id());
                let value = ctxt.driver.get_tex_level_parameter(
                    texture, level, gl::TEXTURE_COMPRESSED_IMAGE_SIZE);
                let immutable = ctxt.driver.get_tex_parameter(texture,
                                                              gl::TEXTURE_IMMUTABLE_LEVELS);

                if immutable != 0 { value / 6 } else { value }
            },
        };

        value as usize
    }

    /// Uploads a region of one face.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map, or if `data` doesn't hold exactly `size` tightly
    /// packed pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn set_face_sub_image(&self, face: CubeMapFace, level: u32, offset: (i32, i32),
                              size: (i32, i32), format: PixelFormat, ty: PixelType, data: &[u8])
    {
        self.assert_cube_map();
        assert_image_data(data.len(), format, ty, Extent::D2(size.0, size.1));

        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.cube_sub_image;
        let (texture, offset, size) = self.face_region(&mut ctxt, path, face, offset, size);
        ctxt.driver.tex_sub_image(texture, level as gl::types::GLint, offset, size,
                                  format.to_glenum(), ty.to_glenum(), data);
    }

    /// Uploads compressed data to a region of one face.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map.
    pub fn set_face_compressed_sub_image(&self, face: CubeMapFace, level: u32,
                                         offset: (i32, i32), size: (i32, i32),
                                         format: CompressedPixelFormat, data: &[u8])
    {
        self.assert_cube_map();

        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.cube_compressed_sub_image;
        let (texture, offset, size) = self.face_region(&mut ctxt, path, face, offset, size);
        ctxt.driver.compressed_tex_sub_image(texture, level as gl::types::GLint, offset, size,
                                             format.to_glenum(), data);
    }

    /// Uploads a region that spans several faces, the third coordinate being the face index.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map, if `offset` and `size` are not
    /// three-dimensional, if the faces go past the last one, or if `data` doesn't hold exactly
    /// `size` tightly packed pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn set_cube_sub_image(&self, level: u32, offset: Extent, size: Extent,
                              format: PixelFormat, ty: PixelType, data: &[u8])
    {
        self.assert_cube_map();
        let (first, count) = face_range(offset, size);
        assert_image_data(data.len(), format, ty, size);
        if count == 0 {
            return;
        }

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;
        let [x, y, _] = offset.as_offset();
        let [width, height, _] = size.as_size();

        match ctxt.dispatch.cube_sub_image_3d {
            CubeUploadPath::Dsa => {
                ctxt.driver.tex_sub_image(TextureRef::Named(self.get_id()), level, offset, size,
                                          format.to_glenum(), ty.to_glenum(), data);
            },
            CubeUploadPath::DsaSliceBySlice => {
                let stride = slice_stride(data, count);
                for i in 0 .. count {
                    ctxt.driver.tex_sub_image(TextureRef::Named(self.get_id()), level,
                                              Extent::D3(x, y, first + i),
                                              Extent::D3(width, height, 1), format.to_glenum(),
                                              ty.to_glenum(), face_slice(data, stride, i));
                }
            },
            CubeUploadPath::SliceBySlice => {
                let stride = slice_stride(data, count);
                for i in 0 .. count {
                    self.bind_internal(&mut ctxt);
                    ctxt.driver.tex_sub_image(TextureRef::Bound(face_target(first + i)), level,
                                              Extent::D2(x, y), Extent::D2(width, height),
                                              format.to_glenum(), ty.to_glenum(),
                                              face_slice(data, stride, i));
                }
            },
        }
    }

    /// Uploads compressed data to a region that spans several faces.
    ///
    /// # Panic
    ///
    /// Same as `set_cube_sub_image`.
    pub fn set_cube_compressed_sub_image(&self, level: u32, offset: Extent, size: Extent,
                                         format: CompressedPixelFormat, data: &[u8])
    {
        self.assert_cube_map();
        let (first, count) = face_range(offset, size);
        if count == 0 {
            return;
        }

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;
        let [x, y, _] = offset.as_offset();
        let [width, height, _] = size.as_size();

        match ctxt.dispatch.cube_compressed_sub_image_3d {
            CubeUploadPath::Dsa => {
                ctxt.driver.compressed_tex_sub_image(TextureRef::Named(self.get_id()), level,
                                                     offset, size, format.to_glenum(), data);
            },
            CubeUploadPath::DsaSliceBySlice => {
                let stride = slice_stride(data, count);
                for i in 0 .. count {
                    ctxt.driver.compressed_tex_sub_image(TextureRef::Named(self.get_id()), level,
                                                         Extent::D3(x, y, first + i),
                                                         Extent::D3(width, height, 1),
                                                         format.to_glenum(),
                                                         face_slice(data, stride, i));
                }
            },
            CubeUploadPath::SliceBySlice => {
                let stride = slice_stride(data, count);
                for i in 0 .. count {
                    self.bind_internal(&mut ctxt);
                    ctxt.driver.compressed_tex_sub_image(
                        TextureRef::Bound(face_target(first + i)), level, Extent::D2(x, y),
                        Extent::D2(width, height), format.to_glenum(),
                        face_slice(data, stride, i));
                }
            },
        }
    }

    /// Reads one face of a level back into `data`.
    ///
    /// The size of the face is queried first, rows are tightly packed.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map, or if the length of `data` doesn't match the
    /// size of the face.
    pub fn read_face_image(&self, face: CubeMapFace, level: u32, format: PixelFormat,
                           ty: PixelType, data: &mut [u8])
    {
        self.assert_cube_map();

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        let (width, height) = self.face_size(&mut ctxt, level);
        assert_image_data(data.len(), format, ty, Extent::D2(width, height));

        match ctxt.dispatch.cube_image {
            CubeFaceReadPath::Dsa => {
                self.ensure_created(&mut ctxt);
                ctxt.driver.get_texture_sub_image(self.get_id(), level,
                                                  Extent::D3(0, 0, face.layer()),
                                                  Extent::D3(width, height, 1),
                                                  format.to_glenum(), ty.to_glenum(), data);
            },
            CubeFaceReadPath::Robustness => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.getn_tex_image(face.to_glenum(), level, format.to_glenum(),
                                           ty.to_glenum(), data);
            },
            CubeFaceReadPath::Classic => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.get_tex_image(TextureRef::Bound(face.to_glenum()), level,
                                          format.to_glenum(), ty.to_glenum(), data);
            },
        }
    }

    /// Reads one compressed face of a level back into `data`.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map, or if the length of `data` is not the
    /// compressed size of one face.
    pub fn read_face_compressed_image(&self, face: CubeMapFace, level: u32, data: &mut [u8]) {
        let expected = self.compressed_face_size(level);
        assert_eq!(data.len(), expected,
                   "Expected {} bytes of compressed data for level {}, got {}", expected, level,
                   data.len());

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        match ctxt.dispatch.cube_compressed_image {
            CubeFaceReadPath::Dsa => {
                let (width, height) = self.face_size(&mut ctxt, level);
                self.ensure_created(&mut ctxt);
                ctxt.driver.get_compressed_texture_sub_image(self.get_id(), level,
                                                             Extent::D3(0, 0, face.layer()),
                                                             Extent::D3(width, height, 1),
                                                             data);
            },
            CubeFaceReadPath::Robustness => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.getn_compressed_tex_image(face.to_glenum(), level, data);
            },
            CubeFaceReadPath::Classic => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.get_compressed_tex_image(TextureRef::Bound(face.to_glenum()), level,
                                                     data);
            },
        }
    }

    /// Reads the six faces of a level back into `data`, one after the other.
    ///
    /// The size of the faces is queried first, rows are tightly packed.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map, or if the length of `data` is not six times the
    /// size of one face.
    pub fn read_cube_image(&self, level: u32, format: PixelFormat, ty: PixelType,
                           data: &mut [u8])
    {
        self.assert_cube_map();

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        let (width, height) = self.face_size(&mut ctxt, level);
        let expected = image_data_size(format, ty, Extent::D3(width, height, 6));
        assert_eq!(data.len(), expected, "Expected {} bytes of image data for level {}, got {}",
                   expected, level, data.len());
        if data.is_empty() {
            return;
        }

        match ctxt.dispatch.cube_image_3d {
            CubeReadPath::Dsa => {
                ctxt.driver.get_tex_image(TextureRef::Named(self.get_id()), level,
                                          format.to_glenum(), ty.to_glenum(), data);
            },
            CubeReadPath::DsaSliceBySlice => {
                let stride = slice_stride(data, 6);
                for (face, slice) in CubeMapFace::ALL.iter().zip(data.chunks_mut(stride)) {
                    ctxt.driver.get_texture_sub_image(self.get_id(), level,
                                                      Extent::D3(0, 0, face.layer()),
                                                      Extent::D3(width, height, 1),
                                                      format.to_glenum(), ty.to_glenum(),
                                                      slice);
                }
            },
            CubeReadPath::SliceBySlice => {
                let stride = slice_stride(data, 6);
                for (face, slice) in CubeMapFace::ALL.iter().zip(data.chunks_mut(stride)) {
                    self.bind_internal(&mut ctxt);
                    ctxt.driver.get_tex_image(TextureRef::Bound(face.to_glenum()), level,
                                              format.to_glenum(), ty.to_glenum(), slice);
                }
            },
        }
    }

    /// Reads the six compressed faces of a level back into `data`, one after the other.
    ///
    /// # Panic
    ///
    /// Panics if the texture is not a cube map, or if the length of `data` is not six times
    /// the compressed size of one face.
    pub fn read_cube_compressed_image(&self, level: u32, data: &mut [u8]) {
        let face_size = self.compressed_face_size(level);
        assert_eq!(data.len(), face_size * 6,
                   "Expected {} bytes of compressed data for level {}, got {}", face_size * 6,
                   level, data.len());
        if face_size == 0 {
            return;
        }

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        match ctxt.dispatch.cube_compressed_image_3d {
            CubeReadPath::Dsa => {
                ctxt.driver.get_compressed_tex_image(TextureRef::Named(self.get_id()), level,
                                                     data);
            },
            CubeReadPath::DsaSliceBySlice => {
                let (width, height) = self.face_size(&mut ctxt, level);
                for (face, slice) in CubeMapFace::ALL.iter().zip(data.chunks_mut(face_size)) {
                    ctxt.driver.get_compressed_texture_sub_image(self.get_id(), level,
                                                                 Extent::D3(0, 0, face.layer()),
                                                                 Extent::D3(width, height, 1),
                                                                 slice);
                }
            },
            CubeReadPath::SliceBySlice => {
                for (face, slice) in CubeMapFace::ALL.iter().zip(data.chunks_mut(face_size)) {
                    self.bind_internal(&mut ctxt);
                    ctxt.driver.get_compressed_tex_image(TextureRef::Bound(face.to_glenum()),
                                                         level, slice);
                }
            },
        }
    }

    /// Level parameters of a cube map. The classic path only looks at the positive X face.
    pub(crate) fn query_face_level_parameter(&self, ctxt: &mut CommandContext<'_>,
                                             level: gl::types::GLint, pname: gl::types::GLenum)
                                             -> gl::types::GLint
    {
        match ctxt.dispatch.cube_level_parameter {
            AccessPath::Dsa => {
                ctxt.driver.get_tex_level_parameter(TextureRef::Named(self.get_id()), level,
                                                    pname)
            },
            AccessPath::Classic | AccessPath::DsaExt => {
                self.bind_internal(ctxt);
                ctxt.driver.get_tex_level_parameter(
                    TextureRef::Bound(gl::TEXTURE_CUBE_MAP_POSITIVE_X), level, pname)
            },
        }
    }

    fn face_size(&self, ctxt: &mut CommandContext<'_>, level: gl::types::GLint) -> (i32, i32) {
        let width = self.query_face_level_parameter(ctxt, level, gl::TEXTURE_WIDTH);
        let height = self.query_face_level_parameter(ctxt, level, gl::TEXTURE_HEIGHT);
        (width, height)
    }

    fn face_region(&self, ctxt: &mut CommandContext<'_>, path: AccessPath, face: CubeMapFace,
                   offset: (i32, i32), size: (i32, i32)) -> (TextureRef, Extent, Extent)
    {
        match path {
            AccessPath::Dsa => {
                (TextureRef::Named(self.get_id()), Extent::D3(offset.0, offset.1, face.layer()),
                 Extent::D3(size.0, size.1, 1))
            },
            AccessPath::Classic | AccessPath::DsaExt => {
                self.bind_internal(ctxt);
                (TextureRef::Bound(face.to_glenum()), Extent::D2(offset.0, offset.1),
                 Extent::D2(size.0, size.1))
            },
        }
    }

    #[inline]
    fn assert_cube_map(&self) {
        assert!(self.get_target() == TextureTarget::CubeMap,
                "{:?} is not a cube map", self.get_target());
    }
}

/// First face and number of faces of a region.
fn face_range(offset: Extent, size: Extent) -> (i32, i32) {
    match (offset, size) {
        (Extent::D3(_, _, first), Extent::D3(_, _, count)) => {
            assert!(first >= 0 && count >= 0 && first + count <= 6,
                    "Faces {}..{} out of range", first, first + count);
            (first, count)
        },
        _ => panic!("Regions of cube maps spanning faces are three-dimensional"),
    }
}

#[inline]
fn face_target(face: i32) -> gl::types::GLenum {
    gl::TEXTURE_CUBE_MAP_POSITIVE_X + face as gl::types::GLenum
}

#[inline]
fn face_slice(data: &[u8], stride: usize, face: i32) -> &[u8] {
    let start = stride * face as usize;
    &data[start .. start + stride]
}
