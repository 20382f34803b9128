use crate::backend::{Extent, Facade};
use crate::context::CommandContext;
use crate::gl;
use crate::texture::dispatch::{AccessPath, BlockDataSizePath, GetImagePath, ImagePath};
use crate::texture::dispatch::{InvalidatePath, StoragePath, UploadPath};
use crate::texture::{CompressedPixelFormat, PixelFormat, PixelType, RawTexture};
use crate::texture::{CubeMapFace, TextureFormat, TextureTarget};
use crate::GlObject;
use crate::ToGlEnum;

impl RawTexture {
    /// Returns the size of a level.
    ///
    /// For cube maps this is the size of one face.
    pub fn image_size(&self, level: u32) -> Extent {
        let mut ctxt = self.get_context().make_current();
        self.level_extent(&mut ctxt, level as gl::types::GLint)
    }

    /// Returns the internal format of a level, as reported by the driver.
    pub fn internal_format(&self, level: u32) -> TextureFormat {
        let mut ctxt = self.get_context().make_current();
        let format = self.query_level_parameter(&mut ctxt, level as gl::types::GLint,
                                                gl::TEXTURE_INTERNAL_FORMAT);
        TextureFormat(format as gl::types::GLenum)
    }

    /// Returns the size in bytes of a compressed level.
    ///
    /// For cube maps this is the size of the six faces together.
    pub fn compressed_image_size(&self, level: u32) -> usize {
        if self.get_target() == TextureTarget::CubeMap {
            return self.compressed_face_size(level) * 6;
        }

        let mut ctxt = self.get_context().make_current();
        self.query_level_parameter(&mut ctxt, level as gl::types::GLint,
                                   gl::TEXTURE_COMPRESSED_IMAGE_SIZE) as usize
    }

    /// Allocates immutable storage for all the levels at once.
    ///
    /// Without `ARB_texture_storage` every level is specified with `glTexImage` instead, in which
    /// case the storage is mutable. The dimensions of arrays that hold layers are not halved
    /// from one level to the next.
    ///
    /// # Panic
    ///
    /// Panics if `size` doesn't match the dimensions of the target, or if the target is a
    /// multisample or buffer target.
    pub fn set_storage(&self, levels: u32, format: TextureFormat, size: Extent) {
        let target = self.get_target();
        assert!(!target.is_multisample() && target != TextureTarget::Buffer,
                "{:?} textures don't have mipmapped storage", target);
        assert_eq!(size.dimensions(), target.dimensions(),
                   "Storage size of {:?} doesn't match the target {:?}", size, target);

        let mut ctxt = self.get_context().make_current();

        match ctxt.dispatch.storage {
            StoragePath::Immutable(access) => {
                let texture = self.texture_ref(&mut ctxt, access);
                ctxt.driver.tex_storage(texture, levels as gl::types::GLsizei,
                                        format.to_glenum(), size);
            },

            StoragePath::Fallback => {
                self.bind_internal(&mut ctxt);
                let (transfer_format, transfer_type) = format.allocation_transfer();

                for level in 0 .. levels {
                    let level_size = level_size(target, size, level);

                    if target == TextureTarget::CubeMap {
                        for face in CubeMapFace::ALL.iter() {
                            ctxt.driver.tex_image(face.to_glenum(), level as gl::types::GLint,
                                                  format.to_glenum(), level_size,
                                                  transfer_format.to_glenum(),
                                                  transfer_type.to_glenum(), None);
                        }
                    } else {
                        ctxt.driver.tex_image(target.to_glenum(), level as gl::types::GLint,
                                              format.to_glenum(), level_size,
                                              transfer_format.to_glenum(),
                                              transfer_type.to_glenum(), None);
                    }
                }
            },
        }
    }

    /// Allocates immutable storage for a multisample texture.
    ///
    /// Without `ARB_texture_storage_multisample` the storage is specified with
    /// `glTexImage*Multisample`.
    ///
    /// # Panic
    ///
    /// Panics if the target is not a multisample target or if `size` doesn't match it.
    pub fn set_storage_multisample(&self, samples: u32, format: TextureFormat, size: Extent,
                                   fixed_sample_locations: bool)
    {
        let target = self.get_target();
        assert!(target.is_multisample(), "{:?} is not a multisample target", target);
        assert_eq!(size.dimensions(), target.dimensions(),
                   "Storage size of {:?} doesn't match the target {:?}", size, target);

        let mut ctxt = self.get_context().make_current();

        match ctxt.dispatch.storage_multisample {
            StoragePath::Immutable(access) => {
                let texture = self.texture_ref(&mut ctxt, access);
                ctxt.driver.tex_storage_multisample(texture, samples as gl::types::GLsizei,
                                                    format.to_glenum(), size,
                                                    fixed_sample_locations);
            },
            StoragePath::Fallback => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.tex_image_multisample(target.to_glenum(),
                                                  samples as gl::types::GLsizei,
                                                  format.to_glenum(), size,
                                                  fixed_sample_locations);
            },
        }
    }

    /// Specifies a whole level with `glTexImage`, uploading `data`.
    ///
    /// # Panic
    ///
    /// Panics for cube map, multisample and buffer targets, if `size` doesn't match the
    /// dimensions of the target, or if `data` doesn't hold exactly `size` tightly packed pixels
    /// of a format and type whose size is known.
    #[allow(clippy::too_many_arguments)]
    pub fn set_image(&self, level: u32, internal_format: TextureFormat, size: Extent,
                     format: PixelFormat, ty: PixelType, data: &[u8])
    {
        let target = self.get_target();
        assert!(!target.is_multisample() && target != TextureTarget::Buffer &&
                target != TextureTarget::CubeMap,
                "Can't specify the images of {:?} textures", target);
        assert_eq!(size.dimensions(), target.dimensions(),
                   "Image size of {:?} doesn't match the target {:?}", size, target);
        assert_image_data(data.len(), format, ty, size);

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        self.bind_internal(&mut ctxt);
        ctxt.driver.tex_image(target.to_glenum(), level, internal_format.to_glenum(), size,
                              format.to_glenum(), ty.to_glenum(), Some(data));

        if ctxt.dispatch.image == ImagePath::SliceBySlice && has_slices(target) {
            // the first slice is in place, upload the others again one at a time
            let slices = slice_count(size);
            if slices > 1 {
                let stride = slice_stride(data, slices);
                let offset = slice_offset(size, 1);
                let remaining = with_slices(size, slices - 1);
                sub_image_slice_by_slice(&mut ctxt, self, AccessPath::Classic, level, offset,
                                         remaining, format, ty, &data[stride ..]);
            }
        }
    }

    /// Uploads a region of a level.
    ///
    /// # Panic
    ///
    /// Panics if `offset` and `size` don't match the dimensions of the target, if `data` doesn't
    /// hold exactly `size` tightly packed pixels, or for cube maps (see `set_face_sub_image` and
    /// `set_cube_sub_image`).
    #[allow(clippy::too_many_arguments)]
    pub fn set_sub_image(&self, level: u32, offset: Extent, size: Extent, format: PixelFormat,
                         ty: PixelType, data: &[u8])
    {
        let target = self.get_target();
        assert!(target != TextureTarget::CubeMap, "Use the face functions for cube maps");
        assert_eq!(size.dimensions(), target.dimensions(),
                   "Sub-image size of {:?} doesn't match the target {:?}", size, target);
        assert_eq!(offset.dimensions(), size.dimensions(),
                   "Offset {:?} and size {:?} don't match", offset, size);
        assert_image_data(data.len(), format, ty, size);

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        let path = match size.dimensions() {
            1 => UploadPath::Direct(ctxt.dispatch.sub_image_1d),
            2 => ctxt.dispatch.sub_image_2d,
            _ => ctxt.dispatch.sub_image_3d,
        };

        match path {
            UploadPath::SliceBySlice(access) if has_slices(target) => {
                sub_image_slice_by_slice(&mut ctxt, self, access, level, offset, size, format, ty,
                                         data);
            },
            UploadPath::Direct(access) | UploadPath::SliceBySlice(access) => {
                let texture = self.texture_ref(&mut ctxt, access);
                ctxt.driver.tex_sub_image(texture, level, offset, size, format.to_glenum(),
                                          ty.to_glenum(), data);
            },
        }
    }

    /// Uploads compressed data to a region of a level.
    ///
    /// # Panic
    ///
    /// Panics if `offset` and `size` don't match the dimensions of the target, or for cube
    /// maps.
    pub fn set_compressed_sub_image(&self, level: u32, offset: Extent, size: Extent,
                                    format: CompressedPixelFormat, data: &[u8])
    {
        let target = self.get_target();
        assert!(target != TextureTarget::CubeMap, "Use the face functions for cube maps");
        assert_eq!(size.dimensions(), target.dimensions(),
                   "Sub-image size of {:?} doesn't match the target {:?}", size, target);
        assert_eq!(offset.dimensions(), size.dimensions(),
                   "Offset {:?} and size {:?} don't match", offset, size);

        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.compressed_sub_image;
        let texture = self.texture_ref(&mut ctxt, path);
        ctxt.driver.compressed_tex_sub_image(texture, level as gl::types::GLint, offset, size,
                                             format.to_glenum(), data);
    }

    /// Reads a whole level back into `data`.
    ///
    /// The size of the level is queried first, rows are tightly packed.
    ///
    /// # Panic
    ///
    /// Panics if the length of `data` doesn't match the size of the level, or for cube maps
    /// (see `read_face_image` and `read_cube_image`).
    pub fn read_image(&self, level: u32, format: PixelFormat, ty: PixelType, data: &mut [u8]) {
        assert!(self.get_target() != TextureTarget::CubeMap,
                "Use the face functions for cube maps");

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        let size = self.level_extent(&mut ctxt, level);
        assert_image_data(data.len(), format, ty, size);

        match ctxt.dispatch.get_image {
            GetImagePath::Robustness => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.getn_tex_image(self.get_target().to_glenum(), level,
                                           format.to_glenum(), ty.to_glenum(), data);
            },
            path => {
                let texture = self.texture_ref(&mut ctxt, read_access(path));
                ctxt.driver.get_tex_image(texture, level, format.to_glenum(), ty.to_glenum(),
                                          data);
            },
        }
    }

    /// Reads a whole compressed level back into `data`.
    ///
    /// # Panic
    ///
    /// Panics if the length of `data` is not the compressed size of the level, or for cube
    /// maps.
    pub fn read_compressed_image(&self, level: u32, data: &mut [u8]) {
        assert!(self.get_target() != TextureTarget::CubeMap,
                "Use the face functions for cube maps");

        let expected = self.compressed_image_size(level);
        assert_eq!(data.len(), expected,
                   "Expected {} bytes of compressed data for level {}, got {}", expected, level,
                   data.len());

        let mut ctxt = self.get_context().make_current();
        let level = level as gl::types::GLint;

        match ctxt.dispatch.get_compressed_image {
            GetImagePath::Robustness => {
                self.bind_internal(&mut ctxt);
                ctxt.driver.getn_compressed_tex_image(self.get_target().to_glenum(), level, data);
            },
            path => {
                let texture = self.texture_ref(&mut ctxt, read_access(path));
                ctxt.driver.get_compressed_tex_image(texture, level, data);
            },
        }
    }

    /// Generates all the levels from the base level.
    pub fn generate_mipmaps(&self) {
        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.mipmap;
        let texture = self.texture_ref(&mut ctxt, path);
        ctxt.driver.generate_mipmap(texture);
    }

    /// Tells the driver that the content of a level is no longer needed.
    ///
    /// Does nothing without `ARB_invalidate_subdata`.
    pub fn invalidate_image(&self, level: u32) {
        let mut ctxt = self.get_context().make_current();

        match ctxt.dispatch.invalidate {
            InvalidatePath::NoOp => (),
            InvalidatePath::Arb => {
                self.ensure_created(&mut ctxt);
                ctxt.driver.invalidate_tex_image(self.get_id(), level as gl::types::GLint);
            },
        }
    }

    /// Tells the driver that the content of a region of a level is no longer needed.
    ///
    /// Does nothing without `ARB_invalidate_subdata`.
    pub fn invalidate_sub_image(&self, level: u32, offset: Extent, size: Extent) {
        let mut ctxt = self.get_context().make_current();

        match ctxt.dispatch.invalidate {
            InvalidatePath::NoOp => (),
            InvalidatePath::Arb => {
                self.ensure_created(&mut ctxt);
                ctxt.driver.invalidate_tex_sub_image(self.get_id(), level as gl::types::GLint,
                                                     offset, size);
            },
        }
    }

    /// Size of a level, in as many dimensions as the target has.
    pub(crate) fn level_extent(&self, ctxt: &mut CommandContext<'_>, level: gl::types::GLint)
                               -> Extent
    {
        let width = self.query_level_parameter(ctxt, level, gl::TEXTURE_WIDTH);
        match self.get_target().dimensions() {
            1 => Extent::D1(width),
            2 => {
                let height = self.query_level_parameter(ctxt, level, gl::TEXTURE_HEIGHT);
                Extent::D2(width, height)
            },
            _ => {
                let height = self.query_level_parameter(ctxt, level, gl::TEXTURE_HEIGHT);
                let depth = self.query_level_parameter(ctxt, level, gl::TEXTURE_DEPTH);
                Extent::D3(width, height, depth)
            },
        }
    }

    /// Level parameter query that knows that cube maps must be queried per face.
    pub(crate) fn query_level_parameter(&self, ctxt: &mut CommandContext<'_>,
                                        level: gl::types::GLint, pname: gl::types::GLenum)
                                        -> gl::types::GLint
    {
        if self.get_target() == TextureTarget::CubeMap {
            return self.query_face_level_parameter(ctxt, level, pname);
        }

        let path = ctxt.dispatch.level_parameter;
        let texture = self.texture_ref(ctxt, path);
        ctxt.driver.get_tex_level_parameter(texture, level, pname)
    }
}

/// Returns the width and height of the compressed blocks of a format, in pixels.
///
/// # Panic
///
/// Panics if `ARB_internalformat_query2` is not available.
pub fn compressed_block_size<F: ?Sized>(facade: &F, target: TextureTarget,
                                        format: TextureFormat) -> (i32, i32)
    where F: Facade
{
    let ctxt = facade.get_context().make_current();
    assert!(ctxt.extensions.gl_arb_internalformat_query2,
            "GL_ARB_internalformat_query2 is not supported");

    let width = ctxt.driver.get_internal_format(target.to_glenum(), format.to_glenum(),
                                                gl::TEXTURE_COMPRESSED_BLOCK_WIDTH);
    let height = ctxt.driver.get_internal_format(target.to_glenum(), format.to_glenum(),
                                                 gl::TEXTURE_COMPRESSED_BLOCK_HEIGHT);
    (width, height)
}

/// Returns the size in bytes of one compressed block of a format.
///
/// # Panic
///
/// Panics if `ARB_internalformat_query2` is not available.
pub fn compressed_block_data_size<F: ?Sized>(facade: &F, target: TextureTarget,
                                             format: TextureFormat) -> i32
    where F: Facade
{
    let ctxt = facade.get_context().make_current();
    assert!(ctxt.extensions.gl_arb_internalformat_query2,
            "GL_ARB_internalformat_query2 is not supported");

    let value = ctxt.driver.get_internal_format(target.to_glenum(), format.to_glenum(),
                                                gl::TEXTURE_COMPRESSED_BLOCK_SIZE);
    match ctxt.dispatch.compressed_block_data_size {
        BlockDataSizePath::Bytes => value,
        BlockDataSizePath::Bits => value / 8,
    }
}

/// Size of a level of storage whose level 0 has `size`.
fn level_size(target: TextureTarget, size: Extent, level: u32) -> Extent {
    let shrink = |value: i32| value.checked_shr(level).unwrap_or(0).max(1);

    match size {
        Extent::D1(w) => Extent::D1(shrink(w)),
        Extent::D2(w, h) if target.is_layered() => Extent::D2(shrink(w), h),
        Extent::D2(w, h) => Extent::D2(shrink(w), shrink(h)),
        Extent::D3(w, h, d) if target.is_layered() => Extent::D3(shrink(w), shrink(h), d),
        Extent::D3(w, h, d) => Extent::D3(shrink(w), shrink(h), shrink(d)),
    }
}

/// Number of bytes of client memory taken by `size` tightly packed pixels.
///
/// # Panic
///
/// Panics if the size of a pixel of `format` and `ty` is unknown, or if `size` is negative.
pub(crate) fn image_data_size(format: PixelFormat, ty: PixelType, size: Extent) -> usize {
    let pixel = match format.pixel_size(ty) {
        Some(pixel) => pixel,
        None => panic!("Unknown pixel size for format {:?} and type {:?}", format, ty),
    };

    let [width, height, depth] = size.as_size();
    assert!(width >= 0 && height >= 0 && depth >= 0, "Negative image size {:?}", size);
    pixel * width as usize * height as usize * depth as usize
}

/// Checks that client memory holds exactly an image of `size`.
pub(crate) fn assert_image_data(len: usize, format: PixelFormat, ty: PixelType, size: Extent) {
    let expected = image_data_size(format, ty, size);
    assert_eq!(len, expected, "Expected {} bytes of image data for {:?}, got {}", expected, size,
               len);
}

/// Targets whose uploads are split when slicing is required.
fn has_slices(target: TextureTarget) -> bool {
    matches!(target, TextureTarget::Texture1dArray | TextureTarget::Texture2dArray |
                     TextureTarget::Texture3d)
}

fn slice_count(size: Extent) -> i32 {
    match size {
        Extent::D1(_) => 1,
        Extent::D2(_, h) => h,
        Extent::D3(_, _, d) => d,
    }
}

fn with_slices(size: Extent, slices: i32) -> Extent {
    match size {
        Extent::D1(w) => Extent::D1(w),
        Extent::D2(w, _) => Extent::D2(w, slices),
        Extent::D3(w, h, _) => Extent::D3(w, h, slices),
    }
}

fn slice_offset(size: Extent, slice: i32) -> Extent {
    match size {
        Extent::D1(_) => Extent::D1(0),
        Extent::D2(..) => Extent::D2(0, slice),
        Extent::D3(..) => Extent::D3(0, 0, slice),
    }
}

fn advance(offset: Extent, slice: i32) -> Extent {
    match offset {
        Extent::D1(x) => Extent::D1(x),
        Extent::D2(x, y) => Extent::D2(x, y + slice),
        Extent::D3(x, y, z) => Extent::D3(x, y, z + slice),
    }
}

/// Number of bytes of each slice of `data`.
pub(crate) fn slice_stride(data: &[u8], slices: i32) -> usize {
    assert!(slices > 0, "No slices to upload");
    assert_eq!(data.len() % slices as usize, 0,
               "{} bytes can't be split into {} slices", data.len(), slices);
    data.len() / slices as usize
}

#[allow(clippy::too_many_arguments)]
fn sub_image_slice_by_slice(ctxt: &mut CommandContext<'_>, texture: &RawTexture,
                            access: AccessPath, level: gl::types::GLint, offset: Extent,
                            size: Extent, format: PixelFormat, ty: PixelType, data: &[u8])
{
    let slices = slice_count(size);
    if slices == 0 {
        return;
    }

    let stride = slice_stride(data, slices);
    let slice_size = with_slices(size, 1);

    for i in 0 .. slices {
        let slice = &data[stride * i as usize .. stride * (i as usize + 1)];
        let target = texture.texture_ref(ctxt, access);
        ctxt.driver.tex_sub_image(target, level, advance(offset, i), slice_size,
                                  format.to_glenum(), ty.to_glenum(), slice);
    }
}

/// Designation used by the read-back paths that address the texture like the other functions.
fn read_access(path: GetImagePath) -> AccessPath {
    match path {
        GetImagePath::Classic | GetImagePath::Robustness => AccessPath::Classic,
        GetImagePath::DsaExt => AccessPath::DsaExt,
        GetImagePath::Dsa => AccessPath::Dsa,
    }
}
