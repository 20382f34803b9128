/*!
Choice of the implementation of every texture operation.

The table is built once per context. For each operation the available extensions are tested
from the most capable to the universal fallback:

 - `ARB_direct_state_access`, which addresses textures by name,
 - `ARB_multi_bind`, for the bind operations only,
 - `EXT_direct_state_access`, the older vendor flavor of direct access,
 - and finally the classic way, which binds the texture to a texture unit and operates on the
   active unit.

Once the base choice is made, a second pass replaces some of the choices for the drivers that
are known to be broken. Each of these replacements is a named workaround that can be turned off
through `ContextOptions`.

*/

use crate::context::workarounds::{self, DetectedDrivers, DriverWorkarounds};
use crate::context::ExtensionsList;

/// How new texture names are obtained.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CreatePath {
    /// `glGenTextures`. The object itself only exists after the first bind.
    Reserve,
    /// `glCreateTextures`. The object exists right away.
    Create,
}

/// How a texture is bound to a given texture unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BindPath {
    /// `glActiveTexture` then `glBindTexture`.
    Classic,
    /// `glBindTextures` with a single texture.
    Multi,
    /// `glBindMultiTextureEXT`.
    DsaExt,
    /// `glBindTextureUnit`.
    Dsa,
    /// `glBindTextureUnit`, except for cube maps which take the classic path.
    DsaIntelWindows,
}

/// How a texture unit is emptied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnbindPath {
    /// `glActiveTexture` then `glBindTexture` with the cached target and `0`.
    Classic,
    /// `glBindTextures` with a single `0`.
    Multi,
    /// `glBindMultiTextureEXT` with the cached target and `0`.
    DsaExt,
    /// `glBindTextureUnit` with `0`.
    Dsa,
}

/// How a range of texture units or image units is updated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MultiPath {
    /// One bind or unbind per unit.
    Fallback,
    /// One `glBindTextures` or `glBindImageTextures` for the whole range.
    Multi,
}

/// How a function that operates on a texture designates it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AccessPath {
    /// The texture is bound to the internal unit first and the call uses its target.
    Classic,
    /// The `EXT_direct_state_access` function, with the name and the target.
    DsaExt,
    /// The `ARB_direct_state_access` function, with the name.
    Dsa,
}

/// How sub-images of several layers or slices are uploaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UploadPath {
    /// One call for the whole region.
    Direct(AccessPath),
    /// One call per layer or slice.
    SliceBySlice(AccessPath),
}

/// How levels are specified with `glTexImage`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ImagePath {
    /// One call for the whole level.
    Classic,
    /// A call that allocates the level, then one upload per layer or slice.
    SliceBySlice,
}

/// How storage is allocated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StoragePath {
    /// Emulated with one `glTexImage` per level, or `glTexImage*Multisample`.
    Fallback,
    /// `glTexStorage` or one of its direct access variants.
    Immutable(AccessPath),
}

/// How images are read back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GetImagePath {
    /// `glGetTexImage` on the internal unit.
    Classic,
    /// `glGetnTexImageARB` on the internal unit.
    Robustness,
    /// `glGetTextureImageEXT`.
    DsaExt,
    /// `glGetTextureImage`.
    Dsa,
}

/// How texture content is invalidated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InvalidatePath {
    /// Nothing happens.
    NoOp,
    /// `glInvalidateTexImage` and `glInvalidateTexSubImage`.
    Arb,
}

/// How the maximum anisotropy is set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnisotropyPath {
    /// Nothing happens.
    NoOp,
    /// `GL_TEXTURE_MAX_ANISOTROPY`, which has the same value for the ARB and EXT extensions.
    ArbOrExt,
}

/// How the compressed block data size reported by the driver is read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlockDataSizePath {
    /// The value is in bytes.
    Bytes,
    /// The value is in bits.
    Bits,
}

/// How debug labels are set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LabelPath {
    /// Nothing happens.
    NoOp,
    /// `glObjectLabel`.
    Khr,
}

/// How a region spanning several faces of a cube map is uploaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeUploadPath {
    /// One face at a time with `glTexSubImage2D` on the face targets.
    SliceBySlice,
    /// `glTextureSubImage3D` for the whole region.
    Dsa,
    /// `glTextureSubImage3D` once per face.
    DsaSliceBySlice,
}

/// How a single face of a cube map is read back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeFaceReadPath {
    /// `glGetTexImage` on the face target.
    Classic,
    /// `glGetnTexImageARB` on the face target.
    Robustness,
    /// `glGetTextureSubImage` with the face as the layer.
    Dsa,
}

/// How a whole cube map level is read back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeReadPath {
    /// One face at a time with `glGetTexImage` on the face targets.
    SliceBySlice,
    /// `glGetTextureImage` for the whole level.
    Dsa,
    /// `glGetTextureSubImage` once per face.
    DsaSliceBySlice,
}

/// How the compressed size of one face of a cube map level is queried.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CubeCompressedSizePath {
    /// Level parameter of `GL_TEXTURE_CUBE_MAP_POSITIVE_X`.
    Classic,
    /// Level parameter of the texture name.
    Dsa,
    /// Same as `Classic`, divided by six for immutable textures.
    ClassicImmutableWorkaround,
    /// Same as `Dsa`, divided by six for immutable textures.
    DsaImmutableWorkaround,
}

/// The implementation picked for every texture operation of a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDispatch {
    /// Obtaining new names.
    pub create: CreatePath,
    /// `RawTexture::bind`.
    pub bind: BindPath,
    /// `texture::unbind`.
    pub unbind: UnbindPath,
    /// `texture::bind_multi` and `texture::unbind_range`.
    pub bind_multi: MultiPath,
    /// `texture::bind_images` and `texture::unbind_images`.
    pub bind_images: MultiPath,

    /// All the sampling parameters.
    pub parameter: AccessPath,
    /// Level parameter queries.
    pub level_parameter: AccessPath,
    /// `RawTexture::generate_mipmaps`.
    pub mipmap: AccessPath,
    /// Immutable storage.
    pub storage: StoragePath,
    /// Immutable multisample storage.
    pub storage_multisample: StoragePath,
    /// Specification of whole levels with data.
    pub image: ImagePath,
    /// Uploads to one dimensional regions.
    pub sub_image_1d: AccessPath,
    /// Uploads to two dimensional regions.
    pub sub_image_2d: UploadPath,
    /// Uploads to three dimensional regions.
    pub sub_image_3d: UploadPath,
    /// Compressed uploads.
    pub compressed_sub_image: AccessPath,
    /// Reading back images.
    pub get_image: GetImagePath,
    /// Reading back compressed images.
    pub get_compressed_image: GetImagePath,
    /// `RawTexture::invalidate_image` and `RawTexture::invalidate_sub_image`.
    pub invalidate: InvalidatePath,
    /// `RawTexture::set_max_anisotropy`.
    pub max_anisotropy: AnisotropyPath,
    /// `RawTexture::compressed_block_data_size`.
    pub compressed_block_data_size: BlockDataSizePath,
    /// `RawTexture::set_label`.
    pub label: LabelPath,
    /// Attaching buffers to buffer textures.
    pub buffer: AccessPath,

    /// Level parameters of cube maps.
    pub cube_level_parameter: AccessPath,
    /// Uploads to a single face.
    pub cube_sub_image: AccessPath,
    /// Compressed uploads to a single face.
    pub cube_compressed_sub_image: AccessPath,
    /// Uploads to several faces.
    pub cube_sub_image_3d: CubeUploadPath,
    /// Compressed uploads to several faces.
    pub cube_compressed_sub_image_3d: CubeUploadPath,
    /// Compressed size of one face.
    pub cube_compressed_image_size: CubeCompressedSizePath,
    /// Reading back a single face.
    pub cube_image: CubeFaceReadPath,
    /// Reading back a single compressed face.
    pub cube_compressed_image: CubeFaceReadPath,
    /// Reading back all the faces.
    pub cube_image_3d: CubeReadPath,
    /// Reading back all the compressed faces.
    pub cube_compressed_image_3d: CubeReadPath,

    used_extensions: Vec<&'static str>,
}

impl TextureDispatch {
    /// Picks the implementations from the list of extensions, then applies the workarounds
    /// for the detected drivers.
    ///
    /// The workarounds that end up being applied are recorded in `workarounds`.
    pub fn new(extensions: &ExtensionsList, workarounds: &mut DriverWorkarounds)
               -> TextureDispatch
    {
        let mut dispatch = TextureDispatch::select(extensions);
        dispatch.apply_workarounds(extensions, workarounds);
        dispatch
    }

    /// Names of the optional extensions that the chosen implementations rely on.
    #[inline]
    pub fn used_extensions(&self) -> &[&'static str] {
        &self.used_extensions
    }

    fn select(extensions: &ExtensionsList) -> TextureDispatch {
        let mut used = Vec::new();
        let mut note = |name: &'static str| {
            if !used.contains(&name) {
                used.push(name);
            }
        };

        let dsa = extensions.gl_arb_direct_state_access;
        let dsa_ext = extensions.gl_ext_direct_state_access;
        let multi = extensions.gl_arb_multi_bind;

        let create = if dsa {
            note("GL_ARB_direct_state_access");
            CreatePath::Create
        } else {
            CreatePath::Reserve
        };

        let (bind, unbind) = if dsa {
            (BindPath::Dsa, UnbindPath::Dsa)
        } else if multi {
            (BindPath::Multi, UnbindPath::Multi)
        } else if dsa_ext {
            (BindPath::DsaExt, UnbindPath::DsaExt)
        } else {
            (BindPath::Classic, UnbindPath::Classic)
        };

        let bind_multi = if multi {
            note("GL_ARB_multi_bind");
            MultiPath::Multi
        } else {
            MultiPath::Fallback
        };

        // `glBindImageTextures` is part of the same extension
        let bind_images = bind_multi;

        let access = if dsa {
            AccessPath::Dsa
        } else if dsa_ext {
            note("GL_EXT_direct_state_access");
            AccessPath::DsaExt
        } else {
            AccessPath::Classic
        };

        let storage = if extensions.gl_arb_texture_storage {
            note("GL_ARB_texture_storage");
            StoragePath::Immutable(access)
        } else {
            StoragePath::Fallback
        };

        let storage_multisample = if extensions.gl_arb_texture_storage_multisample {
            note("GL_ARB_texture_storage_multisample");
            StoragePath::Immutable(access)
        } else {
            StoragePath::Fallback
        };

        let get_image = if dsa {
            GetImagePath::Dsa
        } else if extensions.gl_arb_robustness {
            note("GL_ARB_robustness");
            GetImagePath::Robustness
        } else if dsa_ext {
            GetImagePath::DsaExt
        } else {
            GetImagePath::Classic
        };

        let invalidate = if extensions.gl_arb_invalidate_subdata {
            note("GL_ARB_invalidate_subdata");
            InvalidatePath::Arb
        } else {
            InvalidatePath::NoOp
        };

        let max_anisotropy = if extensions.gl_arb_texture_filter_anisotropic {
            note("GL_ARB_texture_filter_anisotropic");
            AnisotropyPath::ArbOrExt
        } else if extensions.gl_ext_texture_filter_anisotropic {
            note("GL_EXT_texture_filter_anisotropic");
            AnisotropyPath::ArbOrExt
        } else {
            AnisotropyPath::NoOp
        };

        let label = if extensions.gl_khr_debug {
            note("GL_KHR_debug");
            LabelPath::Khr
        } else {
            LabelPath::NoOp
        };

        // no EXT direct access for the faces of cube maps
        let cube_access = if dsa { AccessPath::Dsa } else { AccessPath::Classic };

        let (cube_sub_image_3d, cube_compressed_sub_image_3d) = if dsa {
            (CubeUploadPath::Dsa, CubeUploadPath::Dsa)
        } else {
            (CubeUploadPath::SliceBySlice, CubeUploadPath::SliceBySlice)
        };

        let cube_image = if extensions.gl_arb_get_texture_sub_image {
            note("GL_ARB_get_texture_sub_image");
            CubeFaceReadPath::Dsa
        } else if extensions.gl_arb_robustness {
            note("GL_ARB_robustness");
            CubeFaceReadPath::Robustness
        } else {
            CubeFaceReadPath::Classic
        };

        let cube_image_3d = if dsa { CubeReadPath::Dsa } else { CubeReadPath::SliceBySlice };

        let cube_compressed_image_size = if dsa {
            CubeCompressedSizePath::Dsa
        } else {
            CubeCompressedSizePath::Classic
        };

        TextureDispatch {
            create,
            bind,
            unbind,
            bind_multi,
            bind_images,
            parameter: access,
            level_parameter: access,
            mipmap: access,
            storage,
            storage_multisample,
            image: ImagePath::Classic,
            sub_image_1d: access,
            sub_image_2d: UploadPath::Direct(access),
            sub_image_3d: UploadPath::Direct(access),
            compressed_sub_image: access,
            get_image,
            get_compressed_image: get_image,
            invalidate,
            max_anisotropy,
            compressed_block_data_size: BlockDataSizePath::Bytes,
            label,
            buffer: access,
            cube_level_parameter: cube_access,
            cube_sub_image: cube_access,
            cube_compressed_sub_image: cube_access,
            cube_sub_image_3d,
            cube_compressed_sub_image_3d,
            cube_compressed_image_size,
            cube_image,
            cube_compressed_image: cube_image,
            cube_image_3d,
            cube_compressed_image_3d: cube_image_3d,
            used_extensions: used,
        }
    }

    fn apply_workarounds(&mut self, extensions: &ExtensionsList,
                         workarounds: &mut DriverWorkarounds)
    {
        let dsa = extensions.gl_arb_direct_state_access;

        if dsa && workarounds.apply(DetectedDrivers::INTEL_WINDOWS,
                                    workarounds::INTEL_WINDOWS_HALF_BAKED_DSA_TEXTURE_BIND)
        {
            self.bind = BindPath::DsaIntelWindows;
            self.unbind = UnbindPath::Classic;
        }

        if dsa && workarounds.apply(DetectedDrivers::INTEL_WINDOWS,
                                    workarounds::INTEL_WINDOWS_BROKEN_DSA_FOR_CUBEMAPS)
        {
            self.cube_level_parameter = AccessPath::Classic;
            self.cube_sub_image = AccessPath::Classic;
            self.cube_compressed_sub_image = AccessPath::Classic;
            self.cube_sub_image_3d = CubeUploadPath::SliceBySlice;
            self.cube_compressed_image_size = CubeCompressedSizePath::Classic;
            self.cube_image_3d = CubeReadPath::SliceBySlice;

        } else if dsa && workarounds.apply(DetectedDrivers::AMD,
                                           workarounds::AMD_WINDOWS_CUBEMAP_IMAGE3D_SLICE_BY_SLICE)
        {
            // level parameters are fine
            self.cube_sub_image = AccessPath::Classic;
            self.cube_compressed_sub_image = AccessPath::Classic;
            self.cube_sub_image_3d = CubeUploadPath::SliceBySlice;
            self.cube_image_3d = CubeReadPath::DsaSliceBySlice;
        }

        if workarounds.apply(DetectedDrivers::SVGA3D,
                             workarounds::SVGA3D_TEXTURE_UPLOAD_SLICE_BY_SLICE)
        {
            self.image = ImagePath::SliceBySlice;
            self.sub_image_2d = slice_by_slice(self.sub_image_2d);
            self.sub_image_3d = slice_by_slice(self.sub_image_3d);
            if dsa {
                self.cube_sub_image_3d = CubeUploadPath::DsaSliceBySlice;
            }
        }

        if workarounds.apply(DetectedDrivers::NVIDIA,
                             workarounds::NV_COMPRESSED_BLOCK_SIZE_IN_BITS)
        {
            self.compressed_block_data_size = BlockDataSizePath::Bits;
        }

        if workarounds.apply(DetectedDrivers::NVIDIA,
                             workarounds::NV_CUBEMAP_INCONSISTENT_COMPRESSED_IMAGE_SIZE)
        {
            self.cube_compressed_image_size = if dsa {
                CubeCompressedSizePath::DsaImmutableWorkaround
            } else {
                CubeCompressedSizePath::ClassicImmutableWorkaround
            };
        }

        if dsa && workarounds.apply(DetectedDrivers::NVIDIA,
                                    workarounds::NV_CUBEMAP_BROKEN_FULL_COMPRESSED_IMAGE_QUERY)
        {
            self.cube_compressed_image_3d = CubeReadPath::DsaSliceBySlice;
        }
    }
}

fn slice_by_slice(path: UploadPath) -> UploadPath {
    match path {
        UploadPath::Direct(access) | UploadPath::SliceBySlice(access) => {
            UploadPath::SliceBySlice(access)
        },
    }
}
