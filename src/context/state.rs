use smallvec::SmallVec;

use crate::gl;

/// Value of a cached texture name meaning "nothing is known about this unit".
///
/// It is distinct from `0`, which means that no texture is bound.
pub const DISENGAGED_BINDING: gl::types::GLuint = !0;

/// Mirror of the texture and image unit bindings of the OpenGL context.
///
/// The state is a cache, it doesn't query anything. Every entry either matches what the driver
/// has bound, or is disengaged. `reset` disengages everything, which is required after some
/// code outside of this library has touched the bindings.
#[derive(Debug, Clone)]
pub struct TextureState {
    /// The latest value passed to `glActiveTexture`, minus `GL_TEXTURE0`. `None` means unknown.
    pub active_texture: Option<gl::types::GLuint>,

    /// List of texture units.
    pub texture_units: SmallVec<[TextureUnitState; 32]>,

    /// List of image units. Empty if the context doesn't support them.
    pub image_units: SmallVec<[ImageUnitState; 8]>,

    /// Limits queried lazily, `0` means not queried yet.
    pub limits: TextureLimits,
}

/// State of a texture unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureUnitState {
    /// Target the texture was bound to, `0` if unknown.
    pub target: gl::types::GLenum,

    /// Id of the texture.
    pub texture: gl::types::GLuint,
}

impl TextureUnitState {
    /// Nothing is known about the unit.
    pub const DISENGAGED: TextureUnitState = TextureUnitState {
        target: 0,
        texture: DISENGAGED_BINDING,
    };

    /// No texture is bound to the unit.
    pub const UNBOUND: TextureUnitState = TextureUnitState {
        target: 0,
        texture: 0,
    };
}

impl Default for TextureUnitState {
    #[inline]
    fn default() -> TextureUnitState {
        TextureUnitState::DISENGAGED
    }
}

/// State of an image unit, in the order of the parameters of `glBindImageTexture`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageUnitState {
    /// Id of the texture.
    pub texture: gl::types::GLuint,
    /// Mipmap level.
    pub level: gl::types::GLint,
    /// Whether all the layers are bound.
    pub layered: bool,
    /// Layer, if `layered` is false.
    pub layer: gl::types::GLint,
    /// Access allowed to the shaders.
    pub access: gl::types::GLenum,
}

impl ImageUnitState {
    /// Nothing is known about the unit.
    pub const DISENGAGED: ImageUnitState = ImageUnitState {
        texture: DISENGAGED_BINDING,
        level: 0,
        layered: false,
        layer: 0,
        access: 0,
    };

    /// No texture is bound to the unit.
    pub const UNBOUND: ImageUnitState = ImageUnitState {
        texture: 0,
        level: 0,
        layered: false,
        layer: 0,
        access: gl::READ_ONLY,
    };
}

impl Default for ImageUnitState {
    #[inline]
    fn default() -> ImageUnitState {
        ImageUnitState::DISENGAGED
    }
}

/// Limits of the implementation that are queried the first time they are needed.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextureLimits {
    /// `GL_MAX_TEXTURE_SIZE`
    pub max_size: gl::types::GLint,
    /// `GL_MAX_3D_TEXTURE_SIZE`
    pub max_3d_size: gl::types::GLint,
    /// `GL_MAX_CUBE_MAP_TEXTURE_SIZE`
    pub max_cube_map_size: gl::types::GLint,
    /// `GL_MAX_ARRAY_TEXTURE_LAYERS`
    pub max_array_layers: gl::types::GLint,
    /// `GL_MAX_RECTANGLE_TEXTURE_SIZE`
    pub max_rectangle_size: gl::types::GLint,
    /// `GL_MAX_TEXTURE_BUFFER_SIZE`
    pub max_buffer_size: gl::types::GLint,
    /// `GL_MAX_TEXTURE_LOD_BIAS`
    pub max_lod_bias: gl::types::GLfloat,
    /// `GL_MAX_TEXTURE_MAX_ANISOTROPY`
    pub max_max_anisotropy: gl::types::GLfloat,
    /// `GL_MAX_COLOR_TEXTURE_SAMPLES`
    pub max_color_samples: gl::types::GLint,
    /// `GL_MAX_DEPTH_TEXTURE_SAMPLES`
    pub max_depth_samples: gl::types::GLint,
    /// `GL_MAX_INTEGER_SAMPLES`
    pub max_integer_samples: gl::types::GLint,
    /// `GL_TEXTURE_BUFFER_OFFSET_ALIGNMENT`
    pub buffer_offset_alignment: gl::types::GLint,
}

impl TextureState {
    /// Builds a state with every unit disengaged.
    ///
    /// There must be at least two texture units, the last one is reserved for the internal
    /// bindings.
    pub fn new(texture_units: usize, image_units: usize) -> TextureState {
        assert!(texture_units >= 2, "At least two texture units are required");

        TextureState {
            active_texture: None,
            texture_units: SmallVec::from_elem(TextureUnitState::DISENGAGED, texture_units),
            image_units: SmallVec::from_elem(ImageUnitState::DISENGAGED, image_units),
            limits: TextureLimits::default(),
        }
    }

    /// Returns the target and texture cached for the texture unit.
    ///
    /// # Panic
    ///
    /// Panics if `unit` is not a valid texture unit.
    #[inline]
    pub fn query(&self, unit: gl::types::GLuint) -> (gl::types::GLenum, gl::types::GLuint) {
        let state = self.texture_unit(unit);
        (state.target, state.texture)
    }

    /// Returns the state cached for the texture unit.
    ///
    /// # Panic
    ///
    /// Panics if `unit` is not a valid texture unit.
    #[inline]
    pub fn texture_unit(&self, unit: gl::types::GLuint) -> TextureUnitState {
        assert!((unit as usize) < self.texture_units.len(),
                "Texture unit {} out of range ({} units available)", unit,
                self.texture_units.len());
        self.texture_units[unit as usize]
    }

    /// Returns the state cached for the image unit.
    ///
    /// # Panic
    ///
    /// Panics if `unit` is not a valid image unit.
    #[inline]
    pub fn image_unit(&self, unit: gl::types::GLuint) -> ImageUnitState {
        assert!((unit as usize) < self.image_units.len(),
                "Image unit {} out of range ({} units available)", unit, self.image_units.len());
        self.image_units[unit as usize]
    }

    /// Overwrites the entry of a texture unit.
    #[inline]
    pub fn record(&mut self, unit: gl::types::GLuint, target: gl::types::GLenum,
                  texture: gl::types::GLuint)
    {
        assert!((unit as usize) < self.texture_units.len(),
                "Texture unit {} out of range ({} units available)", unit,
                self.texture_units.len());
        self.texture_units[unit as usize] = TextureUnitState { target, texture };
    }

    /// Overwrites the entry of an image unit.
    #[inline]
    pub fn record_image(&mut self, unit: gl::types::GLuint, state: ImageUnitState) {
        assert!((unit as usize) < self.image_units.len(),
                "Image unit {} out of range ({} units available)", unit, self.image_units.len());
        self.image_units[unit as usize] = state;
    }

    /// Forgets everything about the bindings and the active unit.
    ///
    /// Doesn't call OpenGL, the next bind to any unit will.
    pub fn reset(&mut self) {
        for unit in self.texture_units.iter_mut() {
            *unit = TextureUnitState::DISENGAGED;
        }

        for unit in self.image_units.iter_mut() {
            *unit = ImageUnitState::DISENGAGED;
        }

        self.active_texture = None;
    }

    /// Disengages every texture unit and image unit that references `texture`.
    ///
    /// Must be called before the texture is deleted, in case the driver reuses the name. The
    /// target of the texture units is kept so that they can still be unbound.
    pub fn purge_texture(&mut self, texture: gl::types::GLuint) {
        for unit in self.texture_units.iter_mut() {
            if unit.texture == texture {
                unit.texture = DISENGAGED_BINDING;
            }
        }

        for unit in self.image_units.iter_mut() {
            if unit.texture == texture {
                *unit = ImageUnitState::DISENGAGED;
            }
        }
    }

    /// Unit used to bind textures for the operations that need them bound.
    #[inline]
    pub fn internal_unit(&self) -> gl::types::GLuint {
        (self.texture_units.len() - 1) as gl::types::GLuint
    }
}
