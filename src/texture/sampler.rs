use crate::backend::ParameterValue;
use crate::gl;
use crate::texture::dispatch::AnisotropyPath;
use crate::texture::RawTexture;
use crate::ToGlEnum;

/// Function to use for out-of-bounds samples.
///
/// This is how GL must handle samples that are outside the texture.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum SamplerWrapFunction {
    /// Samples at coord `x + 1` are mapped to coord `x`.
    Repeat,

    /// Samples at coord `x + 1` are mapped to coord `1 - x`.
    Mirror,

    /// Samples at coord `x + 1` are mapped to coord `1`.
    Clamp,

    /// Samples outside the texture take the border color.
    BorderClamp,

    /// Same as `Mirror` for one repetition, then `Clamp`.
    MirrorClamp,
}

impl ToGlEnum for SamplerWrapFunction {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            SamplerWrapFunction::Repeat => gl::REPEAT,
            SamplerWrapFunction::Mirror => gl::MIRRORED_REPEAT,
            SamplerWrapFunction::Clamp => gl::CLAMP_TO_EDGE,
            SamplerWrapFunction::BorderClamp => gl::CLAMP_TO_BORDER,
            SamplerWrapFunction::MirrorClamp => gl::MIRROR_CLAMP_TO_EDGE,
        }
    }
}

/// The function that the GPU will use when loading the value of a texel.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MagnifySamplerFilter {
    /// The nearest texel will be loaded.
    Nearest,

    /// All nearby texels will be loaded and their values will be merged.
    Linear,
}

impl ToGlEnum for MagnifySamplerFilter {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            MagnifySamplerFilter::Nearest => gl::NEAREST,
            MagnifySamplerFilter::Linear => gl::LINEAR,
        }
    }
}

/// The function that the GPU will use when loading the value of a texel.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum MinifySamplerFilter {
    /// The nearest texel will be loaded.
    ///
    /// Only uses the main texture, mipmaps are totally ignored.
    Nearest,

    /// All nearby texels will be loaded and their values will be merged.
    ///
    /// Only uses the main texture, mipmaps are totally ignored.
    Linear,

    /// The nearest texel of the nearest mipmap will be loaded.
    NearestMipmapNearest,

    /// Takes all nearby texels of the nearest mipmap, and merges them.
    LinearMipmapNearest,

    /// Takes the nearest texel from the two nearest mipmaps, and merges them.
    NearestMipmapLinear,

    /// Same as `LinearMipmapNearest` with the two nearest mipmaps.
    LinearMipmapLinear,
}

impl ToGlEnum for MinifySamplerFilter {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            MinifySamplerFilter::Nearest => gl::NEAREST,
            MinifySamplerFilter::Linear => gl::LINEAR,
            MinifySamplerFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
            MinifySamplerFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
            MinifySamplerFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
            MinifySamplerFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
        }
    }
}

/// Function used to compare the reference value with the content of a depth texture.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum DepthTextureComparison {
    LessOrEqual,
    GreaterOrEqual,
    Less,
    Greater,
    Equal,
    NotEqual,
    Always,
    Never,
}

impl ToGlEnum for DepthTextureComparison {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            DepthTextureComparison::LessOrEqual => gl::LEQUAL,
            DepthTextureComparison::GreaterOrEqual => gl::GEQUAL,
            DepthTextureComparison::Less => gl::LESS,
            DepthTextureComparison::Greater => gl::GREATER,
            DepthTextureComparison::Equal => gl::EQUAL,
            DepthTextureComparison::NotEqual => gl::NOTEQUAL,
            DepthTextureComparison::Always => gl::ALWAYS,
            DepthTextureComparison::Never => gl::NEVER,
        }
    }
}

/// Which component of a depth-stencil texture is sampled.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum DepthStencilMode {
    /// The depth.
    Depth,
    /// The stencil index.
    Stencil,
}

impl ToGlEnum for DepthStencilMode {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            DepthStencilMode::Depth => gl::DEPTH_COMPONENT,
            DepthStencilMode::Stencil => gl::STENCIL_INDEX,
        }
    }
}

/// Source of a component returned when sampling.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Swizzle {
    Red,
    Green,
    Blue,
    Alpha,
    Zero,
    One,
}

impl ToGlEnum for Swizzle {
    #[inline]
    fn to_glenum(&self) -> gl::types::GLenum {
        match *self {
            Swizzle::Red => gl::RED,
            Swizzle::Green => gl::GREEN,
            Swizzle::Blue => gl::BLUE,
            Swizzle::Alpha => gl::ALPHA,
            Swizzle::Zero => gl::ZERO,
            Swizzle::One => gl::ONE,
        }
    }
}

impl RawTexture {
    /// Sets `GL_TEXTURE_BASE_LEVEL`.
    #[inline]
    pub fn set_base_level(&self, level: u32) {
        self.set_parameter(gl::TEXTURE_BASE_LEVEL, ParameterValue::Int(level as gl::types::GLint));
    }

    /// Sets `GL_TEXTURE_MAX_LEVEL`.
    #[inline]
    pub fn set_max_level(&self, level: u32) {
        self.set_parameter(gl::TEXTURE_MAX_LEVEL, ParameterValue::Int(level as gl::types::GLint));
    }

    /// Sets the filter used when the texture is minified.
    #[inline]
    pub fn set_minify_filter(&self, filter: MinifySamplerFilter) {
        self.set_parameter(gl::TEXTURE_MIN_FILTER,
                           ParameterValue::Int(filter.to_glenum() as gl::types::GLint));
    }

    /// Sets the filter used when the texture is magnified.
    #[inline]
    pub fn set_magnify_filter(&self, filter: MagnifySamplerFilter) {
        self.set_parameter(gl::TEXTURE_MAG_FILTER,
                           ParameterValue::Int(filter.to_glenum() as gl::types::GLint));
    }

    /// Sets `GL_TEXTURE_MIN_LOD`.
    #[inline]
    pub fn set_min_lod(&self, lod: f32) {
        self.set_parameter(gl::TEXTURE_MIN_LOD, ParameterValue::Float(lod));
    }

    /// Sets `GL_TEXTURE_MAX_LOD`.
    #[inline]
    pub fn set_max_lod(&self, lod: f32) {
        self.set_parameter(gl::TEXTURE_MAX_LOD, ParameterValue::Float(lod));
    }

    /// Sets `GL_TEXTURE_LOD_BIAS`.
    #[inline]
    pub fn set_lod_bias(&self, bias: f32) {
        self.set_parameter(gl::TEXTURE_LOD_BIAS, ParameterValue::Float(bias));
    }

    /// Sets the wrap functions of the S, T and R coordinates, in this order.
    ///
    /// # Panic
    ///
    /// Panics if more functions than the texture has dimensions are given.
    pub fn set_wrap_functions(&self, functions: &[SamplerWrapFunction]) {
        assert!(functions.len() <= self.get_target().dimensions() as usize,
                "{} wrap functions given for a texture of {} dimensions", functions.len(),
                self.get_target().dimensions());

        let names = [gl::TEXTURE_WRAP_S, gl::TEXTURE_WRAP_T, gl::TEXTURE_WRAP_R];
        for (name, function) in names.iter().zip(functions.iter()) {
            self.set_parameter(*name,
                               ParameterValue::Int(function.to_glenum() as gl::types::GLint));
        }
    }

    /// Sets the border color for normalized and floating-point formats.
    #[inline]
    pub fn set_border_color(&self, color: [f32; 4]) {
        self.set_parameter(gl::TEXTURE_BORDER_COLOR, ParameterValue::Floats(&color));
    }

    /// Sets the border color for signed integer formats.
    #[inline]
    pub fn set_border_color_integer(&self, color: [i32; 4]) {
        self.set_parameter(gl::TEXTURE_BORDER_COLOR, ParameterValue::IntegerInts(&color));
    }

    /// Sets the border color for unsigned integer formats.
    #[inline]
    pub fn set_border_color_unsigned(&self, color: [u32; 4]) {
        self.set_parameter(gl::TEXTURE_BORDER_COLOR, ParameterValue::IntegerUints(&color));
    }

    /// Sets the maximum degree of anisotropy.
    ///
    /// Does nothing if neither `ARB_texture_filter_anisotropic` nor
    /// `EXT_texture_filter_anisotropic` is available.
    pub fn set_max_anisotropy(&self, anisotropy: f32) {
        match self.get_context().get_dispatch().max_anisotropy {
            AnisotropyPath::NoOp => (),
            AnisotropyPath::ArbOrExt => {
                self.set_parameter(gl::TEXTURE_MAX_ANISOTROPY, ParameterValue::Float(anisotropy));
            },
        }
    }

    /// Chooses whether sRGB textures are converted to linear when sampled.
    ///
    /// # Panic
    ///
    /// Panics if `EXT_texture_sRGB_decode` is not available.
    pub fn set_srgb_decode(&self, decode: bool) {
        assert!(self.get_context().get_extensions().gl_ext_texture_srgb_decode,
                "GL_EXT_texture_sRGB_decode is not supported");

        let value = if decode { gl::DECODE_EXT } else { gl::SKIP_DECODE_EXT };
        self.set_parameter(gl::TEXTURE_SRGB_DECODE_EXT,
                           ParameterValue::Int(value as gl::types::GLint));
    }

    /// Sets where the red, green, blue and alpha components come from.
    pub fn set_swizzle(&self, swizzle: [Swizzle; 4]) {
        let values = [
            swizzle[0].to_glenum() as gl::types::GLint,
            swizzle[1].to_glenum() as gl::types::GLint,
            swizzle[2].to_glenum() as gl::types::GLint,
            swizzle[3].to_glenum() as gl::types::GLint,
        ];

        self.set_parameter(gl::TEXTURE_SWIZZLE_RGBA, ParameterValue::Ints(&values));
    }

    /// Enables depth comparison with the given function, or disables it with `None`.
    pub fn set_depth_comparison(&self, comparison: Option<DepthTextureComparison>) {
        match comparison {
            Some(function) => {
                self.set_parameter(gl::TEXTURE_COMPARE_MODE,
                                   ParameterValue::Int(gl::COMPARE_REF_TO_TEXTURE as _));
                self.set_parameter(gl::TEXTURE_COMPARE_FUNC,
                                   ParameterValue::Int(function.to_glenum() as _));
            },
            None => {
                self.set_parameter(gl::TEXTURE_COMPARE_MODE, ParameterValue::Int(gl::NONE as _));
            },
        }
    }

    /// Chooses which component of a depth-stencil texture is sampled.
    #[inline]
    pub fn set_depth_stencil_mode(&self, mode: DepthStencilMode) {
        self.set_parameter(gl::DEPTH_STENCIL_TEXTURE_MODE,
                           ParameterValue::Int(mode.to_glenum() as gl::types::GLint));
    }

    fn set_parameter(&self, pname: gl::types::GLenum, value: ParameterValue<'_>) {
        let mut ctxt = self.get_context().make_current();
        let path = ctxt.dispatch.parameter;
        let texture = self.texture_ref(&mut ctxt, path);
        ctxt.driver.tex_parameter(texture, pname, value);
    }
}
