//! Limits of the implementation.
//!
//! Each value is queried the first time it is asked for and then kept in the `TextureState` of
//! the context. A stored `0` means that the value wasn't queried yet, so a limit the driver
//! reports as `0` is queried again each time.

use crate::backend::Facade;
use crate::context::TextureLimits;
use crate::gl;
use crate::texture::dispatch::AnisotropyPath;

/// `GL_MAX_TEXTURE_SIZE`, the maximum width and height of 1D and 2D textures.
pub fn max_size<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    cached_integer(facade, |l| &mut l.max_size, gl::MAX_TEXTURE_SIZE)
}

/// `GL_MAX_3D_TEXTURE_SIZE`.
pub fn max_3d_size<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    cached_integer(facade, |l| &mut l.max_3d_size, gl::MAX_3D_TEXTURE_SIZE)
}

/// `GL_MAX_CUBE_MAP_TEXTURE_SIZE`.
pub fn max_cube_map_size<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    cached_integer(facade, |l| &mut l.max_cube_map_size, gl::MAX_CUBE_MAP_TEXTURE_SIZE)
}

/// `GL_MAX_ARRAY_TEXTURE_LAYERS`.
pub fn max_array_layers<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    cached_integer(facade, |l| &mut l.max_array_layers, gl::MAX_ARRAY_TEXTURE_LAYERS)
}

/// `GL_MAX_RECTANGLE_TEXTURE_SIZE`.
pub fn max_rectangle_size<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    cached_integer(facade, |l| &mut l.max_rectangle_size, gl::MAX_RECTANGLE_TEXTURE_SIZE)
}

/// `GL_MAX_TEXTURE_BUFFER_SIZE`, in texels. `0` without `ARB_texture_buffer_object`.
pub fn max_buffer_size<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    if !facade.get_context().get_extensions().gl_arb_texture_buffer_object {
        return 0;
    }

    cached_integer(facade, |l| &mut l.max_buffer_size, gl::MAX_TEXTURE_BUFFER_SIZE)
}

/// `GL_TEXTURE_BUFFER_OFFSET_ALIGNMENT`. `1` without `ARB_texture_buffer_range`.
pub fn buffer_offset_alignment<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    if !facade.get_context().get_extensions().gl_arb_texture_buffer_range {
        return 1;
    }

    cached_integer(facade, |l| &mut l.buffer_offset_alignment,
                   gl::TEXTURE_BUFFER_OFFSET_ALIGNMENT)
}

/// `GL_MAX_COLOR_TEXTURE_SAMPLES`. `0` without `ARB_texture_multisample`.
pub fn max_color_samples<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    if !facade.get_context().get_extensions().gl_arb_texture_multisample {
        return 0;
    }

    cached_integer(facade, |l| &mut l.max_color_samples, gl::MAX_COLOR_TEXTURE_SAMPLES)
}

/// `GL_MAX_DEPTH_TEXTURE_SAMPLES`. `0` without `ARB_texture_multisample`.
pub fn max_depth_samples<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    if !facade.get_context().get_extensions().gl_arb_texture_multisample {
        return 0;
    }

    cached_integer(facade, |l| &mut l.max_depth_samples, gl::MAX_DEPTH_TEXTURE_SAMPLES)
}

/// `GL_MAX_INTEGER_SAMPLES`. `0` without `ARB_texture_multisample`.
pub fn max_integer_samples<F: ?Sized>(facade: &F) -> i32 where F: Facade {
    if !facade.get_context().get_extensions().gl_arb_texture_multisample {
        return 0;
    }

    cached_integer(facade, |l| &mut l.max_integer_samples, gl::MAX_INTEGER_SAMPLES)
}

/// `GL_MAX_TEXTURE_LOD_BIAS`.
pub fn max_lod_bias<F: ?Sized>(facade: &F) -> f32 where F: Facade {
    cached_float(facade, |l| &mut l.max_lod_bias, gl::MAX_TEXTURE_LOD_BIAS)
}

/// `GL_MAX_TEXTURE_MAX_ANISOTROPY`. `0.0` if anisotropic filtering is not available.
pub fn max_max_anisotropy<F: ?Sized>(facade: &F) -> f32 where F: Facade {
    match facade.get_context().get_dispatch().max_anisotropy {
        AnisotropyPath::NoOp => 0.0,
        AnisotropyPath::ArbOrExt => {
            cached_float(facade, |l| &mut l.max_max_anisotropy, gl::MAX_TEXTURE_MAX_ANISOTROPY)
        },
    }
}

fn cached_integer<F: ?Sized>(facade: &F, field: fn(&mut TextureLimits) -> &mut gl::types::GLint,
                             name: gl::types::GLenum) -> gl::types::GLint
    where F: Facade
{
    let mut ctxt = facade.get_context().make_current();

    let cached = *field(&mut ctxt.state.limits);
    if cached != 0 {
        return cached;
    }

    let value = ctxt.driver.get_integer(name);
    *field(&mut ctxt.state.limits) = value;
    value
}

fn cached_float<F: ?Sized>(facade: &F, field: fn(&mut TextureLimits) -> &mut gl::types::GLfloat,
                           name: gl::types::GLenum) -> gl::types::GLfloat
    where F: Facade
{
    let mut ctxt = facade.get_context().make_current();

    let cached = *field(&mut ctxt.state.limits);
    if cached != 0.0 {
        return cached;
    }

    let value = ctxt.driver.get_float(name);
    *field(&mut ctxt.state.limits) = value;
    value
}
