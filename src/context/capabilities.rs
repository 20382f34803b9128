use crate::backend::Driver;
use crate::context::ExtensionsList;
use crate::gl;

/// Represents the capabilities of the context.
///
/// Contrary to the state, these values never change.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// Name of the vendor of the OpenGL implementation.
    pub vendor: String,

    /// Name of the renderer, usually the GPU.
    pub renderer: String,

    /// Maximum number of textures that can be bound to a program.
    ///
    /// `glActiveTexture` must be between `GL_TEXTURE0` and `GL_TEXTURE0` + this value - 1.
    pub max_combined_texture_image_units: gl::types::GLint,

    /// Number of image units. `0` if `GL_ARB_shader_image_load_store` is not supported.
    pub max_image_units: gl::types::GLint,
}

/// Loads the capabilities.
pub fn get_capabilities(driver: &dyn Driver, extensions: &ExtensionsList) -> Capabilities {
    Capabilities {
        vendor: driver.get_string(gl::VENDOR).unwrap_or_default(),
        renderer: driver.get_string(gl::RENDERER).unwrap_or_default(),

        max_combined_texture_image_units: {
            driver.get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS)
        },

        max_image_units: if extensions.gl_arb_shader_image_load_store {
            driver.get_integer(gl::MAX_IMAGE_UNITS)
        } else {
            0
        },
    }
}
