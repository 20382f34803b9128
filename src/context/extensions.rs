use crate::backend::Driver;
use crate::gl;
use crate::version::{Api, Version};

/// Contains data about the list of extensions.
///
/// An extension whose functionality is part of the core version of the context is reported
/// as supported even if the driver doesn't list it. An extension that was disabled through
/// the `ContextOptions` is reported as unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtensionsList {
    /// GL_ARB_direct_state_access
    pub gl_arb_direct_state_access: bool,
    /// GL_ARB_get_texture_sub_image
    pub gl_arb_get_texture_sub_image: bool,
    /// GL_ARB_internalformat_query2
    pub gl_arb_internalformat_query2: bool,
    /// GL_ARB_invalidate_subdata
    pub gl_arb_invalidate_subdata: bool,
    /// GL_ARB_multi_bind
    pub gl_arb_multi_bind: bool,
    /// GL_ARB_robustness
    pub gl_arb_robustness: bool,
    /// GL_ARB_shader_image_load_store
    pub gl_arb_shader_image_load_store: bool,
    /// GL_ARB_texture_buffer_object
    pub gl_arb_texture_buffer_object: bool,
    /// GL_ARB_texture_buffer_range
    pub gl_arb_texture_buffer_range: bool,
    /// GL_ARB_texture_filter_anisotropic
    pub gl_arb_texture_filter_anisotropic: bool,
    /// GL_ARB_texture_multisample
    pub gl_arb_texture_multisample: bool,
    /// GL_ARB_texture_storage
    pub gl_arb_texture_storage: bool,
    /// GL_ARB_texture_storage_multisample
    pub gl_arb_texture_storage_multisample: bool,
    /// GL_EXT_direct_state_access
    pub gl_ext_direct_state_access: bool,
    /// GL_EXT_texture_filter_anisotropic
    pub gl_ext_texture_filter_anisotropic: bool,
    /// GL_EXT_texture_sRGB_decode
    pub gl_ext_texture_srgb_decode: bool,
    /// GL_KHR_debug
    pub gl_khr_debug: bool,
}

impl ExtensionsList {
    /// Builds the list from the extension strings reported by the driver.
    pub fn from_strings<I, S, D>(version: &Version, strings: I, disabled: &[D]) -> ExtensionsList
        where I: IntoIterator<Item = S>, S: AsRef<str>, D: AsRef<str>
    {
        let mut extensions = ExtensionsList::default();

        for extension in strings {
            if let Some(flag) = extensions.flag_mut(extension.as_ref()) {
                *flag = true;
            }
        }

        extensions.add_core(version);

        for extension in disabled {
            let extension = extension.as_ref();
            match extensions.flag_mut(extension) {
                Some(flag) => {
                    if *flag {
                        log::debug!("Disabling extension {}", extension);
                    }
                    *flag = false;
                },
                None => log::warn!("Unknown extension {:?}, ignoring", extension),
            }
        }

        extensions
    }

    fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
        Some(match name {
            "GL_ARB_direct_state_access" => &mut self.gl_arb_direct_state_access,
            "GL_ARB_get_texture_sub_image" => &mut self.gl_arb_get_texture_sub_image,
            "GL_ARB_internalformat_query2" => &mut self.gl_arb_internalformat_query2,
            "GL_ARB_invalidate_subdata" => &mut self.gl_arb_invalidate_subdata,
            "GL_ARB_multi_bind" => &mut self.gl_arb_multi_bind,
            "GL_ARB_robustness" => &mut self.gl_arb_robustness,
            "GL_ARB_shader_image_load_store" => &mut self.gl_arb_shader_image_load_store,
            "GL_ARB_texture_buffer_object" => &mut self.gl_arb_texture_buffer_object,
            "GL_ARB_texture_buffer_range" => &mut self.gl_arb_texture_buffer_range,
            "GL_ARB_texture_filter_anisotropic" => &mut self.gl_arb_texture_filter_anisotropic,
            "GL_ARB_texture_multisample" => &mut self.gl_arb_texture_multisample,
            "GL_ARB_texture_storage" => &mut self.gl_arb_texture_storage,
            "GL_ARB_texture_storage_multisample" => &mut self.gl_arb_texture_storage_multisample,
            "GL_EXT_direct_state_access" => &mut self.gl_ext_direct_state_access,
            "GL_EXT_texture_filter_anisotropic" => &mut self.gl_ext_texture_filter_anisotropic,
            "GL_EXT_texture_sRGB_decode" => &mut self.gl_ext_texture_srgb_decode,
            "GL_KHR_debug" => &mut self.gl_khr_debug,
            _ => return None,
        })
    }

    /// Marks the extensions that were promoted to the core version of the context.
    fn add_core(&mut self, version: &Version) {
        if version >= &Version(Api::Gl, 3, 1) {
            self.gl_arb_texture_buffer_object = true;
        }
        if version >= &Version(Api::Gl, 3, 2) {
            self.gl_arb_texture_multisample = true;
        }
        if version >= &Version(Api::Gl, 4, 2) {
            self.gl_arb_shader_image_load_store = true;
            self.gl_arb_texture_storage = true;
        }
        if version >= &Version(Api::Gl, 4, 3) {
            self.gl_arb_internalformat_query2 = true;
            self.gl_arb_invalidate_subdata = true;
            self.gl_arb_texture_buffer_range = true;
            self.gl_arb_texture_storage_multisample = true;
            self.gl_khr_debug = true;
        }
        if version >= &Version(Api::Gl, 4, 4) {
            self.gl_arb_multi_bind = true;
        }
        if version >= &Version(Api::Gl, 4, 5) {
            self.gl_arb_direct_state_access = true;
            self.gl_arb_get_texture_sub_image = true;
        }
        if version >= &Version(Api::Gl, 4, 6) {
            self.gl_arb_texture_filter_anisotropic = true;
        }
    }
}

/// Returns the list of extensions supported by the backend, minus the disabled ones.
///
/// The version must match the one of the backend.
pub fn get_extensions<D>(driver: &dyn Driver, version: &Version, disabled: &[D]) -> ExtensionsList
    where D: AsRef<str>
{
    let strings = get_extensions_strings(driver, version);
    ExtensionsList::from_strings(version, strings, disabled)
}

/// Returns the list of all extension names supported by the OpenGL implementation.
fn get_extensions_strings(driver: &dyn Driver, version: &Version) -> Vec<String> {
    if version >= &Version(Api::Gl, 3, 0) || version >= &Version(Api::GlEs, 3, 0) {
        let num_extensions = driver.get_integer(gl::NUM_EXTENSIONS);

        (0 .. num_extensions.max(0))
            .filter_map(|num| driver.get_string_i(gl::EXTENSIONS, num as gl::types::GLuint))
            .collect()

    } else {
        match driver.get_string(gl::EXTENSIONS) {
            Some(list) => list.split(' ').filter(|e| !e.is_empty()).map(|e| e.to_owned()).collect(),
            None => Vec::new(),
        }
    }
}
