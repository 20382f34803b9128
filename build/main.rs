use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gl_generator::{Api, Fallbacks, Profile, Registry, StructGenerator};

fn main() {
    let dest = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&dest);

    let mut file = BufWriter::new(File::create(dest.join("gl_bindings.rs")).unwrap());
    generate_gl_bindings(&mut file);

    println!("cargo:rerun-if-changed=build/main.rs");
}

fn generate_gl_bindings<W>(dest: &mut W) where W: std::io::Write {
    let gl_registry = Registry::new(
        Api::Gl,
        (4, 6),
        Profile::Compatibility,
        Fallbacks::None,
        vec![
            "GL_ARB_direct_state_access",
            "GL_ARB_get_texture_sub_image",
            "GL_ARB_internalformat_query2",
            "GL_ARB_invalidate_subdata",
            "GL_ARB_multi_bind",
            "GL_ARB_robustness",
            "GL_ARB_shader_image_load_store",
            "GL_ARB_texture_buffer_object",
            "GL_ARB_texture_buffer_range",
            "GL_ARB_texture_filter_anisotropic",
            "GL_ARB_texture_multisample",
            "GL_ARB_texture_storage",
            "GL_ARB_texture_storage_multisample",
            "GL_EXT_direct_state_access",
            "GL_EXT_texture_filter_anisotropic",
            "GL_EXT_texture_sRGB_decode",
            "GL_KHR_debug",
        ],
    );

    gl_registry.write_bindings(StructGenerator, dest).unwrap();
}
