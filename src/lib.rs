/*!
Texture binding-state cache and capability dispatch for OpenGL.

Every OpenGL texture operation can be performed in several ways depending on what the driver
exposes: `ARB_direct_state_access` addresses textures by name, `ARB_multi_bind` binds many
textures in one call, `EXT_direct_state_access` is the older vendor flavor of direct access,
and the classic path activates a texture unit and binds the texture to it first.

This library inspects the context once, when it is created, and records for each operation which
of these ways is going to be used. It also keeps a mirror of what is bound to each texture unit
and image unit so that binding a texture that is already there costs nothing.

# Initialization

A `Context` is built from a `Driver`. The usual driver is `GlDriver`, which loads the OpenGL
function pointers from a `Backend`:

```no_run
# fn example<B: gltex::backend::Backend + 'static>(backend: B) {
use gltex::backend::GlDriver;
use gltex::context::{Context, ContextOptions};

let driver = unsafe { GlDriver::new(backend) };
let context = Context::new(driver, ContextOptions::from_env()).unwrap();
# }
```

# Textures

```no_run
# fn example(context: std::rc::Rc<gltex::context::Context>) {
use gltex::texture::{RawTexture, TextureFormat, TextureTarget};
use gltex::texture::{MagnifySamplerFilter, Extent};

let texture = RawTexture::new(&context, TextureTarget::Texture2d);
texture.set_storage(1, TextureFormat::RGBA8, Extent::D2(256, 256));
texture.set_magnify_filter(MagnifySamplerFilter::Linear);

// only the first call reaches the driver
texture.bind(3);
texture.bind(3);
# }
```

Driver workarounds and optional extensions can be turned off through `ContextOptions`, or with
the `GLTEX_DISABLE_WORKAROUNDS` and `GLTEX_DISABLE_EXTENSIONS` environment variables.

*/
#![warn(missing_docs)]

pub use crate::context::{Context, ContextCreationError, ContextOptions};
pub use crate::texture::RawTexture;
pub use crate::version::{Api, Version};

pub mod backend;
pub mod context;
pub mod texture;
pub mod version;

/// The raw OpenGL bindings generated at build time.
#[allow(missing_docs)]
#[allow(clippy::all)]
#[allow(non_upper_case_globals)]
#[allow(unused_parens)]
pub mod gl {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

/// Trait for objects that are OpenGL objects.
pub trait GlObject {
    /// The type of identifier for this object.
    type Id;

    /// Returns the id of the object.
    fn get_id(&self) -> Self::Id;
}

/// Internal trait for enums that can be turned into GLenum.
trait ToGlEnum {
    /// Returns the value.
    fn to_glenum(&self) -> gl::types::GLenum;
}
