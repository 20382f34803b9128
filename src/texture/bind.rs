//! Operations on texture units and image units.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::backend::Facade;
use crate::context::{CommandContext, ExtensionsList, ImageUnitState};
use crate::gl;
use crate::texture::dispatch::{MultiPath, UnbindPath};
use crate::texture::{ImageAccess, ImageFormat, RawTexture};
use crate::version::{Api, Version};
use crate::GlObject;
use crate::ToGlEnum;

/// Makes `unit` the active texture unit, unless it already is.
pub(crate) fn activate(ctxt: &mut CommandContext<'_>, unit: gl::types::GLuint) {
    if ctxt.state.active_texture != Some(unit) {
        ctxt.driver.active_texture(unit);
        ctxt.state.active_texture = Some(unit);
    }
}

/// Empties a texture unit.
///
/// Nothing reaches the driver if the unit is known to be empty.
///
/// Without `ARB_direct_state_access` and `ARB_multi_bind` the target of the bound texture is
/// needed. If gltex never bound anything to the unit since the context was created or its
/// state was reset, the target is unknown and every target that the context supports is
/// unbound.
///
/// # Panic
///
/// Panics if `unit` is out of range.
pub fn unbind<F: ?Sized>(facade: &F, unit: gl::types::GLuint) where F: Facade {
    let mut ctxt = facade.get_context().make_current();
    unbind_unit(&mut ctxt, unit);
}

pub(crate) fn unbind_unit(ctxt: &mut CommandContext<'_>, unit: gl::types::GLuint) {
    let current = ctxt.state.texture_unit(unit);
    if current.texture == 0 {
        return;
    }

    let targets: SmallVec<[gl::types::GLenum; 11]> = if current.target != 0 {
        SmallVec::from_elem(current.target, 1)
    } else {
        supported_targets(ctxt.version, ctxt.extensions)
    };

    match ctxt.dispatch.unbind {
        UnbindPath::Classic => {
            activate(ctxt, unit);
            for &target in targets.iter() {
                ctxt.driver.bind_texture(target, 0);
            }
        },
        UnbindPath::Multi => ctxt.driver.bind_textures(unit, &[0]),
        UnbindPath::DsaExt => {
            for &target in targets.iter() {
                ctxt.driver.bind_multi_texture(unit, target, 0);
            }
        },
        UnbindPath::Dsa => ctxt.driver.bind_texture_unit(unit, 0),
    }

    ctxt.state.record(unit, 0, 0);
}

/// Every texture target that can be bound with this version and these extensions.
fn supported_targets(version: &Version, extensions: &ExtensionsList)
                     -> SmallVec<[gl::types::GLenum; 11]>
{
    let mut targets = SmallVec::new();
    let at_least_gl = |major, minor| version >= &Version(Api::Gl, major, minor);
    let gles = |major, minor| version >= &Version(Api::GlEs, major, minor);

    if version.0 == Api::Gl {
        targets.push(gl::TEXTURE_1D);
    }
    targets.push(gl::TEXTURE_2D);
    if version.0 == Api::Gl || gles(3, 0) {
        targets.push(gl::TEXTURE_3D);
    }
    targets.push(gl::TEXTURE_CUBE_MAP);

    if at_least_gl(3, 0) {
        targets.push(gl::TEXTURE_1D_ARRAY);
    }
    if at_least_gl(3, 0) || gles(3, 0) {
        targets.push(gl::TEXTURE_2D_ARRAY);
    }
    if at_least_gl(3, 1) {
        targets.push(gl::TEXTURE_RECTANGLE);
    }
    if at_least_gl(4, 0) || gles(3, 2) {
        targets.push(gl::TEXTURE_CUBE_MAP_ARRAY);
    }
    if extensions.gl_arb_texture_buffer_object || gles(3, 2) {
        targets.push(gl::TEXTURE_BUFFER);
    }
    if extensions.gl_arb_texture_multisample || gles(3, 2) {
        targets.push(gl::TEXTURE_2D_MULTISAMPLE);
        targets.push(gl::TEXTURE_2D_MULTISAMPLE_ARRAY);
    }

    targets
}

/// Binds textures to consecutive texture units starting at `first`. `None` empties the unit.
///
/// With `ARB_multi_bind` a single call is made for the whole range, and only if at least one
/// unit changes. Otherwise each unit is handled like `RawTexture::bind` and `unbind` do.
///
/// # Panic
///
/// Panics if the range goes past the last texture unit, or if one of the textures belongs to
/// another context.
pub fn bind_multi<F: ?Sized>(facade: &F, first: gl::types::GLuint,
                             textures: &[Option<&RawTexture>])
    where F: Facade
{
    for texture in textures.iter().flatten() {
        assert!(Rc::ptr_eq(texture.get_context(), facade.get_context()),
                "Texture {} belongs to another context", texture.get_id());
    }

    let mut ctxt = facade.get_context().make_current();
    bind_range(&mut ctxt, first, textures);
}

/// Empties `count` consecutive texture units starting at `first`.
pub fn unbind_range<F: ?Sized>(facade: &F, first: gl::types::GLuint, count: usize)
    where F: Facade
{
    let none: SmallVec<[Option<&RawTexture>; 16]> = SmallVec::from_elem(None, count);
    let mut ctxt = facade.get_context().make_current();
    bind_range(&mut ctxt, first, &none);
}

fn bind_range(ctxt: &mut CommandContext<'_>, first: gl::types::GLuint,
              textures: &[Option<&RawTexture>])
{
    assert!(first as usize + textures.len() <= ctxt.state.texture_units.len(),
            "Texture units {}..{} out of range ({} units available)", first,
            first as usize + textures.len(), ctxt.state.texture_units.len());

    match ctxt.dispatch.bind_multi {
        MultiPath::Fallback => {
            for (unit, texture) in (first ..).zip(textures.iter()) {
                match texture {
                    Some(texture) => texture.bind_to_unit(ctxt, unit),
                    None => unbind_unit(ctxt, unit),
                }
            }
        },

        MultiPath::Multi => {
            // creation may go through the internal unit, it must be over before comparing
            for texture in textures.iter().flatten() {
                texture.ensure_created(ctxt);
            }

            let mut ids: SmallVec<[gl::types::GLuint; 16]> = SmallVec::new();
            let mut different = false;

            for (unit, texture) in (first ..).zip(textures.iter()) {
                let (target, id) = match texture {
                    Some(texture) => (texture.get_target().to_glenum(), texture.get_id()),
                    None => (0, 0),
                };

                ids.push(id);

                if ctxt.state.texture_unit(unit).texture != id {
                    different = true;
                    ctxt.state.record(unit, target, id);
                }
            }

            if different {
                ctxt.driver.bind_textures(first, &ids);
            }
        },
    }
}

impl RawTexture {
    /// Binds a level of the texture to an image unit.
    ///
    /// For array, cube map and 3D textures only the first layer is bound, see
    /// `bind_image_layer` and `bind_image_layered`.
    pub fn bind_image(&self, unit: gl::types::GLuint, level: u32, access: ImageAccess,
                      format: ImageFormat)
    {
        let state = ImageUnitState {
            texture: self.get_id(),
            level: level as gl::types::GLint,
            layered: false,
            layer: 0,
            access: access.to_glenum(),
        };

        let mut ctxt = self.get_context().make_current();
        self.bind_image_internal(&mut ctxt, unit, state, format.to_glenum());
    }

    /// Binds one layer of a level of the texture to an image unit.
    pub fn bind_image_layer(&self, unit: gl::types::GLuint, level: u32, layer: u32,
                            access: ImageAccess, format: ImageFormat)
    {
        let state = ImageUnitState {
            texture: self.get_id(),
            level: level as gl::types::GLint,
            layered: false,
            layer: layer as gl::types::GLint,
            access: access.to_glenum(),
        };

        let mut ctxt = self.get_context().make_current();
        self.bind_image_internal(&mut ctxt, unit, state, format.to_glenum());
    }

    /// Binds all the layers of a level of the texture to an image unit.
    pub fn bind_image_layered(&self, unit: gl::types::GLuint, level: u32, access: ImageAccess,
                              format: ImageFormat)
    {
        let state = ImageUnitState {
            texture: self.get_id(),
            level: level as gl::types::GLint,
            layered: true,
            layer: 0,
            access: access.to_glenum(),
        };

        let mut ctxt = self.get_context().make_current();
        self.bind_image_internal(&mut ctxt, unit, state, format.to_glenum());
    }

    fn bind_image_internal(&self, ctxt: &mut CommandContext<'_>, unit: gl::types::GLuint,
                           state: ImageUnitState, format: gl::types::GLenum)
    {
        if ctxt.state.image_unit(unit) == state {
            return;
        }

        self.ensure_created(ctxt);

        ctxt.state.record_image(unit, state);
        ctxt.driver.bind_image_texture(unit, state.texture, state.level, state.layered,
                                       state.layer, state.access, format);
    }
}

/// Empties an image unit.
///
/// # Panic
///
/// Panics if `unit` is out of range, which is always the case without
/// `ARB_shader_image_load_store`.
pub fn unbind_image<F: ?Sized>(facade: &F, unit: gl::types::GLuint) where F: Facade {
    let mut ctxt = facade.get_context().make_current();
    unbind_image_unit(&mut ctxt, unit);
}

fn unbind_image_unit(ctxt: &mut CommandContext<'_>, unit: gl::types::GLuint) {
    if ctxt.state.image_unit(unit).texture == 0 {
        return;
    }

    ctxt.state.record_image(unit, ImageUnitState::UNBOUND);
    ctxt.driver.bind_image_texture(unit, 0, 0, false, 0, gl::READ_ONLY, gl::RGBA8);
}

/// Binds level 0 of textures, all layers and with read-write access, to consecutive image
/// units starting at `first`. `None` empties the unit.
///
/// Without `ARB_multi_bind`, the format of each unit is the internal format of the texture.
///
/// # Panic
///
/// Panics if the range goes past the last image unit, or if one of the textures belongs to
/// another context.
pub fn bind_images<F: ?Sized>(facade: &F, first: gl::types::GLuint,
                              textures: &[Option<&RawTexture>])
    where F: Facade
{
    for texture in textures.iter().flatten() {
        assert!(Rc::ptr_eq(texture.get_context(), facade.get_context()),
                "Texture {} belongs to another context", texture.get_id());
    }

    let mut ctxt = facade.get_context().make_current();
    bind_image_range(&mut ctxt, first, textures);
}

/// Empties `count` consecutive image units starting at `first`.
pub fn unbind_images<F: ?Sized>(facade: &F, first: gl::types::GLuint, count: usize)
    where F: Facade
{
    let none: SmallVec<[Option<&RawTexture>; 8]> = SmallVec::from_elem(None, count);
    let mut ctxt = facade.get_context().make_current();
    bind_image_range(&mut ctxt, first, &none);
}

fn bind_image_range(ctxt: &mut CommandContext<'_>, first: gl::types::GLuint,
                    textures: &[Option<&RawTexture>])
{
    assert!(first as usize + textures.len() <= ctxt.state.image_units.len(),
            "Image units {}..{} out of range ({} units available)", first,
            first as usize + textures.len(), ctxt.state.image_units.len());

    match ctxt.dispatch.bind_images {
        MultiPath::Fallback => {
            for (unit, texture) in (first ..).zip(textures.iter()) {
                match texture {
                    Some(texture) => {
                        let state = whole_texture(texture);
                        if ctxt.state.image_unit(unit) == state {
                            continue;
                        }

                        let format = texture.query_level_parameter(ctxt, 0,
                                                                   gl::TEXTURE_INTERNAL_FORMAT);
                        texture.bind_image_internal(ctxt, unit, state,
                                                    format as gl::types::GLenum);
                    },
                    None => unbind_image_unit(ctxt, unit),
                }
            }
        },

        MultiPath::Multi => {
            for texture in textures.iter().flatten() {
                texture.ensure_created(ctxt);
            }

            let mut ids: SmallVec<[gl::types::GLuint; 8]> = SmallVec::new();
            let mut different = false;

            for (unit, texture) in (first ..).zip(textures.iter()) {
                let state = match texture {
                    Some(texture) => whole_texture(texture),
                    None => ImageUnitState::UNBOUND,
                };

                ids.push(state.texture);

                if ctxt.state.image_unit(unit) != state {
                    different = true;
                    ctxt.state.record_image(unit, state);
                }
            }

            if different {
                ctxt.driver.bind_image_textures(first, &ids);
            }
        },
    }
}

/// What `glBindImageTextures` binds for a texture.
fn whole_texture(texture: &RawTexture) -> ImageUnitState {
    ImageUnitState {
        texture: texture.get_id(),
        level: 0,
        layered: true,
        layer: 0,
        access: gl::READ_WRITE,
    }
}

#[cfg(test)]
mod tests {
    use super::supported_targets;
    use crate::context::ExtensionsList;
    use crate::gl;
    use crate::version::{Api, Version};

    #[test]
    fn targets_of_old_contexts() {
        let targets = supported_targets(&Version(Api::Gl, 2, 1), &ExtensionsList::default());
        assert_eq!(targets.as_slice(), &[gl::TEXTURE_1D, gl::TEXTURE_2D, gl::TEXTURE_3D,
                                         gl::TEXTURE_CUBE_MAP]);
    }

    #[test]
    fn targets_of_modern_contexts() {
        let extensions = ExtensionsList {
            gl_arb_texture_buffer_object: true,
            gl_arb_texture_multisample: true,
            .. Default::default()
        };
        let targets = supported_targets(&Version(Api::Gl, 4, 6), &extensions);
        assert_eq!(targets.len(), 11);
        assert!(targets.contains(&gl::TEXTURE_CUBE_MAP_ARRAY));
        assert!(targets.contains(&gl::TEXTURE_2D_MULTISAMPLE_ARRAY));
    }

    #[test]
    fn targets_of_embedded_contexts() {
        let targets = supported_targets(&Version(Api::GlEs, 2, 0), &ExtensionsList::default());
        assert_eq!(targets.as_slice(), &[gl::TEXTURE_2D, gl::TEXTURE_CUBE_MAP]);
    }
}
