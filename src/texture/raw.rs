use std::cell::Cell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use bitflags::bitflags;

use crate::backend::{Facade, TextureRef};
use crate::context::{CommandContext, Context};
use crate::gl;
use crate::texture::bind;
use crate::texture::dispatch::{AccessPath, BindPath, CreatePath, LabelPath};
use crate::texture::TextureTarget;
use crate::GlObject;
use crate::ToGlEnum;

bitflags! {
    /// Properties of the OpenGL object behind a `RawTexture`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        /// The texture is deleted when the handle is dropped.
        const DELETE_ON_DESTRUCTION = 1 << 0;
        /// The object exists, as opposed to only its name being reserved.
        const CREATED = 1 << 1;
    }
}

/// Where a texture stands between getting a name and being usable by name-based functions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureObjectState {
    /// The handle has no name.
    Unreserved,
    /// The name was obtained with `glGenTextures` but the object doesn't exist yet.
    Reserved,
    /// The object exists.
    Created,
}

/// A texture object, without any knowledge of its dimensions or format.
///
/// The handle keeps its `Context` alive. All its methods must be called while the OpenGL
/// context can be made current.
pub struct RawTexture {
    context: Rc<Context>,
    target: TextureTarget,
    id: Cell<gl::types::GLuint>,
    flags: Cell<ObjectFlags>,
}

impl RawTexture {
    /// Obtains a new texture name from the driver.
    ///
    /// Depending on the context the object is either created right away, or only its name is
    /// reserved and the object is created by the first operation that needs it.
    pub fn new<F: ?Sized>(facade: &F, target: TextureTarget) -> RawTexture where F: Facade {
        let context = facade.get_context().clone();

        let (id, flags) = {
            let ctxt = context.make_current();
            match ctxt.dispatch.create {
                CreatePath::Reserve => {
                    (ctxt.driver.gen_texture(), ObjectFlags::DELETE_ON_DESTRUCTION)
                },
                CreatePath::Create => {
                    (ctxt.driver.create_texture(target.to_glenum()),
                     ObjectFlags::DELETE_ON_DESTRUCTION | ObjectFlags::CREATED)
                },
            }
        };

        RawTexture {
            context,
            target,
            id: Cell::new(id),
            flags: Cell::new(flags),
        }
    }

    /// Wraps an existing texture name.
    ///
    /// Unless `flags` contains `DELETE_ON_DESTRUCTION` the texture is left alone when the
    /// handle is dropped. `CREATED` must be set if the object already exists.
    ///
    /// # Panic
    ///
    /// Panics if `id` is `0`.
    pub fn from_id<F: ?Sized>(facade: &F, target: TextureTarget, id: gl::types::GLuint,
                              flags: ObjectFlags) -> RawTexture
        where F: Facade
    {
        assert!(id != 0, "Can't wrap the texture name 0");

        RawTexture {
            context: facade.get_context().clone(),
            target,
            id: Cell::new(id),
            flags: Cell::new(flags),
        }
    }

    /// Gives up the ownership of the texture and returns its name.
    ///
    /// The texture isn't deleted, and the bindings that reference it stay cached.
    pub fn release(self) -> gl::types::GLuint {
        let id = self.id.replace(0);
        mem::drop(self);
        id
    }

    /// Returns the target of the texture.
    #[inline]
    pub fn get_target(&self) -> TextureTarget {
        self.target
    }

    /// Returns the flags of the texture.
    #[inline]
    pub fn get_flags(&self) -> ObjectFlags {
        self.flags.get()
    }

    /// Returns the context the texture belongs to.
    #[inline]
    pub fn get_context(&self) -> &Rc<Context> {
        &self.context
    }

    /// Returns whether the object exists yet.
    pub fn object_state(&self) -> TextureObjectState {
        if self.id.get() == 0 {
            TextureObjectState::Unreserved
        } else if self.flags.get().contains(ObjectFlags::CREATED) {
            TextureObjectState::Created
        } else {
            TextureObjectState::Reserved
        }
    }

    /// Makes sure that the object exists, which is needed before passing its name to
    /// functions that don't bind it.
    ///
    /// Binds the texture to the internal texture unit if it doesn't exist yet. Does nothing
    /// otherwise.
    pub fn create_if_not_already(&self) {
        let mut ctxt = self.context.make_current();
        self.ensure_created(&mut ctxt);
    }

    /// Binds the texture to a texture unit.
    ///
    /// Nothing reaches the driver if the texture is already bound to this unit.
    ///
    /// # Panic
    ///
    /// Panics if `unit` is not below `max_combined_texture_image_units`.
    pub fn bind(&self, unit: gl::types::GLuint) {
        let mut ctxt = self.context.make_current();
        self.bind_to_unit(&mut ctxt, unit);
    }

    /// Sets the debug label of the texture. Does nothing without `KHR_debug`.
    pub fn set_label(&self, label: &str) {
        let mut ctxt = self.context.make_current();

        match ctxt.dispatch.label {
            LabelPath::NoOp => (),
            LabelPath::Khr => {
                self.ensure_created(&mut ctxt);
                ctxt.driver.object_label(gl::TEXTURE, self.id.get(), label);
            },
        }
    }

    pub(crate) fn bind_to_unit(&self, ctxt: &mut CommandContext<'_>, unit: gl::types::GLuint) {
        let id = self.id.get();

        if ctxt.state.texture_unit(unit).texture == id {
            return;
        }

        if ctxt.dispatch.bind == BindPath::Multi {
            self.ensure_created(ctxt);

            // creating the object may have used this very unit
            if ctxt.state.texture_unit(unit).texture == id {
                return;
            }
        }

        match ctxt.dispatch.bind {
            BindPath::Classic => self.bind_classic(ctxt, unit),
            BindPath::Multi => ctxt.driver.bind_textures(unit, &[id]),
            BindPath::DsaExt => {
                ctxt.driver.bind_multi_texture(unit, self.target.to_glenum(), id);
                self.mark_created();
            },
            BindPath::Dsa => ctxt.driver.bind_texture_unit(unit, id),
            BindPath::DsaIntelWindows => {
                if self.target == TextureTarget::CubeMap {
                    self.bind_classic(ctxt, unit);
                } else {
                    ctxt.driver.bind_texture_unit(unit, id);
                }
            },
        }

        ctxt.state.record(unit, self.target.to_glenum(), id);
    }

    fn bind_classic(&self, ctxt: &mut CommandContext<'_>, unit: gl::types::GLuint) {
        bind::activate(ctxt, unit);
        ctxt.driver.bind_texture(self.target.to_glenum(), self.id.get());
        self.mark_created();
    }

    /// Binds the texture to the active unit if it's there, or to the internal unit.
    ///
    /// The classic functions operate on the texture bound to the active unit.
    pub(crate) fn bind_internal(&self, ctxt: &mut CommandContext<'_>) {
        let id = self.id.get();

        if let Some(active) = ctxt.state.active_texture {
            if ctxt.state.texture_unit(active).texture == id {
                return;
            }
        }

        let internal = ctxt.state.internal_unit();
        bind::activate(ctxt, internal);

        if ctxt.state.texture_unit(internal).texture == id {
            return;
        }

        ctxt.state.record(internal, self.target.to_glenum(), id);
        ctxt.driver.bind_texture(self.target.to_glenum(), id);
        self.mark_created();
    }

    pub(crate) fn ensure_created(&self, ctxt: &mut CommandContext<'_>) {
        if self.flags.get().contains(ObjectFlags::CREATED) {
            return;
        }

        log::trace!("Creating texture {} through the internal texture unit", self.id.get());
        self.bind_internal(ctxt);
        debug_assert!(self.flags.get().contains(ObjectFlags::CREATED));
    }

    /// Returns how a driver call must designate this texture with the given path.
    ///
    /// With the classic path the texture ends up bound to the active unit.
    pub(crate) fn texture_ref(&self, ctxt: &mut CommandContext<'_>, path: AccessPath)
                              -> TextureRef
    {
        match path {
            AccessPath::Classic => {
                self.bind_internal(ctxt);
                TextureRef::Bound(self.target.to_glenum())
            },
            AccessPath::DsaExt => {
                // the EXT functions create the object on first use
                self.mark_created();
                TextureRef::NamedExt(self.id.get(), self.target.to_glenum())
            },
            AccessPath::Dsa => TextureRef::Named(self.id.get()),
        }
    }

    #[inline]
    fn mark_created(&self) {
        self.flags.set(self.flags.get() | ObjectFlags::CREATED);
    }
}

impl GlObject for RawTexture {
    type Id = gl::types::GLuint;

    #[inline]
    fn get_id(&self) -> gl::types::GLuint {
        self.id.get()
    }
}

impl fmt::Debug for RawTexture {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt.debug_struct("RawTexture")
           .field("target", &self.target)
           .field("id", &self.id.get())
           .field("flags", &self.flags.get())
           .finish()
    }
}

impl Drop for RawTexture {
    fn drop(&mut self) {
        let id = self.id.get();
        if id == 0 || !self.flags.get().contains(ObjectFlags::DELETE_ON_DESTRUCTION) {
            return;
        }

        let mut ctxt = self.context.make_current();

        // the driver may hand out the same name again
        ctxt.state.purge_texture(id);
        ctxt.driver.delete_texture(id);
    }
}
