/*!
Test supports module.

The tests run against `RecordingDriver`, which answers the queries of the context from a
`Profile` and appends every other call to a log shared with the test.

*/

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gltex::backend::{Driver, Extent, ParameterValue, TextureRef};
use gltex::context::{Context, ContextOptions};
use gltex::gl;
use gltex::gl::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};

/// What the fake OpenGL implementation reports.
#[derive(Debug, Clone)]
pub struct Profile {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub extensions: Vec<String>,
    pub texture_units: GLint,
    pub image_units: GLint,
    pub integers: HashMap<GLenum, GLint>,
    pub floats: HashMap<GLenum, GLfloat>,
    pub level_parameters: HashMap<GLenum, GLint>,
    pub tex_parameters: HashMap<GLenum, GLint>,
    pub internal_format: HashMap<GLenum, GLint>,
}

impl Profile {
    /// OpenGL 2.1 without any of the optional extensions.
    pub fn classic() -> Profile {
        Profile::with_version("2.1.0 Test")
    }

    /// OpenGL 4.6, which has everything in core.
    pub fn modern() -> Profile {
        Profile::with_version("4.6.0 Test")
    }

    pub fn with_version(version: &str) -> Profile {
        Profile {
            version: version.to_owned(),
            vendor: "Test Vendor".to_owned(),
            renderer: "Test Renderer".to_owned(),
            extensions: Vec::new(),
            texture_units: 8,
            image_units: 4,
            integers: HashMap::new(),
            floats: HashMap::new(),
            level_parameters: HashMap::new(),
            tex_parameters: HashMap::new(),
            internal_format: HashMap::new(),
        }
    }

    pub fn extensions(mut self, extensions: &[&str]) -> Profile {
        self.extensions.extend(extensions.iter().map(|e| e.to_string()));
        self
    }

    pub fn vendor(mut self, vendor: &str, renderer: &str) -> Profile {
        self.vendor = vendor.to_owned();
        self.renderer = renderer.to_owned();
        self
    }

    pub fn units(mut self, texture_units: GLint, image_units: GLint) -> Profile {
        self.texture_units = texture_units;
        self.image_units = image_units;
        self
    }

    pub fn integer(mut self, name: GLenum, value: GLint) -> Profile {
        self.integers.insert(name, value);
        self
    }

    pub fn float(mut self, name: GLenum, value: GLfloat) -> Profile {
        self.floats.insert(name, value);
        self
    }

    pub fn level_parameter(mut self, name: GLenum, value: GLint) -> Profile {
        self.level_parameters.insert(name, value);
        self
    }

    pub fn tex_parameter(mut self, name: GLenum, value: GLint) -> Profile {
        self.tex_parameters.insert(name, value);
        self
    }

    pub fn internal_format(mut self, name: GLenum, value: GLint) -> Profile {
        self.internal_format.insert(name, value);
        self
    }
}

/// Owned copy of a `ParameterValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(GLint),
    Float(GLfloat),
    Ints(Vec<GLint>),
    Floats(Vec<GLfloat>),
    IntegerInts(Vec<GLint>),
    IntegerUints(Vec<GLuint>),
}

impl<'a> From<ParameterValue<'a>> for Param {
    fn from(value: ParameterValue<'a>) -> Param {
        match value {
            ParameterValue::Int(v) => Param::Int(v),
            ParameterValue::Float(v) => Param::Float(v),
            ParameterValue::Ints(v) => Param::Ints(v.to_vec()),
            ParameterValue::Floats(v) => Param::Floats(v.to_vec()),
            ParameterValue::IntegerInts(v) => Param::IntegerInts(v.to_vec()),
            ParameterValue::IntegerUints(v) => Param::IntegerUints(v.to_vec()),
        }
    }
}

/// One call that reached the driver. Read-backs record the length of the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetInteger(GLenum),
    GetFloat(GLenum),
    GenTexture(GLuint),
    CreateTexture(GLenum, GLuint),
    DeleteTexture(GLuint),
    ActiveTexture(GLuint),
    BindTexture(GLenum, GLuint),
    BindTextureUnit(GLuint, GLuint),
    BindMultiTexture(GLuint, GLenum, GLuint),
    BindTextures(GLuint, Vec<GLuint>),
    BindImageTexture(GLuint, GLuint, GLint, bool, GLint, GLenum, GLenum),
    BindImageTextures(GLuint, Vec<GLuint>),
    TexParameter(TextureRef, GLenum, Param),
    GetTexParameter(TextureRef, GLenum),
    GetTexLevelParameter(TextureRef, GLint, GLenum),
    GenerateMipmap(TextureRef),
    TexStorage(TextureRef, GLsizei, GLenum, Extent),
    TexStorageMultisample(TextureRef, GLsizei, GLenum, Extent, bool),
    TexImageMultisample(GLenum, GLsizei, GLenum, Extent, bool),
    TexImage(GLenum, GLint, GLenum, Extent, GLenum, GLenum, Option<Vec<u8>>),
    TexSubImage(TextureRef, GLint, Extent, Extent, GLenum, GLenum, Vec<u8>),
    CompressedTexSubImage(TextureRef, GLint, Extent, Extent, GLenum, Vec<u8>),
    GetTexImage(TextureRef, GLint, GLenum, GLenum, usize),
    GetnTexImage(GLenum, GLint, GLenum, GLenum, usize),
    GetCompressedTexImage(TextureRef, GLint, usize),
    GetnCompressedTexImage(GLenum, GLint, usize),
    GetTextureSubImage(GLuint, GLint, Extent, Extent, usize),
    GetCompressedTextureSubImage(GLuint, GLint, Extent, Extent, usize),
    InvalidateTexImage(GLuint, GLint),
    InvalidateTexSubImage(GLuint, GLint, Extent, Extent),
    GetInternalFormat(GLenum, GLenum, GLenum),
    ObjectLabel(GLenum, GLuint, String),
    TexBuffer(TextureRef, GLenum, GLuint),
    TexBufferRange(TextureRef, GLenum, GLuint, isize, isize),
}

impl Call {
    /// Returns true for the calls that change texture unit bindings or the active unit.
    pub fn is_binding(&self) -> bool {
        matches!(self, Call::ActiveTexture(..) | Call::BindTexture(..) |
                       Call::BindTextureUnit(..) | Call::BindMultiTexture(..) |
                       Call::BindTextures(..))
    }
}

/// The calls recorded by a `RecordingDriver`.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    /// Returns the calls recorded since the last `take`, and forgets them.
    pub fn take(&self) -> Vec<Call> {
        self.0.borrow_mut().drain(..).collect()
    }

    /// Returns the calls recorded since the last `take`.
    pub fn peek(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Number of calls recorded since the last `take`.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }
}

/// Fake OpenGL implementation.
///
/// Names are handed out from 1 upwards. A deleted name is handed out again by the next
/// creation, like real drivers tend to do.
pub struct RecordingDriver {
    profile: Profile,
    log: CallLog,
    next_id: Cell<GLuint>,
    free_ids: RefCell<Vec<GLuint>>,
}

impl RecordingDriver {
    pub fn new(profile: Profile) -> (RecordingDriver, CallLog) {
        let log = CallLog::default();
        let driver = RecordingDriver {
            profile,
            log: log.clone(),
            next_id: Cell::new(1),
            free_ids: RefCell::new(Vec::new()),
        };
        (driver, log)
    }

    fn new_id(&self) -> GLuint {
        if let Some(id) = self.free_ids.borrow_mut().pop() {
            return id;
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Driver for RecordingDriver {
    fn get_string(&self, name: GLenum) -> Option<String> {
        match name {
            gl::VERSION => Some(self.profile.version.clone()),
            gl::VENDOR => Some(self.profile.vendor.clone()),
            gl::RENDERER => Some(self.profile.renderer.clone()),
            gl::EXTENSIONS => Some(self.profile.extensions.join(" ")),
            _ => None,
        }
    }

    fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String> {
        assert_eq!(name, gl::EXTENSIONS);
        self.profile.extensions.get(index as usize).cloned()
    }

    fn get_integer(&self, name: GLenum) -> GLint {
        match name {
            gl::NUM_EXTENSIONS => self.profile.extensions.len() as GLint,
            gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS => self.profile.texture_units,
            gl::MAX_IMAGE_UNITS => self.profile.image_units,
            _ => {
                self.log.push(Call::GetInteger(name));
                self.profile.integers.get(&name).cloned().unwrap_or(0)
            },
        }
    }

    fn get_float(&self, name: GLenum) -> GLfloat {
        self.log.push(Call::GetFloat(name));
        self.profile.floats.get(&name).cloned().unwrap_or(0.0)
    }

    fn gen_texture(&self) -> GLuint {
        let id = self.new_id();
        self.log.push(Call::GenTexture(id));
        id
    }

    fn create_texture(&self, target: GLenum) -> GLuint {
        let id = self.new_id();
        self.log.push(Call::CreateTexture(target, id));
        id
    }

    fn delete_texture(&self, id: GLuint) {
        self.log.push(Call::DeleteTexture(id));
        self.free_ids.borrow_mut().push(id);
    }

    fn active_texture(&self, unit: GLuint) {
        self.log.push(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, target: GLenum, id: GLuint) {
        self.log.push(Call::BindTexture(target, id));
    }

    fn bind_texture_unit(&self, unit: GLuint, id: GLuint) {
        self.log.push(Call::BindTextureUnit(unit, id));
    }

    fn bind_multi_texture(&self, unit: GLuint, target: GLenum, id: GLuint) {
        self.log.push(Call::BindMultiTexture(unit, target, id));
    }

    fn bind_textures(&self, first: GLuint, ids: &[GLuint]) {
        self.log.push(Call::BindTextures(first, ids.to_vec()));
    }

    fn bind_image_texture(&self, unit: GLuint, id: GLuint, level: GLint, layered: bool,
                          layer: GLint, access: GLenum, format: GLenum)
    {
        self.log.push(Call::BindImageTexture(unit, id, level, layered, layer, access, format));
    }

    fn bind_image_textures(&self, first: GLuint, ids: &[GLuint]) {
        self.log.push(Call::BindImageTextures(first, ids.to_vec()));
    }

    fn tex_parameter(&self, texture: TextureRef, pname: GLenum, value: ParameterValue<'_>) {
        self.log.push(Call::TexParameter(texture, pname, value.into()));
    }

    fn get_tex_parameter(&self, texture: TextureRef, pname: GLenum) -> GLint {
        self.log.push(Call::GetTexParameter(texture, pname));
        self.profile.tex_parameters.get(&pname).cloned().unwrap_or(0)
    }

    fn get_tex_level_parameter(&self, texture: TextureRef, level: GLint, pname: GLenum)
                               -> GLint
    {
        self.log.push(Call::GetTexLevelParameter(texture, level, pname));
        self.profile.level_parameters.get(&pname).cloned().unwrap_or(0)
    }

    fn generate_mipmap(&self, texture: TextureRef) {
        self.log.push(Call::GenerateMipmap(texture));
    }

    fn tex_storage(&self, texture: TextureRef, levels: GLsizei, internal_format: GLenum,
                   size: Extent)
    {
        self.log.push(Call::TexStorage(texture, levels, internal_format, size));
    }

    fn tex_storage_multisample(&self, texture: TextureRef, samples: GLsizei,
                               internal_format: GLenum, size: Extent,
                               fixed_sample_locations: bool)
    {
        self.log.push(Call::TexStorageMultisample(texture, samples, internal_format, size,
                                                  fixed_sample_locations));
    }

    fn tex_image_multisample(&self, target: GLenum, samples: GLsizei, internal_format: GLenum,
                             size: Extent, fixed_sample_locations: bool)
    {
        self.log.push(Call::TexImageMultisample(target, samples, internal_format, size,
                                                fixed_sample_locations));
    }

    fn tex_image(&self, target: GLenum, level: GLint, internal_format: GLenum, size: Extent,
                 format: GLenum, ty: GLenum, data: Option<&[u8]>)
    {
        self.log.push(Call::TexImage(target, level, internal_format, size, format, ty,
                                     data.map(|d| d.to_vec())));
    }

    fn tex_sub_image(&self, texture: TextureRef, level: GLint, offset: Extent, size: Extent,
                     format: GLenum, ty: GLenum, data: &[u8])
    {
        self.log.push(Call::TexSubImage(texture, level, offset, size, format, ty, data.to_vec()));
    }

    fn compressed_tex_sub_image(&self, texture: TextureRef, level: GLint, offset: Extent,
                                size: Extent, format: GLenum, data: &[u8])
    {
        self.log.push(Call::CompressedTexSubImage(texture, level, offset, size, format,
                                                  data.to_vec()));
    }

    fn get_tex_image(&self, texture: TextureRef, level: GLint, format: GLenum, ty: GLenum,
                     data: &mut [u8])
    {
        self.log.push(Call::GetTexImage(texture, level, format, ty, data.len()));
    }

    fn getn_tex_image(&self, target: GLenum, level: GLint, format: GLenum, ty: GLenum,
                      data: &mut [u8])
    {
        self.log.push(Call::GetnTexImage(target, level, format, ty, data.len()));
    }

    fn get_compressed_tex_image(&self, texture: TextureRef, level: GLint, data: &mut [u8]) {
        self.log.push(Call::GetCompressedTexImage(texture, level, data.len()));
    }

    fn getn_compressed_tex_image(&self, target: GLenum, level: GLint, data: &mut [u8]) {
        self.log.push(Call::GetnCompressedTexImage(target, level, data.len()));
    }

    fn get_texture_sub_image(&self, id: GLuint, level: GLint, offset: Extent, size: Extent,
                             _format: GLenum, _ty: GLenum, data: &mut [u8])
    {
        self.log.push(Call::GetTextureSubImage(id, level, offset, size, data.len()));
    }

    fn get_compressed_texture_sub_image(&self, id: GLuint, level: GLint, offset: Extent,
                                        size: Extent, data: &mut [u8])
    {
        self.log.push(Call::GetCompressedTextureSubImage(id, level, offset, size, data.len()));
    }

    fn invalidate_tex_image(&self, id: GLuint, level: GLint) {
        self.log.push(Call::InvalidateTexImage(id, level));
    }

    fn invalidate_tex_sub_image(&self, id: GLuint, level: GLint, offset: Extent, size: Extent) {
        self.log.push(Call::InvalidateTexSubImage(id, level, offset, size));
    }

    fn get_internal_format(&self, target: GLenum, internal_format: GLenum, pname: GLenum)
                           -> GLint
    {
        self.log.push(Call::GetInternalFormat(target, internal_format, pname));
        self.profile.internal_format.get(&pname).cloned().unwrap_or(0)
    }

    fn object_label(&self, identifier: GLenum, id: GLuint, label: &str) {
        self.log.push(Call::ObjectLabel(identifier, id, label.to_owned()));
    }

    fn tex_buffer(&self, texture: TextureRef, internal_format: GLenum, buffer: GLuint) {
        self.log.push(Call::TexBuffer(texture, internal_format, buffer));
    }

    fn tex_buffer_range(&self, texture: TextureRef, internal_format: GLenum, buffer: GLuint,
                        offset: isize, size: isize)
    {
        self.log.push(Call::TexBufferRange(texture, internal_format, buffer, offset, size));
    }
}

/// Builds a context, with the calls made during its creation already taken out of the log.
pub fn build_context(profile: Profile) -> (Rc<Context>, CallLog) {
    build_context_with(profile, ContextOptions::default())
}

/// Same as `build_context`, with options.
pub fn build_context_with(profile: Profile, options: ContextOptions) -> (Rc<Context>, CallLog) {
    let (driver, log) = RecordingDriver::new(profile);
    let context = Context::new(driver, options).unwrap();
    log.take();
    (context, log)
}

/// Only the calls that touch texture unit bindings.
pub fn bindings(calls: Vec<Call>) -> Vec<Call> {
    calls.into_iter().filter(|c| c.is_binding()).collect()
}
