//! Contains everything related to the interface between gltex and the OpenGL implementation.

use std::cell::{Ref, RefCell, RefMut};
use std::env;
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::backend::Driver;
use crate::texture::dispatch::TextureDispatch;
use crate::version::{self, Version};

pub use self::capabilities::Capabilities;
pub use self::extensions::ExtensionsList;
pub use self::state::{ImageUnitState, TextureLimits, TextureState, TextureUnitState};
pub use self::state::DISENGAGED_BINDING;
pub use self::workarounds::{DetectedDrivers, DriverWorkarounds, KNOWN_WORKAROUNDS};

pub mod workarounds;

mod capabilities;
mod extensions;
mod state;

/// Name of the environment variable read by `ContextOptions::from_env` for the workarounds.
pub const DISABLE_WORKAROUNDS_ENV: &str = "GLTEX_DISABLE_WORKAROUNDS";

/// Name of the environment variable read by `ContextOptions::from_env` for the extensions.
pub const DISABLE_EXTENSIONS_ENV: &str = "GLTEX_DISABLE_EXTENSIONS";

/// Stores the state and information required for gltex to execute commands.
///
/// One context wraps one OpenGL context. It must only be used while that OpenGL context can be
/// made current, and the texture state it mirrors is only valid as long as nothing outside of
/// gltex changes the bindings. Call `reset_texture_state` when that happens.
pub struct Context {
    driver: Box<dyn Driver>,

    state: RefCell<TextureState>,

    version: Version,
    version_string: String,
    extensions: ExtensionsList,
    capabilities: Capabilities,

    detected_drivers: DetectedDrivers,
    workarounds: Vec<&'static str>,

    dispatch: TextureDispatch,
}

/// Everything an operation needs to talk to the driver.
///
/// Only one can exist at a time for a given context, as it holds the borrow of the state.
pub(crate) struct CommandContext<'a> {
    /// Where the calls go.
    pub driver: &'a dyn Driver,

    /// The binding-state cache.
    pub state: RefMut<'a, TextureState>,

    pub version: &'a Version,

    pub extensions: &'a ExtensionsList,

    /// Which implementation of each operation to use.
    pub dispatch: &'a TextureDispatch,
}

/// Options given when building a `Context`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// Names of the driver workarounds that must not be applied even if the driver is detected.
    pub disabled_workarounds: Vec<String>,

    /// Names of the extensions to consider unsupported, for example
    /// `GL_ARB_direct_state_access`.
    pub disabled_extensions: Vec<String>,
}

impl ContextOptions {
    /// Reads the options from the `GLTEX_DISABLE_WORKAROUNDS` and `GLTEX_DISABLE_EXTENSIONS`
    /// environment variables. Both are lists of names separated with commas or spaces.
    pub fn from_env() -> ContextOptions {
        ContextOptions {
            disabled_workarounds: split_env_list(env::var(DISABLE_WORKAROUNDS_ENV).ok()),
            disabled_extensions: split_env_list(env::var(DISABLE_EXTENSIONS_ENV).ok()),
        }
    }

    /// Adds a workaround to the list of disabled ones.
    #[inline]
    pub fn disable_workaround<S: Into<String>>(mut self, name: S) -> ContextOptions {
        self.disabled_workarounds.push(name.into());
        self
    }

    /// Adds an extension to the list of disabled ones.
    #[inline]
    pub fn disable_extension<S: Into<String>>(mut self, name: S) -> ContextOptions {
        self.disabled_extensions.push(name.into());
        self
    }
}

fn split_env_list(value: Option<String>) -> Vec<String> {
    match value {
        Some(value) => value.split(|c: char| c == ',' || c.is_whitespace())
                            .filter(|s| !s.is_empty())
                            .map(|s| s.to_owned())
                            .collect(),
        None => Vec::new(),
    }
}

/// Error that can happen while creating a context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextCreationError {
    /// The OpenGL implementation is too old or lacks something gltex can't work without.
    IncompatibleOpenGl(String),

    /// The `GL_VERSION` string couldn't be understood.
    VersionParse(String),
}

impl fmt::Display for ContextCreationError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            ContextCreationError::IncompatibleOpenGl(e) =>
                write!(fmt, "The OpenGL implementation is too old to work with gltex: {}", e),
            ContextCreationError::VersionParse(v) =>
                write!(fmt, "Failed to parse the OpenGL version string {:?}", v),
        }
    }
}

impl Error for ContextCreationError {}

impl Context {
    /// Builds a new context around a driver.
    ///
    /// Makes the context current, queries the version, the extensions and the limits, detects
    /// the driver bugs and picks the implementation of every texture operation. The binding
    /// state starts entirely disengaged.
    pub fn new<D>(driver: D, options: ContextOptions) -> Result<Rc<Context>, ContextCreationError>
        where D: Driver + 'static
    {
        unsafe { driver.make_current() };

        let (version, version_string) = version::get_gl_version(&driver)
                                            .map_err(ContextCreationError::VersionParse)?;
        let extensions = extensions::get_extensions(&driver, &version,
                                                    &options.disabled_extensions);
        let capabilities = capabilities::get_capabilities(&driver, &extensions);

        if capabilities.max_combined_texture_image_units < 2 {
            return Err(ContextCreationError::IncompatibleOpenGl(
                format!("At least two texture units are required, the implementation has {}",
                        capabilities.max_combined_texture_image_units)));
        }

        let detected_drivers = DetectedDrivers::detect(&capabilities.vendor,
                                                       &capabilities.renderer,
                                                       &version_string);
        let mut workarounds = DriverWorkarounds::new(detected_drivers,
                                                     &options.disabled_workarounds);
        let dispatch = TextureDispatch::new(&extensions, &mut workarounds);

        let state = TextureState::new(capabilities.max_combined_texture_image_units as usize,
                                      capabilities.max_image_units.max(0) as usize);

        log::info!("OpenGL version: {}", version_string);
        log::info!("Vendor: {}, renderer: {}", capabilities.vendor, capabilities.renderer);
        if !workarounds.used().is_empty() {
            log::info!("Using driver workarounds: {}", workarounds.used().join(", "));
        }
        if !dispatch.used_extensions().is_empty() {
            log::info!("Using optional features: {}", dispatch.used_extensions().join(", "));
        }

        Ok(Rc::new(Context {
            driver: Box::new(driver),
            state: RefCell::new(state),
            version,
            version_string,
            extensions,
            capabilities,
            detected_drivers,
            workarounds: workarounds.used().to_vec(),
            dispatch,
        }))
    }

    /// Makes the context current if needed and borrows the state.
    ///
    /// # Panic
    ///
    /// Panics if a `CommandContext` of this context already exists.
    pub(crate) fn make_current(&self) -> CommandContext<'_> {
        if !self.driver.is_current() {
            unsafe { self.driver.make_current() };
        }

        CommandContext {
            driver: &*self.driver,
            state: self.state.borrow_mut(),
            version: &self.version,
            extensions: &self.extensions,
            dispatch: &self.dispatch,
        }
    }

    /// Returns the OpenGL version of the context.
    #[inline]
    pub fn get_version(&self) -> &Version {
        &self.version
    }

    /// Returns the `GL_VERSION` string as reported by the driver.
    #[inline]
    pub fn get_version_string(&self) -> &str {
        &self.version_string
    }

    /// Returns the extensions that gltex uses, minus the disabled ones.
    #[inline]
    pub fn get_extensions(&self) -> &ExtensionsList {
        &self.extensions
    }

    /// Returns the capabilities of the context.
    #[inline]
    pub fn get_capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the implementations that were chosen for the texture operations.
    #[inline]
    pub fn get_dispatch(&self) -> &TextureDispatch {
        &self.dispatch
    }

    /// Returns the drivers that were recognized.
    #[inline]
    pub fn get_detected_drivers(&self) -> DetectedDrivers {
        self.detected_drivers
    }

    /// Returns the names of the driver workarounds that are in use.
    #[inline]
    pub fn get_driver_workarounds(&self) -> &[&'static str] {
        &self.workarounds
    }

    /// Returns the current content of the binding-state cache.
    ///
    /// # Panic
    ///
    /// Panics if called while a texture operation is running, which can only happen from a
    /// `Driver` implementation.
    #[inline]
    pub fn texture_state(&self) -> Ref<'_, TextureState> {
        self.state.borrow()
    }

    /// Forgets everything cached about texture and image units.
    ///
    /// Must be called after code outside of gltex has changed texture bindings or the active
    /// texture unit. Doesn't call OpenGL.
    pub fn reset_texture_state(&self) {
        self.state.borrow_mut().reset();
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt.debug_struct("Context")
           .field("version", &self.version)
           .field("extensions", &self.extensions)
           .field("capabilities", &self.capabilities)
           .field("workarounds", &self.workarounds)
           .field("dispatch", &self.dispatch)
           .finish()
    }
}
