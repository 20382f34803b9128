//! Detection of drivers with known bugs, and the switches to turn the fixes off.
use bitflags::bitflags;
use fnv::FnvHashSet;

bitflags! {
    /// Drivers that are recognized from the `GL_VENDOR`, `GL_RENDERER` and `GL_VERSION` strings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DetectedDrivers: u8 {
        /// Proprietary AMD driver.
        const AMD = 1 << 0;
        /// Intel driver on Windows.
        const INTEL_WINDOWS = 1 << 1;
        /// Mesa, any hardware.
        const MESA = 1 << 2;
        /// Proprietary NVidia driver.
        const NVIDIA = 1 << 3;
        /// VMware guest driver, always reported together with `MESA`.
        const SVGA3D = 1 << 4;
    }
}

impl DetectedDrivers {
    /// Detects the driver of the current context.
    #[inline]
    pub fn detect(vendor: &str, renderer: &str, version: &str) -> DetectedDrivers {
        DetectedDrivers::detect_on_platform(vendor, renderer, version, cfg!(windows))
    }

    /// Same as `detect`, but the platform is given instead of being the one the crate is
    /// compiled for.
    pub fn detect_on_platform(vendor: &str, renderer: &str, version: &str, windows: bool)
                              -> DetectedDrivers
    {
        let mut detected = DetectedDrivers::empty();

        if vendor.contains("ATI Technologies Inc.") {
            detected |= DetectedDrivers::AMD;
        }

        if windows && vendor.contains("Intel") {
            detected |= DetectedDrivers::INTEL_WINDOWS;
        }

        if version.contains("Mesa") {
            detected |= DetectedDrivers::MESA;

            if renderer.contains("SVGA3D") {
                detected |= DetectedDrivers::SVGA3D;
            }
        }

        if vendor.contains("NVIDIA Corporation") {
            detected |= DetectedDrivers::NVIDIA;
        }

        detected
    }
}

/// Cube maps bound through `glBindTextureUnit` end up unusable.
pub const INTEL_WINDOWS_HALF_BAKED_DSA_TEXTURE_BIND: &str =
    "intel-windows-half-baked-dsa-texture-bind";
/// Most direct state access functions don't work on cube maps.
pub const INTEL_WINDOWS_BROKEN_DSA_FOR_CUBEMAPS: &str = "intel-windows-broken-dsa-for-cubemaps";
/// Direct state access on a whole cube map ignores any non-zero face offset.
pub const AMD_WINDOWS_CUBEMAP_IMAGE3D_SLICE_BY_SLICE: &str =
    "amd-windows-cubemap-image3d-slice-by-slice";
/// Uploading several slices at once only keeps the first one.
pub const SVGA3D_TEXTURE_UPLOAD_SLICE_BY_SLICE: &str = "svga3d-texture-upload-slice-by-slice";
/// `GL_TEXTURE_COMPRESSED_BLOCK_SIZE` is reported in bits instead of bytes.
pub const NV_COMPRESSED_BLOCK_SIZE_IN_BITS: &str = "nv-compressed-block-size-in-bits";
/// The compressed size of a whole cube map level is not six times the size of a face.
pub const NV_CUBEMAP_INCONSISTENT_COMPRESSED_IMAGE_SIZE: &str =
    "nv-cubemap-inconsistent-compressed-image-size";
/// Reading a whole compressed cube map only returns the first face.
pub const NV_CUBEMAP_BROKEN_FULL_COMPRESSED_IMAGE_QUERY: &str =
    "nv-cubemap-broken-full-compressed-image-query";

/// Names of all the workarounds that this library knows about.
pub const KNOWN_WORKAROUNDS: [&str; 7] = [
    INTEL_WINDOWS_HALF_BAKED_DSA_TEXTURE_BIND,
    INTEL_WINDOWS_BROKEN_DSA_FOR_CUBEMAPS,
    AMD_WINDOWS_CUBEMAP_IMAGE3D_SLICE_BY_SLICE,
    SVGA3D_TEXTURE_UPLOAD_SLICE_BY_SLICE,
    NV_COMPRESSED_BLOCK_SIZE_IN_BITS,
    NV_CUBEMAP_INCONSISTENT_COMPRESSED_IMAGE_SIZE,
    NV_CUBEMAP_BROKEN_FULL_COMPRESSED_IMAGE_QUERY,
];

/// Decides which driver workarounds apply, and remembers the ones that did.
#[derive(Debug, Clone)]
pub struct DriverWorkarounds {
    detected: DetectedDrivers,
    disabled: FnvHashSet<&'static str>,
    used: Vec<&'static str>,
}

impl DriverWorkarounds {
    /// Builds the list. Names in `disabled` that are not in `KNOWN_WORKAROUNDS` are ignored
    /// with a warning.
    pub fn new<S>(detected: DetectedDrivers, disabled: &[S]) -> DriverWorkarounds
        where S: AsRef<str>
    {
        let mut set = FnvHashSet::default();

        for name in disabled {
            let name = name.as_ref();
            match KNOWN_WORKAROUNDS.iter().find(|known| **known == name) {
                Some(known) => { set.insert(*known); },
                None => log::warn!("Unknown workaround {:?}, ignoring", name),
            }
        }

        DriverWorkarounds {
            detected,
            disabled: set,
            used: Vec::new(),
        }
    }

    /// Returns the drivers that were detected.
    #[inline]
    pub fn detected(&self) -> DetectedDrivers {
        self.detected
    }

    /// Returns true if the workaround was disabled by the user.
    #[inline]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    /// Returns true if the workaround `name` for `drivers` must be applied.
    ///
    /// A workaround applies if one of `drivers` was detected and the user didn't disable it.
    /// The ones that apply are added to the list returned by `used`.
    pub fn apply(&mut self, drivers: DetectedDrivers, name: &'static str) -> bool {
        debug_assert!(KNOWN_WORKAROUNDS.contains(&name));

        if !self.detected.intersects(drivers) || self.disabled.contains(name) {
            return false;
        }

        if !self.used.contains(&name) {
            self.used.push(name);
        }

        true
    }

    /// Returns the workarounds that apply, in the order they were first asked for.
    #[inline]
    pub fn used(&self) -> &[&'static str] {
        &self.used
    }
}
