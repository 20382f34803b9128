//! Version of the OpenGL API of a context.

use std::cmp::Ordering;

use crate::backend::Driver;
use crate::gl;

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version(Api::Gl, 3, 0) >= Version(Api::GlEs, 3, 0)` and
/// `Version(Api::GlEs, 3, 0) >= Version(Api::Gl, 3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Version(pub Api, pub u8, pub u8);

/// Describes an OpenGL-related API.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Api {
    /// Regular OpenGL.
    Gl,
    /// OpenGL embedded system.
    GlEs,
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<Ordering> {
        if self.0 != other.0 {
            return None;
        }

        match self.1.cmp(&other.1) {
            Ordering::Equal => Some(self.2.cmp(&other.2)),
            a => Some(a)
        }
    }
}

impl Version {
    /// Parses the content of `GL_VERSION`.
    ///
    /// Returns `None` if the string doesn't start with a `major.minor` number.
    pub fn parse(version: &str) -> Option<Version> {
        let (version, gles) = if let Some(rest) = version.strip_prefix("OpenGL ES ") {
            (rest, true)
        } else {
            (version, false)
        };

        let version = version.split_whitespace().next()?;
        let mut iter = version.split('.');
        let major = iter.next()?.parse().ok()?;
        let minor = iter.next()?.parse().ok()?;

        Some(Version(if gles { Api::GlEs } else { Api::Gl }, major, minor))
    }
}

/// Obtains the OpenGL version of the current context.
///
/// Returns the raw `GL_VERSION` string next to the parsed version, the driver detection
/// needs it.
pub fn get_gl_version(driver: &dyn Driver) -> Result<(Version, String), String> {
    let string = driver.get_string(gl::VERSION)
                       .ok_or_else(|| "glGetString(GL_VERSION) returned null".to_owned())?;

    match Version::parse(&string) {
        Some(version) => Ok((version, string)),
        None => Err(string),
    }
}

#[cfg(test)]
mod tests {
    use super::{Api, Version};

    #[test]
    fn parse_desktop() {
        assert_eq!(Version::parse("4.6.0 NVIDIA 535.54.03"), Some(Version(Api::Gl, 4, 6)));
        assert_eq!(Version::parse("3.3 (Core Profile) Mesa 23.0.4"), Some(Version(Api::Gl, 3, 3)));
    }

    #[test]
    fn parse_es() {
        assert_eq!(Version::parse("OpenGL ES 3.2 build 1.13"), Some(Version(Api::GlEs, 3, 2)));
    }

    #[test]
    fn parse_garbage() {
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("four point five"), None);
        assert_eq!(Version::parse("4"), None);
    }

    #[test]
    fn apis_dont_compare() {
        assert!(!(Version(Api::Gl, 3, 0) >= Version(Api::GlEs, 3, 0)));
        assert!(!(Version(Api::GlEs, 3, 0) >= Version(Api::Gl, 3, 0)));
        assert!(Version(Api::Gl, 4, 5) > Version(Api::Gl, 4, 4));
    }
}
