//! OS-appropriate absolute paths for screenshot/PDF output.

use std::path::PathBuf;

/// Produces a fresh absolute path for a capture of the given kind.
pub trait TempPathResolver: Send + Sync {
    /// `extension` is passed without a leading dot, e.g. `"png"`, `"pdf"`.
    fn resolve(&self, prefix: &str, extension: &str) -> PathBuf;
}

/// Resolves into `std::env::temp_dir()`, name-spaced by a uuid so
/// concurrent invocations never collide.
pub struct RealTempPathResolver;

impl TempPathResolver for RealTempPathResolver {
    fn resolve(&self, prefix: &str, extension: &str) -> PathBuf {
        let id = uuid::Uuid::new_v4();
        std::env::temp_dir().join(format!("{prefix}-{id}.{extension}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_under_the_system_temp_dir() {
        let resolver = RealTempPathResolver;
        let path = resolver.resolve("shot", "png");
        assert!(path.starts_with(std::env::temp_dir()));
        assert_eq!(path.extension().unwrap(), "png");
    }

    #[test]
    fn distinct_calls_never_collide() {
        let resolver = RealTempPathResolver;
        let a = resolver.resolve("shot", "png");
        let b = resolver.resolve("shot", "png");
        assert_ne!(a, b);
    }
}
