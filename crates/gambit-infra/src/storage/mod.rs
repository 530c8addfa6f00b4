//! Image bucket implementations - Supabase Storage and in-memory fallback.

mod memory;
#[cfg(feature = "supabase")]
mod supabase;

pub use memory::InMemoryImageStorage;
#[cfg(feature = "supabase")]
pub use supabase::{SupabaseConfig, SupabaseStorage};

use gambit_core::ports::StorageError;

/// Normalize a storage-relative path: trim it and drop one leading `/`.
/// Returns `None` for an empty path.
pub(crate) fn clean_path(path: &str) -> Result<Option<&str>, StorageError> {
    let path = path.trim();
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Ok(None);
    }
    if path.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/torneo.png").unwrap(), Some("torneo.png"));
        assert_eq!(clean_path(" fotos/r1.jpg ").unwrap(), Some("fotos/r1.jpg"));
        assert_eq!(clean_path("/").unwrap(), None);
        assert_eq!(clean_path("").unwrap(), None);
        assert!(clean_path("../secret").is_err());
    }
}
