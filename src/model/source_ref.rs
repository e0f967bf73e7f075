//! References to source-code artifacts of a component.
//!
//! Both variants are encoded as external references on the component and
//! told apart purely by reference type and comment tag:
//!
//! - remote download URL: type `source-distribution`
//! - local copy by relative path: type `distribution` plus a fixed comment
//!
//! A reference whose tag combination matches neither rule is simply
//! invisible to the typed view; it is not an error. The classification
//! predicates are standalone functions so they can be tested without any
//! wrapper involved.

use crate::codec::ext_ref::{new_ext_ref, set_url_str, url_str};
use crate::codec::hash_field::{self, HashAlgorithm};
use crate::codec::file_url;
use crate::error::Result;
use serde_cyclonedx::cyclonedx::v_1_6::ExternalReference;
use std::borrow::{Borrow, BorrowMut};

/// Comment tag marking a local copy of a source archive.
pub const SOURCE_ARCHIVE_LOCAL: &str = "source archive (local copy)";

pub(crate) const TYPE_DISTRIBUTION: &str = "distribution";
pub(crate) const TYPE_SOURCE_DISTRIBUTION: &str = "source-distribution";

/// Does this reference denote a local copy of a source archive?
#[must_use]
pub fn is_local_source_reference(ext_ref: &ExternalReference) -> bool {
    ext_ref.type_ == TYPE_DISTRIBUTION && ext_ref.comment.as_deref() == Some(SOURCE_ARCHIVE_LOCAL)
}

/// Does this reference denote a remote source download URL?
#[must_use]
pub fn is_url_source_reference(ext_ref: &ExternalReference) -> bool {
    ext_ref.type_ == TYPE_SOURCE_DISTRIBUTION
}

/// Does this reference denote a source artifact of either kind?
#[must_use]
pub fn is_source_reference(ext_ref: &ExternalReference) -> bool {
    is_local_source_reference(ext_ref) || is_url_source_reference(ext_ref)
}

/// Classify a reference into the typed view. Local is tried first; a
/// reference cannot satisfy both predicates because the type tags differ.
#[must_use]
pub fn classify(ext_ref: &ExternalReference) -> Option<SourceArtifactRef<&ExternalReference>> {
    if is_local_source_reference(ext_ref) {
        Some(SourceArtifactRef::Local(SourceArtifactRefLocal { ext_ref }))
    } else if is_url_source_reference(ext_ref) {
        Some(SourceArtifactRef::Url(SourceArtifactRefUrl { ext_ref }))
    } else {
        None
    }
}

/// A source artifact reference of either kind.
#[derive(Debug)]
pub enum SourceArtifactRef<R = ExternalReference> {
    /// A downloaded copy of the source archive, referenced by relative path.
    Local(SourceArtifactRefLocal<R>),
    /// The original remote URL of the source archive.
    Url(SourceArtifactRefUrl<R>),
}

/// A source artifact reference which explicitly refers to a downloaded copy
/// of the source archive via a relative path.
#[derive(Debug)]
pub struct SourceArtifactRefLocal<R = ExternalReference> {
    ext_ref: R,
}

/// A source artifact reference which explicitly refers to the original
/// remote URL of the source archive.
#[derive(Debug)]
pub struct SourceArtifactRefUrl<R = ExternalReference> {
    ext_ref: R,
}

macro_rules! impl_hash_accessors {
    ($type:ident) => {
        impl<R: Borrow<ExternalReference>> $type<R> {
            fn r(&self) -> &ExternalReference {
                self.ext_ref.borrow()
            }

            pub fn url(&self) -> &str {
                url_str(self.r())
            }

            pub fn md5(&self) -> Option<&str> {
                hash_field::get(self.r().hashes.as_deref(), HashAlgorithm::Md5)
            }

            pub fn sha1(&self) -> Option<&str> {
                hash_field::get(self.r().hashes.as_deref(), HashAlgorithm::Sha1)
            }

            pub fn sha256(&self) -> Option<&str> {
                hash_field::get(self.r().hashes.as_deref(), HashAlgorithm::Sha256)
            }

            pub fn sha512(&self) -> Option<&str> {
                hash_field::get(self.r().hashes.as_deref(), HashAlgorithm::Sha512)
            }

            /// The underlying CycloneDX external reference.
            pub fn cyclonedx_ref(&self) -> &ExternalReference {
                self.r()
            }
        }

        impl<R: BorrowMut<ExternalReference>> $type<R> {
            fn r_mut(&mut self) -> &mut ExternalReference {
                self.ext_ref.borrow_mut()
            }

            pub fn set_md5(&mut self, md5: Option<&str>) -> Result<()> {
                hash_field::set(&mut self.r_mut().hashes, HashAlgorithm::Md5, md5)
            }

            pub fn set_sha1(&mut self, sha1: Option<&str>) -> Result<()> {
                hash_field::set(&mut self.r_mut().hashes, HashAlgorithm::Sha1, sha1)
            }

            pub fn set_sha256(&mut self, sha256: Option<&str>) -> Result<()> {
                hash_field::set(&mut self.r_mut().hashes, HashAlgorithm::Sha256, sha256)
            }

            pub fn set_sha512(&mut self, sha512: Option<&str>) -> Result<()> {
                hash_field::set(&mut self.r_mut().hashes, HashAlgorithm::Sha512, sha512)
            }
        }
    };
}

impl_hash_accessors!(SourceArtifactRefLocal);
impl_hash_accessors!(SourceArtifactRefUrl);

impl SourceArtifactRefLocal {
    /// Create an empty local-copy reference.
    #[must_use]
    pub fn new() -> Self {
        let mut ext_ref = new_ext_ref("");
        ext_ref.type_ = TYPE_DISTRIBUTION.to_string();
        ext_ref.comment = Some(SOURCE_ARCHIVE_LOCAL.to_string());
        Self { ext_ref }
    }

    /// Take over an existing reference, forcing the local-copy tags onto it.
    #[must_use]
    pub fn from_ext_ref(mut ext_ref: ExternalReference) -> Self {
        ext_ref.type_ = TYPE_DISTRIBUTION.to_string();
        ext_ref.comment = Some(SOURCE_ARCHIVE_LOCAL.to_string());
        Self { ext_ref }
    }

    #[must_use]
    pub fn into_ext_ref(self) -> ExternalReference {
        self.ext_ref
    }
}

impl Default for SourceArtifactRefLocal {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Borrow<ExternalReference>> SourceArtifactRefLocal<R> {
    /// The relative path of the local copy, without the `file:` URL scheme.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        file_url::strip_file_url(url_str(self.r()))
    }
}

impl<R: BorrowMut<ExternalReference>> SourceArtifactRefLocal<R> {
    /// Store the relative path as an authority-less `file:///` URL,
    /// normalizing backslashes to forward slashes.
    pub fn set_relative_path(&mut self, relative_path: &str) {
        let normalized = relative_path.replace('\\', "/");
        let r = self.r_mut();
        set_url_str(r, file_url::ensure_file_url(&normalized));
        r.comment = Some(SOURCE_ARCHIVE_LOCAL.to_string());
    }
}

impl SourceArtifactRefUrl {
    /// Create an empty remote-URL reference.
    #[must_use]
    pub fn new() -> Self {
        let mut ext_ref = new_ext_ref("");
        ext_ref.type_ = TYPE_SOURCE_DISTRIBUTION.to_string();
        Self { ext_ref }
    }

    /// Take over an existing reference, forcing the source-distribution
    /// type onto it.
    #[must_use]
    pub fn from_ext_ref(mut ext_ref: ExternalReference) -> Self {
        ext_ref.type_ = TYPE_SOURCE_DISTRIBUTION.to_string();
        Self { ext_ref }
    }

    #[must_use]
    pub fn into_ext_ref(self) -> ExternalReference {
        self.ext_ref
    }
}

impl Default for SourceArtifactRefUrl {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BorrowMut<ExternalReference>> SourceArtifactRefUrl<R> {
    pub fn set_url(&mut self, url: &str) {
        set_url_str(self.r_mut(), url);
    }
}

impl<R: Borrow<ExternalReference>> SourceArtifactRef<R> {
    /// The underlying CycloneDX external reference.
    pub fn cyclonedx_ref(&self) -> &ExternalReference {
        match self {
            Self::Local(local) => local.cyclonedx_ref(),
            Self::Url(url) => url.cyclonedx_ref(),
        }
    }

    #[must_use]
    pub fn as_local(&self) -> Option<&SourceArtifactRefLocal<R>> {
        match self {
            Self::Local(local) => Some(local),
            Self::Url(_) => None,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&SourceArtifactRefUrl<R>> {
        match self {
            Self::Url(url) => Some(url),
            Self::Local(_) => None,
        }
    }
}

impl SourceArtifactRef {
    #[must_use]
    pub fn into_ext_ref(self) -> ExternalReference {
        match self {
            Self::Local(local) => local.into_ext_ref(),
            Self::Url(url) => url.into_ext_ref(),
        }
    }
}

impl From<SourceArtifactRefLocal> for SourceArtifactRef {
    fn from(local: SourceArtifactRefLocal) -> Self {
        Self::Local(local)
    }
}

impl From<SourceArtifactRefUrl> for SourceArtifactRef {
    fn from(url: SourceArtifactRefUrl) -> Self {
        Self::Url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_are_disjoint() {
        let local = SourceArtifactRefLocal::new().into_ext_ref();
        assert!(is_local_source_reference(&local));
        assert!(!is_url_source_reference(&local));

        let url = SourceArtifactRefUrl::new().into_ext_ref();
        assert!(is_url_source_reference(&url));
        assert!(!is_local_source_reference(&url));
    }

    #[test]
    fn test_unrecognized_tags_are_invisible() {
        let mut stray = new_ext_ref("https://example.com/file.zip");
        stray.type_ = TYPE_DISTRIBUTION.to_string();
        stray.comment = Some("something else".to_string());
        assert!(!is_source_reference(&stray));
        assert!(classify(&stray).is_none());
    }

    #[test]
    fn test_classify_local() {
        let mut local = SourceArtifactRefLocal::new();
        local.set_relative_path("sources/pkg-1.0-src.zip");
        let ext_ref = local.into_ext_ref();
        match classify(&ext_ref) {
            Some(SourceArtifactRef::Local(view)) => {
                assert_eq!(view.relative_path(), "sources/pkg-1.0-src.zip");
            }
            other => panic!("expected local classification, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_url() {
        let mut url_ref = SourceArtifactRefUrl::new();
        url_ref.set_url("https://example.com/pkg-1.0-src.tar.gz");
        let ext_ref = url_ref.into_ext_ref();
        match classify(&ext_ref) {
            Some(SourceArtifactRef::Url(view)) => {
                assert_eq!(view.url(), "https://example.com/pkg-1.0-src.tar.gz");
            }
            other => panic!("expected url classification, got {other:?}"),
        }
    }

    #[test]
    fn test_relative_path_normalizes_backslashes() {
        let mut local = SourceArtifactRefLocal::new();
        local.set_relative_path("sub\\dir\\src.zip");
        assert_eq!(local.relative_path(), "sub/dir/src.zip");
        assert_eq!(local.cyclonedx_ref().url, "file:///sub/dir/src.zip");
    }

    #[test]
    fn test_source_ref_hashes_validate() {
        let mut url_ref = SourceArtifactRefUrl::new();
        url_ref
            .set_sha1(Some("ABCDEF0123456789abcdef0123456789abcdef01"))
            .expect("valid hash");
        assert_eq!(
            url_ref.sha1(),
            Some("abcdef0123456789abcdef0123456789abcdef01")
        );
        assert!(url_ref.set_sha256(Some("nope")).is_err());
    }
}
