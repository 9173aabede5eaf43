use std::fmt;
use std::io::Cursor;
use std::path::PathBuf;

use iced::widget::image as iced_image;
use reqwest::Url;

use crate::manifest::{Catalog, MANIFEST_PATH};

/// Why a manifest or image could not be loaded. Always recovered silently.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    #[error("cannot resolve {0:?} against the source")]
    Unresolvable(String),
    #[error("cannot decode image {reference}: {reason}")]
    Decode { reference: String, reason: String },
}

/// Where the manifest and relative image paths are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A directory holding `projects/manifest.json`.
    Local(PathBuf),
    /// An http(s) site root.
    Web(Url),
}

/// A concrete resource to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Local(PathBuf),
    Web(Url),
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

impl Source {
    /// http(s) URLs become web sources, anything else a local directory.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match Url::parse(trimmed) {
            Ok(url) if is_web(&url) => Source::Web(url),
            _ => Source::Local(PathBuf::from(trimmed)),
        }
    }

    /// Resolve a manifest reference. Absolute web URLs are taken as-is;
    /// root-relative and relative paths are joined onto the source.
    pub fn resolve(&self, reference: &str) -> Option<Location> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        if let Ok(url) = Url::parse(reference) {
            if is_web(&url) {
                return Some(Location::Web(url));
            }
            if url.scheme() == "file" {
                return url.to_file_path().ok().map(Location::Local);
            }
        }
        match self {
            Source::Web(base) => base.join(reference).ok().map(Location::Web),
            Source::Local(dir) => Some(Location::Local(
                dir.join(reference.trim_start_matches('/')),
            )),
        }
    }

    pub fn manifest(&self) -> Option<Location> {
        self.resolve(MANIFEST_PATH)
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Local(PathBuf::from("."))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Local(dir) => write!(f, "{}", dir.display()),
            Source::Web(url) => write!(f, "{url}"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Web(url) => write!(f, "{url}"),
        }
    }
}

pub async fn fetch_bytes(location: &Location) -> Result<Vec<u8>, FetchError> {
    match location {
        Location::Local(path) => tokio::fs::read(path).await.map_err(|e| FetchError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
        Location::Web(url) => {
            let response = reqwest::get(url.clone()).await.map_err(|e| FetchError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            if !response.status().is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: response.status().as_u16(),
                });
            }
            let bytes = response.bytes().await.map_err(|e| FetchError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            Ok(bytes.to_vec())
        }
    }
}

/// Fetch and parse the manifest. No retries.
pub async fn load_manifest(source: Source) -> Result<Catalog, FetchError> {
    let location = source
        .manifest()
        .ok_or_else(|| FetchError::Unresolvable(MANIFEST_PATH.to_string()))?;
    log::debug!("loading manifest from {location}");
    let body = fetch_bytes(&location).await?;
    Catalog::parse(&body)
}

/// A decoded-on-demand project image plus its pixel size.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub handle: iced_image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageAsset {
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Read the image size from the header without decoding all pixels.
pub fn read_dimensions(bytes: &[u8], reference: &str) -> Result<(u32, u32), FetchError> {
    let decode_err = |reason: String| FetchError::Decode {
        reference: reference.to_string(),
        reason,
    };
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| decode_err(e.to_string()))?
        .into_dimensions()
        .map_err(|e| decode_err(e.to_string()))
}

pub async fn load_image(source: Source, reference: String) -> Result<ImageAsset, FetchError> {
    let location = source
        .resolve(&reference)
        .ok_or_else(|| FetchError::Unresolvable(reference.clone()))?;
    let bytes = fetch_bytes(&location).await?;
    let (width, height) = read_dimensions(&bytes, &reference)?;
    Ok(ImageAsset {
        handle: iced_image::Handle::from_bytes(bytes),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-test-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("projects")).unwrap();
        dir
    }

    #[test]
    fn parse_distinguishes_web_and_local() {
        assert!(matches!(Source::parse("https://example.com/"), Source::Web(_)));
        assert!(matches!(Source::parse("http://localhost:8080"), Source::Web(_)));
        assert_eq!(
            Source::parse(" ./site "),
            Source::Local(PathBuf::from("./site"))
        );
    }

    #[test]
    fn web_manifest_is_root_relative() {
        let source = Source::parse("https://example.com/portfolio/");
        assert_eq!(
            source.manifest(),
            Some(Location::Web(
                Url::parse("https://example.com/projects/manifest.json").unwrap()
            ))
        );
    }

    #[test]
    fn web_relative_image_joins_base_path() {
        let source = Source::parse("https://example.com/portfolio/");
        assert_eq!(
            source.resolve("img/a.png"),
            Some(Location::Web(
                Url::parse("https://example.com/portfolio/img/a.png").unwrap()
            ))
        );
    }

    #[test]
    fn local_paths_strip_leading_slash() {
        let source = Source::Local(PathBuf::from("/srv/site"));
        assert_eq!(
            source.resolve("/projects/project-1.png"),
            Some(Location::Local(PathBuf::from("/srv/site/projects/project-1.png")))
        );
    }

    #[test]
    fn absolute_urls_bypass_source() {
        let source = Source::Local(PathBuf::from("."));
        assert_eq!(
            source.resolve("https://cdn.test/x.png"),
            Some(Location::Web(Url::parse("https://cdn.test/x.png").unwrap()))
        );
    }

    #[test]
    fn empty_reference_is_unresolvable() {
        assert_eq!(Source::default().resolve("  "), None);
    }

    #[tokio::test]
    async fn load_manifest_from_directory() {
        let dir = scratch_dir("manifest");
        std::fs::write(
            dir.join("projects/manifest.json"),
            r#"{"projects": [{"title": "Alpha", "image": "/projects/a.png"}]}"#,
        )
        .unwrap();

        let catalog = load_manifest(Source::Local(dir.clone())).await.unwrap();
        assert_eq!(catalog.first_title(), "Alpha");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn missing_manifest_is_io_error() {
        let dir = scratch_dir("missing");
        let err = load_manifest(Source::Local(dir.clone())).await.unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn load_image_reports_dimensions() {
        let dir = scratch_dir("image");
        image::RgbaImage::new(8, 4)
            .save(dir.join("projects/wide.png"))
            .unwrap();

        let asset = load_image(Source::Local(dir.clone()), "/projects/wide.png".into())
            .await
            .unwrap();
        assert_eq!((asset.width, asset.height), (8, 4));
        assert_eq!(asset.aspect(), 2.0);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn garbage_is_not_an_image() {
        assert!(matches!(
            read_dimensions(b"definitely not an image", "x.png"),
            Err(FetchError::Decode { .. })
        ));
    }
}
