use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageBuffer, ImageFormat, ImageReader, Pixel};
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::ScrubError;
use crate::metadata::{self, MetadataInventory};

/// Quality used when re-encoding JPEG files
pub const JPEG_QUALITY: u8 = 95;

/// Formats that must be both readable and writable for the tool to run
const REQUIRED_CODECS: &[ImageFormat] = &[ImageFormat::Jpeg, ImageFormat::Png];

/// How a decoded image is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodePolicy {
    /// Lossy, fixed quality
    Jpeg { quality: u8 },
    /// Lossless, best compression with adaptive filtering
    Png,
    /// Same format as the source, codec defaults
    Native(ImageFormat),
}

impl EncodePolicy {
    pub fn for_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => EncodePolicy::Jpeg {
                quality: JPEG_QUALITY,
            },
            ImageFormat::Png => EncodePolicy::Png,
            other => EncodePolicy::Native(other),
        }
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            EncodePolicy::Jpeg { .. } => ImageFormat::Jpeg,
            EncodePolicy::Png => ImageFormat::Png,
            EncodePolicy::Native(format) => *format,
        }
    }

    fn encode<W: Write + Seek>(
        &self,
        image: &DynamicImage,
        writer: &mut W,
    ) -> Result<(), ScrubError> {
        let result = match self {
            EncodePolicy::Jpeg { quality } => {
                image.write_with_encoder(JpegEncoder::new_with_quality(writer, *quality))
            }
            EncodePolicy::Png => image.write_with_encoder(PngEncoder::new_with_quality(
                writer,
                CompressionType::Best,
                FilterType::Adaptive,
            )),
            EncodePolicy::Native(format) => image.write_to(writer, *format),
        };

        result.map_err(|source| ScrubError::Encode {
            format: self.format(),
            source,
        })
    }
}

/// Outcome of a successful scrub
#[derive(Debug, Clone, Copy)]
pub struct ScrubReport {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// EXIF found in the file before it was rewritten
    pub removed: MetadataInventory,
}

/// Fail fast if the linked codec library cannot handle JPEG and PNG
pub fn ensure_codecs_available() -> Result<(), ScrubError> {
    for format in REQUIRED_CODECS {
        if !format.reading_enabled() || !format.writing_enabled() {
            return Err(ScrubError::CodecUnavailable(*format));
        }
    }
    Ok(())
}

/// Rewrite `path` in place with pixel data only.
///
/// The image is decoded, rebuilt from its raw samples into a fresh buffer and
/// re-encoded in its original format. The new bytes go to a temporary file
/// next to the original, are checked for leftover EXIF, and then renamed over
/// the original. On any error the original file is left as it was.
///
/// A symlink is resolved first so the file it points at is rewritten and the
/// link itself stays in place.
pub fn scrub_image(link: &Path) -> Result<ScrubReport, ScrubError> {
    let resolved = resolve_link(link)?;
    let path = resolved.as_path();

    let removed = metadata::inspect_file(path).unwrap_or_else(|e| {
        debug!("{}: EXIF inventory unavailable: {}", path.display(), e);
        MetadataInventory::default()
    });

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| ScrubError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let format = reader.format().ok_or(ScrubError::UnknownFormat)?;
    let decoded = reader.decode().map_err(ScrubError::Decode)?;

    debug!(
        "{}: {:?} {}x{} {:?}, {}",
        path.display(),
        format,
        decoded.width(),
        decoded.height(),
        decoded.color(),
        removed.describe()
    );

    let (width, height) = (decoded.width(), decoded.height());
    let pixels_only = rebuild_from_samples(decoded)?;

    write_verified(path, &pixels_only, EncodePolicy::for_format(format))?;

    Ok(ScrubReport {
        format,
        width,
        height,
        removed,
    })
}

fn resolve_link(path: &Path) -> Result<PathBuf, ScrubError> {
    let open_error = |source| ScrubError::Open {
        path: path.to_path_buf(),
        source,
    };

    let is_link = fs::symlink_metadata(path)
        .map_err(open_error)?
        .file_type()
        .is_symlink();
    if !is_link {
        return Ok(path.to_path_buf());
    }

    let target = fs::canonicalize(path).map_err(open_error)?;
    debug!("{}: symlink to {}", path.display(), target.display());
    Ok(target)
}

/// Copy the raw samples into a brand new buffer of the same layout and size
pub fn rebuild_from_samples(image: DynamicImage) -> Result<DynamicImage, ScrubError> {
    let color = image.color();

    let rebuilt = match image {
        DynamicImage::ImageLuma8(buf) => fresh_buffer(buf).map(DynamicImage::ImageLuma8),
        DynamicImage::ImageLumaA8(buf) => fresh_buffer(buf).map(DynamicImage::ImageLumaA8),
        DynamicImage::ImageRgb8(buf) => fresh_buffer(buf).map(DynamicImage::ImageRgb8),
        DynamicImage::ImageRgba8(buf) => fresh_buffer(buf).map(DynamicImage::ImageRgba8),
        DynamicImage::ImageLuma16(buf) => fresh_buffer(buf).map(DynamicImage::ImageLuma16),
        DynamicImage::ImageLumaA16(buf) => fresh_buffer(buf).map(DynamicImage::ImageLumaA16),
        DynamicImage::ImageRgb16(buf) => fresh_buffer(buf).map(DynamicImage::ImageRgb16),
        DynamicImage::ImageRgba16(buf) => fresh_buffer(buf).map(DynamicImage::ImageRgba16),
        DynamicImage::ImageRgb32F(buf) => fresh_buffer(buf).map(DynamicImage::ImageRgb32F),
        DynamicImage::ImageRgba32F(buf) => fresh_buffer(buf).map(DynamicImage::ImageRgba32F),
        _ => None,
    };

    rebuilt.ok_or(ScrubError::UnsupportedLayout(color))
}

fn fresh_buffer<P: Pixel>(
    buf: ImageBuffer<P, Vec<P::Subpixel>>,
) -> Option<ImageBuffer<P, Vec<P::Subpixel>>> {
    let (width, height) = buf.dimensions();
    ImageBuffer::from_raw(width, height, buf.into_raw())
}

fn write_verified(
    path: &Path,
    image: &DynamicImage,
    policy: EncodePolicy,
) -> Result<(), ScrubError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".scrub-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(ScrubError::Write)?;
    debug!("{}: encoding to {}", path.display(), temp.path().display());

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        policy.encode(image, &mut writer)?;
        writer
            .into_inner()
            .map_err(|e| ScrubError::Write(e.into_error()))?
            .sync_all()
            .map_err(ScrubError::Write)?;
    }

    let residual = inspect_temp(&mut temp)?;
    if !residual.is_clean() {
        return Err(ScrubError::ResidualMetadata(residual.exif_fields));
    }

    // Temp files are created 0600; the replacement keeps the original's mode.
    let permissions = fs::metadata(path).map_err(ScrubError::Write)?.permissions();
    fs::set_permissions(temp.path(), permissions).map_err(ScrubError::Write)?;

    temp.persist(path).map_err(|e| ScrubError::Write(e.error))?;
    Ok(())
}

fn inspect_temp(temp: &mut NamedTempFile) -> Result<MetadataInventory, ScrubError> {
    let file: &mut File = temp.as_file_mut();
    file.seek(SeekFrom::Start(0)).map_err(ScrubError::Write)?;
    metadata::inspect(&mut BufReader::new(file))
}
