use exif::{In, Tag};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::error::ScrubError;

/// GPS tags that give away where a picture was taken
const GPS_TAGS: &[Tag] = &[
    Tag::GPSLatitude,
    Tag::GPSLongitude,
    Tag::GPSAltitude,
    Tag::GPSDestLatitude,
    Tag::GPSDestLongitude,
];

/// What EXIF data an image carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataInventory {
    pub exif_fields: usize,
    pub has_gps: bool,
}

impl MetadataInventory {
    pub fn is_clean(&self) -> bool {
        self.exif_fields == 0
    }

    /// Short human description used on the success line
    pub fn describe(&self) -> String {
        match (self.exif_fields, self.has_gps) {
            (0, _) => "no EXIF found".to_string(),
            (n, true) => format!("{} EXIF fields, including GPS location", n),
            (n, false) => format!("{} EXIF fields", n),
        }
    }
}

/// Inventory the EXIF data of a file on disk
pub fn inspect_file(path: &Path) -> Result<MetadataInventory, ScrubError> {
    let file = File::open(path).map_err(|source| ScrubError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    inspect(&mut BufReader::new(file))
}

/// Inventory the EXIF data of any JPEG/PNG/TIFF/WebP/HEIF container.
///
/// A missing or malformed EXIF block counts as no metadata: there is no tag
/// table a reader could recover from it.
pub fn inspect<R: BufRead + Seek>(reader: &mut R) -> Result<MetadataInventory, ScrubError> {
    match exif::Reader::new().read_from_container(reader) {
        Ok(exif) => {
            let has_gps = GPS_TAGS
                .iter()
                .any(|tag| exif.get_field(*tag, In::PRIMARY).is_some());
            Ok(MetadataInventory {
                exif_fields: exif.fields().count(),
                has_gps,
            })
        }
        Err(exif::Error::NotFound(_))
        | Err(exif::Error::BlankValue(_))
        | Err(exif::Error::InvalidFormat(_)) => Ok(MetadataInventory::default()),
        Err(e) => Err(ScrubError::Exif(e.to_string())),
    }
}
