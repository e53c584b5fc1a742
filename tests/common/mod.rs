#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// TIFF-structured EXIF block with camera and GPS tags
pub fn gps_exif_block() -> Vec<u8> {
    let make = Field {
        tag: Tag::Make,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![b"TestCam".to_vec()]),
    };
    let lat_ref = Field {
        tag: Tag::GPSLatitudeRef,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![b"N".to_vec()]),
    };
    let lat = Field {
        tag: Tag::GPSLatitude,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational { num: 51, denom: 1 },
            Rational { num: 30, denom: 1 },
            Rational { num: 26, denom: 1 },
        ]),
    };
    let lon_ref = Field {
        tag: Tag::GPSLongitudeRef,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![b"W".to_vec()]),
    };
    let lon = Field {
        tag: Tag::GPSLongitude,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational { num: 0, denom: 1 },
            Rational { num: 7, denom: 1 },
            Rational { num: 39, denom: 1 },
        ]),
    };

    let mut writer = Writer::new();
    writer.push_field(&make);
    writer.push_field(&lat_ref);
    writer.push_field(&lat);
    writer.push_field(&lon_ref);
    writer.push_field(&lon);

    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

pub fn sample_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
    })
}

/// Markers carried in the non-EXIF metadata fixtures
pub const XMP_TOKEN: &[u8] = b"xmp-secret-location";
pub const IPTC_TOKEN: &[u8] = b"iptc-secret-city";
pub const COMMENT_TOKEN: &[u8] = b"com-secret-note";
pub const ITXT_TOKEN: &str = "itxt-secret-owner";

pub fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut jpeg = Vec::new();
    DynamicImage::ImageRgb8(sample_rgb(width, height))
        .write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, 90))
        .unwrap();
    jpeg
}

/// Insert marker segments right after SOI
pub fn splice_segments(jpeg: &[u8], segments: &[(u8, Vec<u8>)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(jpeg.len() + 1024);
    out.extend_from_slice(&jpeg[..2]);
    for (marker, payload) in segments {
        let segment_len = u16::try_from(2 + payload.len()).unwrap();
        out.extend_from_slice(&[0xFF, *marker]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(payload);
    }
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Write a JPEG carrying an APP1 EXIF segment with GPS coordinates
pub fn write_jpeg_with_gps(path: &Path, width: u32, height: u32) {
    let mut app1 = b"Exif\0\0".to_vec();
    app1.extend_from_slice(&gps_exif_block());

    let out = splice_segments(&encode_jpeg(width, height), &[(0xE1, app1)]);
    fs::write(path, out).unwrap();
}

/// Write a JPEG with XMP (APP1), Photoshop IPTC (APP13) and COM segments
pub fn write_jpeg_with_xmp_iptc_comment(path: &Path, width: u32, height: u32) {
    let mut xmp = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    xmp.extend_from_slice(b"<x:xmpmeta xmlns:x=\"adobe:ns:meta/\"><rdf:RDF>");
    xmp.extend_from_slice(b"<rdf:Description exif:GPSLatitude=\"");
    xmp.extend_from_slice(XMP_TOKEN);
    xmp.extend_from_slice(b"\"/></rdf:RDF></x:xmpmeta>");

    // IPTC dataset 2:90 (City) inside an 8BIM resource 0x0404
    let mut iptc = vec![0x1C, 0x02, 0x5A];
    iptc.extend_from_slice(&u16::try_from(IPTC_TOKEN.len()).unwrap().to_be_bytes());
    iptc.extend_from_slice(IPTC_TOKEN);
    if iptc.len() % 2 == 1 {
        iptc.push(0);
    }
    let mut app13 = b"Photoshop 3.0\0".to_vec();
    app13.extend_from_slice(b"8BIM");
    app13.extend_from_slice(&[0x04, 0x04, 0x00, 0x00]);
    app13.extend_from_slice(&u32::try_from(iptc.len()).unwrap().to_be_bytes());
    app13.extend_from_slice(&iptc);

    let out = splice_segments(
        &encode_jpeg(width, height),
        &[(0xE1, xmp), (0xED, app13), (0xFE, COMMENT_TOKEN.to_vec())],
    );
    fs::write(path, out).unwrap();
}

pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Write an RGBA PNG with tEXt, zTXt and iTXt chunks
pub fn write_png_with_text(path: &Path, width: u32, height: u32) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
        .add_text_chunk("Comment".to_string(), "taken at 51.5074N 0.1278W".to_string())
        .unwrap();
    encoder
        .add_ztxt_chunk("Location".to_string(), "51.5074N 0.1278W".to_string())
        .unwrap();
    encoder
        .add_itxt_chunk("Author".to_string(), ITXT_TOKEN.to_string())
        .unwrap();

    let data: Vec<u8> = (0..width * height)
        .flat_map(|i| [(i % 256) as u8, (i / 7 % 256) as u8, 42, 255])
        .collect();

    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&data).unwrap();
    writer.finish().unwrap();
}

/// Number of tEXt, zTXt and iTXt chunks a PNG carries
pub fn png_text_chunks(path: &Path) -> usize {
    let decoder = png::Decoder::new(BufReader::new(File::open(path).unwrap()));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    info.uncompressed_latin1_text.len()
        + info.compressed_latin1_text.len()
        + info.utf8_text.len()
}

pub fn has_gps(path: &Path) -> bool {
    let mut reader = BufReader::new(File::open(path).unwrap());
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif.get_field(Tag::GPSLatitude, In::PRIMARY).is_some(),
        Err(_) => false,
    }
}

pub fn exif_field_count(path: &Path) -> usize {
    let mut reader = BufReader::new(File::open(path).unwrap());
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif.fields().count(),
        Err(_) => 0,
    }
}
