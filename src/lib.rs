//! Strip embedded metadata (EXIF, IPTC, XMP) from a site's images before
//! they are published.
//!
//! [`finder`] collects JPEG and PNG files under a set of directories,
//! [`scrubber`] rewrites one file with pixel data only, and [`processor`]
//! runs the batch and turns the outcome into an exit status.

pub mod args;
pub mod error;
pub mod finder;
pub mod metadata;
pub mod processor;
pub mod scrubber;

pub use error::ScrubError;
pub use processor::{Processor, RunSummary};
pub use scrubber::{scrub_image, ScrubReport};
