//! Format registry.
//!
//! Every format-specific fact (extension, tool invocations) lives in this
//! module. The rest of the crate asks [`Format`] instead of spelling out tool
//! names itself.

use std::fmt;
use std::str::FromStr;

/// Compression formats known to comptype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    /// Detection failed; the sniffing tool did not run or exited nonzero.
    Undefined,
    /// Uncompressed data.
    #[default]
    Plain,
    /// GZIP compressed file (.gz).
    Gzip,
    /// Bzip2 compressed file (.bz2).
    Bzip2,
    /// XZ compressed file (.xz).
    Xz,
    /// Single-member ZIP archive (.zip).
    Zip,
}

impl Format {
    /// All formats, `Undefined` included.
    pub const ALL: [Format; 6] = [
        Self::Undefined,
        Self::Plain,
        Self::Gzip,
        Self::Bzip2,
        Self::Xz,
        Self::Zip,
    ];

    /// Normalize a lowercase format name.
    ///
    /// Total: anything that is not `gzip`, `bzip2`, `xz` or `zip`
    /// (including the empty string) is [`Format::Plain`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "gzip" => Self::Gzip,
            "bzip2" => Self::Bzip2,
            "xz" => Self::Xz,
            "zip" => Self::Zip,
            _ => Self::Plain,
        }
    }

    /// Canonical name, the inverse of [`Format::from_name`] for the
    /// compressed formats.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Plain => "plain",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zip => "zip",
        }
    }

    /// Get the file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Bzip2 => "bz2",
            Self::Xz => "xz",
            Self::Zip => "zip",
            Self::Plain | Self::Undefined => "",
        }
    }

    /// Command template that compresses a file into this format.
    ///
    /// The file to compress is appended as the last argument. For
    /// [`Format::Zip`] the output archive must be appended first.
    pub fn compress_cmd(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip -f",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zip => "zip -j",
            Self::Plain | Self::Undefined => "",
        }
    }

    /// Command template that decompresses a file of this format.
    ///
    /// For [`Format::Zip`] the output directory must be appended before the
    /// archive path.
    pub fn decompress_cmd(&self) -> &'static str {
        match self {
            Self::Gzip => "gunzip",
            Self::Bzip2 => "bunzip2",
            Self::Xz => "unxz",
            Self::Zip => "unzip -d",
            Self::Plain | Self::Undefined => "",
        }
    }

    /// Command template that prints one archive member name per line.
    ///
    /// Only archive formats have one.
    pub fn list_cmd(&self) -> Option<&'static str> {
        match self {
            Self::Zip => Some("zipinfo -1"),
            _ => None,
        }
    }

    /// Text the listing tool prints, while exiting nonzero, for an archive
    /// with no members.
    pub fn empty_listing_marker(&self) -> Option<&'static str> {
        match self {
            Self::Zip => Some("Empty zipfile"),
            _ => None,
        }
    }

    /// Whether this format is a container that names its members.
    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Zip)
    }

    /// Whether this format compresses a single file in place.
    pub fn is_compression_only(&self) -> bool {
        matches!(self, Self::Gzip | Self::Bzip2 | Self::Xz)
    }

    /// Whether this format has tools behind it.
    ///
    /// `Undefined` answers `false`, so a file whose detection failed is
    /// never decompressed and is converted as if it were plain.
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::Plain | Self::Undefined)
    }
}

impl From<&str> for Format {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl FromStr for Format {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "Undefined"),
            Self::Plain => write!(f, "Plain"),
            Self::Gzip => write!(f, "GZIP"),
            Self::Bzip2 => write!(f, "Bzip2"),
            Self::Xz => write!(f, "XZ"),
            Self::Zip => write!(f, "ZIP"),
        }
    }
}
