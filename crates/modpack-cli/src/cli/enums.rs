use clap::ValueEnum;

/// Archive format selectable on the command line
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Format {
    /// tar container compressed with gzip (.tar.gz)
    #[value(name = "tar-gz")]
    TarGz,

    /// zip container with deflate entries (.zip)
    ///
    /// Level 0 stores entries uncompressed.
    #[value(name = "zip")]
    Zip,

    /// zip container with LZMA entries (.lzma.zip)
    ///
    /// The LZMA encoder has no tunable level; --level is recorded but not applied.
    #[value(name = "lzma-zip")]
    LzmaZip,
}
