use modpack_bundler::ArchiveFormat;

use crate::cli::{self, CheckArgs, FilesArgs, PackArgs, ResolveArgs, SnapshotArgs};
use crate::config::{ConfigOverrides, Format};

impl From<cli::Format> for Format {
    fn from(format: cli::Format) -> Self {
        match format {
            cli::Format::TarGz => Format::TarGz,
            cli::Format::Zip => Format::Zip,
            cli::Format::LzmaZip => Format::LzmaZip,
        }
    }
}

impl From<Format> for ArchiveFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::TarGz => ArchiveFormat::TarGz,
            Format::Zip => ArchiveFormat::Zip,
            Format::LzmaZip => ArchiveFormat::LzmaZip,
        }
    }
}

impl From<&PackArgs> for ConfigOverrides {
    fn from(args: &PackArgs) -> Self {
        Self {
            modules_dir: args.modules_dir.clone(),
            out_dir: args.out_dir.clone(),
            format: args.format.map(Into::into),
            level: args.level,
            // `--clean` can only switch cleaning on.
            clean: args.clean.then_some(true),
            jobs: args.jobs,
        }
    }
}

impl From<&SnapshotArgs> for ConfigOverrides {
    fn from(args: &SnapshotArgs) -> Self {
        Self {
            modules_dir: args.modules_dir.clone(),
            out_dir: args.out_dir.clone(),
            ..Self::default()
        }
    }
}

impl From<&ResolveArgs> for ConfigOverrides {
    fn from(args: &ResolveArgs) -> Self {
        Self {
            modules_dir: args.modules_dir.clone(),
            ..Self::default()
        }
    }
}

impl From<&CheckArgs> for ConfigOverrides {
    fn from(args: &CheckArgs) -> Self {
        Self {
            modules_dir: args.modules_dir.clone(),
            ..Self::default()
        }
    }
}

impl From<&FilesArgs> for ConfigOverrides {
    fn from(args: &FilesArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone(),
            format: args.format.map(Into::into),
            level: args.level,
            ..Self::default()
        }
    }
}
