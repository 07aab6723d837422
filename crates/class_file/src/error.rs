use std::fmt;

use thiserror::Error;

/// Failure of a single exact-length read.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("end of file after reading only {obtained} of {requested} bytes")]
    UnexpectedEof { obtained: usize, requested: usize },
    #[error("failed to allocate {0} bytes")]
    AllocationFailure(usize),
    #[error("destination holds {capacity} bytes but {requested} were requested")]
    InvalidArgument { capacity: usize, requested: usize },
}

/// The point in the header walk at which a read was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Magic,
    MinorVersion,
    MajorVersion,
    ConstantPoolCount,
    ConstantPoolElement { index: u16, field: &'static str },
    AccessFlags,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Magic => write!(f, "magic"),
            Step::MinorVersion => write!(f, "minor_version"),
            Step::MajorVersion => write!(f, "major_version"),
            Step::ConstantPoolCount => write!(f, "constant_pool_count"),
            Step::ConstantPoolElement { index, field } => {
                write!(f, "constant pool element {} ({})", index, field)
            }
            Step::AccessFlags => write!(f, "access_flags"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClassFileError {
    #[error("failed to read {step}")]
    Read {
        step: Step,
        #[source]
        source: ReadError,
    },
    #[error("Invalid cp info tag {tag} for constant pool element {index}")]
    InvalidCpInfoTag { tag: u8, index: u16 },
    #[error("Invalid magic identifier: 0x{0:X}")]
    InvalidMagicIdentifier(u32),
    #[error("constant pool element {index} is 8 bytes wide but occupies the last slot")]
    MisplacedWideConstant { index: u16 },
}

/// Flat view over [`ClassFileError`] for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IoError,
    UnexpectedEof,
    UnknownTag,
    AllocationFailure,
    InvalidArgument,
    BadMagic,
    MisplacedWideConstant,
}

impl ClassFileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassFileError::Read { source, .. } => match source {
                ReadError::IOError(_) => ErrorKind::IoError,
                ReadError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
                ReadError::AllocationFailure(_) => ErrorKind::AllocationFailure,
                ReadError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            },
            ClassFileError::InvalidCpInfoTag { .. } => ErrorKind::UnknownTag,
            ClassFileError::InvalidMagicIdentifier(_) => ErrorKind::BadMagic,
            ClassFileError::MisplacedWideConstant { .. } => ErrorKind::MisplacedWideConstant,
        }
    }

    /// The step that failed, if the failure came from a read.
    pub fn step(&self) -> Option<Step> {
        match self {
            ClassFileError::Read { step, .. } => Some(*step),
            ClassFileError::InvalidCpInfoTag { index, .. } => Some(Step::ConstantPoolElement {
                index: *index,
                field: "tag",
            }),
            ClassFileError::InvalidMagicIdentifier(_) => Some(Step::Magic),
            ClassFileError::MisplacedWideConstant { .. } => None,
        }
    }
}
