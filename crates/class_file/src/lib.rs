// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

mod access_flags;
mod class_header;
pub mod constant_pool;
mod error;
mod parser;
pub mod reader;
pub mod scalar;

pub use access_flags::AccessFlags;
pub use class_header::{ClassHeader, MAGIC};
pub use constant_pool::{ConstantPool, CpInfo};
pub use error::{ClassFileError, ErrorKind, ReadError, Step};
pub use parser::Parser;

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;
