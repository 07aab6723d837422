use std::io::Read;

use crate::{parser::Parser, AccessFlags, ConstantPool, Result};

pub const MAGIC: u32 = 0xCAFEBABE;

/// The fixed preamble of a class file, its constant pool and the class access flags.
#[derive(Debug, PartialEq, Clone)]
pub struct ClassHeader {
    pub magic: u32,
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool_count: u16,
    pub constant_pool: ConstantPool,
    /// Raw bitmask as read, including bits outside [`AccessFlags`].
    pub access_flags_bits: u16,
}
impl ClassHeader {
    pub fn parse(bytes: impl Read) -> Result<ClassHeader> {
        Parser::new(bytes).parse()
    }

    pub fn access_flags(&self) -> AccessFlags {
        AccessFlags::from_bits_truncate(self.access_flags_bits)
    }

    pub fn is_public(&self) -> bool {
        self.access_flags().contains(AccessFlags::PUBLIC)
    }

    pub fn is_final(&self) -> bool {
        self.access_flags().contains(AccessFlags::FINAL)
    }

    pub fn is_super(&self) -> bool {
        self.access_flags().contains(AccessFlags::SUPER)
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags().contains(AccessFlags::INTERFACE)
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags().contains(AccessFlags::ABSTRACT)
    }

    pub fn is_synthetic(&self) -> bool {
        self.access_flags().contains(AccessFlags::SYNTHETIC)
    }

    pub fn is_annotation(&self) -> bool {
        self.access_flags().contains(AccessFlags::ANNOTATION)
    }

    pub fn is_enum(&self) -> bool {
        self.access_flags().contains(AccessFlags::ENUM)
    }
}
