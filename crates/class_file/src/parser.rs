use std::io::{BufReader, Read};

use log::{debug, trace, warn};

use crate::{
    constant_pool::{self, CpInfo},
    error::{ReadError, Step},
    reader::ExactReader,
    AccessFlags, ClassFileError, ClassHeader, ConstantPool, Result, MAGIC,
};

/// Walks a class file from offset 0 through the class access flags.
///
/// Each step runs only if the previous one succeeded; the first failure ends the walk and
/// everything decoded so far is dropped.
pub struct Parser<R> {
    r: ExactReader<BufReader<R>>,
}
impl<R: Read> Parser<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: ExactReader::new(BufReader::new(r)),
        }
    }

    pub fn parse(mut self) -> Result<ClassHeader> {
        let magic = self.parse_magic_identifier()?;

        let minor_version = self.read_u16(Step::MinorVersion)?;
        debug!("got {} as the minor version", minor_version);

        let major_version = self.read_u16(Step::MajorVersion)?;
        debug!("got {} as the major version", major_version);

        let constant_pool_count = self.read_u16(Step::ConstantPoolCount)?;
        debug!("constant pool has {} entries listed", constant_pool_count);

        let constant_pool = self.parse_constant_pool(constant_pool_count)?;
        debug!(
            "parsed constant pool with {} slots, now at offset {}",
            constant_pool.len(),
            self.r.position()
        );

        let access_flags_bits = self.read_u16(Step::AccessFlags)?;
        debug!("got access flags {:#06x}", access_flags_bits);
        if AccessFlags::from_bits(access_flags_bits).is_none() {
            warn!("unrecognised access flag bits {:#06x}", access_flags_bits);
        }

        Ok(ClassHeader {
            magic,
            minor_version,
            major_version,
            constant_pool_count,
            constant_pool,
            access_flags_bits,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<u32> {
        match self.read_u32(Step::Magic)? {
            MAGIC => Ok(MAGIC),
            magic_identifier => Err(ClassFileError::InvalidMagicIdentifier(magic_identifier)),
        }
    }

    fn parse_constant_pool(&mut self, constant_pool_count: u16) -> Result<ConstantPool> {
        // Slot 0 is never written; a count of 0 or 1 means an empty pool.
        let slots = constant_pool_count.saturating_sub(1);

        let mut res = Vec::new();
        res.try_reserve_exact(slots as usize)
            .map_err(|_| ClassFileError::Read {
                step: Step::ConstantPoolCount,
                source: ReadError::AllocationFailure(
                    slots as usize * std::mem::size_of::<CpInfo>(),
                ),
            })?;

        let mut index: u16 = 1;
        while index <= slots {
            let cp_info = self.parse_cp_info(index)?;

            if cp_info.is_wide() {
                if index == slots {
                    return Err(ClassFileError::MisplacedWideConstant { index });
                }
                res.push(cp_info);
                res.push(CpInfo::Unusable);
                index += 2;
            } else {
                res.push(cp_info);
                index += 1;
            }
        }

        Ok(ConstantPool::new(res))
    }

    fn parse_cp_info(&mut self, index: u16) -> Result<CpInfo> {
        let tag = self.read_u8(element(index, "tag"))?;
        trace!("constant pool element {} has tag {}", index, tag);

        let cp_info = match tag {
            constant_pool::CONSTANT_UTF8 => CpInfo::Utf8(self.parse_utf8(index)?),
            constant_pool::CONSTANT_INTEGER => CpInfo::Integer(self.parse_number(index)?),
            constant_pool::CONSTANT_FLOAT => CpInfo::Float(self.parse_number(index)?),
            constant_pool::CONSTANT_LONG => CpInfo::Long(self.parse_wide_number(index)?),
            constant_pool::CONSTANT_DOUBLE => CpInfo::Double(self.parse_wide_number(index)?),
            constant_pool::CONSTANT_CLASS => CpInfo::Class(self.parse_class_info(index)?),
            constant_pool::CONSTANT_STRING => CpInfo::String(self.parse_string(index)?),
            constant_pool::CONSTANT_FIELDREF => CpInfo::FieldRef(self.parse_ref_info(index)?),
            constant_pool::CONSTANT_METHODREF => CpInfo::MethodRef(self.parse_ref_info(index)?),
            constant_pool::CONSTANT_INTERFACE_METHODREF => {
                CpInfo::InterfaceMethodRef(self.parse_ref_info(index)?)
            }
            constant_pool::CONSTANT_NAME_AND_TYPE => {
                CpInfo::NameAndType(self.parse_name_and_type_info(index)?)
            }
            constant_pool::CONSTANT_METHOD_HANDLE => {
                CpInfo::MethodHandle(self.parse_method_handle(index)?)
            }
            constant_pool::CONSTANT_METHOD_TYPE => {
                CpInfo::MethodType(self.parse_method_type_info(index)?)
            }
            constant_pool::CONSTANT_INVOKE_DYNAMIC => {
                CpInfo::InvokeDynamic(self.parse_invoke_dynamic_info(index)?)
            }
            _ => return Err(ClassFileError::InvalidCpInfoTag { tag, index }),
        };

        trace!("constant pool element {} is {:?}", index, cp_info);
        Ok(cp_info)
    }

    fn parse_utf8(&mut self, index: u16) -> Result<constant_pool::Utf8Info> {
        let length = self.read_u16(element(index, "length"))?;
        let bytes = self
            .r
            .read_bytes(length as usize)
            .map_err(|source| ClassFileError::Read {
                step: element(index, "bytes"),
                source,
            })?;

        Ok(constant_pool::Utf8Info { bytes })
    }

    fn parse_number(&mut self, index: u16) -> Result<constant_pool::NumberInfo> {
        let name_index = self.read_u16(element(index, "name_index"))?;
        let bytes = self.read_u32(element(index, "bytes"))?;

        Ok(constant_pool::NumberInfo { name_index, bytes })
    }

    fn parse_wide_number(&mut self, index: u16) -> Result<constant_pool::WideNumberInfo> {
        let name_index = self.read_u16(element(index, "name_index"))?;
        let high_bytes = self.read_u32(element(index, "high_bytes"))?;
        let low_bytes = self.read_u32(element(index, "low_bytes"))?;

        Ok(constant_pool::WideNumberInfo {
            name_index,
            high_bytes,
            low_bytes,
        })
    }

    fn parse_class_info(&mut self, index: u16) -> Result<constant_pool::ClassInfo> {
        let name_index = self.read_u16(element(index, "name_index"))?;

        Ok(constant_pool::ClassInfo { name_index })
    }

    fn parse_string(&mut self, index: u16) -> Result<constant_pool::StringInfo> {
        let name_index = self.read_u16(element(index, "name_index"))?;

        Ok(constant_pool::StringInfo { name_index })
    }

    fn parse_ref_info(&mut self, index: u16) -> Result<constant_pool::RefInfo> {
        let class_index = self.read_u16(element(index, "class_index"))?;
        let name_and_type_index = self.read_u16(element(index, "name_and_type_index"))?;

        Ok(constant_pool::RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_name_and_type_info(&mut self, index: u16) -> Result<constant_pool::NameAndTypeInfo> {
        let name_index = self.read_u16(element(index, "name_index"))?;
        let descriptor_index = self.read_u16(element(index, "descriptor_index"))?;

        Ok(constant_pool::NameAndTypeInfo {
            name_index,
            descriptor_index,
        })
    }

    fn parse_method_handle(&mut self, index: u16) -> Result<constant_pool::MethodHandleInfo> {
        let reference_kind = self.read_u8(element(index, "reference_kind"))?;
        let reference_index = self.read_u16(element(index, "reference_index"))?;

        Ok(constant_pool::MethodHandleInfo {
            reference_kind,
            reference_index,
        })
    }

    fn parse_method_type_info(&mut self, index: u16) -> Result<constant_pool::MethodTypeInfo> {
        let descriptor_index = self.read_u16(element(index, "descriptor_index"))?;

        Ok(constant_pool::MethodTypeInfo { descriptor_index })
    }

    fn parse_invoke_dynamic_info(
        &mut self,
        index: u16,
    ) -> Result<constant_pool::InvokeDynamicInfo> {
        let bootstrap_method_attr_index =
            self.read_u16(element(index, "bootstrap_method_attr_index"))?;
        let name_and_type_index = self.read_u16(element(index, "name_and_type_index"))?;

        Ok(constant_pool::InvokeDynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        })
    }

    fn read_u32(&mut self, step: Step) -> Result<u32> {
        self.r
            .read_u32()
            .map_err(|source| ClassFileError::Read { step, source })
    }

    fn read_u16(&mut self, step: Step) -> Result<u16> {
        self.r
            .read_u16()
            .map_err(|source| ClassFileError::Read { step, source })
    }

    fn read_u8(&mut self, step: Step) -> Result<u8> {
        self.r
            .read_u8()
            .map_err(|source| ClassFileError::Read { step, source })
    }
}

fn element(index: u16, field: &'static str) -> Step {
    Step::ConstantPoolElement { index, field }
}
