use std::ops::Index;

pub const CONSTANT_UTF8: u8 = 1;
pub const CONSTANT_INTEGER: u8 = 3;
pub const CONSTANT_FLOAT: u8 = 4;
pub const CONSTANT_LONG: u8 = 5;
pub const CONSTANT_DOUBLE: u8 = 6;
pub const CONSTANT_CLASS: u8 = 7;
pub const CONSTANT_STRING: u8 = 8;
pub const CONSTANT_FIELDREF: u8 = 9;
pub const CONSTANT_METHODREF: u8 = 10;
pub const CONSTANT_INTERFACE_METHODREF: u8 = 11;
pub const CONSTANT_NAME_AND_TYPE: u8 = 12;
pub const CONSTANT_METHOD_HANDLE: u8 = 15;
pub const CONSTANT_METHOD_TYPE: u8 = 16;
pub const CONSTANT_INVOKE_DYNAMIC: u8 = 18;

/// The decoded constant pool, indexed from 1 like the class file itself.
///
/// Holds exactly `constant_pool_count - 1` slots. The slot following a `Long` or `Double`
/// is [`CpInfo::Unusable`].
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    pub fn get(&self, index: u16) -> Option<&CpInfo> {
        if index == 0 {
            return None;
        }
        self.cp_infos.get(index as usize - 1)
    }

    /// Slots paired with their 1-based pool index, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &CpInfo)> {
        self.cp_infos
            .iter()
            .enumerate()
            .map(|(i, cp_info)| (i as u16 + 1, cp_info))
    }
}
impl Index<u16> for ConstantPool {
    type Output = CpInfo;

    fn index(&self, index: u16) -> &Self::Output {
        &self.cp_infos[index as usize - 1]
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum CpInfo {
    Utf8(Utf8Info),
    Integer(NumberInfo),
    Float(NumberInfo),
    Long(WideNumberInfo),
    Double(WideNumberInfo),
    Class(ClassInfo),
    String(StringInfo),
    FieldRef(RefInfo),
    MethodRef(RefInfo),
    InterfaceMethodRef(RefInfo),
    NameAndType(NameAndTypeInfo),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    InvokeDynamic(InvokeDynamicInfo),
    /// Second slot of an 8-byte constant. Never present in the input.
    Unusable,
}

impl CpInfo {
    /// The tag byte this entry was decoded from; `None` for [`CpInfo::Unusable`].
    pub fn tag(&self) -> Option<u8> {
        let tag = match self {
            CpInfo::Utf8(_) => CONSTANT_UTF8,
            CpInfo::Integer(_) => CONSTANT_INTEGER,
            CpInfo::Float(_) => CONSTANT_FLOAT,
            CpInfo::Long(_) => CONSTANT_LONG,
            CpInfo::Double(_) => CONSTANT_DOUBLE,
            CpInfo::Class(_) => CONSTANT_CLASS,
            CpInfo::String(_) => CONSTANT_STRING,
            CpInfo::FieldRef(_) => CONSTANT_FIELDREF,
            CpInfo::MethodRef(_) => CONSTANT_METHODREF,
            CpInfo::InterfaceMethodRef(_) => CONSTANT_INTERFACE_METHODREF,
            CpInfo::NameAndType(_) => CONSTANT_NAME_AND_TYPE,
            CpInfo::MethodHandle(_) => CONSTANT_METHOD_HANDLE,
            CpInfo::MethodType(_) => CONSTANT_METHOD_TYPE,
            CpInfo::InvokeDynamic(_) => CONSTANT_INVOKE_DYNAMIC,
            CpInfo::Unusable => return None,
        };
        Some(tag)
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::Integer(_) => "Integer",
            CpInfo::Float(_) => "Float",
            CpInfo::Long(_) => "Long",
            CpInfo::Double(_) => "Double",
            CpInfo::Class(_) => "Class",
            CpInfo::String(_) => "String",
            CpInfo::FieldRef(_) => "Fieldref",
            CpInfo::MethodRef(_) => "Methodref",
            CpInfo::InterfaceMethodRef(_) => "InterfaceMethodref",
            CpInfo::NameAndType(_) => "NameAndType",
            CpInfo::MethodHandle(_) => "MethodHandle",
            CpInfo::MethodType(_) => "MethodType",
            CpInfo::InvokeDynamic(_) => "InvokeDynamic",
            CpInfo::Unusable => "Unusable",
        }
    }

    /// Whether this entry takes up two pool slots.
    pub fn is_wide(&self) -> bool {
        matches!(self, CpInfo::Long(_) | CpInfo::Double(_))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Utf8Info {
    /// Raw payload. Not validated or decoded as modified UTF-8.
    pub bytes: Vec<u8>,
}
impl Utf8Info {
    pub fn length(&self) -> u16 {
        self.bytes.len() as u16
    }
}

// Integer and Float
#[derive(Debug, PartialEq, Clone)]
pub struct NumberInfo {
    pub name_index: u16,
    pub bytes: u32,
}

// Long and Double
#[derive(Debug, PartialEq, Clone)]
pub struct WideNumberInfo {
    pub name_index: u16,
    pub high_bytes: u32,
    pub low_bytes: u32,
}
impl WideNumberInfo {
    pub fn bits(&self) -> u64 {
        ((self.high_bytes as u64) << 32) | self.low_bytes as u64
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct ClassInfo {
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct StringInfo {
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct InvokeDynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}
