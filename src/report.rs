use std::{
    fmt,
    io::{self, Write},
};

use classdump_class_file::{ClassHeader, CpInfo};

/// Renders decoded headers and failures, prefixing diagnostics with the program name.
pub struct Reporter {
    program: String,
}

impl Reporter {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    pub fn render(
        &self,
        out: &mut impl Write,
        header: &ClassHeader,
        include_pool: bool,
    ) -> io::Result<()> {
        write!(
            out,
            "{}",
            HeaderReport {
                header,
                include_pool
            }
        )
    }

    pub fn failure(&self, out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
        writeln!(out, "{}: {:#}", self.program, err)
    }
}

struct HeaderReport<'a> {
    header: &'a ClassHeader,
    include_pool: bool,
}

impl fmt::Display for HeaderReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header;

        writeln!(f, "magic: {:x}", header.magic)?;
        writeln!(f, "minor_version: {}", header.minor_version)?;
        writeln!(f, "major_version: {}", header.major_version)?;
        writeln!(f, "constant_pool_count: {}", header.constant_pool_count)?;

        if self.include_pool {
            for (index, cp_info) in header.constant_pool.iter() {
                write!(f, "#{} = {}", index, cp_info.kind_name())?;
                write_fields(f, cp_info)?;
                writeln!(f)?;
            }
        }

        write!(f, "access_flags: {:#06x} (", header.access_flags_bits)?;
        write!(f, "{}", header.access_flags().names().join(" "))?;
        writeln!(f, ")")
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, cp_info: &CpInfo) -> fmt::Result {
    match cp_info {
        CpInfo::Utf8(info) => write!(
            f,
            " length={} bytes={:?}",
            info.length(),
            String::from_utf8_lossy(&info.bytes)
        ),
        CpInfo::Integer(info) | CpInfo::Float(info) => write!(
            f,
            " name_index={} bytes={:#010x}",
            info.name_index, info.bytes
        ),
        CpInfo::Long(info) | CpInfo::Double(info) => write!(
            f,
            " name_index={} high_bytes={:#010x} low_bytes={:#010x}",
            info.name_index, info.high_bytes, info.low_bytes
        ),
        CpInfo::Class(info) => write!(f, " name_index={}", info.name_index),
        CpInfo::String(info) => write!(f, " name_index={}", info.name_index),
        CpInfo::FieldRef(info) | CpInfo::MethodRef(info) | CpInfo::InterfaceMethodRef(info) => {
            write!(
                f,
                " class_index={} name_and_type_index={}",
                info.class_index, info.name_and_type_index
            )
        }
        CpInfo::NameAndType(info) => write!(
            f,
            " name_index={} descriptor_index={}",
            info.name_index, info.descriptor_index
        ),
        CpInfo::MethodHandle(info) => write!(
            f,
            " reference_kind={} reference_index={}",
            info.reference_kind, info.reference_index
        ),
        CpInfo::MethodType(info) => write!(f, " descriptor_index={}", info.descriptor_index),
        CpInfo::InvokeDynamic(info) => write!(
            f,
            " bootstrap_method_attr_index={} name_and_type_index={}",
            info.bootstrap_method_attr_index, info.name_and_type_index
        ),
        CpInfo::Unusable => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use anyhow::Context;

    use super::*;

    fn header() -> ClassHeader {
        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x07];
        bytes.extend_from_slice(&[0x07, 0x00, 0x02]);
        bytes.extend_from_slice(&[0x01, 0x00, 0x03, b'F', b'o', b'o']);
        bytes.extend_from_slice(&[0x05, 0x00, 0x00, 0, 0, 0, 1, 0, 0, 0, 2]);
        bytes.extend_from_slice(&[0x0F, 0x06, 0x00, 0x01]);
        bytes.extend_from_slice(&[0x0A, 0x00, 0x01, 0x00, 0x02]);
        bytes.extend_from_slice(&[0x00, 0x31]);

        ClassHeader::parse(Cursor::new(bytes)).unwrap()
    }

    fn render(include_pool: bool) -> String {
        let mut out = Vec::new();
        Reporter::new("classdump".to_string())
            .render(&mut out, &header(), include_pool)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_full_report() {
        let expected = "\
magic: cafebabe
minor_version: 0
major_version: 52
constant_pool_count: 7
#1 = Class name_index=2
#2 = Utf8 length=3 bytes=\"Foo\"
#3 = Long name_index=0 high_bytes=0x00000001 low_bytes=0x00000002
#4 = Unusable
#5 = MethodHandle reference_kind=6 reference_index=1
#6 = Methodref class_index=1 name_and_type_index=2
access_flags: 0x0031 (PUBLIC FINAL SUPER)
";
        assert_eq!(expected, render(true));
    }

    #[test]
    fn test_render_without_pool() {
        let expected = "\
magic: cafebabe
minor_version: 0
major_version: 52
constant_pool_count: 7
access_flags: 0x0031 (PUBLIC FINAL SUPER)
";
        assert_eq!(expected, render(false));
    }

    #[test]
    fn test_failure_names_program_and_step() {
        let bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x02, 0x07];
        let err = ClassHeader::parse(Cursor::new(bytes))
            .context("failed to read class file 'Foo.class'")
            .unwrap_err();

        let mut out = Vec::new();
        Reporter::new("classdump".to_string())
            .failure(&mut out, &err)
            .unwrap();

        assert_eq!(
            "classdump: failed to read class file 'Foo.class': \
             failed to read constant pool element 1 (name_index): \
             end of file after reading only 0 of 2 bytes\n",
            String::from_utf8(out).unwrap()
        );
    }
}
