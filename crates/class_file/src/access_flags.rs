use bitflags::bitflags;

bitflags! {
    /// Class-level access and property modifiers. Each bit is independent.
    pub struct AccessFlags: u16 {
        /// Declared public; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Declared final; no subclasses allowed.
        const FINAL = 0x0010;
        /// Treat superclass methods specially when invoked by invokespecial.
        const SUPER = 0x0020;
        /// Is an interface, not a class.
        const INTERFACE = 0x0200;
        /// Declared abstract; must not be instantiated.
        const ABSTRACT = 0x0400;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation type.
        const ANNOTATION = 0x2000;
        /// Declared as an enum type.
        const ENUM = 0x4000;
    }
}

impl AccessFlags {
    /// Names of the set flags, lowest bit first.
    pub fn names(&self) -> Vec<&'static str> {
        [
            (AccessFlags::PUBLIC, "PUBLIC"),
            (AccessFlags::FINAL, "FINAL"),
            (AccessFlags::SUPER, "SUPER"),
            (AccessFlags::INTERFACE, "INTERFACE"),
            (AccessFlags::ABSTRACT, "ABSTRACT"),
            (AccessFlags::SYNTHETIC, "SYNTHETIC"),
            (AccessFlags::ANNOTATION, "ANNOTATION"),
            (AccessFlags::ENUM, "ENUM"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}
