use bitflags::bitflags;

bitflags! {
    /// Declaration modifiers, reserved and contextual.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const INTERNAL = 1 << 3;
        const STATIC = 1 << 4;
        const ABSTRACT = 1 << 5;
        const SEALED = 1 << 6;
        const VIRTUAL = 1 << 7;
        const OVERRIDE = 1 << 8;
        const READONLY = 1 << 9;
        const CONST = 1 << 10;
        const EXTERN = 1 << 11;
        const UNSAFE = 1 << 12;
        const VOLATILE = 1 << 13;
        const NEW = 1 << 14;
        const PARTIAL = 1 << 15;
        const ASYNC = 1 << 16;
        const REQUIRED = 1 << 17;
        const FILE = 1 << 18;
        const REF = 1 << 19;
        const FIXED = 1 << 20;

        const ACCESSIBILITY = Self::PUBLIC.bits()
            | Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::INTERNAL.bits();
    }
}

impl ModifierFlags {
    /// Flag for a modifier keyword, or empty for unknown text.
    pub fn from_keyword(text: &str) -> ModifierFlags {
        match text {
            "public" => ModifierFlags::PUBLIC,
            "private" => ModifierFlags::PRIVATE,
            "protected" => ModifierFlags::PROTECTED,
            "internal" => ModifierFlags::INTERNAL,
            "static" => ModifierFlags::STATIC,
            "abstract" => ModifierFlags::ABSTRACT,
            "sealed" => ModifierFlags::SEALED,
            "virtual" => ModifierFlags::VIRTUAL,
            "override" => ModifierFlags::OVERRIDE,
            "readonly" => ModifierFlags::READONLY,
            "const" => ModifierFlags::CONST,
            "extern" => ModifierFlags::EXTERN,
            "unsafe" => ModifierFlags::UNSAFE,
            "volatile" => ModifierFlags::VOLATILE,
            "new" => ModifierFlags::NEW,
            "partial" => ModifierFlags::PARTIAL,
            "async" => ModifierFlags::ASYNC,
            "required" => ModifierFlags::REQUIRED,
            "file" => ModifierFlags::FILE,
            "ref" => ModifierFlags::REF,
            "fixed" => ModifierFlags::FIXED,
            _ => ModifierFlags::empty(),
        }
    }

    /// Combined flags for a modifier list as written.
    pub fn from_modifiers<S: AsRef<str>>(modifiers: &[S]) -> ModifierFlags {
        modifiers
            .iter()
            .fold(ModifierFlags::empty(), |flags, m| {
                flags | ModifierFlags::from_keyword(m.as_ref())
            })
    }

    /// Whether code elsewhere in the same project can see a member with these modifiers.
    ///
    /// `default_public` is true for interface members, which are public unless stated.
    pub fn is_project_accessible(self, default_public: bool) -> bool {
        let access = self & ModifierFlags::ACCESSIBILITY;
        if access.is_empty() {
            return default_public;
        }
        if access.contains(ModifierFlags::PUBLIC) || access.contains(ModifierFlags::INTERNAL) {
            // `protected internal` is visible project-wide; `private protected` is not.
            return !access.contains(ModifierFlags::PRIVATE);
        }
        false
    }
}
