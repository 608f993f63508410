//! Class file decoding: raw JVM class bytes in, declaration and usage
//! events out.
//!
//! The reader lowers each class to a [`ClassDecl`] value up front; the
//! analysis passes then consume plain data instead of driving a visitor
//! through the file a second time.

pub mod descriptor;
mod reader;

pub use reader::read_class;

/// JVM access flag bits, the subset the detector cares about.
pub mod access {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
}

/// A field or method declaration as it appears in the class file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDecl {
    pub name: String,
    pub descriptor: String,
    pub access: u16,
}

impl MemberDecl {
    pub fn is_static(&self) -> bool {
        self.access & access::STATIC != 0
    }

    pub fn is_public(&self) -> bool {
        self.access & access::PUBLIC != 0
    }

    pub fn is_private(&self) -> bool {
        self.access & access::PRIVATE != 0
    }

    pub fn is_final(&self) -> bool {
        self.access & access::FINAL != 0
    }
}

/// Instruction-level event observed in a method body.
///
/// Only the instructions that can witness a "uses" relationship survive
/// the lowering: static calls and static field accesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageEvent {
    StaticCall {
        owner: String,
        name: String,
        descriptor: String,
    },
    FieldAccess {
        owner: String,
        name: String,
        descriptor: String,
        write: bool,
    },
}

/// One decoded class: identity, declared members and the flattened usage
/// events of all method bodies, in bytecode order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub super_name: String,
    pub fields: Vec<MemberDecl>,
    pub methods: Vec<MemberDecl>,
    pub events: Vec<UsageEvent>,
}

impl ClassDecl {
    /// Enum-derived classes never enter the registry, under any
    /// configuration.
    pub fn is_enum_derived(&self) -> bool {
        self.super_name == "java/lang/Enum"
    }
}
