//! Hand-rolled class file assembler for tests.
//!
//! Emits just enough of the format for the decoder: a constant pool,
//! field and method tables, and per-method `Code` attributes. Indices are
//! deduplicated so repeated references resolve to one pool entry.

#![allow(dead_code)]

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;

const TAG_UTF8: u8 = 1;
const TAG_CLASS: u8 = 7;
const TAG_FIELDREF: u8 = 9;
const TAG_METHODREF: u8 = 10;
const TAG_NAME_AND_TYPE: u8 = 12;

pub struct ClassFile {
    pool: Vec<Vec<u8>>,
    this_class: u16,
    super_class: u16,
    code_attr_name: u16,
    fields: Vec<(u16, u16, u16)>,
    methods: Vec<(u16, u16, u16, Vec<u8>)>,
}

impl ClassFile {
    pub fn new(name: &str, super_name: &str) -> Self {
        let mut cf = Self {
            pool: Vec::new(),
            this_class: 0,
            super_class: 0,
            code_attr_name: 0,
            fields: Vec::new(),
            methods: Vec::new(),
        };
        cf.this_class = cf.class(name);
        cf.super_class = cf.class(super_name);
        cf.code_attr_name = cf.utf8("Code");
        cf
    }

    pub fn add_field(&mut self, access: u16, name: &str, descriptor: &str) -> &mut Self {
        let name_idx = self.utf8(name);
        let desc_idx = self.utf8(descriptor);
        self.fields.push((access, name_idx, desc_idx));
        self
    }

    /// Add a method whose `Code` attribute holds exactly `code`.
    pub fn add_method(&mut self, access: u16, name: &str, descriptor: &str, code: &[u8]) -> &mut Self {
        let name_idx = self.utf8(name);
        let desc_idx = self.utf8(descriptor);
        self.methods.push((access, name_idx, desc_idx, code.to_vec()));
        self
    }

    /// Pool index of a field reference, for building `getstatic`/`putstatic`.
    pub fn field_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(TAG_FIELDREF, owner, name, descriptor)
    }

    /// Pool index of a method reference, for building `invokestatic`.
    pub fn method_ref(&mut self, owner: &str, name: &str, descriptor: &str) -> u16 {
        self.member_ref(TAG_METHODREF, owner, name, descriptor)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // minor
        out.extend_from_slice(&52u16.to_be_bytes()); // major (Java 8)

        out.extend_from_slice(&((self.pool.len() as u16) + 1).to_be_bytes());
        for entry in &self.pool {
            out.extend_from_slice(entry);
        }

        out.extend_from_slice(&0x0021u16.to_be_bytes()); // ACC_PUBLIC | ACC_SUPER
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // interfaces

        out.extend_from_slice(&(self.fields.len() as u16).to_be_bytes());
        for (access, name_idx, desc_idx) in &self.fields {
            out.extend_from_slice(&access.to_be_bytes());
            out.extend_from_slice(&name_idx.to_be_bytes());
            out.extend_from_slice(&desc_idx.to_be_bytes());
            out.extend_from_slice(&0u16.to_be_bytes()); // attributes
        }

        out.extend_from_slice(&(self.methods.len() as u16).to_be_bytes());
        for (access, name_idx, desc_idx, code) in &self.methods {
            out.extend_from_slice(&access.to_be_bytes());
            out.extend_from_slice(&name_idx.to_be_bytes());
            out.extend_from_slice(&desc_idx.to_be_bytes());
            out.extend_from_slice(&1u16.to_be_bytes()); // one attribute: Code
            out.extend_from_slice(&self.code_attr_name.to_be_bytes());
            let attr_len = 2 + 2 + 4 + code.len() + 2 + 2;
            out.extend_from_slice(&(attr_len as u32).to_be_bytes());
            out.extend_from_slice(&2u16.to_be_bytes()); // max_stack
            out.extend_from_slice(&2u16.to_be_bytes()); // max_locals
            out.extend_from_slice(&(code.len() as u32).to_be_bytes());
            out.extend_from_slice(code);
            out.extend_from_slice(&0u16.to_be_bytes()); // exception table
            out.extend_from_slice(&0u16.to_be_bytes()); // code attributes
        }

        out.extend_from_slice(&0u16.to_be_bytes()); // class attributes
        out
    }

    fn utf8(&mut self, value: &str) -> u16 {
        let mut entry = vec![TAG_UTF8];
        entry.extend_from_slice(&(value.len() as u16).to_be_bytes());
        entry.extend_from_slice(value.as_bytes());
        Self::intern(&mut self.pool, entry)
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_idx = self.utf8(name);
        let mut entry = vec![TAG_CLASS];
        entry.extend_from_slice(&name_idx.to_be_bytes());
        Self::intern(&mut self.pool, entry)
    }

    fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name_idx = self.utf8(name);
        let desc_idx = self.utf8(descriptor);
        let mut entry = vec![TAG_NAME_AND_TYPE];
        entry.extend_from_slice(&name_idx.to_be_bytes());
        entry.extend_from_slice(&desc_idx.to_be_bytes());
        Self::intern(&mut self.pool, entry)
    }

    fn member_ref(&mut self, tag: u8, owner: &str, name: &str, descriptor: &str) -> u16 {
        let class_idx = self.class(owner);
        let nt_idx = self.name_and_type(name, descriptor);
        let mut entry = vec![tag];
        entry.extend_from_slice(&class_idx.to_be_bytes());
        entry.extend_from_slice(&nt_idx.to_be_bytes());
        Self::intern(&mut self.pool, entry)
    }

    fn intern(pool: &mut Vec<Vec<u8>>, entry: Vec<u8>) -> u16 {
        if let Some(pos) = pool.iter().position(|e| *e == entry) {
            return (pos + 1) as u16;
        }
        pool.push(entry);
        pool.len() as u16
    }
}

/// `invokestatic` + `return`.
pub fn invokestatic_code(index: u16) -> Vec<u8> {
    let mut code = vec![0xb8];
    code.extend_from_slice(&index.to_be_bytes());
    code.push(0xb1);
    code
}

/// `getstatic` + `pop` + `return`.
pub fn getstatic_code(index: u16) -> Vec<u8> {
    let mut code = vec![0xb2];
    code.extend_from_slice(&index.to_be_bytes());
    code.push(0x57);
    code.push(0xb1);
    code
}
