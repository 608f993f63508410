//! Minimal JVM class file decoder.
//!
//! Parses just enough of the format to recover the declaration shape and
//! the static call / static field-access instructions: constant pool,
//! class identity, member tables and each method's `Code` attribute. All
//! multi-byte values are big-endian per the class file specification.

use crate::classfile::{ClassDecl, MemberDecl, UsageEvent};
use crate::errors::ClassReadError;

const MAGIC: u32 = 0xCAFE_BABE;

/// Decode a single class file.
pub fn read_class(bytes: &[u8]) -> Result<ClassDecl, ClassReadError> {
    let mut cur = Cursor::new(bytes);

    let magic = cur.read_u32()?;
    if magic != MAGIC {
        return Err(ClassReadError::BadMagic(magic));
    }
    cur.skip(4)?; // minor + major version

    let pool = ConstantPool::read(&mut cur)?;

    cur.skip(2)?; // class access flags
    let this_class = cur.read_u16()?;
    let super_class = cur.read_u16()?;
    let name = pool.class_name(this_class)?.to_string();
    // java/lang/Object has no superclass; index 0 is legal there.
    let super_name = if super_class == 0 {
        String::new()
    } else {
        pool.class_name(super_class)?.to_string()
    };

    let interface_count = cur.read_u16()? as usize;
    cur.skip(interface_count * 2)?;

    let mut decl = ClassDecl {
        name,
        super_name,
        ..ClassDecl::default()
    };

    let field_count = cur.read_u16()?;
    for _ in 0..field_count {
        let member = read_member(&mut cur, &pool)?;
        skip_attributes(&mut cur)?;
        decl.fields.push(member);
    }

    let method_count = cur.read_u16()?;
    for _ in 0..method_count {
        let member = read_member(&mut cur, &pool)?;
        read_method_attributes(&mut cur, &pool, &mut decl.events)?;
        decl.methods.push(member);
    }

    // Trailing class attributes are irrelevant here.
    Ok(decl)
}

fn read_member(cur: &mut Cursor, pool: &ConstantPool) -> Result<MemberDecl, ClassReadError> {
    let access = cur.read_u16()?;
    let name = pool.utf8(cur.read_u16()?)?.to_string();
    let descriptor = pool.utf8(cur.read_u16()?)?.to_string();
    Ok(MemberDecl {
        name,
        descriptor,
        access,
    })
}

fn skip_attributes(cur: &mut Cursor) -> Result<(), ClassReadError> {
    let count = cur.read_u16()?;
    for _ in 0..count {
        cur.skip(2)?;
        let len = cur.read_u32()? as usize;
        cur.skip(len)?;
    }
    Ok(())
}

fn read_method_attributes(
    cur: &mut Cursor,
    pool: &ConstantPool,
    events: &mut Vec<UsageEvent>,
) -> Result<(), ClassReadError> {
    let count = cur.read_u16()?;
    for _ in 0..count {
        let name_index = cur.read_u16()?;
        let len = cur.read_u32()? as usize;
        let payload = cur.read_bytes(len)?;
        if pool.utf8(name_index)? == "Code" {
            let mut body = Cursor::new(payload);
            body.skip(4)?; // max_stack + max_locals
            let code_len = body.read_u32()? as usize;
            let code = body.read_bytes(code_len)?;
            scan_code(code, pool, events)?;
            // Exception table and nested attributes are ignored.
        }
    }
    Ok(())
}

/// Walk a method body, emitting usage events for `invokestatic`,
/// `getstatic` and `putstatic`.
fn scan_code(
    code: &[u8],
    pool: &ConstantPool,
    events: &mut Vec<UsageEvent>,
) -> Result<(), ClassReadError> {
    let mut pc = 0usize;
    while pc < code.len() {
        let op = code[pc];
        match op {
            // getstatic / putstatic
            0xb2 | 0xb3 => {
                let index = read_code_u16(code, pc + 1)?;
                let (owner, name, descriptor) = pool.member_ref(index)?;
                events.push(UsageEvent::FieldAccess {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    descriptor: descriptor.to_string(),
                    write: op == 0xb3,
                });
                pc += 3;
            }
            // invokestatic
            0xb8 => {
                let index = read_code_u16(code, pc + 1)?;
                let (owner, name, descriptor) = pool.member_ref(index)?;
                events.push(UsageEvent::StaticCall {
                    owner: owner.to_string(),
                    name: name.to_string(),
                    descriptor: descriptor.to_string(),
                });
                pc += 3;
            }
            // tableswitch: 4-byte aligned default, low, high, then jumps
            0xaa => {
                let base = aligned_base(pc);
                let low = read_code_i32(code, base + 4)? as i64;
                let high = read_code_i32(code, base + 8)? as i64;
                let entries = (high - low + 1).max(0) as usize;
                pc = base + 12 + entries * 4;
            }
            // lookupswitch: 4-byte aligned default, npairs, then pairs
            0xab => {
                let base = aligned_base(pc);
                let npairs = (read_code_i32(code, base + 4)? as i64).max(0) as usize;
                pc = base + 8 + npairs * 8;
            }
            // wide: widened iinc carries two extra operand bytes
            0xc4 => {
                let modified = *code
                    .get(pc + 1)
                    .ok_or(ClassReadError::Truncated { offset: pc + 1 })?;
                pc += if modified == 0x84 { 6 } else { 4 };
            }
            _ => {
                let len = plain_op_len(op).ok_or(ClassReadError::UnknownOpcode { opcode: op, pc })?;
                pc += len;
            }
        }
    }
    Ok(())
}

/// Offset of the first switch operand: padded to the next 4-byte boundary
/// relative to the start of the code array.
fn aligned_base(pc: usize) -> usize {
    let operand = pc + 1;
    operand + ((4 - operand % 4) % 4)
}

/// Instruction length for every fixed-width opcode. `tableswitch`,
/// `lookupswitch` and `wide` are handled by the caller.
fn plain_op_len(op: u8) -> Option<usize> {
    Some(match op {
        0x00..=0x0f => 1,        // nop, consts
        0x10 => 2,               // bipush
        0x11 => 3,               // sipush
        0x12 => 2,               // ldc
        0x13 | 0x14 => 3,        // ldc_w, ldc2_w
        0x15..=0x19 => 2,        // loads with index
        0x1a..=0x35 => 1,        // loads_n, array loads
        0x36..=0x3a => 2,        // stores with index
        0x3b..=0x83 => 1,        // stores_n, array stores, stack, arithmetic
        0x84 => 3,               // iinc
        0x85..=0x98 => 1,        // conversions, comparisons
        0x99..=0xa8 => 3,        // branches, goto, jsr
        0xa9 => 2,               // ret
        0xac..=0xb1 => 1,        // returns
        0xb2..=0xb8 => 3,        // field/method access
        0xb9 | 0xba => 5,        // invokeinterface, invokedynamic
        0xbb => 3,               // new
        0xbc => 2,               // newarray
        0xbd => 3,               // anewarray
        0xbe | 0xbf => 1,        // arraylength, athrow
        0xc0 | 0xc1 => 3,        // checkcast, instanceof
        0xc2 | 0xc3 => 1,        // monitorenter, monitorexit
        0xc5 => 4,               // multianewarray
        0xc6 | 0xc7 => 3,        // ifnull, ifnonnull
        0xc8 | 0xc9 => 5,        // goto_w, jsr_w
        _ => return None,
    })
}

fn read_code_u16(code: &[u8], at: usize) -> Result<u16, ClassReadError> {
    let end = at + 2;
    if end > code.len() {
        return Err(ClassReadError::Truncated { offset: at });
    }
    Ok(u16::from_be_bytes([code[at], code[at + 1]]))
}

fn read_code_i32(code: &[u8], at: usize) -> Result<i32, ClassReadError> {
    let end = at + 4;
    if end > code.len() {
        return Err(ClassReadError::Truncated { offset: at });
    }
    Ok(i32::from_be_bytes([
        code[at],
        code[at + 1],
        code[at + 2],
        code[at + 3],
    ]))
}

/// Constant pool entries the detector resolves; everything else is parsed
/// for its width and dropped.
#[derive(Debug)]
enum Constant {
    Utf8(String),
    Class { name_index: u16 },
    MemberRef { class_index: u16, nt_index: u16 },
    NameAndType { name_index: u16, desc_index: u16 },
    Other,
    /// Second slot of a long or double entry.
    Reserved,
}

struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn read(cur: &mut Cursor) -> Result<Self, ClassReadError> {
        let count = cur.read_u16()?;
        // Index 0 is unused by the format.
        let mut entries = Vec::with_capacity(count as usize);
        entries.push(Constant::Other);

        let mut index = 1u16;
        while index < count {
            let tag = cur.read_u8()?;
            let entry = match tag {
                1 => {
                    let len = cur.read_u16()? as usize;
                    let raw = cur.read_bytes(len)?;
                    Constant::Utf8(String::from_utf8_lossy(raw).into_owned())
                }
                7 => Constant::Class {
                    name_index: cur.read_u16()?,
                },
                9 | 10 | 11 => Constant::MemberRef {
                    class_index: cur.read_u16()?,
                    nt_index: cur.read_u16()?,
                },
                12 => Constant::NameAndType {
                    name_index: cur.read_u16()?,
                    desc_index: cur.read_u16()?,
                },
                8 | 16 | 19 | 20 => {
                    cur.skip(2)?;
                    Constant::Other
                }
                3 | 4 | 17 | 18 => {
                    cur.skip(4)?;
                    Constant::Other
                }
                15 => {
                    cur.skip(3)?;
                    Constant::Other
                }
                5 | 6 => {
                    cur.skip(8)?;
                    Constant::Other
                }
                _ => return Err(ClassReadError::UnknownConstantTag { tag, index }),
            };
            let two_slots = matches!(tag, 5 | 6);
            entries.push(entry);
            if two_slots {
                entries.push(Constant::Reserved);
                index += 1;
            }
            index += 1;
        }
        Ok(Self { entries })
    }

    fn entry(&self, index: u16) -> Result<&Constant, ClassReadError> {
        self.entries
            .get(index as usize)
            .ok_or(ClassReadError::BadConstantIndex(index))
    }

    fn utf8(&self, index: u16) -> Result<&str, ClassReadError> {
        match self.entry(index)? {
            Constant::Utf8(s) => Ok(s),
            _ => Err(ClassReadError::WrongConstantType {
                index,
                expected: "Utf8",
            }),
        }
    }

    fn class_name(&self, index: u16) -> Result<&str, ClassReadError> {
        match self.entry(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassReadError::WrongConstantType {
                index,
                expected: "Class",
            }),
        }
    }

    /// Resolve a field/method reference into (owner, name, descriptor).
    fn member_ref(&self, index: u16) -> Result<(&str, &str, &str), ClassReadError> {
        match self.entry(index)? {
            Constant::MemberRef {
                class_index,
                nt_index,
            } => {
                let owner = self.class_name(*class_index)?;
                let (name, descriptor) = match self.entry(*nt_index)? {
                    Constant::NameAndType {
                        name_index,
                        desc_index,
                    } => (self.utf8(*name_index)?, self.utf8(*desc_index)?),
                    _ => {
                        return Err(ClassReadError::WrongConstantType {
                            index: *nt_index,
                            expected: "NameAndType",
                        })
                    }
                };
                Ok((owner, name, descriptor))
            }
            _ => Err(ClassReadError::WrongConstantType {
                index,
                expected: "MemberRef",
            }),
        }
    }
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ClassReadError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(ClassReadError::Truncated { offset: self.pos })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassReadError> {
        self.read_bytes(len).map(|_| ())
    }

    fn read_u8(&mut self) -> Result<u8, ClassReadError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, ClassReadError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, ClassReadError> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
