//! NBT encoding.

use crate::{NbtCompound, NbtList, NbtValue, tag_type};

impl NbtCompound {
    /// Serialize as a named root compound (type byte + name + content),
    /// the layout used by `level.dat` and region chunks.
    #[must_use]
    pub fn to_bytes(&self, name: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(tag_type::COMPOUND);
        write_nbt_string(&mut buf, name);
        self.write_content(&mut buf);
        buf
    }

    /// Write compound content (entries + end tag)
    fn write_content(&self, buf: &mut Vec<u8>) {
        for (name, value) in self.iter() {
            value.write_named(buf, name);
        }
        buf.push(tag_type::END);
    }
}

impl NbtValue {
    /// Write a named tag (type + name + value)
    fn write_named(&self, buf: &mut Vec<u8>, name: &str) {
        buf.push(self.type_id());
        write_nbt_string(buf, name);
        self.write_content(buf);
    }

    /// Write the tag content (no type, no name)
    fn write_content(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Byte(v) => buf.push(*v as u8),
            Self::Short(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Self::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Self::Long(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Self::Float(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Self::Double(v) => buf.extend_from_slice(&v.to_be_bytes()),
            Self::ByteArray(v) => write_byte_array(buf, v),
            Self::String(v) => write_nbt_string(buf, v),
            Self::List(list) => list.write_content(buf),
            Self::Compound(compound) => compound.write_content(buf),
            Self::IntArray(v) => write_int_array(buf, v),
            Self::LongArray(v) => write_long_array(buf, v),
        }
    }
}

impl NbtList {
    /// Write list content (element type + length + elements)
    fn write_content(&self, buf: &mut Vec<u8>) {
        buf.push(self.element_type_id());
        write_len(buf, self.len());

        match self {
            Self::Empty => {}
            Self::Byte(v) => buf.extend(v.iter().map(|b| *b as u8)),
            Self::Short(v) => v.iter().for_each(|s| buf.extend_from_slice(&s.to_be_bytes())),
            Self::Int(v) => v.iter().for_each(|i| buf.extend_from_slice(&i.to_be_bytes())),
            Self::Long(v) => v.iter().for_each(|l| buf.extend_from_slice(&l.to_be_bytes())),
            Self::Float(v) => v.iter().for_each(|f| buf.extend_from_slice(&f.to_be_bytes())),
            Self::Double(v) => v.iter().for_each(|d| buf.extend_from_slice(&d.to_be_bytes())),
            Self::ByteArray(v) => v.iter().for_each(|arr| write_byte_array(buf, arr)),
            Self::String(v) => v.iter().for_each(|s| write_nbt_string(buf, s)),
            Self::List(v) => v.iter().for_each(|list| list.write_content(buf)),
            Self::Compound(v) => v.iter().for_each(|c| c.write_content(buf)),
            Self::IntArray(v) => v.iter().for_each(|arr| write_int_array(buf, arr)),
            Self::LongArray(v) => v.iter().for_each(|arr| write_long_array(buf, arr)),
        }
    }
}

fn write_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as i32).to_be_bytes());
}

fn write_byte_array(buf: &mut Vec<u8>, v: &[i8]) {
    write_len(buf, v.len());
    buf.extend(v.iter().map(|b| *b as u8));
}

fn write_int_array(buf: &mut Vec<u8>, v: &[i32]) {
    write_len(buf, v.len());
    for i in v {
        buf.extend_from_slice(&i.to_be_bytes());
    }
}

fn write_long_array(buf: &mut Vec<u8>, v: &[i64]) {
    write_len(buf, v.len());
    for l in v {
        buf.extend_from_slice(&l.to_be_bytes());
    }
}

/// Write an NBT string (u16 length + modified UTF-8)
fn write_nbt_string(buf: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    buf.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
    buf.extend_from_slice(bytes);
}
