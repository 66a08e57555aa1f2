//! NBT decoding.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::{NbtCompound, NbtError, NbtList, NbtValue, Result, tag_type};

/// Maximum compound/list nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 512;

/// Read a named root compound, returning its name and content.
pub fn read_named<R: Read>(reader: &mut R) -> Result<(String, NbtCompound)> {
    let ty = reader.read_u8()?;
    if ty != tag_type::COMPOUND {
        return Err(NbtError::RootNotCompound(ty));
    }
    let name = read_nbt_string(reader)?;
    let compound = read_compound(reader, 0)?;
    Ok((name, compound))
}

/// Read a named root compound, discarding its (usually empty) name.
pub fn read_root<R: Read>(reader: &mut R) -> Result<NbtCompound> {
    read_named(reader).map(|(_, compound)| compound)
}

fn read_compound<R: Read>(reader: &mut R, depth: usize) -> Result<NbtCompound> {
    if depth >= MAX_DEPTH {
        return Err(NbtError::TooDeep(MAX_DEPTH));
    }
    let mut entries = Vec::new();
    loop {
        let ty = reader.read_u8()?;
        if ty == tag_type::END {
            break;
        }
        let name = read_nbt_string(reader)?;
        let value = read_value(reader, ty, depth + 1)?;
        entries.push((name, value));
    }
    Ok(NbtCompound::from_entries(entries))
}

fn read_value<R: Read>(reader: &mut R, ty: u8, depth: usize) -> Result<NbtValue> {
    let value = match ty {
        tag_type::BYTE => NbtValue::Byte(reader.read_i8()?),
        tag_type::SHORT => NbtValue::Short(reader.read_i16::<BigEndian>()?),
        tag_type::INT => NbtValue::Int(reader.read_i32::<BigEndian>()?),
        tag_type::LONG => NbtValue::Long(reader.read_i64::<BigEndian>()?),
        tag_type::FLOAT => NbtValue::Float(reader.read_f32::<BigEndian>()?),
        tag_type::DOUBLE => NbtValue::Double(reader.read_f64::<BigEndian>()?),
        tag_type::BYTE_ARRAY => NbtValue::ByteArray(read_byte_array(reader)?),
        tag_type::STRING => NbtValue::String(read_nbt_string(reader)?),
        tag_type::LIST => NbtValue::List(read_list(reader, depth)?),
        tag_type::COMPOUND => NbtValue::Compound(read_compound(reader, depth)?),
        tag_type::INT_ARRAY => NbtValue::IntArray(read_int_array(reader)?),
        tag_type::LONG_ARRAY => NbtValue::LongArray(read_long_array(reader)?),
        other => return Err(NbtError::InvalidTagType(other)),
    };
    Ok(value)
}

fn read_list<R: Read>(reader: &mut R, depth: usize) -> Result<NbtList> {
    if depth >= MAX_DEPTH {
        return Err(NbtError::TooDeep(MAX_DEPTH));
    }
    let ty = reader.read_u8()?;
    let len = read_len(reader)?;

    // Some writers emit an END element type with a non-zero length for empty lists
    if len == 0 || ty == tag_type::END {
        return Ok(NbtList::Empty);
    }

    let list = match ty {
        tag_type::BYTE => NbtList::Byte(collect(len, || Ok(reader.read_i8()?))?),
        tag_type::SHORT => NbtList::Short(collect(len, || Ok(reader.read_i16::<BigEndian>()?))?),
        tag_type::INT => NbtList::Int(collect(len, || Ok(reader.read_i32::<BigEndian>()?))?),
        tag_type::LONG => NbtList::Long(collect(len, || Ok(reader.read_i64::<BigEndian>()?))?),
        tag_type::FLOAT => NbtList::Float(collect(len, || Ok(reader.read_f32::<BigEndian>()?))?),
        tag_type::DOUBLE => {
            NbtList::Double(collect(len, || Ok(reader.read_f64::<BigEndian>()?))?)
        }
        tag_type::BYTE_ARRAY => NbtList::ByteArray(collect(len, || read_byte_array(reader))?),
        tag_type::STRING => NbtList::String(collect(len, || read_nbt_string(reader))?),
        tag_type::LIST => NbtList::List(collect(len, || read_list(reader, depth + 1))?),
        tag_type::COMPOUND => {
            NbtList::Compound(collect(len, || read_compound(reader, depth + 1))?)
        }
        tag_type::INT_ARRAY => NbtList::IntArray(collect(len, || read_int_array(reader))?),
        tag_type::LONG_ARRAY => NbtList::LongArray(collect(len, || read_long_array(reader))?),
        other => return Err(NbtError::InvalidTagType(other)),
    };
    Ok(list)
}

/// Run `next` `len` times. Capacity is capped so a corrupt length prefix
/// fails on EOF instead of allocating up front.
fn collect<T>(len: usize, mut next: impl FnMut() -> Result<T>) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(len.min(4096));
    for _ in 0..len {
        out.push(next()?);
    }
    Ok(out)
}

fn read_len<R: Read>(reader: &mut R) -> Result<usize> {
    let len = reader.read_i32::<BigEndian>()?;
    usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))
}

fn read_byte_array<R: Read>(reader: &mut R) -> Result<Vec<i8>> {
    let len = read_len(reader)?;
    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(NbtError::Io(std::io::ErrorKind::UnexpectedEof.into()));
    }
    Ok(bytes.into_iter().map(|b| b as i8).collect())
}

fn read_int_array<R: Read>(reader: &mut R) -> Result<Vec<i32>> {
    let len = read_len(reader)?;
    collect(len, || Ok(reader.read_i32::<BigEndian>()?))
}

fn read_long_array<R: Read>(reader: &mut R) -> Result<Vec<i64>> {
    let len = read_len(reader)?;
    collect(len, || Ok(reader.read_i64::<BigEndian>()?))
}

/// Read an NBT string (u16 length + modified UTF-8)
fn read_nbt_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u16::<BigEndian>()? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    // Modified UTF-8 only differs from UTF-8 for NUL and surrogate pairs,
    // neither of which appear in ids or names we read.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nbt;

    #[test]
    fn test_read_what_was_written() {
        let compound = nbt! {
            "id" => "TileEntityBarrel",
            "x" => -12i32,
            "y" => 64i32,
            "z" => 300i32,
            "storage" => nbt! {
                "current_item" => nbt! {
                    "id" => 4i16,
                    "Damage" => 0i16,
                    "Count" => 64i8,
                },
            },
            "Heights" => NbtValue::IntArray(vec![1, 2, 3]),
            "Blocks" => NbtValue::ByteArray(vec![-1, 0, 1]),
            "States" => NbtValue::LongArray(vec![i64::MIN, i64::MAX]),
            "Pos" => NbtList::Double(vec![1.0, 2.5]),
            "Children" => vec![nbt! { "a" => 1i8 }, nbt! { "a" => 2i8 }],
            "Nothing" => NbtList::Empty,
        };

        let bytes = compound.to_bytes("Level");
        let (name, decoded) = read_named(&mut bytes.as_slice()).unwrap();

        assert_eq!(name, "Level");
        assert_eq!(decoded, compound);
    }

    #[test]
    fn test_root_must_be_compound() {
        // TAG_Int named "a"
        let bytes = [tag_type::INT, 0, 1, b'a', 0, 0, 0, 1];
        let err = read_root(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, NbtError::RootNotCompound(3)));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = nbt! { "name" => "truncated" }.to_bytes("");
        let short = &bytes[..bytes.len() - 3];
        let err = read_root(&mut &short[..]).unwrap_err();
        assert!(matches!(err, NbtError::Io(_)));
    }

    #[test]
    fn test_invalid_tag_type() {
        // Root compound containing a tag of type 99
        let bytes = [tag_type::COMPOUND, 0, 0, 99, 0, 1, b'q', 0];
        let err = read_root(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, NbtError::InvalidTagType(99)));
    }

    #[test]
    fn test_negative_array_length() {
        let mut bytes = vec![tag_type::COMPOUND, 0, 0, tag_type::INT_ARRAY, 0, 1, b'a'];
        bytes.extend_from_slice(&(-5i32).to_be_bytes());
        let err = read_root(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, NbtError::NegativeLength(-5)));
    }

    #[test]
    fn test_depth_limit() {
        // Root compound followed by MAX_DEPTH nested compounds named ""
        let mut bytes = vec![tag_type::COMPOUND, 0, 0];
        for _ in 0..MAX_DEPTH {
            bytes.extend_from_slice(&[tag_type::COMPOUND, 0, 0]);
        }
        let err = read_root(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, NbtError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn test_end_typed_list_is_empty() {
        let mut bytes = vec![tag_type::COMPOUND, 0, 0, tag_type::LIST, 0, 1, b'l', tag_type::END];
        bytes.extend_from_slice(&3i32.to_be_bytes());
        bytes.push(tag_type::END);
        let root = read_root(&mut bytes.as_slice()).unwrap();
        assert_eq!(root.get_list("l"), Some(&NbtList::Empty));
    }
}
