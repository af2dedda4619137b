use anyhow::{Context, bail};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume a `<type> <size>\0` frame header, returning the type and declared body size
    pub fn read_header(reader: &mut impl BufRead) -> anyhow::Result<(ObjectType, usize)> {
        let object_type = read_field(reader, b' ')?;
        let object_type = ObjectType::try_from(object_type.as_str())?;

        let size = read_field(reader, b'\0')?;
        let size = size
            .parse::<usize>()
            .with_context(|| format!("Invalid object size: {size}"))?;

        Ok((object_type, size))
    }
}

fn read_field(reader: &mut impl BufRead, terminator: u8) -> anyhow::Result<String> {
    let mut field = Vec::new();
    reader.read_until(terminator, &mut field)?;

    if field.pop() != Some(terminator) {
        bail!("Truncated object header");
    }

    Ok(String::from_utf8(field)?)
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => bail!("Invalid object type: {value}"),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
