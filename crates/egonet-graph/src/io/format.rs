//! Binary graph files (`.egr`).
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! magic      b"EGR1"
//! version    u32                 (currently 1)
//! num_nodes  u64
//! nnz        u64                 (directed entries, 2 x edges)
//! row_ptr    (num_nodes + 1) x u64
//! col_idx    nnz x u32
//! labels     num_nodes x { present: u8, [len: u32, bytes] }
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use bytemuck::{Pod, Zeroable};

use crate::models::{CsrMatrix, Graph};
use crate::{GraphError, Result};

const MAGIC: [u8; 4] = *b"EGR1";
const VERSION: u32 = 1;

/// Conversion of a node label to and from its on-disk bytes.
pub trait LabelCodec: Sized {
    /// Append the encoded label to `out`.
    fn encode(&self, out: &mut Vec<u8>);

    /// Decode a label from exactly the bytes written by [`LabelCodec::encode`].
    fn decode(bytes: &[u8]) -> Result<Self>;
}

impl LabelCodec for Vec<u8> {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl LabelCodec for String {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| GraphError::InvalidFormat(format!("label is not UTF-8: {}", e)))
    }
}

impl LabelCodec for () {
    fn encode(&self, _out: &mut Vec<u8>) {}

    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            Ok(())
        } else {
            Err(GraphError::InvalidFormat(format!(
                "expected empty label, got {} bytes",
                bytes.len()
            )))
        }
    }
}

macro_rules! int_label_codec {
    ($($ty:ty),*) => {
        $(
            impl LabelCodec for $ty {
                fn encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn decode(bytes: &[u8]) -> Result<Self> {
                    let raw: [u8; std::mem::size_of::<$ty>()] = bytes.try_into().map_err(|_| {
                        GraphError::InvalidFormat(format!(
                            "expected {} label bytes, got {}",
                            std::mem::size_of::<$ty>(),
                            bytes.len()
                        ))
                    })?;
                    Ok(<$ty>::from_le_bytes(raw))
                }
            }
        )*
    };
}

int_label_codec!(u32, u64);

/// Serialize `graph` to `writer`.
pub fn write_graph<W, L>(writer: &mut W, graph: &Graph<L>) -> Result<()>
where
    W: Write,
    L: LabelCodec,
{
    let adj = graph.adjacency();

    writer.write_all(&MAGIC)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(adj.num_rows as u64).to_le_bytes())?;
    writer.write_all(&(adj.col_idx.len() as u64).to_le_bytes())?;
    for &offset in &adj.row_ptr {
        writer.write_all(&offset.to_le_bytes())?;
    }
    for &col in &adj.col_idx {
        writer.write_all(&col.to_le_bytes())?;
    }

    let mut buf = Vec::new();
    for label in graph.labels() {
        match label {
            Some(label) => {
                buf.clear();
                label.encode(&mut buf);
                let len = u32::try_from(buf.len()).map_err(|_| {
                    GraphError::InvalidFormat(format!("label of {} bytes too large", buf.len()))
                })?;
                writer.write_all(&[1])?;
                writer.write_all(&len.to_le_bytes())?;
                writer.write_all(&buf)?;
            }
            None => writer.write_all(&[0])?,
        }
    }

    Ok(())
}

/// Deserialize a graph from `reader`.
pub fn read_graph<R, L>(reader: &mut R) -> Result<Graph<L>>
where
    R: Read,
    L: LabelCodec,
{
    let mut magic = [0u8; 4];
    read_exact(reader, &mut magic)?;
    if magic != MAGIC {
        return Err(GraphError::InvalidFormat(format!("bad magic {:?}", magic)));
    }

    let version = read_u32(reader)?;
    if version != VERSION {
        return Err(GraphError::InvalidFormat(format!(
            "unsupported version {}",
            version
        )));
    }

    let num_nodes = read_u64(reader)?;
    if num_nodes >= u32::MAX as u64 {
        return Err(GraphError::InvalidFormat(format!(
            "node count {} exceeds index range",
            num_nodes
        )));
    }
    let num_nodes = num_nodes as usize;
    let nnz = usize::try_from(read_u64(reader)?)
        .map_err(|_| GraphError::InvalidFormat("edge count exceeds address space".to_string()))?;

    let mut row_ptr: Vec<u64> = zeroed(num_nodes + 1, "row pointers")?;
    read_pod_slice(reader, &mut row_ptr, u64::from_le)?;
    let mut col_idx: Vec<u32> = zeroed(nnz, "column indices")?;
    read_pod_slice(reader, &mut col_idx, u32::from_le)?;

    let adjacency = CsrMatrix {
        num_rows: num_nodes,
        row_ptr,
        col_idx,
    };

    let mut labels = Vec::new();
    labels
        .try_reserve_exact(num_nodes)
        .map_err(|_| GraphError::AllocationFailure {
            what: "labels",
            requested: num_nodes,
        })?;
    let mut buf = Vec::new();
    for _ in 0..num_nodes {
        let mut present = [0u8; 1];
        read_exact(reader, &mut present)?;
        match present[0] {
            0 => labels.push(None),
            1 => {
                let len = read_u32(reader)?;
                buf.clear();
                // Grows with the bytes actually present, not the declared length.
                reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
                if buf.len() != len as usize {
                    return Err(GraphError::InvalidFormat(
                        "unexpected end of file".to_string(),
                    ));
                }
                labels.push(Some(L::decode(&buf)?));
            }
            other => {
                return Err(GraphError::InvalidFormat(format!(
                    "bad label marker {}",
                    other
                )))
            }
        }
    }

    // Also validates the adjacency.
    Graph::from_parts(adjacency, labels)
}

/// Write `graph` to the file at `path`.
///
/// The bytes go to a sibling `.tmp` file that is renamed over `path` once
/// complete, so `path` never holds a partial graph.
pub fn save<L: LabelCodec>(path: impl AsRef<Path>, graph: &Graph<L>) -> Result<()> {
    let path = path.as_ref();
    let tmp = temp_path(path);

    let result =
        write_file(&tmp, graph).and_then(|()| fs::rename(&tmp, path).map_err(GraphError::from));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_file<L: LabelCodec>(path: &Path, graph: &Graph<L>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_graph(&mut writer, graph)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read a graph from the file at `path`.
pub fn load<L: LabelCodec>(path: impl AsRef<Path>) -> Result<Graph<L>> {
    let mut reader = BufReader::new(File::open(path)?);
    read_graph(&mut reader)
}

fn zeroed<T: Pod>(len: usize, what: &'static str) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| GraphError::AllocationFailure {
            what,
            requested: len,
        })?;
    v.resize(len, <T as Zeroable>::zeroed());
    Ok(v)
}

/// Fill `values` straight from the stream, then convert from little-endian
/// (a no-op on little-endian targets).
fn read_pod_slice<R: Read, T: Pod>(
    reader: &mut R,
    values: &mut [T],
    from_le: fn(T) -> T,
) -> Result<()> {
    read_exact(reader, bytemuck::cast_slice_mut(values))?;
    for v in values.iter_mut() {
        *v = from_le(*v);
    }
    Ok(())
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            GraphError::InvalidFormat("unexpected end of file".to_string())
        } else {
            GraphError::Io(e)
        }
    })
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut raw = [0u8; 4];
    read_exact(reader, &mut raw)?;
    Ok(u32::from_le_bytes(raw))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    let mut raw = [0u8; 8];
    read_exact(reader, &mut raw)?;
    Ok(u64::from_le_bytes(raw))
}
