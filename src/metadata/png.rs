use crate::error::MetadataError;
use flate2::read::ZlibDecoder;
use std::io::Read;
use tracing::warn;

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// One keyword/text pair found in a PNG text chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub keyword: String,
    pub text: String,
}

/// Walks the chunk stream of a PNG file and decodes every text chunk.
///
/// Chunks with a bad CRC are dropped with a warning. Reading stops at the first
/// `IDAT` or `IEND`, so a file with cut-off image data still yields its text.
pub fn text_chunks(bytes: &[u8]) -> Result<Vec<TextChunk>, MetadataError> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        return Err(MetadataError::NotPng);
    }

    let mut chunks = Vec::new();
    let mut offset = SIGNATURE.len();

    while offset < bytes.len() {
        let header = bytes
            .get(offset..offset + 8)
            .ok_or_else(|| MetadataError::Truncated {
                chunk: "<header>".to_string(),
            })?;
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let chunk_type = &header[4..8];
        if chunk_type == b"IDAT" || chunk_type == b"IEND" {
            break;
        }
        let name = String::from_utf8_lossy(chunk_type).into_owned();

        let data_start = offset + 8;
        let data_end = data_start
            .checked_add(length)
            .ok_or_else(|| MetadataError::Truncated {
                chunk: name.clone(),
            })?;
        let crc_bytes = bytes
            .get(data_end..data_end + 4)
            .ok_or_else(|| MetadataError::Truncated {
                chunk: name.clone(),
            })?;
        let data = &bytes[data_start..data_end];
        offset = data_end + 4;

        if !matches!(chunk_type, b"tEXt" | b"zTXt" | b"iTXt") {
            continue;
        }

        let stored_crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(chunk_type);
        hasher.update(data);
        if hasher.finalize() != stored_crc {
            warn!(chunk = %name, "dropping text chunk with bad CRC");
            continue;
        }

        let decoded = match chunk_type {
            b"tEXt" => decode_text(data),
            b"zTXt" => decode_ztxt(data)?,
            _ => decode_itxt(data)?,
        };
        if let Some(chunk) = decoded {
            chunks.push(chunk);
        }
    }

    Ok(chunks)
}

/// `keyword NUL text`, both Latin-1.
fn decode_text(data: &[u8]) -> Option<TextChunk> {
    let (keyword, text) = split_keyword(data)?;
    Some(TextChunk {
        keyword: latin1(keyword),
        text: latin1(text),
    })
}

/// `keyword NUL method compressed-text`, Latin-1 after inflating.
fn decode_ztxt(data: &[u8]) -> Result<Option<TextChunk>, MetadataError> {
    let Some((keyword, rest)) = split_keyword(data) else {
        return Ok(None);
    };
    let keyword = latin1(keyword);
    let Some((_method, compressed)) = rest.split_first() else {
        return Ok(None);
    };
    let text = inflate(compressed, &keyword)?;
    Ok(Some(TextChunk {
        text: latin1(&text),
        keyword,
    }))
}

/// `keyword NUL flag method language NUL translated NUL text`, text in UTF-8.
fn decode_itxt(data: &[u8]) -> Result<Option<TextChunk>, MetadataError> {
    let Some((keyword, rest)) = split_keyword(data) else {
        return Ok(None);
    };
    let keyword = latin1(keyword);
    let [flag, _method, rest @ ..] = rest else {
        return Ok(None);
    };
    let Some((_language, rest)) = split_keyword(rest) else {
        return Ok(None);
    };
    let Some((_translated, text)) = split_keyword(rest) else {
        return Ok(None);
    };
    let text = if *flag == 1 {
        inflate(text, &keyword)?
    } else {
        text.to_vec()
    };
    Ok(Some(TextChunk {
        text: String::from_utf8_lossy(&text).into_owned(),
        keyword,
    }))
}

fn split_keyword(data: &[u8]) -> Option<(&[u8], &[u8])> {
    let nul = data.iter().position(|&b| b == 0)?;
    Some((&data[..nul], &data[nul + 1..]))
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn inflate(compressed: &[u8], keyword: &str) -> Result<Vec<u8>, MetadataError> {
    let mut out = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut out)
        .map_err(|e| MetadataError::Decompress {
            keyword: keyword.to_string(),
            message: e.to_string(),
        })?;
    Ok(out)
}
