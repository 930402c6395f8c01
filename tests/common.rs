//! Common test utilities for building workflow graphs and PNG files.
use flate2::Compression;
use flate2::write::ZlibEncoder;
use promptgraph::prelude::*;
use serde_json::{Value, json};
use std::io::Write;

/// An editor node record with the given declared input names.
#[allow(dead_code)]
pub fn node(id: i64, type_tag: &str, inputs: &[&str], widgets: Value) -> Value {
    let inputs: Vec<Value> = inputs
        .iter()
        .map(|name| json!({ "name": name, "type": "ANY", "link": null }))
        .collect();
    json!({
        "id": id,
        "type": type_tag,
        "pos": [0, 0],
        "inputs": inputs,
        "widgets_values": widgets,
    })
}

/// A link record in the array form: `[id, source, 0, target, target_slot, type]`.
#[allow(dead_code)]
pub fn link(id: i64, source: i64, target: i64, target_slot: usize) -> Value {
    json!([id, source, 0, target, target_slot, "CONDITIONING"])
}

#[allow(dead_code)]
pub fn editor(nodes: Vec<Value>, links: Vec<Value>) -> WorkflowDocument {
    WorkflowDocument::from_value(json!({ "nodes": nodes, "links": links }))
        .expect("fixture should be a valid editor document")
}

#[allow(dead_code)]
pub fn resolve(document: &WorkflowDocument) -> ResolvedPrompts {
    PromptResolver::default()
        .resolve_observed(document, &mut NoopObserver)
        .expect("fixture should resolve")
}

/// A classic text-to-image graph.
///
/// `CLIPTextEncode(6) -> KSampler(3).positive`, `CLIPTextEncode(7) -> KSampler(3).negative`,
/// `KSampler(3) -> VAEDecode(8) -> SaveImage(9)`.
#[allow(dead_code)]
pub fn create_ksampler_flow() -> (Vec<Value>, Vec<Value>) {
    let nodes = vec![
        node(6, "CLIPTextEncode", &["clip"], json!(["  a red fox in the snow  "])),
        node(7, "CLIPTextEncode", &["clip"], json!(["blurry, low quality"])),
        node(
            3,
            "KSampler",
            &["model", "positive", "negative", "latent_image"],
            json!([156680208700286u64, "randomize", 20, 8, "euler", "normal", 1]),
        ),
        node(8, "VAEDecode", &["samples", "vae"], json!([])),
        node(9, "SaveImage", &["images"], json!(["ComfyUI"])),
    ];
    let links = vec![
        link(1, 6, 3, 1),
        link(2, 7, 3, 2),
        link(3, 3, 8, 0),
        link(4, 8, 9, 0),
    ];
    (nodes, links)
}

/// Two wired pos/neg samplers. Sampler 10 comes first in node order but is orphaned;
/// sampler 20 feeds `VAEDecode(23) -> SaveImage(24)`.
#[allow(dead_code)]
pub fn create_two_sampler_flow() -> (Vec<Value>, Vec<Value>) {
    let sampler_inputs = ["model", "positive", "negative", "latent_image"];
    let nodes = vec![
        node(10, "KSampler", &sampler_inputs, json!([])),
        node(11, "CLIPTextEncode", &["clip"], json!(["orphan positive"])),
        node(12, "CLIPTextEncode", &["clip"], json!(["orphan negative"])),
        node(20, "ClownsharKSampler_Beta", &sampler_inputs, json!([])),
        node(21, "TextEncodeQwenImageEdit", &["clip"], json!(["live positive"])),
        node(22, "TextEncodeQwenImageEdit", &["clip"], json!(["live negative"])),
        node(23, "VAEDecode", &["samples", "vae"], json!([])),
        node(24, "SaveImage", &["images"], json!(["out"])),
    ];
    let links = vec![
        link(1, 11, 10, 1),
        link(2, 12, 10, 2),
        link(3, 21, 20, 1),
        link(4, 22, 20, 2),
        link(5, 20, 23, 0),
        link(6, 23, 24, 0),
    ];
    (nodes, links)
}

/// A video graph where the sampler takes aggregated `text_embeds` from a bridge.
///
/// `CLIPTextEncode(31) -> Bridge(33).positive`, `CLIPTextEncode(32) -> Bridge(33).negative`,
/// `Bridge(33) -> WanVideoSampler(34).text_embeds`, `WanVideoSampler(34) -> WanVideoDecode(35)`.
#[allow(dead_code)]
pub fn create_bridge_flow() -> (Vec<Value>, Vec<Value>) {
    let nodes = vec![
        node(31, "CLIPTextEncode", &["clip"], json!(["graffiti mural comes alive"])),
        node(32, "CLIPTextEncode", &["clip"], json!(["static, watermark"])),
        node(33, "WanVideoTextEmbedBridge", &["positive", "negative"], json!([])),
        node(
            34,
            "WanVideoSampler",
            &["model", "image_embeds", "text_embeds", "samples"],
            json!([30, 6.0, 5.0]),
        ),
        node(35, "WanVideoDecode", &["vae", "samples"], json!([])),
    ];
    let links = vec![
        link(40, 31, 33, 0),
        link(41, 32, 33, 1),
        link(42, 33, 34, 2),
        link(43, 34, 35, 1),
    ];
    (nodes, links)
}

/// A flat, id-keyed document as submitted for execution.
#[allow(dead_code)]
pub fn create_api_flow() -> Value {
    json!({
        "11": { "class_type": "LoadWanVideoT5TextEncoder", "inputs": { "model_name": "umt5-xxl" } },
        "16": {
            "class_type": "WanVideoTextEncode",
            "inputs": {
                "positive_prompt": "  a woman levitates above a lake ",
                "negative_prompt": "bad hands",
                "t5": ["11", 0]
            }
        },
        "27": { "class_type": "WanVideoSampler", "inputs": { "text_embeds": ["16", 0] } }
    })
}

// --- PNG construction ---

#[allow(dead_code)]
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// A raw chunk: length, type, data, CRC over type and data.
#[allow(dead_code)]
pub fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);

    let mut chunk = Vec::with_capacity(data.len() + 12);
    chunk.extend_from_slice(&(data.len() as u32).to_be_bytes());
    chunk.extend_from_slice(kind);
    chunk.extend_from_slice(data);
    chunk.extend_from_slice(&hasher.finalize().to_be_bytes());
    chunk
}

#[allow(dead_code)]
pub fn text_chunk(keyword: &str, text: &str) -> Vec<u8> {
    let mut data = keyword.as_bytes().to_vec();
    data.push(0);
    data.extend_from_slice(text.as_bytes());
    png_chunk(b"tEXt", &data)
}

#[allow(dead_code)]
pub fn ztxt_chunk(keyword: &str, text: &str) -> Vec<u8> {
    let mut data = keyword.as_bytes().to_vec();
    data.push(0);
    data.push(0);
    data.extend_from_slice(&zlib(text.as_bytes()));
    png_chunk(b"zTXt", &data)
}

#[allow(dead_code)]
pub fn itxt_chunk(keyword: &str, text: &str, compressed: bool) -> Vec<u8> {
    let mut data = keyword.as_bytes().to_vec();
    data.extend_from_slice(&[0, compressed as u8, 0]);
    data.extend_from_slice(b"en\0");
    data.push(0);
    if compressed {
        data.extend_from_slice(&zlib(text.as_bytes()));
    } else {
        data.extend_from_slice(text.as_bytes());
    }
    png_chunk(b"iTXt", &data)
}

/// A minimal 1x1 PNG with the given chunks placed between `IHDR` and `IEND`.
#[allow(dead_code)]
pub fn png_with_chunks(chunks: &[Vec<u8>]) -> Vec<u8> {
    let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0];
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend(png_chunk(b"IHDR", &ihdr));
    for chunk in chunks {
        bytes.extend_from_slice(chunk);
    }
    bytes.extend(png_chunk(b"IEND", &[]));
    bytes
}

#[allow(dead_code)]
fn zlib(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("in-memory write");
    encoder.finish().expect("in-memory finish")
}
